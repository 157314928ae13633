//! Memory Calculator
//!
//! Turns an estimated architecture and a workload into a per-component VRAM
//! breakdown in gigabytes (2^30 bytes).

use serde::{Deserialize, Serialize};

use crate::architecture::ModelSpecs;
use crate::options::{Mode, OptimizerKind, Precision};

// ============================================================
// Constants
// ============================================================
/// Bytes in one reported gigabyte.
pub const BYTES_PER_GB: f64 = 1_073_741_824.0;

/// Key and value tensors are cached separately.
const KV_TENSORS: f64 = 2.0;

/// KV cache is priced at half precision whatever the weight format.
const KV_BYTES_PER_ELEMENT: f64 = 2.0;

/// Gradients are kept in fp32.
const GRADIENT_BYTES_PER_PARAM: f64 = 4.0;

/// Full fine-tuning activation bytes per (token, hidden unit, layer).
const FULL_ACTIVATION_MULTIPLIER: f64 = 12.0;
const FULL_ACTIVATION_MULTIPLIER_CHECKPOINTED: f64 = 2.0;

/// Adapter training with checkpointing; without it the multiplier is layers / 2.
const ADAPTER_ACTIVATION_MULTIPLIER_CHECKPOINTED: f64 = 1.5;

/// Workload knobs that, together with a [`ModelSpecs`], fix the estimate.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkloadConfig {
    pub mode: Mode,
    pub precision: Precision,
    /// Tokens of context.
    pub sequence_length: u64,
    pub batch_size: u64,
    /// Ignored in inference.
    pub optimizer: OptimizerKind,
    pub grad_checkpointing: bool,
    /// Share of parameters trained, in (0, 1]. Only read by LoRA / QLoRA.
    pub trainable_fraction: f64,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Inference,
            precision: Precision::Fp16,
            sequence_length: 8192,
            batch_size: 1,
            optimizer: OptimizerKind::AdamW,
            grad_checkpointing: false,
            trainable_fraction: 1.0,
        }
    }
}

impl WorkloadConfig {
    /// Compute the breakdown for `specs` under this workload.
    pub fn calculate(&self, specs: &ModelSpecs) -> MemoryBreakdown {
        let bytes_per_param = self.precision.bytes_per_param();
        let params = specs.param_count();
        let layers = f64::from(specs.layers);
        let hidden = f64::from(specs.hidden_size);
        let tokens = self.batch_size as f64 * self.sequence_length as f64;

        let weights = params * bytes_per_param;
        let kv_cache = KV_TENSORS * layers * hidden * tokens * KV_BYTES_PER_ELEMENT;

        let (activations, gradients, optimizer) = match self.mode {
            Mode::Inference => (tokens * hidden * bytes_per_param, 0.0, 0.0),
            Mode::TrainingFull => {
                let multiplier = if self.grad_checkpointing {
                    FULL_ACTIVATION_MULTIPLIER_CHECKPOINTED
                } else {
                    FULL_ACTIVATION_MULTIPLIER
                };
                (
                    tokens * hidden * layers * multiplier,
                    params * GRADIENT_BYTES_PER_PARAM,
                    params * self.optimizer.bytes_per_param(),
                )
            }
            Mode::TrainingLoRA | Mode::TrainingQLoRA => {
                let trainable = params * self.trainable_fraction;
                let multiplier = if self.grad_checkpointing {
                    ADAPTER_ACTIVATION_MULTIPLIER_CHECKPOINTED
                } else {
                    layers / 2.0
                };
                (
                    tokens * hidden * multiplier,
                    trainable * GRADIENT_BYTES_PER_PARAM,
                    trainable * self.optimizer.bytes_per_param(),
                )
            }
        };

        let breakdown = MemoryBreakdown::from_components(
            weights / BYTES_PER_GB,
            kv_cache / BYTES_PER_GB,
            activations / BYTES_PER_GB,
            gradients / BYTES_PER_GB,
            optimizer / BYTES_PER_GB,
        );

        tracing::debug!(
            mode = %self.mode,
            params = specs.params,
            total_gb = breakdown.total,
            "calculated VRAM breakdown"
        );

        breakdown
    }
}

/// Flat form of [`WorkloadConfig::calculate`].
#[allow(clippy::too_many_arguments)]
pub fn calculate_vram(
    mode: Mode,
    specs: &ModelSpecs,
    precision: Precision,
    sequence_length: u64,
    batch_size: u64,
    optimizer: OptimizerKind,
    grad_checkpointing: bool,
    trainable_fraction: f64,
) -> MemoryBreakdown {
    WorkloadConfig {
        mode,
        precision,
        sequence_length,
        batch_size,
        optimizer,
        grad_checkpointing,
        trainable_fraction,
    }
    .calculate(specs)
}

/// The five memory consumers of a breakdown.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Component {
    Weights,
    KvCache,
    Activations,
    Gradients,
    Optimizer,
}

impl Component {
    pub const ALL: [Component; 5] = [
        Component::Weights,
        Component::KvCache,
        Component::Activations,
        Component::Gradients,
        Component::Optimizer,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Component::Weights => "Weights",
            Component::KvCache => "KV Cache",
            Component::Activations => "Activations",
            Component::Gradients => "Gradients",
            Component::Optimizer => "Optimizer",
        }
    }
}

/// VRAM usage per component, in GB. `total` is the plain sum of the five.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryBreakdown {
    pub weights: f64,
    pub kv_cache: f64,
    pub activations: f64,
    pub gradients: f64,
    pub optimizer: f64,
    pub total: f64,
}

impl MemoryBreakdown {
    pub fn from_components(
        weights: f64,
        kv_cache: f64,
        activations: f64,
        gradients: f64,
        optimizer: f64,
    ) -> Self {
        Self {
            weights,
            kv_cache,
            activations,
            gradients,
            optimizer,
            total: weights + kv_cache + activations + gradients + optimizer,
        }
    }

    pub fn get(&self, component: Component) -> f64 {
        match component {
            Component::Weights => self.weights,
            Component::KvCache => self.kv_cache,
            Component::Activations => self.activations,
            Component::Gradients => self.gradients,
            Component::Optimizer => self.optimizer,
        }
    }

    /// Components in display order, paired with their size.
    pub fn components(&self) -> [(Component, f64); 5] {
        Component::ALL.map(|c| (c, self.get(c)))
    }
}
