//! Workload Configuration
//!
//! Handles the estimate configuration, input validation, VRAM status and serialization.

use std::fs;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use serde::{Deserialize, Serialize};
use vram_core::{estimate_architecture, Mode, ModelSpecs, OptimizerKind, Precision, WorkloadConfig};

use crate::presets::WorkloadPreset;

// ============================================================
// Accepted input ranges
// ============================================================
/// Smallest model size offered (1M parameters).
pub const MIN_PARAMS_B: f64 = 0.001;
/// Largest model size offered (2T parameters).
pub const MAX_PARAMS_B: f64 = 2000.0;
pub const SEQ_LEN_RANGE: RangeInclusive<u64> = 512..=200_000;
pub const BATCH_RANGE: RangeInclusive<u64> = 1..=512;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ProjectConfig {
    pub name: String,
    pub created_at: String,
    // Model
    pub params_b: f64,
    // Workload
    pub mode: Mode,
    pub precision: Precision,
    pub sequence_length: u64,
    pub batch_size: u64,
    // Training
    pub optimizer: OptimizerKind,
    pub grad_checkpointing: bool,
    pub lora_percent: f64, // only read in LoRA / QLoRA
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: "New Estimate".to_string(),
            created_at: chrono::Local::now().to_rfc3339(),
            params_b: 8.0,
            mode: Mode::Inference,
            precision: Precision::Fp16,
            sequence_length: 8192,
            batch_size: 1,
            optimizer: OptimizerKind::AdamW,
            grad_checkpointing: false,
            lora_percent: 2.0,
        }
    }
}

impl ProjectConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read workload file at {:?}", path))?;
        let config = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse workload file at {:?}", path))?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write workload file at {:?}", path))?;
        Ok(())
    }

    /// Reject values the engine would silently turn into nonsense.
    pub fn validate(&self) -> Result<()> {
        if !(self.params_b.is_finite() && self.params_b > 0.0) {
            bail!(
                "params must be a positive number of billions, got {}",
                self.params_b
            );
        }
        if !SEQ_LEN_RANGE.contains(&self.sequence_length) {
            bail!(
                "sequence length must be within {}..={}, got {}",
                SEQ_LEN_RANGE.start(),
                SEQ_LEN_RANGE.end(),
                self.sequence_length
            );
        }
        if !BATCH_RANGE.contains(&self.batch_size) {
            bail!(
                "batch size must be within {}..={}, got {}",
                BATCH_RANGE.start(),
                BATCH_RANGE.end(),
                self.batch_size
            );
        }
        if !(self.lora_percent > 0.0 && self.lora_percent <= 100.0) {
            bail!(
                "trainable percentage must be within (0, 100], got {}",
                self.lora_percent
            );
        }
        Ok(())
    }

    pub fn specs(&self) -> ModelSpecs {
        estimate_architecture(self.params_b)
    }

    pub fn workload(&self) -> WorkloadConfig {
        let trainable_fraction = if self.mode.is_adapter() {
            self.lora_percent / 100.0
        } else {
            1.0
        };
        WorkloadConfig {
            mode: self.mode,
            precision: self.precision,
            sequence_length: self.sequence_length,
            batch_size: self.batch_size,
            optimizer: self.optimizer,
            grad_checkpointing: self.grad_checkpointing,
            trainable_fraction,
        }
    }
}

/// Rough comfort level of a total, by common consumer card sizes.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum VramStatus {
    Safe,
    Moderate,
    High,
    Critical,
}

impl VramStatus {
    pub fn from_total_gb(total_gb: f64) -> Self {
        if total_gb < 8.0 {
            VramStatus::Safe
        } else if total_gb < 16.0 {
            VramStatus::Moderate
        } else if total_gb < 24.0 {
            VramStatus::High
        } else {
            VramStatus::Critical
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            VramStatus::Safe => "Safe (< 8GB)",
            VramStatus::Moderate => "Moderate (< 16GB)",
            VramStatus::High => "High (Requires 24GB)",
            VramStatus::Critical => "Critical (> 24GB)",
        }
    }
}

/// Workload flags shared by `estimate` and `sweep`.
///
/// Resolution order: defaults, then `--preset` or `--config` (never both), then
/// explicit flags.
#[derive(Args, Debug, Clone, Default)]
pub struct WorkloadArgs {
    /// Start from a built-in preset (see `presets`)
    #[arg(long, conflicts_with = "config")]
    pub preset: Option<WorkloadPreset>,

    /// Load settings from a workload JSON file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// inference | training_full | training_lora | training_qlora
    #[arg(long)]
    pub mode: Option<Mode>,

    /// Weight format, e.g. fp16, bf16, int8, q4_k_m
    #[arg(long)]
    pub precision: Option<Precision>,

    /// Context length in tokens
    #[arg(long = "seq-len")]
    pub sequence_length: Option<u64>,

    #[arg(long = "batch")]
    pub batch_size: Option<u64>,

    /// adamw | sgd | adam_8bit | paged_adamw
    #[arg(long)]
    pub optimizer: Option<OptimizerKind>,

    #[arg(long, action, conflicts_with = "no_grad_checkpointing")]
    pub grad_checkpointing: bool,

    #[arg(long, action)]
    pub no_grad_checkpointing: bool,

    /// Trainable parameters for LoRA / QLoRA, in percent
    #[arg(long)]
    pub lora_percent: Option<f64>,
}

impl WorkloadArgs {
    pub fn resolve(&self) -> Result<ProjectConfig> {
        let mut config = match (&self.config, self.preset) {
            (Some(path), Some(preset)) => bail!(
                "--config {:?} and --preset {} cannot be combined",
                path,
                preset.key()
            ),
            (Some(path), None) => ProjectConfig::load(path)?,
            (None, Some(preset)) => {
                let mut config = ProjectConfig::default();
                preset.apply(&mut config);
                config
            }
            (None, None) => ProjectConfig::default(),
        };

        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if let Some(precision) = self.precision {
            config.precision = precision;
        }
        if let Some(sequence_length) = self.sequence_length {
            config.sequence_length = sequence_length;
        }
        if let Some(batch_size) = self.batch_size {
            config.batch_size = batch_size;
        }
        if let Some(optimizer) = self.optimizer {
            config.optimizer = optimizer;
        }
        if self.grad_checkpointing {
            config.grad_checkpointing = true;
        } else if self.no_grad_checkpointing {
            config.grad_checkpointing = false;
        }
        if let Some(lora_percent) = self.lora_percent {
            config.lora_percent = lora_percent;
        }

        Ok(config)
    }
}
