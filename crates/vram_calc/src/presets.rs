//! Workload Presets - Predefined configurations for common sizing questions

use std::str::FromStr;

use anyhow::Result;
use vram_core::{Mode, OptimizerKind, Precision};

use crate::config::ProjectConfig;
use crate::estimate::Estimate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkloadPreset {
    /// Quantized 8B model for local chat
    Chat,
    /// 8B at 128k context
    LongContext,
    /// Batched FP8 serving of a 70B model
    Serving,
    /// Full fine-tune of a 7B model
    FullFinetune,
    /// LoRA on an 8B model
    Lora,
    /// QLoRA on a 70B model
    Qlora,
}

impl WorkloadPreset {
    /// Apply preset values to config
    pub fn apply(&self, config: &mut ProjectConfig) {
        config.name = self.display_name().to_string();
        match self {
            WorkloadPreset::Chat => {
                config.params_b = 8.0;
                config.mode = Mode::Inference;
                config.precision = Precision::Q4KM;
                config.sequence_length = 8192;
                config.batch_size = 1;
            }
            WorkloadPreset::LongContext => {
                config.params_b = 8.0;
                config.mode = Mode::Inference;
                config.precision = Precision::Fp16;
                config.sequence_length = 131_072;
                config.batch_size = 1;
            }
            WorkloadPreset::Serving => {
                config.params_b = 70.0;
                config.mode = Mode::Inference;
                config.precision = Precision::Fp8;
                config.sequence_length = 8192;
                config.batch_size = 32;
            }
            WorkloadPreset::FullFinetune => {
                config.params_b = 7.0;
                config.mode = Mode::TrainingFull;
                config.precision = Precision::Bf16;
                config.sequence_length = 2048;
                config.batch_size = 8;
                config.optimizer = OptimizerKind::AdamW;
                config.grad_checkpointing = true;
            }
            WorkloadPreset::Lora => {
                config.params_b = 8.0;
                config.mode = Mode::TrainingLoRA;
                config.precision = Precision::Bf16;
                config.sequence_length = 4096;
                config.batch_size = 4;
                config.optimizer = OptimizerKind::AdamW;
                config.grad_checkpointing = true;
                config.lora_percent = 2.0;
            }
            WorkloadPreset::Qlora => {
                config.params_b = 70.0;
                config.mode = Mode::TrainingQLoRA;
                config.precision = Precision::Int4;
                config.sequence_length = 4096;
                config.batch_size = 1;
                config.optimizer = OptimizerKind::PagedAdamW;
                config.grad_checkpointing = true;
                config.lora_percent = 1.0;
            }
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            WorkloadPreset::Chat => "chat",
            WorkloadPreset::LongContext => "long_context",
            WorkloadPreset::Serving => "serving",
            WorkloadPreset::FullFinetune => "full_finetune",
            WorkloadPreset::Lora => "lora",
            WorkloadPreset::Qlora => "qlora",
        }
    }

    /// Get display name for the preset
    pub fn display_name(&self) -> &'static str {
        match self {
            WorkloadPreset::Chat => "💬 Local Chat (8B Q4_K_M)",
            WorkloadPreset::LongContext => "📜 Long Context (8B, 128k)",
            WorkloadPreset::Serving => "🚀 Serving (70B FP8, batch 32)",
            WorkloadPreset::FullFinetune => "🏋 Full Fine-tune (7B BF16)",
            WorkloadPreset::Lora => "🧩 LoRA (8B BF16)",
            WorkloadPreset::Qlora => "🪶 QLoRA (70B INT4)",
        }
    }

    /// All presets for iteration
    pub fn all() -> &'static [WorkloadPreset] {
        &[
            WorkloadPreset::Chat,
            WorkloadPreset::LongContext,
            WorkloadPreset::Serving,
            WorkloadPreset::FullFinetune,
            WorkloadPreset::Lora,
            WorkloadPreset::Qlora,
        ]
    }
}

impl FromStr for WorkloadPreset {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        Self::all()
            .iter()
            .copied()
            .find(|p| p.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let keys: Vec<_> = Self::all().iter().map(|p| p.key()).collect();
                anyhow::anyhow!("unknown preset '{}' (expected one of: {})", s, keys.join(", "))
            })
    }
}

/// `presets` subcommand: list every preset with its estimated total.
pub fn run() -> Result<()> {
    println!("{:<16} {:<34} {:>10}", "KEY", "PRESET", "TOTAL");
    for preset in WorkloadPreset::all() {
        let mut config = ProjectConfig::default();
        preset.apply(&mut config);
        let estimate = Estimate::new(&config, None)?;
        println!(
            "{:<16} {:<34} {:>7.2} GB",
            preset.key(),
            preset.display_name(),
            estimate.breakdown.total
        );
    }
    Ok(())
}
