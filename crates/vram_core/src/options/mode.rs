//! Mode - what the GPU is being sized for

use serde::{Deserialize, Serialize};

use super::{impl_option_conversions, WorkloadOption};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Mode {
    Inference,
    TrainingFull,
    TrainingLoRA,
    /// LoRA adapters trained on top of quantized frozen weights.
    TrainingQLoRA,
}

impl Mode {
    pub fn is_training(self) -> bool {
        !matches!(self, Mode::Inference)
    }

    /// LoRA and QLoRA only train a fraction of the parameters.
    pub fn is_adapter(self) -> bool {
        matches!(self, Mode::TrainingLoRA | Mode::TrainingQLoRA)
    }
}

impl WorkloadOption for Mode {
    const ALL: &'static [Self] = &[
        Mode::Inference,
        Mode::TrainingFull,
        Mode::TrainingLoRA,
        Mode::TrainingQLoRA,
    ];

    fn key(self) -> &'static str {
        match self {
            Mode::Inference => "inference",
            Mode::TrainingFull => "training_full",
            Mode::TrainingLoRA => "training_lora",
            Mode::TrainingQLoRA => "training_qlora",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Mode::Inference => "Inference",
            Mode::TrainingFull => "Training (Full)",
            Mode::TrainingLoRA => "Training (LoRA)",
            Mode::TrainingQLoRA => "Training (QLoRA)",
        }
    }
}

impl_option_conversions!(Mode, UnknownMode);
