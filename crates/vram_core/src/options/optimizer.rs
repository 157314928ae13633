//! OptimizerKind - optimizer state footprint

use serde::{Deserialize, Serialize};

use super::{impl_option_conversions, WorkloadOption};

/// Optimizer whose auxiliary state is kept per trainable parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum OptimizerKind {
    /// Two fp32 moments.
    AdamW,
    /// Momentum buffer only.
    Sgd,
    /// bitsandbytes-style 8-bit moments.
    Adam8bit,
    /// Same footprint as AdamW, pageable to host memory.
    PagedAdamW,
}

impl OptimizerKind {
    /// Optimizer state bytes per trainable parameter.
    pub const fn bytes_per_param(self) -> f64 {
        match self {
            OptimizerKind::AdamW => 8.0,
            OptimizerKind::Sgd => 4.0,
            OptimizerKind::Adam8bit => 2.0,
            OptimizerKind::PagedAdamW => 8.0,
        }
    }
}

impl WorkloadOption for OptimizerKind {
    const ALL: &'static [Self] = &[
        OptimizerKind::AdamW,
        OptimizerKind::Sgd,
        OptimizerKind::Adam8bit,
        OptimizerKind::PagedAdamW,
    ];

    fn key(self) -> &'static str {
        match self {
            OptimizerKind::AdamW => "adamw",
            OptimizerKind::Sgd => "sgd",
            OptimizerKind::Adam8bit => "adam_8bit",
            OptimizerKind::PagedAdamW => "paged_adamw",
        }
    }

    fn label(self) -> &'static str {
        match self {
            OptimizerKind::AdamW => "AdamW (8 bytes/param)",
            OptimizerKind::Sgd => "SGD (4 bytes/param)",
            OptimizerKind::Adam8bit => "8-bit Adam (2 bytes/param)",
            OptimizerKind::PagedAdamW => "Paged AdamW (8 bytes)",
        }
    }
}

impl_option_conversions!(OptimizerKind, UnknownOptimizer);
