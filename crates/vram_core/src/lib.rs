//! VRAM Core
//!
//! Estimation engine for sizing the GPU memory of a transformer language model.
//! Provides architecture interpolation from a parameter count and a per-component
//! memory breakdown for inference, full fine-tuning, LoRA and QLoRA.
//!
//! Everything in this crate is a pure function of its inputs: no I/O, no shared
//! mutable state.

pub mod architecture;
pub mod calculator;
pub mod error;
pub mod options;

pub use architecture::{estimate_architecture, ModelSpecs, ReferencePoint, REFERENCE_ARCHITECTURES};
pub use calculator::{calculate_vram, Component, MemoryBreakdown, WorkloadConfig, BYTES_PER_GB};
pub use error::{Result, VramError};
pub use options::{Mode, OptimizerKind, Precision, WorkloadOption};
