//! Error types for vram_core.

use thiserror::Error;

/// Result type alias for vram_core operations.
pub type Result<T> = std::result::Result<T, VramError>;

/// Errors raised when turning external input into engine options.
///
/// The estimator and calculator themselves are total; only the parsing of
/// enumerated options can fail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum VramError {
    /// Precision name not present in the bytes-per-parameter table.
    #[error("unknown precision '{value}' (expected one of: {expected})")]
    UnknownPrecision { value: String, expected: String },

    /// Optimizer name not present in the optimizer state table.
    #[error("unknown optimizer '{value}' (expected one of: {expected})")]
    UnknownOptimizer { value: String, expected: String },

    /// Operating mode not recognised.
    #[error("unknown mode '{value}' (expected one of: {expected})")]
    UnknownMode { value: String, expected: String },
}
