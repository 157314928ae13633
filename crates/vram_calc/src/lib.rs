//! LLM VRAM Calculator
//!
//! Command-line front end over `vram_core`: workload resolution from flags,
//! presets and JSON files, text/JSON reporting, and size sweeps.

pub mod cli;
pub mod config;
pub mod estimate;
pub mod init;
pub mod presets;
pub mod report;
pub mod sweep;
