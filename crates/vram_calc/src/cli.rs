use crate::estimate::EstimateArgs;
use crate::init::InitArgs;
use crate::sweep::SweepArgs;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about = "LLM VRAM Calculator", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Estimate VRAM for one model size and workload
    Estimate(EstimateArgs),

    /// Estimate one workload across a range of model sizes
    Sweep(SweepArgs),

    /// List built-in workload presets
    Presets,

    /// Write a workload JSON file
    Init(InitArgs),
}
