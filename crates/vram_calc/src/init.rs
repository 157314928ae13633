use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use tracing::info;

use crate::config::ProjectConfig;
use crate::presets::WorkloadPreset;

#[derive(Args, Debug, Clone)]
pub struct InitArgs {
    #[arg(short, long, default_value = "workload.json")]
    pub output: PathBuf,

    /// Seed the file from a preset instead of the defaults
    #[arg(long)]
    pub preset: Option<WorkloadPreset>,

    #[arg(long)]
    pub name: Option<String>,

    /// Overwrite an existing file
    #[arg(long, action)]
    pub force: bool,
}

pub fn run(args: InitArgs) -> Result<()> {
    if args.output.exists() && !args.force {
        bail!(
            "{:?} already exists (use --force to overwrite)",
            args.output
        );
    }

    let mut config = ProjectConfig::default();
    if let Some(preset) = args.preset {
        preset.apply(&mut config);
    }
    if let Some(name) = args.name {
        config.name = name;
    }
    config.validate()?;
    config.save(&args.output)?;

    info!("✅ Workload written to {:?}", args.output);
    Ok(())
}
