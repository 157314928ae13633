use anyhow::{bail, Result};
use clap::Args;
use serde::Serialize;
use tracing::{info, warn};
use vram_core::{MemoryBreakdown, ModelSpecs, WorkloadConfig};

use crate::config::{ProjectConfig, VramStatus, WorkloadArgs};
use crate::report;

#[derive(Args, Debug, Clone)]
pub struct EstimateArgs {
    #[command(flatten)]
    pub workload: WorkloadArgs,

    /// Model size in billions of parameters
    #[arg(short, long)]
    pub params: Option<f64>,

    /// Compare the total against a GPU of this many GB
    #[arg(long)]
    pub gpu_gb: Option<f64>,

    /// Print the estimate as JSON
    #[arg(long, action)]
    pub json: bool,
}

/// How a total compares with a given card.
#[derive(Serialize, Clone, Copy, Debug, PartialEq)]
pub struct GpuFit {
    pub capacity_gb: f64,
    /// Negative when the estimate does not fit.
    pub headroom_gb: f64,
    pub fits: bool,
}

impl GpuFit {
    pub fn new(capacity_gb: f64, total_gb: f64) -> Self {
        let headroom_gb = capacity_gb - total_gb;
        Self {
            capacity_gb,
            headroom_gb,
            fits: headroom_gb >= 0.0,
        }
    }
}

/// One fully resolved estimate, ready for rendering.
#[derive(Serialize, Clone, Debug)]
pub struct Estimate {
    pub name: String,
    pub specs: ModelSpecs,
    pub workload: WorkloadConfig,
    pub breakdown: MemoryBreakdown,
    pub status: VramStatus,
    pub gpu: Option<GpuFit>,
}

impl Estimate {
    pub fn new(config: &ProjectConfig, gpu_gb: Option<f64>) -> Result<Self> {
        config.validate()?;
        if let Some(gb) = gpu_gb {
            if !(gb.is_finite() && gb > 0.0) {
                bail!("GPU capacity must be a positive number of GB, got {}", gb);
            }
        }

        let specs = config.specs();
        let workload = config.workload();
        let breakdown = workload.calculate(&specs);

        Ok(Self {
            name: config.name.clone(),
            specs,
            workload,
            breakdown,
            status: VramStatus::from_total_gb(breakdown.total),
            gpu: gpu_gb.map(|gb| GpuFit::new(gb, breakdown.total)),
        })
    }
}

pub fn run(args: EstimateArgs) -> Result<()> {
    let mut config = args.workload.resolve()?;
    if let Some(params) = args.params {
        config.params_b = params;
    }

    info!("--- VRAM Estimate ---");
    info!("Model: {}B", config.params_b);
    info!("Mode:  {}", config.mode);

    let estimate = Estimate::new(&config, args.gpu_gb)?;
    info!(
        "Architecture: {} layers, hidden {}",
        estimate.specs.layers, estimate.specs.hidden_size
    );
    if let Some(gpu) = estimate.gpu.filter(|g| !g.fits) {
        warn!(
            "Estimate exceeds {:.2} GB GPU by {:.2} GB",
            gpu.capacity_gb, -gpu.headroom_gb
        );
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&estimate)?);
    } else {
        print!("{}", report::render(&estimate));
    }
    Ok(())
}
