//! Size Sweep - one workload evaluated across log-spaced model sizes
//!
//! Positions on a 0..=100 scale map logarithmically onto
//! [`MIN_PARAMS_B`, `MAX_PARAMS_B`], so equal steps cover equal size ratios.

use anyhow::{bail, Result};
use clap::Args;
use rayon::prelude::*;
use serde::Serialize;
use tracing::info;
use vram_core::{estimate_architecture, MemoryBreakdown, ModelSpecs, WorkloadConfig};

use crate::config::{WorkloadArgs, MAX_PARAMS_B, MIN_PARAMS_B};
use crate::report::format_params;

#[derive(Args, Debug, Clone)]
pub struct SweepArgs {
    #[command(flatten)]
    pub workload: WorkloadArgs,

    /// Smallest size, in billions
    #[arg(long, default_value_t = MIN_PARAMS_B)]
    pub min: f64,

    /// Largest size, in billions
    #[arg(long, default_value_t = MAX_PARAMS_B)]
    pub max: f64,

    /// Number of sizes, endpoints included
    #[arg(long, default_value_t = 12)]
    pub steps: usize,

    #[arg(long, action)]
    pub json: bool,
}

#[derive(Serialize, Clone, Debug)]
pub struct SweepRow {
    pub specs: ModelSpecs,
    pub breakdown: MemoryBreakdown,
}

/// Scale position (0..=100) to billions of parameters.
pub fn position_to_params(position: f64) -> f64 {
    let (min_log, max_log) = (MIN_PARAMS_B.ln(), MAX_PARAMS_B.ln());
    (min_log + (max_log - min_log) * position / 100.0).exp()
}

/// Billions of parameters to scale position, clamped to the supported range.
pub fn params_to_position(params_b: f64) -> f64 {
    let (min_log, max_log) = (MIN_PARAMS_B.ln(), MAX_PARAMS_B.ln());
    let current = params_b.clamp(MIN_PARAMS_B, MAX_PARAMS_B).ln();
    (current - min_log) / (max_log - min_log) * 100.0
}

/// `steps` sizes evenly spaced on the log scale, from `min` to `max` exactly.
pub fn log_spaced(min: f64, max: f64, steps: usize) -> Vec<f64> {
    let (start, end) = (params_to_position(min), params_to_position(max));
    let last = steps.saturating_sub(1);
    (0..steps)
        .map(|i| match i {
            0 => min,
            i if i == last => max,
            i => position_to_params(start + (end - start) * i as f64 / last as f64),
        })
        .collect()
}

/// Evaluate `workload` at every size. Rows come back in input order.
pub fn sweep(workload: &WorkloadConfig, sizes: &[f64]) -> Vec<SweepRow> {
    sizes
        .par_iter()
        .map(|&params| {
            let specs = estimate_architecture(params);
            SweepRow {
                specs,
                breakdown: workload.calculate(&specs),
            }
        })
        .collect()
}

fn validate(args: &SweepArgs) -> Result<()> {
    let range = MIN_PARAMS_B..=MAX_PARAMS_B;
    if !range.contains(&args.min) || !range.contains(&args.max) {
        bail!(
            "sweep bounds must lie within {}..={} billion, got {}..{}",
            MIN_PARAMS_B,
            MAX_PARAMS_B,
            args.min,
            args.max
        );
    }
    if args.min >= args.max {
        bail!("--min ({}) must be below --max ({})", args.min, args.max);
    }
    if args.steps < 2 {
        bail!("--steps must be at least 2, got {}", args.steps);
    }
    Ok(())
}

pub fn render(rows: &[SweepRow]) -> String {
    let mut out = format!(
        "{:>8} {:>6} {:>7} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10}\n",
        "SIZE", "LAYERS", "HIDDEN", "WEIGHTS", "KV", "ACT", "GRAD", "OPTIM", "TOTAL"
    );
    for row in rows {
        let (s, b) = (&row.specs, &row.breakdown);
        out.push_str(&format!(
            "{:>8} {:>6} {:>7} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>10.2}\n",
            format_params(s.params),
            s.layers,
            s.hidden_size,
            b.weights,
            b.kv_cache,
            b.activations,
            b.gradients,
            b.optimizer,
            b.total
        ));
    }
    out
}

pub fn run(args: SweepArgs) -> Result<()> {
    validate(&args)?;
    let config = args.workload.resolve()?;
    config.validate()?;

    let workload = config.workload();
    let sizes = log_spaced(args.min, args.max, args.steps);

    info!("--- VRAM Sweep ---");
    info!(
        "{} sizes from {} to {} ({})",
        sizes.len(),
        format_params(args.min),
        format_params(args.max),
        workload.mode
    );

    let rows = sweep(&workload, &sizes);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        print!("{}", render(&rows));
    }
    Ok(())
}
