//! Text rendering of an estimate: total, per-component bars, GPU fit.

use std::fmt;

use vram_core::{Component, MemoryBreakdown, WorkloadOption};

use crate::estimate::Estimate;

/// Components at or below this size (GB) are left out of the breakdown.
pub const NEGLIGIBLE_GB: f64 = 0.001;

const BAR_WIDTH: usize = 30;

/// "350M" below one billion, "8.0B" above.
pub fn format_params(params_b: f64) -> String {
    if params_b < 1.0 {
        format!("{:.0}M", params_b * 1000.0)
    } else {
        format!("{:.1}B", params_b)
    }
}

/// Tokens as "8.0k" (1k = 1024).
pub fn format_context(tokens: u64) -> String {
    format!("{:.1}k", tokens as f64 / 1024.0)
}

/// Components worth showing, with their share of the total in percent.
pub fn visible_components(breakdown: &MemoryBreakdown) -> Vec<(Component, f64, f64)> {
    breakdown
        .components()
        .into_iter()
        .filter(|&(_, gb)| gb > NEGLIGIBLE_GB)
        .map(|(component, gb)| (component, gb, gb / breakdown.total * 100.0))
        .collect()
}

fn bar(percent: f64) -> String {
    let filled = ((percent / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

/// Text gauge for one estimate.
pub struct Report<'a>(pub &'a Estimate);

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let estimate = self.0;
        let specs = &estimate.specs;
        let workload = &estimate.workload;
        let breakdown = &estimate.breakdown;

        writeln!(f, "Estimate : {}", estimate.name)?;
        writeln!(
            f,
            "Model    : {} (layers {}, hidden {}, heads {})",
            format_params(specs.params),
            specs.layers,
            specs.hidden_size,
            specs.heads
        )?;
        writeln!(
            f,
            "Workload : {} | {} | ctx {} | batch {}",
            workload.mode.label(),
            workload.precision.label(),
            format_context(workload.sequence_length),
            workload.batch_size
        )?;
        if workload.mode.is_training() {
            write!(
                f,
                "Training : {} | checkpointing {}",
                workload.optimizer.label(),
                if workload.grad_checkpointing { "on" } else { "off" }
            )?;
            if workload.mode.is_adapter() {
                write!(f, " | trainable {:.1}%", workload.trainable_fraction * 100.0)?;
            }
            writeln!(f)?;
        }

        writeln!(f)?;
        writeln!(
            f,
            "Total Estimated VRAM: {:.2} GB  [{}]",
            breakdown.total,
            estimate.status.label()
        )?;
        writeln!(f)?;
        writeln!(f, "Usage Breakdown")?;

        let rows = visible_components(breakdown);
        if rows.is_empty() {
            writeln!(f, "  (every component is negligible)")?;
        }
        for (component, gb, percent) in rows {
            writeln!(
                f,
                "  {:<12} {:>9.2} GB {:>6.1}%  {}",
                component.label(),
                gb,
                percent,
                bar(percent)
            )?;
        }

        if let Some(gpu) = &estimate.gpu {
            writeln!(f)?;
            if gpu.fits {
                writeln!(
                    f,
                    "GPU {:.2} GB: fits ({:.2} GB headroom)",
                    gpu.capacity_gb, gpu.headroom_gb
                )?;
            } else {
                writeln!(
                    f,
                    "GPU {:.2} GB: exceeds by {:.2} GB",
                    gpu.capacity_gb, -gpu.headroom_gb
                )?;
            }
        }
        Ok(())
    }
}

pub fn render(estimate: &Estimate) -> String {
    Report(estimate).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_bounds() {
        assert_eq!(bar(0.0).chars().filter(|&c| c == '█').count(), 0);
        assert_eq!(bar(100.0).chars().filter(|&c| c == '█').count(), BAR_WIDTH);
        assert_eq!(bar(50.0).chars().count(), BAR_WIDTH);
    }
}
