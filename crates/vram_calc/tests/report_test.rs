use vram_calc::config::{ProjectConfig, VramStatus};
use vram_calc::estimate::{Estimate, GpuFit};
use vram_calc::presets::WorkloadPreset;
use vram_calc::report::{format_context, format_params, render, visible_components, Report};
use vram_core::{Component, MemoryBreakdown, Mode};

#[test]
fn test_format_params() {
    assert_eq!(format_params(0.35), "350M");
    assert_eq!(format_params(0.001), "1M");
    assert_eq!(format_params(8.0), "8.0B");
    assert_eq!(format_params(1.5), "1.5B");
}

#[test]
fn test_format_context() {
    assert_eq!(format_context(8192), "8.0k");
    assert_eq!(format_context(131_072), "128.0k");
}

#[test]
fn test_negligible_components_are_hidden() {
    let breakdown = MemoryBreakdown::from_components(10.0, 5.0, 0.0005, 0.0, 0.0);
    let rows = visible_components(&breakdown);
    let names: Vec<_> = rows.iter().map(|(c, _, _)| *c).collect();
    assert_eq!(names, vec![Component::Weights, Component::KvCache]);

    let share: f64 = rows.iter().map(|(_, _, pct)| pct).sum();
    assert!((share - 100.0).abs() < 0.01);
}

#[test]
fn test_render_inference() -> anyhow::Result<()> {
    let config = ProjectConfig {
        params_b: 7.0,
        ..ProjectConfig::default()
    };
    let estimate = Estimate::new(&config, Some(24.0))?;
    let text = render(&estimate);

    assert!(text.contains("7.0B (layers 32, hidden 4096, heads 32)"));
    assert!(text.contains("ctx 8.0k"));
    assert!(text.contains("Weights"));
    assert!(text.contains("KV Cache"));
    assert!(!text.contains("Gradients"));
    assert!(!text.contains("Training :"));
    assert!(text.contains("fits"));
    Ok(())
}

#[test]
fn test_render_training_and_overflow() -> anyhow::Result<()> {
    let config = ProjectConfig {
        params_b: 7.0,
        mode: Mode::TrainingFull,
        ..ProjectConfig::default()
    };
    let estimate = Estimate::new(&config, Some(24.0))?;
    assert_eq!(estimate.status, VramStatus::Critical);

    let text = render(&estimate);
    assert!(text.contains("Training : AdamW (8 bytes/param) | checkpointing off"));
    assert!(text.contains("Gradients"));
    assert!(text.contains("Optimizer"));
    assert!(text.contains("exceeds by"));
    Ok(())
}

#[test]
fn test_render_adapter_line() -> anyhow::Result<()> {
    let mut config = ProjectConfig::default();
    WorkloadPreset::Lora.apply(&mut config);
    let estimate = Estimate::new(&config, None)?;

    let text = render(&estimate);
    assert!(text.contains("Training : AdamW (8 bytes/param) | checkpointing on | trainable 2.0%\n"));
    assert_eq!(text, Report(&estimate).to_string());
    assert!(text.ends_with('\n'));
    Ok(())
}

#[test]
fn test_gpu_fit() {
    let fit = GpuFit::new(24.0, 20.0);
    assert!(fit.fits);
    assert_eq!(fit.headroom_gb, 4.0);

    let over = GpuFit::new(16.0, 20.0);
    assert!(!over.fits);
    assert_eq!(over.headroom_gb, -4.0);
}

#[test]
fn test_estimate_rejects_bad_inputs() {
    let config = ProjectConfig::default();
    assert!(Estimate::new(&config, Some(0.0)).is_err());
    assert!(Estimate::new(&config, Some(f64::INFINITY)).is_err());

    let bad = ProjectConfig {
        batch_size: 0,
        ..config
    };
    assert!(Estimate::new(&bad, None).is_err());
}

#[test]
fn test_estimate_json_shape() -> anyhow::Result<()> {
    let estimate = Estimate::new(&ProjectConfig::default(), None)?;
    let value = serde_json::to_value(&estimate)?;
    assert_eq!(value["workload"]["mode"], "inference");
    assert_eq!(value["workload"]["precision"], "fp16");
    assert!(value["breakdown"]["total"].as_f64().unwrap() > 0.0);
    assert!(value["gpu"].is_null());
    Ok(())
}
