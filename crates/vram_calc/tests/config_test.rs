use std::fs;

use vram_calc::config::{ProjectConfig, VramStatus, WorkloadArgs};
use vram_calc::presets::WorkloadPreset;
use vram_core::{Mode, OptimizerKind, Precision};

#[test]
fn test_save_and_load() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("workload.json");

    let mut config = ProjectConfig::default();
    WorkloadPreset::Qlora.apply(&mut config);
    config.save(&path)?;

    let loaded = ProjectConfig::load(&path)?;
    assert_eq!(loaded, config);

    let raw = fs::read_to_string(&path)?;
    assert!(raw.contains("\"mode\": \"training_qlora\""));
    assert!(raw.contains("\"optimizer\": \"paged_adamw\""));
    Ok(())
}

#[test]
fn test_partial_file_takes_defaults() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("partial.json");
    fs::write(&path, r#"{ "params_b": 70, "precision": "Q4_K_M (~4.69 bpw)" }"#)?;

    let config = ProjectConfig::load(&path)?;
    assert_eq!(config.params_b, 70.0);
    assert_eq!(config.precision, Precision::Q4KM);
    assert_eq!(config.mode, Mode::Inference);
    assert_eq!(config.sequence_length, 8192);
    assert_eq!(config.lora_percent, 2.0);
    Ok(())
}

#[test]
fn test_unknown_option_in_file_is_an_error() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("bad.json");
    fs::write(&path, r#"{ "optimizer": "lion" }"#)?;

    let err = ProjectConfig::load(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("unknown optimizer 'lion'"));
    Ok(())
}

#[test]
fn test_missing_file_reports_path() {
    let err = ProjectConfig::load(std::path::Path::new("does/not/exist.json")).unwrap_err();
    assert!(err.to_string().contains("exist.json"));
}

#[test]
fn test_flags_override_preset() -> anyhow::Result<()> {
    let args = WorkloadArgs {
        preset: Some(WorkloadPreset::Lora),
        batch_size: Some(16),
        optimizer: Some(OptimizerKind::Sgd),
        no_grad_checkpointing: true,
        ..WorkloadArgs::default()
    };
    let config = args.resolve()?;
    assert_eq!(config.mode, Mode::TrainingLoRA);
    assert_eq!(config.sequence_length, 4096);
    assert_eq!(config.batch_size, 16);
    assert_eq!(config.optimizer, OptimizerKind::Sgd);
    assert!(!config.grad_checkpointing);
    Ok(())
}

#[test]
fn test_flags_override_file() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("workload.json");
    let mut saved = ProjectConfig::default();
    WorkloadPreset::FullFinetune.apply(&mut saved);
    saved.save(&path)?;

    let args = WorkloadArgs {
        config: Some(path),
        precision: Some(Precision::Fp32),
        ..WorkloadArgs::default()
    };
    let config = args.resolve()?;
    assert_eq!(config.mode, Mode::TrainingFull);
    assert_eq!(config.precision, Precision::Fp32);
    assert!(config.grad_checkpointing);
    Ok(())
}

#[test]
fn test_preset_and_file_together_are_rejected() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("workload.json");
    ProjectConfig::default().save(&path)?;

    let args = WorkloadArgs {
        config: Some(path),
        preset: Some(WorkloadPreset::Lora),
        ..WorkloadArgs::default()
    };
    let err = args.resolve().unwrap_err();
    assert!(err.to_string().contains("cannot be combined"), "{err}");
    Ok(())
}

#[test]
fn test_validate_ranges() {
    let ok = ProjectConfig::default();
    assert!(ok.validate().is_ok());

    let cases = [
        ProjectConfig { params_b: 0.0, ..ok.clone() },
        ProjectConfig { params_b: f64::NAN, ..ok.clone() },
        ProjectConfig { sequence_length: 256, ..ok.clone() },
        ProjectConfig { sequence_length: 200_001, ..ok.clone() },
        ProjectConfig { batch_size: 0, ..ok.clone() },
        ProjectConfig { batch_size: 513, ..ok.clone() },
        ProjectConfig { lora_percent: 0.0, ..ok.clone() },
        ProjectConfig { lora_percent: 100.5, ..ok.clone() },
    ];
    for config in cases {
        assert!(config.validate().is_err(), "accepted {:?}", config);
    }

    // Direct input is not bounded by the sweep range.
    assert!(ProjectConfig { params_b: 4000.0, ..ok }.validate().is_ok());
}

#[test]
fn test_trainable_fraction_only_for_adapters() {
    let mut config = ProjectConfig {
        lora_percent: 5.0,
        ..ProjectConfig::default()
    };
    assert_eq!(config.workload().trainable_fraction, 1.0);

    config.mode = Mode::TrainingFull;
    assert_eq!(config.workload().trainable_fraction, 1.0);

    config.mode = Mode::TrainingQLoRA;
    assert_eq!(config.workload().trainable_fraction, 0.05);
}

#[test]
fn test_status_buckets() {
    assert_eq!(VramStatus::from_total_gb(7.99), VramStatus::Safe);
    assert_eq!(VramStatus::from_total_gb(8.0), VramStatus::Moderate);
    assert_eq!(VramStatus::from_total_gb(23.9), VramStatus::High);
    assert_eq!(VramStatus::from_total_gb(24.0), VramStatus::Critical);
}

#[test]
fn test_every_preset_is_valid() {
    for preset in WorkloadPreset::all() {
        let mut config = ProjectConfig::default();
        preset.apply(&mut config);
        assert!(config.validate().is_ok(), "{} is invalid", preset.key());
        assert_eq!(preset.key().parse::<WorkloadPreset>().unwrap(), *preset);
    }
    assert!("mega".parse::<WorkloadPreset>().is_err());
}
