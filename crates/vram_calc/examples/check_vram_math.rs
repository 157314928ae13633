//! Example script to verify VRAM estimation math without the CLI
//! Run with: cargo run --example check_vram_math

use vram_core::{calculate_vram, estimate_architecture, Mode, OptimizerKind, Precision};

fn main() {
    println!("=== VRAM Estimation Verification ===\n");

    // Case 1: Llama-2-7B inference, FP16, 8k context
    let specs = estimate_architecture(7.0);
    println!(
        "Architecture (7B): layers={}, hidden={}, heads={}",
        specs.layers, specs.hidden_size, specs.heads
    );
    let r = calculate_vram(
        Mode::Inference,
        &specs,
        Precision::Fp16,
        8192,
        1,
        OptimizerKind::AdamW,
        false,
        1.0,
    );
    print_metrics("Inference FP16 (7B, 8k ctx)", r);

    // Case 2: Full fine-tune with AdamW
    let r = calculate_vram(
        Mode::TrainingFull,
        &specs,
        Precision::Fp16,
        8192,
        1,
        OptimizerKind::AdamW,
        false,
        1.0,
    );
    print_metrics("Full Training AdamW (7B)", r);

    // Case 3: QLoRA with 2% trainable and checkpointing
    let r = calculate_vram(
        Mode::TrainingQLoRA,
        &specs,
        Precision::Int4,
        8192,
        1,
        OptimizerKind::AdamW,
        true,
        0.02,
    );
    print_metrics("QLoRA 2% + checkpointing (7B)", r);
}

fn print_metrics(label: &str, r: vram_core::MemoryBreakdown) {
    println!("Scenario: [{}]", label);
    println!("  - Weights     : {:.2} GB", r.weights);
    println!("  - KV Cache    : {:.2} GB", r.kv_cache);
    println!("  - Activations : {:.2} GB", r.activations);
    println!("  - Gradients   : {:.2} GB", r.gradients);
    println!("  - Optimizer   : {:.2} GB", r.optimizer);
    println!("  - TOTAL       : {:.2} GB", r.total);
    println!("--------------------------------------------------");
}
