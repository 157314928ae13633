//! Precision - storage format of the model weights

use serde::{Deserialize, Serialize};

use super::{impl_option_conversions, WorkloadOption};

/// Bit-width or quantization scheme used to store the weights.
///
/// The K-quant variants carry fractional bytes per weight because their
/// block scales add a little on top of the nominal bit-width.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Precision {
    Fp32,
    Fp16,
    Bf16,
    Fp8,
    Int8,
    Q6K,
    Q5KM,
    Q5KS,
    Q4KM,
    Q4KS,
    /// INT4 as produced by GPTQ / AWQ.
    Int4,
    Q3KM,
    Q3KS,
    Q2K,
}

impl Precision {
    /// Bytes needed to store one weight.
    pub const fn bytes_per_param(self) -> f64 {
        match self {
            Precision::Fp32 => 4.0,
            Precision::Fp16 => 2.0,
            Precision::Bf16 => 2.0,
            Precision::Fp8 => 1.0,
            Precision::Int8 => 1.0,
            Precision::Q6K => 6.5625 / 8.0,
            Precision::Q5KM => 5.6875 / 8.0,
            Precision::Q5KS => 5.5 / 8.0,
            Precision::Q4KM => 4.6875 / 8.0,
            Precision::Q4KS => 4.5 / 8.0,
            Precision::Int4 => 0.5,
            Precision::Q3KM => 3.91 / 8.0,
            Precision::Q3KS => 3.44 / 8.0,
            Precision::Q2K => 2.63 / 8.0,
        }
    }

    pub fn bits_per_weight(self) -> f64 {
        self.bytes_per_param() * 8.0
    }
}

impl WorkloadOption for Precision {
    const ALL: &'static [Self] = &[
        Precision::Fp32,
        Precision::Fp16,
        Precision::Bf16,
        Precision::Fp8,
        Precision::Int8,
        Precision::Q6K,
        Precision::Q5KM,
        Precision::Q5KS,
        Precision::Q4KM,
        Precision::Q4KS,
        Precision::Int4,
        Precision::Q3KM,
        Precision::Q3KS,
        Precision::Q2K,
    ];

    fn key(self) -> &'static str {
        match self {
            Precision::Fp32 => "fp32",
            Precision::Fp16 => "fp16",
            Precision::Bf16 => "bf16",
            Precision::Fp8 => "fp8",
            Precision::Int8 => "int8",
            Precision::Q6K => "q6_k",
            Precision::Q5KM => "q5_k_m",
            Precision::Q5KS => "q5_k_s",
            Precision::Q4KM => "q4_k_m",
            Precision::Q4KS => "q4_k_s",
            Precision::Int4 => "int4",
            Precision::Q3KM => "q3_k_m",
            Precision::Q3KS => "q3_k_s",
            Precision::Q2K => "q2_k",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Precision::Fp32 => "FP32 (4.00 bpw)",
            Precision::Fp16 => "FP16 (2.00 bpw)",
            Precision::Bf16 => "BF16 (2.00 bpw)",
            Precision::Fp8 => "FP8 (1.00 bpw)",
            Precision::Int8 => "INT8 (1.00 bpw)",
            Precision::Q6K => "Q6_K (~6.56 bpw)",
            Precision::Q5KM => "Q5_K_M (~5.69 bpw)",
            Precision::Q5KS => "Q5_K_S (~5.50 bpw)",
            Precision::Q4KM => "Q4_K_M (~4.69 bpw)",
            Precision::Q4KS => "Q4_K_S (~4.50 bpw)",
            Precision::Int4 => "INT4/GPTQ/AWQ (4.00 bpw)",
            Precision::Q3KM => "Q3_K_M (~3.91 bpw)",
            Precision::Q3KS => "Q3_K_S (~3.44 bpw)",
            Precision::Q2K => "Q2_K (~2.63 bpw)",
        }
    }
}

impl_option_conversions!(Precision, UnknownPrecision);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_table() {
        assert_eq!(Precision::Fp32.bytes_per_param(), 4.0);
        assert_eq!(Precision::Bf16.bytes_per_param(), Precision::Fp16.bytes_per_param());
        assert_eq!(Precision::Int4.bytes_per_param(), 0.5);
        assert!((Precision::Q6K.bytes_per_param() - 0.8203125).abs() < 1e-12);
        assert!((Precision::Q2K.bits_per_weight() - 2.63).abs() < 1e-12);
    }

    #[test]
    fn test_quantized_formats_are_sub_byte() {
        for p in Precision::ALL {
            if p.key().starts_with('q') {
                assert!(p.bytes_per_param() < 1.0, "{} should be sub-byte", p.key());
            }
        }
    }
}
