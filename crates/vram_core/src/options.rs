//! Options Module - Enumerated workload settings
//!
//! Closed sets of choices that select entries from the fixed lookup tables:
//! - Precision: bytes per stored weight
//! - OptimizerKind: optimizer state bytes per trainable parameter
//! - Mode: inference or one of the training regimes

pub mod mode;
pub mod optimizer;
pub mod precision;

pub use mode::Mode;
pub use optimizer::OptimizerKind;
pub use precision::Precision;

/// Shared behaviour of the enumerated workload options.
///
/// Each option has a stable snake_case `key` (used in config files and on the
/// command line) and a human-readable `label`. Parsing accepts either,
/// case-insensitively.
pub trait WorkloadOption: Copy + Sized + 'static {
    /// Every variant, in display order.
    const ALL: &'static [Self];

    fn key(self) -> &'static str;

    fn label(self) -> &'static str;

    fn lookup(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.key().eq_ignore_ascii_case(value) || v.label().eq_ignore_ascii_case(value))
    }

    /// Comma separated list of accepted keys, for error messages.
    fn accepted_keys() -> String {
        Self::ALL.iter().map(|v| v.key()).collect::<Vec<_>>().join(", ")
    }
}

/// Wires `FromStr`, `Display` and the serde string conversions of an option
/// to its `WorkloadOption` impl. A miss maps to the given error variant.
macro_rules! impl_option_conversions {
    ($ty:ty, $err:ident) => {
        impl std::str::FromStr for $ty {
            type Err = crate::error::VramError;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                <$ty as crate::options::WorkloadOption>::lookup(s).ok_or_else(|| {
                    crate::error::VramError::$err {
                        value: s.to_string(),
                        expected: <$ty as crate::options::WorkloadOption>::accepted_keys(),
                    }
                })
            }
        }

        impl TryFrom<String> for $ty {
            type Error = crate::error::VramError;

            fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$ty> for String {
            fn from(value: $ty) -> Self {
                crate::options::WorkloadOption::key(value).to_string()
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(crate::options::WorkloadOption::label(*self))
            }
        }
    };
}

pub(crate) use impl_option_conversions;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VramError;

    #[test]
    fn test_keys_are_unique() {
        fn check<T: WorkloadOption>() {
            let mut keys: Vec<_> = T::ALL.iter().map(|v| v.key()).collect();
            keys.sort_unstable();
            keys.dedup();
            assert_eq!(keys.len(), T::ALL.len());
        }
        check::<Precision>();
        check::<OptimizerKind>();
        check::<Mode>();
    }

    #[test]
    fn test_parse_key_and_label() {
        assert_eq!("q4_k_m".parse::<Precision>().unwrap(), Precision::Q4KM);
        assert_eq!("Q4_K_M (~4.69 bpw)".parse::<Precision>().unwrap(), Precision::Q4KM);
        assert_eq!(" ADAMW ".parse::<OptimizerKind>().unwrap(), OptimizerKind::AdamW);
        assert_eq!("Training (QLoRA)".parse::<Mode>().unwrap(), Mode::TrainingQLoRA);
    }

    #[test]
    fn test_unknown_value_fails_loudly() {
        let err = "fp12".parse::<Precision>().unwrap_err();
        match &err {
            VramError::UnknownPrecision { value, expected } => {
                assert_eq!(value, "fp12");
                assert!(expected.contains("q2_k"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!("lion".parse::<OptimizerKind>().is_err());
        assert!("pretraining".parse::<Mode>().is_err());
    }

    #[test]
    fn test_serde_uses_keys() -> anyhow::Result<()> {
        let json = serde_json::to_string(&Precision::Q5KS)?;
        assert_eq!(json, "\"q5_k_s\"");
        let back: Precision = serde_json::from_str("\"BF16 (2.00 bpw)\"")?;
        assert_eq!(back, Precision::Bf16);
        assert!(serde_json::from_str::<Mode>("\"training\"").is_err());
        Ok(())
    }
}
