//! Architecture Estimator
//!
//! Maps a scalar parameter count to a plausible dense transformer shape by
//! piecewise-linear interpolation over known model families.

use serde::{Deserialize, Serialize};

// ============================================================
// Constants
// ============================================================
/// Attention head count reported for every size.
///
/// Not derived from the reference data; no head-count scaling rule is known
/// for the table, so it stays fixed.
pub const DEFAULT_HEADS: u32 = 32;

/// One known architecture: parameters (billions), block count, model width.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReferencePoint {
    pub params: f64,
    pub layers: u32,
    pub hidden_size: u32,
}

impl ReferencePoint {
    const fn new(params: f64, layers: u32, hidden_size: u32) -> Self {
        Self {
            params,
            layers,
            hidden_size,
        }
    }
}

/// Reference architectures, ascending by `params`.
///
/// `layers` and `hidden_size` never decrease along the table.
pub const REFERENCE_ARCHITECTURES: &[ReferencePoint] = &[
    ReferencePoint::new(0.1, 12, 768),
    ReferencePoint::new(0.5, 24, 1024),
    ReferencePoint::new(1.5, 24, 2048), // GPT-2 XL class
    ReferencePoint::new(3.0, 32, 2560),
    ReferencePoint::new(7.0, 32, 4096),   // Llama 2 7B
    ReferencePoint::new(13.0, 40, 5120),  // Llama 2 13B
    ReferencePoint::new(34.0, 60, 7168),  // Yi 34B
    ReferencePoint::new(70.0, 80, 8192),  // Llama 2 70B
    ReferencePoint::new(180.0, 80, 14848), // Falcon 180B
    ReferencePoint::new(500.0, 100, 18000),
    ReferencePoint::new(2000.0, 140, 30000),
];

/// Estimated architecture for a parameter count.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelSpecs {
    /// Billions of parameters, echoed from the input.
    pub params: f64,
    pub layers: u32,
    pub hidden_size: u32,
    pub heads: u32,
}

impl ModelSpecs {
    /// Absolute parameter count.
    pub fn param_count(&self) -> f64 {
        self.params * 1e9
    }
}

/// Estimate the architecture of a `params_in_billions` model.
///
/// Inputs outside the table saturate to the nearest endpoint instead of
/// extrapolating. The caller must pass a finite, positive value; anything else
/// still returns, but the shape is meaningless.
pub fn estimate_architecture(params_in_billions: f64) -> ModelSpecs {
    interpolate(REFERENCE_ARCHITECTURES, params_in_billions)
}

fn interpolate(table: &[ReferencePoint], params: f64) -> ModelSpecs {
    debug_assert!(table.len() >= 2, "reference table needs two points");

    let (lower, upper) = bracket(table, params);

    let t = (params - lower.params) / (upper.params - lower.params);
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };

    let layers = lerp(lower.layers, upper.layers, t);
    let hidden_size = lerp(lower.hidden_size, upper.hidden_size, t);

    tracing::trace!(
        params,
        lower = lower.params,
        upper = upper.params,
        t,
        layers,
        hidden_size,
        "interpolated architecture"
    );

    ModelSpecs {
        params,
        layers,
        hidden_size,
        heads: DEFAULT_HEADS,
    }
}

/// First interval containing `params`, or the whole table when none does.
fn bracket(table: &[ReferencePoint], params: f64) -> (ReferencePoint, ReferencePoint) {
    table
        .windows(2)
        .find(|w| params >= w[0].params && params <= w[1].params)
        .map(|w| (w[0], w[1]))
        .unwrap_or((table[0], table[table.len() - 1]))
}

fn lerp(a: u32, b: u32, t: f64) -> u32 {
    let (a, b) = (f64::from(a), f64::from(b));
    (a + t * (b - a)).round() as u32
}
