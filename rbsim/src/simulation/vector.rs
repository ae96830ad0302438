//! 2D vector helpers on top of `nalgebra`
//!
//! `NVec2` already gives value arithmetic (`+`, `-`, scalar `*` and `/`), the
//! in-place forms, `dot` and `magnitude`. This module adds the zero-guarded
//! operations the collision code relies on: a division and a normalization that
//! never produce infinity/NaN, and point-to-point distance.

use super::states::NVec2;

/// Denominator substituted for an exact zero (or a zero-length normal)
pub const EPSILON: f64 = 1e-6;

/// Zero-safe operations for [`NVec2`]
pub trait Vector2Ext {
    /// `self / s`, with `s == 0` replaced by [`EPSILON`]
    fn safe_div(&self, s: f64) -> NVec2;

    /// `self / max(|self|, EPSILON)`, the zero vector stays zero
    fn safe_normalize(&self) -> NVec2;

    /// Euclidean distance between two points
    fn distance_to(&self, other: &NVec2) -> f64;
}

impl Vector2Ext for NVec2 {
    fn safe_div(&self, s: f64) -> NVec2 {
        let d = if s == 0.0 { EPSILON } else { s };
        self / d
    }

    fn safe_normalize(&self) -> NVec2 {
        self / self.magnitude().max(EPSILON)
    }

    fn distance_to(&self, other: &NVec2) -> f64 {
        (self - other).magnitude()
    }
}
