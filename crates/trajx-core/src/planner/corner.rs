//! Corner model
//!
//! Maps the angle formed by three consecutive waypoints to a multiplicative
//! exit-velocity factor for the leg ending at the middle waypoint.

use std::f64::consts::PI;

use crate::math::VectorN;

/// Exit-velocity factor for the corner at `b`, formed by `a -> b -> c`
///
/// The factor is `(|cos θ|)^exponent · π` where `θ` is the angle between
/// `a − b` and `c − b`. Straight-through corners (|cos| = 1) come out at π
/// and mean "no slowdown"; sharp corners head toward zero and are floored at
/// `min_ratio`. Degenerate geometry (zero-length neighbours, anything
/// non-finite) also clamps to `min_ratio`.
pub fn corner_ratio<const N: usize>(
    a: &VectorN<N>,
    b: &VectorN<N>,
    c: &VectorN<N>,
    exponent: f64,
    min_ratio: f64,
) -> f64 {
    let u = a - b;
    let w = c - b;

    let cos = (u.dot(&w) / (u.norm() * w.norm())).abs();
    let ratio = cos.powf(exponent) * PI;

    if !ratio.is_finite() || ratio < min_ratio {
        min_ratio
    } else {
        ratio
    }
}
