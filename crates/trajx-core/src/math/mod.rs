//! Vector primitives and discretization helpers
//!
//! Thin layer over nalgebra's statically sized vectors; the planner works on
//! `[f64; N]` at its API boundary and on [`VectorN`] internally.

/// Type alias for an N-dimensional column vector
pub type VectorN<const N: usize> = nalgebra::SVector<f64, N>;

/// Unit vector of `v`, or the zero vector when `v` has (near-)zero length
#[inline]
pub fn unit_vector<const N: usize>(v: &VectorN<N>) -> VectorN<N> {
    let norm = v.norm();
    if norm.is_finite() && norm > 0.0 {
        v / norm
    } else {
        VectorN::zeros()
    }
}

/// Sign of a scalar: -1, 0 or 1
#[inline]
pub fn sgn(value: f64) -> f64 {
    ((0.0 < value) as i8 - (value < 0.0) as i8) as f64
}

/// Element-wise sign of a vector
#[inline]
pub fn sign<const N: usize>(v: &VectorN<N>) -> VectorN<N> {
    v.map(sgn)
}

/// Linearly interpolate between two values
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Trapezoidal integration step from `v_prev` to `v` over `dt`
#[inline]
pub fn integrate(v_prev: f64, v: f64, dt: f64) -> f64 {
    (v_prev + (v - v_prev) * 0.5) * dt
}

/// Round `|t|` down to a whole number of samples at `hz`
///
/// All planned durations pass through here so that segments always span an
/// integral number of ticks. Non-finite input collapses to zero.
#[inline]
pub fn discretize(t: f64, hz: f64) -> f64 {
    if !t.is_finite() {
        return 0.0;
    }
    (t.abs() * hz).trunc() / hz
}
