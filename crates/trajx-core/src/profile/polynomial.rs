//! Scalar 7th-order position profile
//!
//! The position polynomial is
//! `p(t) = p0 + v0·t + c3·t⁴/4 + c4·t⁵/5 + c5·t⁶/6 + c6·t⁷/7`,
//! whose derivative is a velocity ramp with zero acceleration and zero jerk
//! at both ends of the fitted interval. The shape is the classic S-curve
//! used to avoid exciting mechanical resonance.

/// Evaluation constant for the Horner form of the position polynomial
const POSITION_SCALE: f64 = 1.0 / 420.0;

/// Constants of one fitted velocity ramp
///
/// A fit enforces `v(0) = v_s`, `v(t) = v_f` and `a(0) = a(t) = 0`; the
/// midpoint velocity `v(t/2)` is a free parameter of the family and defaults
/// to the boundary average.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Polynomial {
    pub c3: f64,
    pub c4: f64,
    pub c5: f64,
    pub c6: f64,
    /// Velocity at `t = 0`
    pub v0: f64,
    /// Position offset at `t = 0`, along the owning segment's unit vector
    pub p0: f64,
}

impl Polynomial {
    /// Fit a ramp from rest to `v_f` over `t`, midpoint at `v_f / 2`
    ///
    /// Only used to derive timing: the peak acceleration of the normalized
    /// ramp (`t = 1`) is what [`acceleration`](Self::acceleration) reports at
    /// `t = 0.5`.
    pub fn fit_ramp(&mut self, v_f: f64, t: f64) {
        self.fit_with_midpoint(0.0, v_f * 0.5, v_f, t);
    }

    /// Fit boundary velocities over `t`, midpoint at the boundary average
    pub fn fit(&mut self, v_s: f64, v_f: f64, t: f64) {
        self.fit_with_midpoint(v_s, (v_s + v_f) * 0.5, v_f, t);
    }

    /// Fit boundary velocities over `t` with an explicit midpoint velocity
    ///
    /// A non-positive (or non-finite) `t` only arises when the velocity does
    /// not change; the fit then degrades to a constant-velocity profile
    /// instead of dividing by zero.
    pub fn fit_with_midpoint(&mut self, v_s: f64, v_v: f64, v_f: f64, t: f64) {
        self.v0 = v_s;

        if !(t.is_finite() && t > 0.0) {
            self.c3 = 0.0;
            self.c4 = 0.0;
            self.c5 = 0.0;
            self.c6 = 0.0;
            return;
        }

        let d0 = v_v - v_s;
        let d1 = v_f - v_s;

        let t3 = t * t * t;
        let t4 = t3 * t;
        let t5 = t4 * t;
        let t6 = t5 * t;

        self.c3 = 2.0 * (32.0 * d0 - 11.0 * d1) / t3;
        self.c4 = -3.0 * (64.0 * d0 - 27.0 * d1) / t4;
        self.c5 = 3.0 * (64.0 * d0 - 30.0 * d1) / t5;
        self.c6 = -32.0 * (2.0 * d0 - d1) / t6;
    }

    /// Position at `t`
    #[inline]
    pub fn position(&self, t: f64) -> f64 {
        let t3 = t * t * t;
        POSITION_SCALE
            * t
            * (105.0 * self.c3 * t3
                + 84.0 * self.c4 * t3 * t
                + 70.0 * self.c5 * t3 * t * t
                + 60.0 * self.c6 * t3 * t3
                + 420.0 * self.v0)
            + self.p0
    }

    /// Velocity at `t`
    #[inline]
    pub fn velocity(&self, t: f64) -> f64 {
        (t * t * t) * (t * (t * (self.c6 * t + self.c5) + self.c4) + self.c3) + self.v0
    }

    /// Acceleration at `t`
    #[inline]
    pub fn acceleration(&self, t: f64) -> f64 {
        (t * t) * (t * (6.0 * self.c6 * (t * t) + 5.0 * self.c5 * t + 4.0 * self.c4) + 3.0 * self.c3)
    }
}
