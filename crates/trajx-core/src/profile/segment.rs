//! Scheduled motion segments
//!
//! A segment is one piece of a leg with a single profile: accelerate, coast,
//! decelerate, or one half of a short-leg transition. The planner emits them
//! into the queue; the sampler replays them one tick at a time.

use crate::math::VectorN;
use crate::profile::Polynomial;

/// One scheduled sub-segment of a leg
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment<const N: usize> {
    /// Scalar profile along the leg; `poly.p0` is the along-leg start offset
    pub poly: Polynomial,
    /// Unit vector of the leg
    pub unit: VectorN<N>,
    /// Cartesian start of the leg this segment belongs to
    pub origin: VectorN<N>,
    /// Target scalar speed; the coast speed when `is_coast` is set
    pub v_target: f64,
    /// Sampling period
    pub dt: f64,
    /// Number of whole samples in the segment
    pub n: usize,
    /// Fitted duration; sampling never evaluates the profile past it
    pub duration: f64,
    /// Constant-speed segment: position advances linearly from `poly.p0`
    pub is_coast: bool,
}

impl<const N: usize> Default for Segment<N> {
    /// The zero segment: no samples, all outputs zero
    fn default() -> Self {
        Self {
            poly: Polynomial::default(),
            unit: VectorN::zeros(),
            origin: VectorN::zeros(),
            v_target: 0.0,
            dt: 0.0,
            n: 0,
            duration: 0.0,
            is_coast: false,
        }
    }
}

impl<const N: usize> Segment<N> {
    /// Profile time for sample `k`, clamped to the fitted duration
    ///
    /// The clamp keeps the trailing boundary sample (`k = n + 1` sentinel)
    /// on the exact segment endpoint instead of extrapolating the 7th-order
    /// polynomial outside its interval.
    #[inline]
    fn sample_time(&self, k: usize) -> f64 {
        (k as f64 * self.dt).min(self.duration)
    }

    /// Scalar speed at sample `k`
    #[inline]
    pub fn scalar_velocity_at(&self, k: usize) -> f64 {
        if self.is_coast {
            self.v_target
        } else {
            self.poly.velocity(self.sample_time(k))
        }
    }

    /// Scalar along-leg position at sample `k` (includes the start offset)
    #[inline]
    pub fn scalar_position_at(&self, k: usize) -> f64 {
        if self.is_coast {
            self.poly.p0 + self.v_target * self.sample_time(k)
        } else {
            self.poly.position(self.sample_time(k))
        }
    }

    /// Per-axis velocity setpoint at sample `k`
    pub fn velocity_at(&self, k: usize) -> VectorN<N> {
        self.unit * self.scalar_velocity_at(k)
    }

    /// Per-axis position setpoint at sample `k`
    pub fn position_at(&self, k: usize) -> VectorN<N> {
        self.origin + self.unit * self.scalar_position_at(k)
    }

    /// Per-axis acceleration setpoint at sample `k`; zero while coasting
    pub fn acceleration_at(&self, k: usize) -> VectorN<N> {
        if self.is_coast {
            VectorN::zeros()
        } else {
            self.unit * self.poly.acceleration(self.sample_time(k))
        }
    }
}
