//! Leg planning
//!
//! Decomposes the straight line between two consecutive waypoints into
//! scheduled segments: accelerate/coast/decelerate when the distance allows
//! reaching the target speed, or a two-phase transition when it does not.
//! Carries `v_enter` (the speed the next leg starts at) and `error` (the
//! signed distance by which discretized durations over/undershot the
//! geometry, compensated in the next coast) across calls.

use tracing::debug;

use crate::math::{discretize, unit_vector, VectorN};
use crate::planner::corner::corner_ratio;
use crate::planner::queue::SegmentQueue;
use crate::planner::waypoint::Waypoint;
use crate::planner::PlannerConfig;
use crate::profile::{Polynomial, Segment};
use crate::Result;

/// Legs shorter than this are dropped as degenerate
const MIN_LEG_LENGTH: f64 = 1e-9;

/// Planner core: carry state plus the scratch polynomial used for fitting
#[derive(Debug, Clone)]
pub(crate) struct LegPlanner {
    hz: f64,
    dt: f64,
    v_enter: f64,
    error: f64,
    poly: Polynomial,
}

impl LegPlanner {
    pub fn new(hz: u32) -> Self {
        Self {
            hz: hz as f64,
            dt: 1.0 / hz as f64,
            v_enter: 0.0,
            error: 0.0,
            poly: Polynomial::default(),
        }
    }

    /// Change the sampling rate; affects subsequent legs only
    pub fn set_hz(&mut self, hz: u32) {
        self.hz = hz as f64;
        self.dt = 1.0 / hz as f64;
    }

    /// Zero the carry state
    pub fn reset(&mut self) {
        self.v_enter = 0.0;
        self.error = 0.0;
    }

    /// Plan the leg `w0 -> w1`, using `w2` for the exit corner at `w1`
    ///
    /// Returns whether any segments were enqueued. A forced `v_final`
    /// replaces the corner-derived exit velocity.
    pub fn plan_leg<const N: usize>(
        &mut self,
        w0: &Waypoint<N>,
        w1: &Waypoint<N>,
        w2: &Waypoint<N>,
        v_final: Option<f64>,
        config: &PlannerConfig,
        queue: &mut SegmentQueue<N>,
    ) -> Result<bool> {
        let delta = w1.setpoint - w0.setpoint;
        let length = delta.norm();
        if length < MIN_LEG_LENGTH {
            debug!("dropping degenerate leg ({length:.3e} long)");
            return Ok(false);
        }

        let v_target = w1.velocity;
        let a_target = w1.acceleration;
        debug_assert!(v_target > 0.0, "waypoint velocity cap must be positive");
        debug_assert!(a_target > 0.0, "waypoint acceleration cap must be positive");
        if v_target <= 0.0 || a_target <= 0.0 {
            debug!("dropping leg with non-positive caps (v {v_target}, a {a_target})");
            return Ok(false);
        }

        let unit = unit_vector(&delta);

        // Exit velocity: forced, or derived from the corner at w1. Ratios
        // above 1 (near-straight corners) mean "no slowdown", never a boost.
        let v_exit = match v_final {
            Some(v) => v,
            None => {
                let ratio = corner_ratio(
                    &w0.setpoint,
                    &w1.setpoint,
                    &w2.setpoint,
                    config.corner_exponent,
                    config.corner_min_ratio,
                );
                v_target * ratio.min(1.0)
            }
        };

        // Time and distance needed to reach the target and exit velocities.
        let t_acc = self.accel_time(v_target - self.v_enter, a_target);
        let p_acc = self.accel_distance(self.v_enter, v_target, t_acc).abs();
        let t_dec = self.accel_time(v_exit - v_target, a_target);
        let p_dec = self.accel_distance(v_target, v_exit, t_dec).abs();

        if length < 1.0 || (p_acc + p_dec) > length {
            debug!("planning transition leg ({length:.4} long, exit {v_exit:.3})");
            self.transition(length, v_target, a_target, v_exit, t_acc, &unit, &w0.setpoint, queue)?;
        } else {
            debug!("planning coasting leg ({length:.4} long, exit {v_exit:.3})");
            self.motion(
                length,
                v_target,
                v_exit,
                p_acc,
                p_dec,
                t_acc,
                t_dec,
                &unit,
                &w0.setpoint,
                queue,
            )?;
        }

        self.v_enter = v_exit;
        Ok(true)
    }

    /// Duration needed to change velocity by `v_delta` under `a_target`
    ///
    /// Fits the normalized ramp and reads its midpoint (peak) acceleration;
    /// the duration is rounded down to a whole number of samples.
    fn accel_time(&mut self, v_delta: f64, a_target: f64) -> f64 {
        self.poly.fit_ramp(v_delta, 1.0);
        discretize(self.poly.acceleration(0.5) / a_target, self.hz)
    }

    /// Distance covered when ramping `v_s -> v_f` over `t`
    fn accel_distance(&mut self, v_s: f64, v_f: f64, t: f64) -> f64 {
        self.poly.fit(v_s, v_f, t);
        self.poly.position(t)
    }

    /// Three-phase leg: accelerate, coast, decelerate
    #[allow(clippy::too_many_arguments)]
    fn motion<const N: usize>(
        &mut self,
        length: f64,
        v_target: f64,
        v_exit: f64,
        p_acc: f64,
        p_dec: f64,
        t_acc: f64,
        t_dec: f64,
        unit: &VectorN<N>,
        origin: &VectorN<N>,
        queue: &mut SegmentQueue<N>,
    ) -> Result<()> {
        // accelerate
        self.poly.fit(self.v_enter, v_target, t_acc);
        self.emit(queue, t_acc, unit, origin, v_target, 0.0, false)?;

        // coast over whatever the ramps leave, minus the carried error
        let t_coast = discretize((length - p_acc - p_dec - self.error) / v_target, self.hz);
        let p_coast = t_coast * v_target;
        self.error = length - p_acc - p_dec - p_coast;
        self.emit(queue, t_coast, unit, origin, v_target, p_acc, true)?;

        // decelerate
        self.poly.fit(v_target, v_exit, t_dec);
        self.emit(queue, t_dec, unit, origin, v_target, p_acc + p_coast, false)
    }

    /// Two-phase transition: the distance is too short to reach `v_target`,
    /// so each half covers `length / 2` with a velocity converged by scaling
    ///
    /// Scaling time and velocity by the distance ratio and then correcting
    /// the velocity against the refitted profile matches the integrated
    /// distance to the half-leg without solving the polynomial analytically.
    #[allow(clippy::too_many_arguments)]
    fn transition<const N: usize>(
        &mut self,
        length: f64,
        mut v_target: f64,
        a_target: f64,
        v_exit: f64,
        t_acc: f64,
        unit: &VectorN<N>,
        origin: &VectorN<N>,
        queue: &mut SegmentQueue<N>,
    ) -> Result<()> {
        let half = length * 0.5;

        // first half: enter velocity toward a scaled-down target
        let mut t = t_acc;
        if t > 0.0 {
            self.poly.fit(self.v_enter, v_target, t_acc);
            let ratio = scale_ratio(half - self.error, self.poly.position(t_acc));
            v_target *= ratio;
            t = self.snap(t_acc * ratio);
            self.poly.fit(self.v_enter, v_target, t);
            v_target = corrected(v_target, half, self.poly.position(t));
            self.poly.fit(self.v_enter, v_target, t);
        } else {
            // no velocity change needed; cover the half at the entry speed
            v_target = self.v_enter;
            t = self.snap((half - self.error) / v_target);
            self.poly.fit(self.v_enter, v_target, t);
        }
        self.error = self.poly.position(t) - half;
        let p_mid = self.poly.position(t);
        self.emit(queue, t, unit, origin, v_target, 0.0, false)?;

        // second half: scaled target toward the exit velocity
        let mut v_exit = v_exit;
        let mut t = self.accel_time(v_target - v_exit, a_target);
        if t > 0.0 {
            self.poly.fit(v_exit, v_target, t);
            let ratio = scale_ratio(half - self.error, self.poly.position(t));
            t = self.snap(t * ratio);
            self.poly.fit(v_target, v_exit, t);
            v_exit = corrected(v_exit, half, self.poly.position(t));
            self.poly.fit(v_target, v_exit, t);
        } else {
            t = self.snap((half - self.error) / v_target);
            self.poly.fit(v_target, v_target, t);
        }
        self.error = self.poly.position(t) - half;
        self.emit(queue, t, unit, origin, v_target, p_mid, false)
    }

    /// Snap a transition half to the sample grid, at least one sample long
    ///
    /// Rounding to the nearest sample keeps segment durations aligned with
    /// the tick clock (so the sampled profile covers the whole fit); the
    /// one-sample floor stops sub-millisecond halves from vanishing before
    /// the velocity correction can stretch them over the half-leg.
    fn snap(&self, t: f64) -> f64 {
        if !(t.is_finite() && t > 0.0) {
            return 0.0;
        }
        (t * self.hz).round().max(1.0) / self.hz
    }

    /// Push one segment spanning `duration`, offset `p_0` along the leg
    #[allow(clippy::too_many_arguments)]
    fn emit<const N: usize>(
        &mut self,
        queue: &mut SegmentQueue<N>,
        duration: f64,
        unit: &VectorN<N>,
        origin: &VectorN<N>,
        v_target: f64,
        p_0: f64,
        is_coast: bool,
    ) -> Result<()> {
        // the epsilon guards grid-aligned durations against representation
        // error flipping the floor one sample short
        let n = (duration * self.hz + 1e-9).floor() as usize;

        let mut poly = if is_coast {
            Polynomial::default()
        } else {
            self.poly
        };
        poly.p0 = p_0;

        queue.push(Segment {
            poly,
            unit: *unit,
            origin: *origin,
            v_target,
            dt: self.dt,
            n,
            duration,
            is_coast,
        })
    }
}

/// Magnitude of `num / den`; zero when the quotient is not finite
fn scale_ratio(num: f64, den: f64) -> f64 {
    let ratio = (num / den).abs();
    if ratio.is_finite() {
        ratio
    } else {
        0.0
    }
}

/// Scale `v` so a profile covering `actual` would cover `target` instead
fn corrected(v: f64, target: f64, actual: f64) -> f64 {
    let k = target / actual;
    if k.is_finite() {
        v * k
    } else {
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn plan(
        planner: &mut LegPlanner,
        queue: &mut SegmentQueue<3>,
        from: [f64; 3],
        to: [f64; 3],
        velocity: f64,
        acceleration: f64,
        v_final: Option<f64>,
    ) -> bool {
        let config = PlannerConfig::new(1000);
        let w0 = Waypoint::new(from, velocity, acceleration);
        let w1 = Waypoint::new(to, velocity, acceleration);
        // straight continuation so the corner does not reduce the exit
        let delta = w1.setpoint - w0.setpoint;
        let w2 = Waypoint {
            setpoint: w1.setpoint + delta,
            ..w1
        };
        planner
            .plan_leg(&w0, &w1, &w2, v_final, &config, queue)
            .unwrap()
    }

    #[test]
    fn test_degenerate_leg_dropped() {
        let mut planner = LegPlanner::new(1000);
        let mut queue = SegmentQueue::new();
        let planned = plan(
            &mut planner,
            &mut queue,
            [1.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            100.0,
            1000.0,
            None,
        );
        assert!(!planned);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_long_leg_three_phases() {
        let mut planner = LegPlanner::new(1000);
        let mut queue = SegmentQueue::new();
        plan(
            &mut planner,
            &mut queue,
            [0.0, 0.0, 0.0],
            [100.0, 0.0, 0.0],
            100.0,
            2000.0,
            None,
        );
        assert_eq!(queue.len(), 3);

        let accel = queue.pop().unwrap();
        let coast = queue.pop().unwrap();
        let decel = queue.pop().unwrap();
        assert!(!accel.is_coast && coast.is_coast && !decel.is_coast);

        // accelerate: from rest to the cap, zero-jerk boundaries
        assert_relative_eq!(accel.scalar_velocity_at(0), 0.0, epsilon = 1e-9);
        assert_relative_eq!(accel.scalar_velocity_at(accel.n), 100.0, epsilon = 1e-3);
        assert_relative_eq!(accel.poly.acceleration(0.0), 0.0, epsilon = 1e-9);
        assert_relative_eq!(accel.poly.acceleration(accel.duration), 0.0, epsilon = 1e-6);

        // coast picks up where the ramp left off
        assert_relative_eq!(coast.poly.p0, accel.scalar_position_at(accel.n), epsilon = 1e-6);
        assert_relative_eq!(coast.v_target, 100.0, epsilon = 1e-12);

        // straight continuation: exit stays at the cap
        assert_relative_eq!(decel.scalar_velocity_at(decel.n), 100.0, epsilon = 1e-3);

        // distance conservation: the three pieces cover the leg to within
        // one sample of coast
        let total = decel.scalar_position_at(decel.n.max(1));
        assert!((100.0 - total).abs() <= 100.0 * planner.dt + 1e-6);
    }

    #[test]
    fn test_short_leg_two_phase_transition() {
        let mut planner = LegPlanner::new(1000);
        let mut queue = SegmentQueue::new();
        plan(
            &mut planner,
            &mut queue,
            [0.0, 0.0, 0.0],
            [0.1, 0.0, 0.0],
            1000.0,
            5000.0,
            Some(0.0),
        );
        assert_eq!(queue.len(), 2);

        let first = queue.pop().unwrap();
        let second = queue.pop().unwrap();
        assert!(!first.is_coast && !second.is_coast);

        // each half covers length/2; together they land on the target
        assert_relative_eq!(second.poly.p0, 0.05, epsilon = 1e-9);
        assert_relative_eq!(
            second.scalar_position_at(second.n + 1),
            0.1,
            epsilon = 1e-9
        );
        // starts at rest, ends at the forced exit velocity
        assert_relative_eq!(first.scalar_velocity_at(0), 0.0, epsilon = 1e-9);
        assert_relative_eq!(
            second.scalar_velocity_at(second.n + 1),
            0.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_transition_with_equal_boundary_speeds() {
        // second leg of a straight chain enters at the cap; the leg is too
        // short to matter and both halves run at constant speed
        let mut planner = LegPlanner::new(1000);
        let mut queue = SegmentQueue::new();
        plan(
            &mut planner,
            &mut queue,
            [0.0, 0.0, 0.0],
            [10.0, 0.0, 0.0],
            500.0,
            1000.0,
            None,
        );
        queue.clear();

        plan(
            &mut planner,
            &mut queue,
            [10.0, 0.0, 0.0],
            [10.8, 0.0, 0.0],
            500.0,
            1000.0,
            None,
        );
        assert_eq!(queue.len(), 2);
        let first = queue.pop().unwrap();
        let second = queue.pop().unwrap();
        // no NaN anywhere, speeds stay near the cap
        assert!(first.scalar_velocity_at(0).is_finite());
        assert!(second.scalar_position_at(second.n + 1).is_finite());
        assert_relative_eq!(first.scalar_velocity_at(0), 500.0, epsilon = 1.0);
    }

    #[test]
    fn test_forced_exit_above_cap() {
        // a forced v_final above the waypoint cap is honored as-is
        let mut planner = LegPlanner::new(1000);
        let mut queue = SegmentQueue::new();
        plan(
            &mut planner,
            &mut queue,
            [0.0, 0.0, 0.0],
            [100.0, 0.0, 0.0],
            100.0,
            2000.0,
            Some(150.0),
        );
        assert_eq!(queue.len(), 3);
        queue.pop();
        queue.pop();
        let decel = queue.pop().unwrap();
        assert_relative_eq!(decel.scalar_velocity_at(decel.n + 1), 150.0, epsilon = 1e-6);
    }
}
