//! Orientation planning over quaternion components
//!
//! Experimental adapter: a four-dimensional [`TrajectoryPlanner`] drives the
//! raw quaternion components linearly between orientations, with Euler-angle
//! conversion at both ends. Component-wise interpolation is not a true
//! shortest-arc rotation; for large reorientations prefer driving joint or
//! axis targets directly.

use nalgebra::{Quaternion, UnitQuaternion};

use crate::planner::{PlannerConfig, TrajectoryPlanner, Waypoint};
use crate::Result;

/// Hamilton-convention component order: `[w, x, y, z]`
type Components = [f64; 4];

/// Angular setpoint generator wrapping a 4-dimensional planner
#[derive(Debug, Clone)]
pub struct OrientationPlanner {
    inner: TrajectoryPlanner<4>,
}

impl OrientationPlanner {
    /// Create a planner starting at the identity orientation
    pub fn new(config: PlannerConfig) -> Result<Self> {
        Ok(Self {
            inner: TrajectoryPlanner::from_position(config, [1.0, 0.0, 0.0, 0.0])?,
        })
    }

    /// Plan a terminal rotation to the given Euler angles (radians)
    ///
    /// `velocity` and `acceleration` cap the quaternion-component rates; the
    /// move comes to rest at the target orientation.
    pub fn set_orientation(
        &mut self,
        roll: f64,
        pitch: f64,
        yaw: f64,
        velocity: f64,
        acceleration: f64,
    ) -> Result<()> {
        let q = UnitQuaternion::from_euler_angles(roll, pitch, yaw);
        let target = [q.w, q.i, q.j, q.k];
        self.inner
            .plan_final(Waypoint::new(target, velocity, acceleration), 0.0)
    }

    /// Orientation setpoint for the current tick as Euler angles
    /// `[roll, pitch, yaw]`
    pub fn angular_position_setpoint(&mut self) -> [f64; 3] {
        euler_from_components(self.inner.position_setpoint())
    }

    /// Raw quaternion-component setpoint `[w, x, y, z]` (not renormalized)
    pub fn orientation_setpoint(&mut self) -> Components {
        self.inner.position_setpoint()
    }

    /// Raw quaternion-component rates `[w', x', y', z']`
    ///
    /// Component rates are not an angular velocity vector; integrate or
    /// convert downstream as needed.
    pub fn component_velocity_setpoint(&mut self) -> Components {
        self.inner.velocity_setpoint()
    }

    /// Advance to the next sample; returns whether a rotation is in progress
    pub fn increment_sample(&mut self) -> bool {
        self.inner.increment_sample()
    }

    /// Whether a rotation is still being played out
    pub fn is_motion_in_progress(&self) -> bool {
        self.inner.is_motion_in_progress()
    }
}

/// Euler angles of a (possibly unnormalized) quaternion sample
fn euler_from_components(c: Components) -> [f64; 3] {
    let q = Quaternion::new(c[0], c[1], c[2], c[3]);
    if q.norm() < 1e-12 {
        return [0.0; 3];
    }
    let (roll, pitch, yaw) = UnitQuaternion::from_quaternion(q).euler_angles();
    [roll, pitch, yaw]
}
