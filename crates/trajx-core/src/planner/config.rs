//! Planner configuration

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Smallest corner ratio allowed; also the fallback for degenerate corners
pub const CORNER_MIN_RATIO: f64 = 0.01;

/// Exponent applied to the corner cosine (higher = slower exits)
pub const CORNER_VELOCITY_EXPONENT: f64 = 5.0;

/// Default feed rate cap [mm/s]
pub const STANDARD_FEEDRATE: f64 = 120.0;

/// Default acceleration cap [mm/s²]
pub const STANDARD_ACCELERATION: f64 = 2000.0;

/// A planned leg enqueues at most this many segments
pub(crate) const SEGMENTS_PER_LEG: usize = 3;

/// Trajectory planner configuration
///
/// # Example
/// ```
/// use trajx_core::PlannerConfig;
///
/// let config = PlannerConfig::new(500)
///     .with_feedrate(250.0)
///     .with_acceleration(4000.0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Sampling rate in Hz
    pub hz: u32,
    /// Feed rate used by [`plan_motion`](crate::TrajectoryPlanner::plan_motion)
    pub feedrate: f64,
    /// Acceleration used by [`plan_motion`](crate::TrajectoryPlanner::plan_motion)
    pub acceleration: f64,
    /// Floor for the corner exit-velocity factor
    pub corner_min_ratio: f64,
    /// Exponent of the corner cosine
    pub corner_exponent: f64,
    /// Bound the segment queue; `None` keeps the unbounded FIFO
    pub queue_capacity: Option<usize>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            hz: 1000,
            feedrate: STANDARD_FEEDRATE,
            acceleration: STANDARD_ACCELERATION,
            corner_min_ratio: CORNER_MIN_RATIO,
            corner_exponent: CORNER_VELOCITY_EXPONENT,
            queue_capacity: None,
        }
    }
}

impl PlannerConfig {
    /// Create a config with the given sampling rate
    pub fn new(hz: u32) -> Self {
        Self {
            hz,
            ..Default::default()
        }
    }

    /// Set the default feed rate
    pub fn with_feedrate(mut self, feedrate: f64) -> Self {
        self.feedrate = feedrate;
        self
    }

    /// Set the default acceleration
    pub fn with_acceleration(mut self, acceleration: f64) -> Self {
        self.acceleration = acceleration;
        self
    }

    /// Set the corner ratio floor
    pub fn with_corner_min_ratio(mut self, ratio: f64) -> Self {
        self.corner_min_ratio = ratio;
        self
    }

    /// Set the corner cosine exponent
    pub fn with_corner_exponent(mut self, exponent: f64) -> Self {
        self.corner_exponent = exponent;
        self
    }

    /// Bound the segment queue (backpressure on `plan`)
    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = Some(capacity);
        self
    }

    /// Sampling period in seconds
    #[inline]
    pub fn dt(&self) -> f64 {
        1.0 / self.hz as f64
    }

    /// Check parameter ranges
    pub fn validate(&self) -> Result<()> {
        if self.hz == 0 {
            return Err(Error::Config("hz must be at least 1".into()));
        }
        if !(self.feedrate.is_finite() && self.feedrate > 0.0) {
            return Err(Error::Config(format!(
                "feedrate must be positive, got {}",
                self.feedrate
            )));
        }
        if !(self.acceleration.is_finite() && self.acceleration > 0.0) {
            return Err(Error::Config(format!(
                "acceleration must be positive, got {}",
                self.acceleration
            )));
        }
        if !(self.corner_min_ratio > 0.0 && self.corner_min_ratio <= 1.0) {
            return Err(Error::Config(format!(
                "corner_min_ratio must be in (0, 1], got {}",
                self.corner_min_ratio
            )));
        }
        if !(self.corner_exponent.is_finite() && self.corner_exponent > 0.0) {
            return Err(Error::Config(format!(
                "corner_exponent must be positive, got {}",
                self.corner_exponent
            )));
        }
        if let Some(capacity) = self.queue_capacity {
            if capacity < SEGMENTS_PER_LEG {
                return Err(Error::Config(format!(
                    "queue capacity must hold at least one full leg ({SEGMENTS_PER_LEG} segments), got {capacity}"
                )));
            }
        }
        Ok(())
    }
}
