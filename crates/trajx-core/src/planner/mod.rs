//! Trajectory planning
//!
//! Waypoints enter through a three-slot lookahead window; each planned leg is
//! decomposed into accelerate/coast/decelerate segments (or a two-phase
//! transition when the distance is too short) and pushed onto a FIFO that the
//! sampler replays at the configured rate.

mod config;
mod corner;
mod leg;
mod queue;
mod sampler;
mod trajectory;
mod waypoint;

pub use config::{
    PlannerConfig, CORNER_MIN_RATIO, CORNER_VELOCITY_EXPONENT, STANDARD_ACCELERATION,
    STANDARD_FEEDRATE,
};
pub use corner::corner_ratio;
pub use queue::SegmentQueue;
pub use trajectory::TrajectoryPlanner;
pub use waypoint::{LookaheadBuffer, Waypoint};

pub(crate) use leg::LegPlanner;
pub(crate) use sampler::Sampler;
