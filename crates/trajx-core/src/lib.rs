//! trajx-core: polynomial trajectory generation for N-dimensional Cartesian motion
//!
//! Feed the planner a stream of target waypoints (position plus velocity and
//! acceleration caps) and sample it at a fixed rate; it produces per-axis
//! position, velocity and acceleration setpoints realizing a smooth 7th-order
//! polynomial velocity profile along the straight line between successive
//! waypoints. A three-waypoint lookahead slows the mover through corners in
//! proportion to how sharp the angle is.
//!
//! # Modules
//!
//! - [`math`] - vector primitives and discretization helpers
//! - [`profile`] - the 7th-order motion polynomial and scheduled segments
//! - [`planner`] - lookahead, corner model, segment queue and the planner facade
//! - [`orientation`] - experimental quaternion adapter for angular motion
//!
//! # Data flow
//!
//! ```text
//! plan(waypoint) ──► LookaheadBuffer ──► LegPlanner ──► SegmentQueue
//!                                                           │
//! setpoint getters ◄── Sampler ◄── Segment ◄── Polynomial ◄─┘
//! ```
//!
//! # Example
//!
//! ```
//! use trajx_core::{PlannerConfig, TrajectoryPlanner, Waypoint};
//!
//! let config = PlannerConfig::new(1000);
//! let mut planner = TrajectoryPlanner::from_position(config, [0.0, 0.0, 0.0]).unwrap();
//!
//! // Terminal move: plan the leg immediately and come to rest at the target.
//! planner
//!     .plan_final(Waypoint::new([10.0, 0.0, 0.0], 100.0, 1000.0), 0.0)
//!     .unwrap();
//!
//! while planner.increment_sample() {
//!     let _position = planner.position_setpoint();
//! }
//! ```
//!
//! The planner is single-threaded cooperative: no method blocks and no state
//! is shared internally. Wrap the instance in external mutual exclusion if
//! several threads must touch it.

#![warn(unused_must_use)]

pub mod math;
pub mod orientation;
pub mod planner;
pub mod profile;

// Re-exports for convenience
pub use orientation::OrientationPlanner;
pub use planner::{
    corner_ratio, LookaheadBuffer, PlannerConfig, SegmentQueue, TrajectoryPlanner, Waypoint,
};
pub use profile::{Polynomial, Segment};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Error types for trajx-core
///
/// Planning and sampling never panic; the only fallible paths are
/// configuration validation and bounded-queue backpressure.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Invalid configuration parameter.
    /// Handle by: validating ranges before constructing the planner.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The segment queue cannot accept another leg (backpressure).
    /// Handle by: draining samples before planning more waypoints.
    #[error("Segment queue full (capacity {capacity})")]
    QueueFull {
        /// Configured queue capacity in segments.
        capacity: usize,
    },
}

/// Result type alias for trajx-core operations
pub type Result<T> = std::result::Result<T, Error>;
