//! Trajectory planner facade
//!
//! One value owning the lookahead window, the leg planner, the segment queue
//! and the sampler. Callers stream waypoints in through `plan`/`plan_final`
//! and read per-tick setpoints out.

use crate::math::VectorN;
use crate::planner::config::SEGMENTS_PER_LEG;
use crate::planner::{
    LegPlanner, LookaheadBuffer, PlannerConfig, Sampler, SegmentQueue, Waypoint,
};
use crate::Result;

/// Trajectory planner for N-dimensional Cartesian motion
///
/// Waypoints are planned one leg behind: the leg ending at waypoint *k* is
/// computed when waypoint *k + 1* arrives, so the exit corner at *k* is
/// known. Use [`plan_final`](Self::plan_final) to flush the tail of a path
/// (or to run a single terminal move).
///
/// Sampling contract, once per tick: read any of the setpoint getters, then
/// call [`increment_sample`](Self::increment_sample). After the queue drains
/// the getters hold the terminal state indefinitely.
#[derive(Debug, Clone)]
pub struct TrajectoryPlanner<const N: usize> {
    config: PlannerConfig,
    lookahead: LookaheadBuffer<N>,
    leg: LegPlanner,
    queue: SegmentQueue<N>,
    sampler: Sampler<N>,
}

impl<const N: usize> TrajectoryPlanner<N> {
    /// Create a planner; the first leg will start from the origin
    pub fn new(config: PlannerConfig) -> Result<Self> {
        config.validate()?;
        let queue = match config.queue_capacity {
            Some(capacity) => SegmentQueue::bounded(capacity),
            None => SegmentQueue::new(),
        };
        Ok(Self {
            config,
            lookahead: LookaheadBuffer::new(),
            leg: LegPlanner::new(config.hz),
            queue,
            sampler: Sampler::new(),
        })
    }

    /// Create a planner whose first leg starts from `position`
    pub fn from_position(config: PlannerConfig, position: [f64; N]) -> Result<Self> {
        let mut planner = Self::new(config)?;
        planner.lookahead = LookaheadBuffer::seeded(VectorN::from(position));
        Ok(planner)
    }

    /// Queue a waypoint with the configured default caps
    pub fn plan_motion(&mut self, position: [f64; N]) -> Result<()> {
        self.plan(Waypoint::new(
            position,
            self.config.feedrate,
            self.config.acceleration,
        ))
    }

    /// Queue a waypoint; the exit velocity of its leg follows the corner
    ///
    /// Degenerate legs (duplicate waypoints) advance the window without
    /// producing segments. With a bounded queue, `Err(QueueFull)` rejects
    /// the waypoint without consuming it; drain some samples and retry.
    pub fn plan(&mut self, waypoint: Waypoint<N>) -> Result<()> {
        self.append_and_plan(waypoint, None)
    }

    /// Queue a terminal waypoint and flush: the leg ending at it is planned
    /// immediately with the forced exit velocity `v_exit`
    ///
    /// Sampling can start right after this call; no successor waypoint is
    /// needed. `v_exit` may exceed the waypoint's velocity cap.
    pub fn plan_final(&mut self, waypoint: Waypoint<N>, v_exit: f64) -> Result<()> {
        self.append_and_plan(waypoint, None)?;
        self.append_and_plan(waypoint, Some(v_exit))
    }

    fn append_and_plan(&mut self, waypoint: Waypoint<N>, v_final: Option<f64>) -> Result<()> {
        // reject before touching the window so the caller can retry
        self.queue.ensure_room(SEGMENTS_PER_LEG)?;
        self.lookahead.push(waypoint);

        let w0 = *self.lookahead.prev();
        let w1 = *self.lookahead.current();
        let w2 = *self.lookahead.next();
        self.leg
            .plan_leg(&w0, &w1, &w2, v_final, &self.config, &mut self.queue)?;
        Ok(())
    }

    /// Per-axis velocity setpoint for the current tick
    pub fn velocity_setpoint(&mut self) -> [f64; N] {
        self.sampler.velocity(&mut self.queue).into()
    }

    /// Per-axis position setpoint for the current tick
    pub fn position_setpoint(&mut self) -> [f64; N] {
        self.sampler.position(&mut self.queue).into()
    }

    /// Per-axis acceleration setpoint for the current tick
    pub fn acceleration_setpoint(&mut self) -> [f64; N] {
        self.sampler.acceleration(&mut self.queue).into()
    }

    /// Advance to the next sample; returns whether a motion is in progress
    pub fn increment_sample(&mut self) -> bool {
        self.sampler.advance(&mut self.queue)
    }

    /// Whether the sampler is still playing out segments
    pub fn is_motion_in_progress(&self) -> bool {
        self.sampler.is_in_progress()
    }

    /// Number of queued segments not yet picked up by the sampler
    pub fn queue_size(&self) -> usize {
        self.queue.len()
    }

    /// Total samples pending in the queue (the sum of `n + 1` per segment)
    pub fn pending_samples(&self) -> usize {
        self.queue.pending_samples()
    }

    /// Change the sampling rate; already queued segments keep their timing
    pub fn set_hz(&mut self, hz: u32) -> Result<()> {
        let mut config = self.config;
        config.hz = hz;
        config.validate()?;
        self.config = config;
        self.leg.set_hz(hz);
        Ok(())
    }

    /// The active configuration
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Drop queued segments, the carry state and the lookahead window
    pub fn reset(&mut self) {
        self.queue.clear();
        self.sampler.reset();
        self.leg.reset();
        self.lookahead = LookaheadBuffer::new();
    }
}
