//! Segment sampling
//!
//! Replays queued segments one tick at a time: the setpoint getters read the
//! current sample, `advance` moves to the next one. Dequeueing happens
//! lazily when the current segment runs out.

use crate::math::VectorN;
use crate::planner::queue::SegmentQueue;
use crate::profile::Segment;

/// Current segment plus the sample index into it
#[derive(Debug, Clone)]
pub(crate) struct Sampler<const N: usize> {
    current: Segment<N>,
    sample_idx: usize,
    in_progress: bool,
    /// A freshly dequeued segment holds its first sample until the caller
    /// advances, keeping same-tick getters coherent across n = 0 segments.
    just_loaded: bool,
}

impl<const N: usize> Default for Sampler<N> {
    fn default() -> Self {
        Self {
            current: Segment::default(),
            sample_idx: 0,
            in_progress: false,
            just_loaded: false,
        }
    }
}

impl<const N: usize> Sampler<N> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to the idle zero segment
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Whether a motion is still being played out
    pub fn is_in_progress(&self) -> bool {
        self.in_progress
    }

    /// Roll over to the next segment when the current one is exhausted
    ///
    /// With an empty queue the index parks one past the last sample; the
    /// segment's duration clamp turns that sentinel into the exact terminal
    /// state, held indefinitely.
    fn sync(&mut self, queue: &mut SegmentQueue<N>) {
        if self.just_loaded || self.sample_idx < self.current.n {
            return;
        }
        match queue.pop() {
            Some(segment) => {
                self.current = segment;
                self.sample_idx = 0;
                self.in_progress = true;
                self.just_loaded = true;
            }
            None => {
                self.in_progress = false;
                self.sample_idx = self.current.n + 1;
            }
        }
    }

    /// Velocity setpoint for the current tick
    pub fn velocity(&mut self, queue: &mut SegmentQueue<N>) -> VectorN<N> {
        self.sync(queue);
        self.current.velocity_at(self.sample_idx)
    }

    /// Position setpoint for the current tick
    pub fn position(&mut self, queue: &mut SegmentQueue<N>) -> VectorN<N> {
        self.sync(queue);
        self.current.position_at(self.sample_idx)
    }

    /// Acceleration setpoint for the current tick
    pub fn acceleration(&mut self, queue: &mut SegmentQueue<N>) -> VectorN<N> {
        self.sync(queue);
        self.current.acceleration_at(self.sample_idx)
    }

    /// Move to the next sample; returns whether a motion is in progress
    pub fn advance(&mut self, queue: &mut SegmentQueue<N>) -> bool {
        self.sync(queue);
        self.just_loaded = false;
        self.sample_idx += 1;
        self.in_progress
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::Polynomial;
    use approx::assert_relative_eq;

    fn ramp_segment(n: usize, v_f: f64) -> Segment<2> {
        let duration = n as f64 * 0.001;
        let mut poly = Polynomial::default();
        poly.fit(0.0, v_f, duration);
        Segment {
            poly,
            unit: VectorN::<2>::new(1.0, 0.0),
            origin: VectorN::<2>::zeros(),
            v_target: v_f,
            dt: 0.001,
            n,
            duration,
            is_coast: false,
        }
    }

    #[test]
    fn test_empty_queue_yields_zeros() {
        let mut sampler = Sampler::<2>::new();
        let mut queue = SegmentQueue::new();
        assert_eq!(sampler.velocity(&mut queue), VectorN::<2>::zeros());
        assert_eq!(sampler.position(&mut queue), VectorN::<2>::zeros());
        assert!(!sampler.advance(&mut queue));
        assert!(!sampler.is_in_progress());
    }

    #[test]
    fn test_plays_segment_then_finishes() {
        let mut sampler = Sampler::<2>::new();
        let mut queue = SegmentQueue::new();
        queue.push(ramp_segment(10, 100.0)).unwrap();

        assert_relative_eq!(sampler.velocity(&mut queue)[0], 0.0, epsilon = 1e-9);
        assert!(sampler.advance(&mut queue));

        let mut ticks = 1;
        while sampler.advance(&mut queue) {
            ticks += 1;
        }
        // one advance per in-segment sample
        assert_eq!(ticks, 10);

        // terminal state held indefinitely
        let terminal = sampler.position(&mut queue);
        for _ in 0..5 {
            sampler.advance(&mut queue);
            assert_eq!(sampler.position(&mut queue), terminal);
        }
        assert_relative_eq!(terminal[0], 0.5, epsilon = 1e-9);
        assert_relative_eq!(sampler.velocity(&mut queue)[0], 100.0, epsilon = 1e-6);
    }

    #[test]
    fn test_getters_idempotent_within_tick() {
        let mut sampler = Sampler::<2>::new();
        let mut queue = SegmentQueue::new();
        // a zero-sample segment ahead of a real one must not be skipped by
        // repeated getter calls within the same tick
        queue.push(ramp_segment(0, 0.0)).unwrap();
        queue.push(ramp_segment(10, 100.0)).unwrap();

        let v1 = sampler.velocity(&mut queue);
        let p1 = sampler.position(&mut queue);
        let v2 = sampler.velocity(&mut queue);
        let p2 = sampler.position(&mut queue);
        assert_eq!(v1, v2);
        assert_eq!(p1, p2);
        assert_eq!(queue.len(), 1);

        sampler.advance(&mut queue);
        // next tick moves on to the real segment
        assert_relative_eq!(sampler.velocity(&mut queue)[0], 0.0, epsilon = 1e-9);
        assert_eq!(queue.len(), 0);
    }

    #[test]
    fn test_segments_chain_seamlessly() {
        let mut sampler = Sampler::<2>::new();
        let mut queue = SegmentQueue::new();
        queue.push(ramp_segment(5, 50.0)).unwrap();
        let mut second = ramp_segment(5, 50.0);
        second.poly.fit(50.0, 0.0, 0.005);
        second.poly.p0 = 0.125;
        queue.push(second).unwrap();

        let mut last = sampler.velocity(&mut queue)[0];
        sampler.advance(&mut queue);
        let mut max_jump: f64 = 0.0;
        for _ in 0..12 {
            let v = sampler.velocity(&mut queue)[0];
            max_jump = max_jump.max((v - last).abs());
            last = v;
            sampler.advance(&mut queue);
        }
        // boundary between segments introduces no velocity discontinuity
        // beyond one sample's worth of ramp
        assert!(max_jump < 50.0 * 0.4);
    }
}
