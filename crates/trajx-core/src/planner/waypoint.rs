//! Waypoints and the three-slot lookahead window

use crate::math::VectorN;

/// A Cartesian target with its velocity and acceleration caps
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waypoint<const N: usize> {
    /// Absolute Cartesian target
    pub setpoint: VectorN<N>,
    /// Scalar speed cap along the path
    pub velocity: f64,
    /// Acceleration magnitude cap
    pub acceleration: f64,
}

impl<const N: usize> Default for Waypoint<N> {
    fn default() -> Self {
        Self {
            setpoint: VectorN::zeros(),
            velocity: 0.0,
            acceleration: 0.0,
        }
    }
}

impl<const N: usize> Waypoint<N> {
    /// Create a waypoint with explicit caps
    pub fn new(setpoint: [f64; N], velocity: f64, acceleration: f64) -> Self {
        Self {
            setpoint: VectorN::from(setpoint),
            velocity,
            acceleration,
        }
    }

    /// A bare position with zero caps (lookahead seeding)
    pub fn at(setpoint: [f64; N]) -> Self {
        Self {
            setpoint: VectorN::from(setpoint),
            velocity: 0.0,
            acceleration: 0.0,
        }
    }
}

/// Sliding window of the last three waypoints
///
/// Appending discards the oldest entry. The planner reads the window as
/// `prev -> current` for the leg being planned and `next` for the exit
/// corner at `current`.
#[derive(Debug, Clone, Default)]
pub struct LookaheadBuffer<const N: usize> {
    window: [Waypoint<N>; 3],
}

impl<const N: usize> LookaheadBuffer<N> {
    /// Empty window (all slots at the origin with zero caps)
    pub fn new() -> Self {
        Self::default()
    }

    /// Window with all three slots holding `position`
    ///
    /// Seeding gives the very first planned leg a well-defined origin.
    pub fn seeded(position: VectorN<N>) -> Self {
        let seed = Waypoint {
            setpoint: position,
            velocity: 0.0,
            acceleration: 0.0,
        };
        Self {
            window: [seed; 3],
        }
    }

    /// Append a waypoint, discarding the oldest
    pub fn push(&mut self, waypoint: Waypoint<N>) {
        self.window[0] = self.window[1];
        self.window[1] = self.window[2];
        self.window[2] = waypoint;
    }

    /// Start of the leg being planned (`W0`)
    #[inline]
    pub fn prev(&self) -> &Waypoint<N> {
        &self.window[0]
    }

    /// End of the leg being planned (`W1`)
    #[inline]
    pub fn current(&self) -> &Waypoint<N> {
        &self.window[1]
    }

    /// Waypoint after the leg, defining the exit corner (`W2`)
    #[inline]
    pub fn next(&self) -> &Waypoint<N> {
        &self.window[2]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_discards_oldest() {
        let mut buffer = LookaheadBuffer::<2>::new();
        let a = Waypoint::new([1.0, 0.0], 10.0, 100.0);
        let b = Waypoint::new([2.0, 0.0], 10.0, 100.0);
        let c = Waypoint::new([3.0, 0.0], 10.0, 100.0);
        let d = Waypoint::new([4.0, 0.0], 10.0, 100.0);

        buffer.push(a);
        buffer.push(b);
        buffer.push(c);
        assert_eq!(*buffer.prev(), a);
        assert_eq!(*buffer.current(), b);
        assert_eq!(*buffer.next(), c);

        buffer.push(d);
        assert_eq!(*buffer.prev(), b);
        assert_eq!(*buffer.current(), c);
        assert_eq!(*buffer.next(), d);
    }

    #[test]
    fn test_seeded_window() {
        let p = VectorN::<3>::new(1.0, 2.0, 3.0);
        let buffer = LookaheadBuffer::seeded(p);
        assert_eq!(buffer.prev().setpoint, p);
        assert_eq!(buffer.current().setpoint, p);
        assert_eq!(buffer.next().setpoint, p);
        // seeds carry no caps, like a bare position
        assert_eq!(*buffer.current(), Waypoint::at([1.0, 2.0, 3.0]));
    }
}
