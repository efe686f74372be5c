//! Time sources and per-frame delta.

use std::time::Instant;

/// Monotonic source of elapsed seconds since some start point.
pub trait Clock {
    /// Seconds elapsed. Never decreases for a well-behaved clock.
    fn elapsed(&mut self) -> f64;
}

/// Wall clock backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    start: Instant,
}

impl MonotonicClock {
    /// Start counting from now.
    #[must_use]
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::start()
    }
}

impl Clock for MonotonicClock {
    fn elapsed(&mut self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

/// Hand-driven clock for tests and offline runs.
///
/// With a non-zero `step`, each read returns the current time and then
/// advances it, so a loop sees a steady frame rate.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ManualClock {
    now: f64,
    step: f64,
}

impl ManualClock {
    /// Clock frozen at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clock that advances by `step` after every read.
    #[must_use]
    pub fn stepping(step: f64) -> Self {
        Self { now: 0.0, step }
    }

    /// Move the clock forward.
    pub fn advance(&mut self, dt: f64) {
        self.now += dt;
    }

    /// Jump to an absolute time.
    pub fn set(&mut self, now: f64) {
        self.now = now;
    }
}

impl Clock for ManualClock {
    fn elapsed(&mut self) -> f64 {
        let now = self.now;
        self.now += self.step;
        now
    }
}

/// Turns successive elapsed readings into frame deltas.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameTimer {
    last_elapsed: f64,
}

impl FrameTimer {
    /// Timer whose first delta is measured from zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `elapsed` and return the time since the previous reading.
    ///
    /// A clock that goes backwards yields a negative delta; the world
    /// treats that as zero.
    pub fn delta(&mut self, elapsed: f64) -> f64 {
        let delta = elapsed - self.last_elapsed;
        self.last_elapsed = elapsed;
        delta
    }

    /// The previous reading.
    #[must_use]
    pub fn last_elapsed(&self) -> f64 {
        self.last_elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn timer_measures_between_readings() {
        let mut timer = FrameTimer::new();
        assert_relative_eq!(timer.delta(0.016), 0.016);
        assert_relative_eq!(timer.delta(0.050), 0.034, epsilon = 1e-12);
        assert_relative_eq!(timer.delta(0.050), 0.0);
        assert_relative_eq!(timer.last_elapsed(), 0.050);
    }

    #[test]
    fn stepping_clock_advances_after_read() {
        let mut clock = ManualClock::stepping(0.5);
        assert_relative_eq!(clock.elapsed(), 0.0);
        assert_relative_eq!(clock.elapsed(), 0.5);
        clock.advance(1.0);
        assert_relative_eq!(clock.elapsed(), 2.0);
    }

    #[test]
    fn monotonic_clock_does_not_go_backwards() {
        let mut clock = MonotonicClock::start();
        let a = clock.elapsed();
        let b = clock.elapsed();
        assert!(b >= a);
    }
}
