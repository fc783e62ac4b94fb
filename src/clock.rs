//! Time sources for the frame loop. The game core never reads the clock; the
//! driver turns timestamps into the deltas it feeds to `GameState::advance`.

use std::time::Instant;

/// A monotonic time source
pub trait Clock {
    fn now(&self) -> Instant;
}

/// The process's monotonic clock
#[derive(Debug, Clone, Copy, Default)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Measures the time between successive frames
#[derive(Debug)]
pub struct FrameClock<C = MonotonicClock> {
    clock: C,
    previous: Instant,
}

impl<C: Clock> FrameClock<C> {
    pub fn new(clock: C) -> Self {
        let previous = clock.now();
        Self { clock, previous }
    }

    /// Seconds since the previous call (or since construction)
    pub fn update(&mut self) -> f64 {
        let now = self.clock.now();
        let delta = now.saturating_duration_since(self.previous);
        self.previous = now;
        delta.as_secs_f64()
    }
}
