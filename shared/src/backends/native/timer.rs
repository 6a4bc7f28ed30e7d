use std::time::Duration;

/// Delta-accumulating interval timer driving the periodic diff cycle.
/// Fed frame deltas by the host loop rather than reading a clock itself,
/// so tests can march time forward deterministically.
pub struct Timer {
    interval: Duration,
    elapsed: Duration,
}

impl Timer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            elapsed: Duration::ZERO,
        }
    }

    /// Adds `delta` to the accumulator. Returns true once the interval has
    /// elapsed, resetting the accumulator to zero (no remainder carry; a
    /// late fire stretches the cycle rather than bunching the next one).
    pub fn accumulate(&mut self, delta: Duration) -> bool {
        self.elapsed += delta;
        if self.elapsed >= self.interval {
            self.elapsed = Duration::ZERO;
            return true;
        }
        false
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}
