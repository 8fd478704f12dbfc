use std::cell::Cell;
use std::time::Instant;

/// Millisecond clock used to time refreshes.
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Monotonic clock backed by `std::time::Instant`.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1_000.0
    }
}

/// Clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now_ms: Cell<f64>,
    step_ms: f64,
}

impl ManualClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances by `step_ms` after every reading.
    #[must_use]
    pub fn with_step(step_ms: f64) -> Self {
        Self {
            now_ms: Cell::new(0.0),
            step_ms,
        }
    }

    pub fn advance(&self, delta_ms: f64) {
        self.now_ms.set(self.now_ms.get() + delta_ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        let now = self.now_ms.get();
        self.now_ms.set(now + self.step_ms);
        now
    }
}

#[cfg(test)]
mod tests {
    use super::{Clock, ManualClock};

    #[test]
    fn stepping_clock_advances_per_reading() {
        let clock = ManualClock::with_step(2.5);
        assert_eq!(clock.now_ms(), 0.0);
        assert_eq!(clock.now_ms(), 2.5);
        clock.advance(10.0);
        assert_eq!(clock.now_ms(), 15.0);
    }
}
