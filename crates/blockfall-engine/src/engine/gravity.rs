use std::time::Duration;

/// Converts elapsed frame time into gravity ticks.
///
/// Frame-driven hosts report how much time passed; the clock accumulates it
/// and hands out one tick per elapsed interval. Leftover time carries over,
/// so the number of ticks only depends on the total elapsed time, not on how
/// it was split into frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GravityClock {
    interval: Duration,
    pending: Duration,
}

impl GravityClock {
    /// # Panics
    ///
    /// Panics if `interval` is zero.
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        assert!(!interval.is_zero(), "gravity interval must be positive");
        Self {
            interval,
            pending: Duration::ZERO,
        }
    }

    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Changes the interval; accumulated time is kept.
    pub fn set_interval(&mut self, interval: Duration) {
        assert!(!interval.is_zero(), "gravity interval must be positive");
        self.interval = interval;
    }

    pub fn accumulate(&mut self, elapsed: Duration) {
        self.pending = self.pending.saturating_add(elapsed);
    }

    /// Consumes one interval of accumulated time if available.
    pub fn take_tick(&mut self) -> bool {
        if self.pending < self.interval {
            return false;
        }
        self.pending -= self.interval;
        true
    }

    #[must_use]
    pub fn time_until_tick(&self) -> Duration {
        self.interval.saturating_sub(self.pending)
    }

    pub fn reset(&mut self) {
        self.pending = Duration::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_ticks_once_per_interval() {
        let mut clock = GravityClock::new(100 * MS);
        clock.accumulate(99 * MS);
        assert!(!clock.take_tick());
        assert_eq!(clock.time_until_tick(), MS);
        clock.accumulate(MS);
        assert!(clock.take_tick());
        assert!(!clock.take_tick());
    }

    #[test]
    fn test_frame_split_does_not_matter() {
        let mut coarse = GravityClock::new(16 * MS);
        let mut fine = GravityClock::new(16 * MS);
        coarse.accumulate(1000 * MS);
        for _ in 0..1000 {
            fine.accumulate(MS);
        }
        let count = |clock: &mut GravityClock| std::iter::from_fn(|| clock.take_tick().then_some(())).count();
        assert_eq!(count(&mut coarse), 62);
        assert_eq!(count(&mut fine), 62);
        assert_eq!(coarse, fine);
    }

    #[test]
    fn test_interval_change_keeps_pending_time() {
        let mut clock = GravityClock::new(100 * MS);
        clock.accumulate(150 * MS);
        assert!(clock.take_tick());
        clock.set_interval(50 * MS);
        assert!(clock.take_tick());
        assert!(!clock.take_tick());
    }

    #[test]
    fn test_reset_discards_pending() {
        let mut clock = GravityClock::new(100 * MS);
        clock.accumulate(500 * MS);
        clock.reset();
        assert!(!clock.take_tick());
    }
}
