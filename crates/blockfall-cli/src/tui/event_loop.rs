use std::time::{Duration, Instant};

use crossterm::event;

use crate::tui::event::TuiEvent;

/// Produces ticks, redraw requests and terminal events in one ordered stream.
///
/// A redraw is requested after every tick or terminal event. Without a tick
/// interval the loop only waits for terminal events.
#[derive(Debug)]
pub(super) struct EventLoop {
    tick_interval: Option<Duration>,
    last_tick: Instant,
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop {
    pub(super) fn new() -> Self {
        Self {
            tick_interval: None,
            last_tick: Instant::now(),
            dirty: true, // Initial render is required on startup
        }
    }

    /// Sets the tick interval.
    ///
    /// Turning ticks on starts a fresh interval, so time spent without ticks
    /// (e.g. while paused) does not trigger an immediate tick.
    pub(super) fn set_tick_interval(&mut self, interval: Option<Duration>) {
        if self.tick_interval.is_none() && interval.is_some() {
            self.last_tick = Instant::now();
        }
        self.tick_interval = interval;
    }

    /// Returns the next event.
    ///
    /// Blocks until the tick is due, a redraw is pending or a crossterm event
    /// occurs.
    pub(super) fn next(&mut self) -> anyhow::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if let Some(tick_interval) = self.tick_interval
                && now.duration_since(self.last_tick) >= tick_interval
            {
                self.last_tick = now;
                self.dirty = true;
                return Ok(TuiEvent::Tick);
            }

            if self.dirty {
                self.dirty = false;
                return Ok(TuiEvent::Render);
            }

            if let Some(timeout) = self.compute_timeout(now)
                && !event::poll(timeout)?
            {
                continue;
            }

            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }

    fn compute_timeout(&self, now: Instant) -> Option<Duration> {
        let next_tick_at = self.last_tick + self.tick_interval?;
        Some(next_tick_at.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_timeout_without_ticks() {
        let events = EventLoop::new();
        assert_eq!(events.compute_timeout(Instant::now()), None);
    }

    #[test]
    fn test_timeout_until_next_tick() {
        let mut events = EventLoop::new();
        events.set_tick_interval(Some(Duration::from_millis(500)));
        let timeout = events.compute_timeout(Instant::now()).unwrap();
        assert!(timeout <= Duration::from_millis(500));

        let late = events.last_tick + Duration::from_secs(1);
        assert_eq!(events.compute_timeout(late), Some(Duration::ZERO));
    }

    #[test]
    fn test_enabling_ticks_restarts_interval() {
        let mut events = EventLoop::new();
        let start = events.last_tick;
        std::thread::sleep(Duration::from_millis(5));
        events.set_tick_interval(Some(Duration::from_millis(100)));
        assert!(events.last_tick > start);

        // Changing an active interval keeps the running one.
        let running = events.last_tick;
        events.set_tick_interval(Some(Duration::from_millis(50)));
        assert_eq!(events.last_tick, running);
    }

    #[test]
    fn test_first_event_is_render() {
        let mut events = EventLoop::new();
        assert!(events.next().unwrap().is_render());
    }
}
