//! Wall-clock pacing for the review countdown.
//!
//! The controller only understands whole ticks; [`Ticker`] converts real
//! elapsed time into that count and carries any remainder forward so that
//! slow frames never lose or duplicate seconds.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy)]
pub struct Ticker {
    interval: Duration,
    anchor: Instant,
    running: bool,
}

impl Ticker {
    /// Creates a ticker whose first tick falls one interval after `now`.
    ///
    /// A zero interval is raised to one millisecond.
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            anchor: now,
            running: false,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Restarts the interval from `now`, dropping any partial progress.
    pub fn rearm(&mut self, now: Instant) {
        self.anchor = now;
    }

    /// Number of whole intervals elapsed since the last call.
    ///
    /// The partial interval left over is kept for the next call.
    pub fn due_ticks(&mut self, now: Instant) -> u32 {
        let elapsed = now.saturating_duration_since(self.anchor);
        let ticks = elapsed.as_nanos() / self.interval.as_nanos();
        if ticks == 0 {
            return 0;
        }

        let ticks = u32::try_from(ticks).unwrap_or(u32::MAX);
        match self.interval.checked_mul(ticks) {
            Some(consumed) => self.anchor += consumed,
            None => self.anchor = now,
        }
        ticks
    }

    /// Ticks to feed a countdown that is `ticking` at `now`.
    ///
    /// While the countdown is stopped the interval keeps restarting, and the
    /// step on which it starts only re-arms. The first tick after a start
    /// therefore lands one full interval later.
    pub fn step(&mut self, ticking: bool, now: Instant) -> u32 {
        match (self.running, ticking) {
            (true, true) => self.due_ticks(now),
            (false, true) => {
                self.running = true;
                self.rearm(now);
                0
            }
            (_, false) => {
                self.running = false;
                self.rearm(now);
                0
            }
        }
    }

    /// Time left until the next tick is due.
    pub fn time_until_next(&self, now: Instant) -> Duration {
        (self.anchor + self.interval).saturating_duration_since(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_ticks_before_interval() {
        let start = Instant::now();
        let mut ticker = Ticker::new(Duration::from_secs(1), start);
        assert_eq!(ticker.due_ticks(start), 0);
        assert_eq!(ticker.due_ticks(start + Duration::from_millis(999)), 0);
        assert_eq!(ticker.due_ticks(start + Duration::from_secs(1)), 1);
    }

    #[test]
    fn test_remainder_carries_over() {
        let start = Instant::now();
        let mut ticker = Ticker::new(Duration::from_secs(1), start);
        assert_eq!(ticker.due_ticks(start + Duration::from_millis(2500)), 2);
        assert_eq!(ticker.due_ticks(start + Duration::from_millis(2900)), 0);
        assert_eq!(ticker.due_ticks(start + Duration::from_millis(3000)), 1);
    }

    #[test]
    fn test_rearm_discards_partial_interval() {
        let start = Instant::now();
        let mut ticker = Ticker::new(Duration::from_secs(1), start);
        let later = start + Duration::from_millis(900);
        ticker.rearm(later);
        assert_eq!(ticker.due_ticks(start + Duration::from_millis(1500)), 0);
        assert_eq!(ticker.time_until_next(later), Duration::from_secs(1));
    }

    #[test]
    fn test_time_until_next() {
        let start = Instant::now();
        let ticker = Ticker::new(Duration::from_millis(250), start);
        assert_eq!(ticker.time_until_next(start + Duration::from_millis(100)), Duration::from_millis(150));
        assert_eq!(ticker.time_until_next(start + Duration::from_secs(5)), Duration::ZERO);
    }

    #[test]
    fn test_step_starts_a_full_interval_after_start() {
        let start = Instant::now();
        let mut ticker = Ticker::new(Duration::from_secs(1), start);
        assert_eq!(ticker.step(false, start + Duration::from_millis(900)), 0);
        assert_eq!(ticker.step(true, start + Duration::from_millis(950)), 0);
        assert_eq!(ticker.step(true, start + Duration::from_millis(1900)), 0);
        assert_eq!(ticker.step(true, start + Duration::from_millis(1950)), 1);
    }

    #[test]
    fn test_step_drops_time_while_stopped() {
        let start = Instant::now();
        let mut ticker = Ticker::new(Duration::from_secs(1), start);
        ticker.step(true, start);
        assert_eq!(ticker.step(true, start + Duration::from_millis(2500)), 2);
        assert_eq!(ticker.step(false, start + Duration::from_secs(10)), 0);
        assert_eq!(ticker.step(true, start + Duration::from_secs(20)), 0);
        assert_eq!(ticker.step(true, start + Duration::from_millis(20_999)), 0);
        assert_eq!(ticker.step(true, start + Duration::from_secs(21)), 1);
    }

    #[test]
    fn test_zero_interval_is_raised() {
        let start = Instant::now();
        let ticker = Ticker::new(Duration::ZERO, start);
        assert_eq!(ticker.interval(), Duration::from_millis(1));
    }
}
