// Copyright (c) 2026 rezky_nightky

use std::thread;
use std::time::{Duration, Instant};

/// Next tick boundary after `next`. Falling more than a full period behind
/// drops the missed ticks instead of replaying them.
pub fn next_deadline(next: Instant, now: Instant, period: Duration) -> Instant {
    let planned = next + period;
    if now > planned {
        now + period
    } else {
        planned
    }
}

/// Fixed-rate tick source on the monotonic clock.
pub struct FrameClock {
    period: Duration,
    next: Instant,
}

impl FrameClock {
    pub fn new(period: Duration) -> Self {
        Self::starting_at(period, Instant::now())
    }

    pub fn starting_at(period: Duration, start: Instant) -> Self {
        Self {
            period,
            next: start + period,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    #[cfg(test)]
    pub fn deadline(&self) -> Instant {
        self.next
    }

    /// Time left before the current boundary, never more than one period.
    pub fn remaining(&self, now: Instant) -> Duration {
        self.next.saturating_duration_since(now).min(self.period)
    }

    /// Moves to the following boundary given the time the tick finished.
    pub fn advance(&mut self, now: Instant) {
        self.next = next_deadline(self.next, now, self.period);
    }

    /// Sleeps until the current boundary, then schedules the next one.
    pub fn wait(&mut self) {
        let left = self.remaining(Instant::now());
        if !left.is_zero() {
            thread::sleep(left);
        }
        self.advance(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const P: Duration = Duration::from_millis(16);

    #[test]
    fn on_time_ticks_stay_on_the_grid() {
        let t0 = Instant::now();
        let mut clock = FrameClock::starting_at(P, t0);
        for i in 1..=5u32 {
            clock.advance(t0 + P * i);
            assert_eq!(clock.deadline(), t0 + P * (i + 1));
        }
    }

    #[test]
    fn small_overrun_keeps_cadence() {
        let t0 = Instant::now();
        let mut clock = FrameClock::starting_at(P, t0);
        // Finished half a period late: still within one period of the plan.
        clock.advance(t0 + P + P / 2);
        assert_eq!(clock.deadline(), t0 + P * 2);
    }

    #[test]
    fn large_overrun_rebases_without_burst() {
        let t0 = Instant::now();
        let mut clock = FrameClock::starting_at(P, t0);
        let late = t0 + P * 10;
        clock.advance(late);
        assert_eq!(clock.deadline(), late + P);
    }

    #[test]
    fn remaining_is_capped_by_period() {
        let t0 = Instant::now();
        let clock = FrameClock::starting_at(P, t0);
        assert_eq!(clock.remaining(t0), P);
        assert_eq!(clock.remaining(t0 + P * 3), Duration::ZERO);
    }
}
