use std::time::Duration;

/// A cancellable periodic tick source, driven by the frame loop.
///
/// The driver feeds it frame deltas; `advance` reports at most one due tick
/// per call, so two ticks can never run for the same state without a
/// scheduling boundary in between.
#[derive(Debug, Clone)]
pub struct TickClock {
    period: Duration,
    elapsed: Duration,
    running: bool,
}

impl TickClock {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            elapsed: Duration::ZERO,
            running: true,
        }
    }

    /// Accumulates `dt` and fires when a full period has passed. Leftover
    /// time carries into the next period so the average rate stays honest.
    pub fn advance(&mut self, dt: Duration) -> bool {
        if !self.running {
            return false;
        }
        self.elapsed += dt;
        if self.elapsed >= self.period {
            self.elapsed -= self.period;
            // One grid cell per scheduling boundary, even after a long
            // frame; backlogged periods beyond one are discarded.
            self.elapsed = self.elapsed.min(self.period);
            true
        } else {
            false
        }
    }

    /// Cancel + reschedule at a new period. The next tick fires a full new
    /// period from now; nothing is skipped or double-fired.
    pub fn set_period(&mut self, period: Duration) {
        self.period = period;
        self.elapsed = Duration::ZERO;
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Cancels the pending tick entirely.
    pub fn pause(&mut self) {
        self.running = false;
        self.elapsed = Duration::ZERO;
    }

    /// Reschedules from zero, not from the time remaining at pause.
    pub fn resume(&mut self) {
        self.running = true;
        self.elapsed = Duration::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERIOD: Duration = Duration::from_millis(100);

    #[test]
    fn fires_once_per_full_period() {
        let mut clock = TickClock::new(PERIOD);
        assert!(!clock.advance(Duration::from_millis(60)));
        assert!(clock.advance(Duration::from_millis(60)));
        assert!(!clock.advance(Duration::from_millis(60)));
    }

    #[test]
    fn leftover_time_carries_over() {
        let mut clock = TickClock::new(PERIOD);
        assert!(clock.advance(Duration::from_millis(130)));
        // 30ms carried, 70ms more completes the next period.
        assert!(clock.advance(Duration::from_millis(70)));
    }

    #[test]
    fn long_frame_yields_a_single_tick() {
        let mut clock = TickClock::new(PERIOD);
        assert!(clock.advance(Duration::from_millis(1000)));
        // The backlog is capped at one pending period.
        assert!(clock.advance(Duration::ZERO));
        assert!(!clock.advance(Duration::ZERO));
    }

    #[test]
    fn set_period_reschedules_from_zero() {
        let mut clock = TickClock::new(PERIOD);
        clock.advance(Duration::from_millis(90));
        clock.set_period(Duration::from_millis(50));
        assert!(!clock.advance(Duration::from_millis(40)));
        assert!(clock.advance(Duration::from_millis(10)));
    }

    #[test]
    fn pause_cancels_and_resume_restarts_from_zero() {
        let mut clock = TickClock::new(PERIOD);
        clock.advance(Duration::from_millis(90));
        clock.pause();
        assert!(!clock.advance(Duration::from_millis(500)));

        clock.resume();
        assert!(!clock.advance(Duration::from_millis(90)));
        assert!(clock.advance(Duration::from_millis(10)));
    }
}
