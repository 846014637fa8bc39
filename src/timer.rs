//! Round countdown timer
//!
//! The timer counts whole seconds down from the round duration. It does
//! not schedule anything itself: the owner calls [`RoundTimer::tick`]
//! once per wake-up. Every counted tick and every change that ends or
//! restarts a countdown advances the timer epoch, which lets the owner
//! recognize and drop wake-ups that were already delivered or belong to
//! an earlier countdown.

use serde::{Deserialize, Serialize};

/// Phase of the countdown
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerPhase {
    /// Armed with a full duration, not counting
    #[default]
    Idle,
    /// Counting down
    Running,
    /// Reached zero
    Expired,
    /// Stopped by the players before reaching zero
    StoppedEarly,
}

/// One-time events produced when a countdown ends
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerEvent {
    /// The countdown reached zero
    TimeUp,
    /// The countdown was stopped early
    StoppedEarly,
}

/// Formats a number of seconds as `MM:SS`
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// A single countdown with start, stop and expiry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundTimer {
    phase: TimerPhase,
    duration: u32,
    remaining: u32,
    epoch: u64,
}

impl RoundTimer {
    /// Creates an idle timer armed with the given duration
    pub fn new(duration_seconds: u32) -> Self {
        Self {
            phase: TimerPhase::Idle,
            duration: duration_seconds,
            remaining: duration_seconds,
            epoch: 0,
        }
    }

    /// Attempts to transition from one phase to another
    ///
    /// # Returns
    ///
    /// `true` if the transition was made, `false` if the timer was not in
    /// the expected phase
    fn change_phase(&mut self, before: TimerPhase, after: TimerPhase) -> bool {
        if self.phase == before {
            self.phase = after;
            self.epoch += 1;

            true
        } else {
            false
        }
    }

    /// Starts counting down from `duration_seconds`
    ///
    /// # Returns
    ///
    /// `false` (and nothing changes) unless the timer is idle
    pub fn start(&mut self, duration_seconds: u32) -> bool {
        if !self.change_phase(TimerPhase::Idle, TimerPhase::Running) {
            return false;
        }
        self.duration = duration_seconds;
        self.remaining = duration_seconds;
        true
    }

    /// Counts one second down
    ///
    /// Ticks outside of the running phase are ignored.
    ///
    /// # Returns
    ///
    /// `Some(TimerEvent::TimeUp)` exactly once, on the tick that reaches zero
    pub fn tick(&mut self) -> Option<TimerEvent> {
        if self.phase != TimerPhase::Running {
            return None;
        }
        self.remaining = self.remaining.saturating_sub(1);
        self.epoch += 1;
        if self.remaining == 0 && self.change_phase(TimerPhase::Running, TimerPhase::Expired) {
            return Some(TimerEvent::TimeUp);
        }
        None
    }

    /// Stops a running countdown, freezing the remaining time
    ///
    /// # Returns
    ///
    /// `Some(TimerEvent::StoppedEarly)` if the timer was running
    pub fn stop_early(&mut self) -> Option<TimerEvent> {
        self.change_phase(TimerPhase::Running, TimerPhase::StoppedEarly)
            .then_some(TimerEvent::StoppedEarly)
    }

    /// Returns to idle with a fresh duration, whatever the current phase
    pub fn reset(&mut self, duration_seconds: u32) {
        self.phase = TimerPhase::Idle;
        self.duration = duration_seconds;
        self.remaining = duration_seconds;
        self.epoch += 1;
    }

    /// Returns the current phase
    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    /// Returns the seconds left on the countdown
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Returns the duration the countdown started from
    pub fn duration(&self) -> u32 {
        self.duration
    }

    /// Returns the seconds counted so far
    pub fn elapsed(&self) -> u32 {
        self.duration - self.remaining
    }

    /// Returns the countdown generation
    ///
    /// Wake-ups carry the epoch they were scheduled in; a wake-up whose
    /// epoch differs from this value was already counted or belongs to a
    /// cancelled countdown.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Returns the remaining time as `MM:SS`
    pub fn clock(&self) -> String {
        format_clock(self.remaining)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn test_new_timer_is_idle() {
        let timer = RoundTimer::new(120);
        assert_eq!(timer.phase(), TimerPhase::Idle);
        assert_eq!(timer.remaining(), 120);
        assert_eq!(timer.clock(), "02:00");
    }

    #[test]
    fn test_runs_to_expiry() {
        let mut timer = RoundTimer::new(120);
        assert!(timer.start(120));

        let events = (0..120).filter_map(|_| timer.tick()).collect::<Vec<_>>();

        assert_eq!(events, vec![TimerEvent::TimeUp]);
        assert_eq!(timer.phase(), TimerPhase::Expired);
        assert_eq!(timer.remaining(), 0);
        assert_eq!(timer.elapsed(), 120);

        assert_eq!(timer.tick(), None);
        assert_eq!(timer.remaining(), 0);
    }

    #[test]
    fn test_stop_early_freezes_remaining() {
        let mut timer = RoundTimer::new(120);
        timer.start(120);
        for _ in 0..30 {
            assert_eq!(timer.tick(), None);
        }

        assert_eq!(timer.stop_early(), Some(TimerEvent::StoppedEarly));
        assert_eq!(timer.phase(), TimerPhase::StoppedEarly);
        assert_eq!(timer.remaining(), 90);

        assert_eq!(timer.tick(), None);
        assert_eq!(timer.remaining(), 90);
        assert_eq!(timer.stop_early(), None);
    }

    #[test]
    fn test_start_only_from_idle() {
        let mut timer = RoundTimer::new(60);
        assert!(timer.start(60));
        timer.tick();
        assert!(!timer.start(60));
        assert_eq!(timer.remaining(), 59);

        timer.stop_early();
        assert!(!timer.start(60));
        assert_eq!(timer.phase(), TimerPhase::StoppedEarly);
    }

    #[test]
    fn test_stop_early_requires_running() {
        let mut timer = RoundTimer::new(60);
        assert_eq!(timer.stop_early(), None);
        assert_eq!(timer.phase(), TimerPhase::Idle);
    }

    #[test]
    fn test_idle_ticks_are_ignored() {
        let mut timer = RoundTimer::new(60);
        let epoch = timer.epoch();
        assert_eq!(timer.tick(), None);
        assert_eq!(timer.remaining(), 60);
        assert_eq!(timer.epoch(), epoch);
    }

    #[test]
    fn test_reset_from_any_phase() {
        let mut timer = RoundTimer::new(60);
        timer.start(60);
        timer.tick();
        timer.reset(90);
        assert_eq!(timer.phase(), TimerPhase::Idle);
        assert_eq!(timer.remaining(), 90);
        assert_eq!(timer.duration(), 90);
        assert!(timer.start(90));
    }

    #[test]
    fn test_epoch_advances_on_every_countdown_change() {
        let mut timer = RoundTimer::new(2);
        let initial = timer.epoch();

        timer.start(2);
        let running = timer.epoch();
        assert!(running > initial);

        timer.tick();
        let ticked = timer.epoch();
        assert!(ticked > running);

        timer.tick();
        assert!(timer.epoch() > ticked);
        assert_eq!(timer.phase(), TimerPhase::Expired);

        let expired = timer.epoch();
        timer.reset(2);
        assert!(timer.epoch() > expired);
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(59), "00:59");
        assert_eq!(format_clock(61), "01:01");
        assert_eq!(format_clock(600), "10:00");
    }
}
