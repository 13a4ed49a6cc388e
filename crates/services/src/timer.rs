use chrono::{DateTime, Duration, Utc};

/// Outcome of delivering one scheduled tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// The countdown moved down one second and the next tick was scheduled.
    Ticked { remaining: u32 },
    /// The countdown reached zero; the timer has stopped itself.
    Expired,
    /// The token was stale: the timer stopped or restarted after issuing it.
    Suppressed,
}

/// Token for one scheduled tick.
///
/// Tokens carry the epoch they were issued under, so a tick that was already
/// in flight when `stop` ran is suppressed instead of firing late.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickToken {
    epoch: u64,
}

/// Cooperative one-second countdown.
///
/// The countdown owns no thread and never blocks. The owner polls
/// `due_token` against its clock and delivers ticks with `tick`, one event
/// at a time on a single logical thread. Once `stop` returns, no further
/// ticks are observable.
#[derive(Debug, Default)]
pub struct Countdown {
    remaining: u32,
    running: bool,
    epoch: u64,
    next_due: Option<DateTime<Utc>>,
}

impl Countdown {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the countdown at `duration` seconds; the first tick falls due one
    /// second after `now`. Restarting invalidates tokens from earlier runs.
    pub fn start(&mut self, duration: u32, now: DateTime<Utc>) {
        self.epoch += 1;
        self.remaining = duration;
        self.running = true;
        self.next_due = Some(now + Duration::seconds(1));
    }

    /// Cancel the countdown. Idempotent.
    pub fn stop(&mut self) {
        self.epoch += 1;
        self.running = false;
        self.next_due = None;
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Seconds left, while the countdown is running.
    #[must_use]
    pub fn remaining(&self) -> Option<u32> {
        self.running.then_some(self.remaining)
    }

    /// Token for the next tick, once it is due at `now`.
    #[must_use]
    pub fn due_token(&self, now: DateTime<Utc>) -> Option<TickToken> {
        let due = self.next_due?;
        (self.running && now >= due).then_some(TickToken { epoch: self.epoch })
    }

    /// Deliver one tick.
    ///
    /// Stale tokens (issued before a `stop` or restart) report `Suppressed`
    /// and leave the countdown untouched. Reaching zero reports `Expired`
    /// exactly once and stops the countdown.
    pub fn tick(&mut self, token: TickToken) -> TickOutcome {
        if !self.running || token.epoch != self.epoch {
            return TickOutcome::Suppressed;
        }

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.stop();
            return TickOutcome::Expired;
        }

        if let Some(due) = self.next_due {
            self.next_due = Some(due + Duration::seconds(1));
        }
        TickOutcome::Ticked {
            remaining: self.remaining,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use quiz_core::time::fixed_now;

    #[test]
    fn counts_down_and_expires_exactly_once() {
        let mut timer = Countdown::new();
        let mut now = fixed_now();
        timer.start(3, now);
        assert_eq!(timer.remaining(), Some(3));

        let mut outcomes = Vec::new();
        for _ in 0..5 {
            now += Duration::seconds(1);
            while let Some(token) = timer.due_token(now) {
                outcomes.push(timer.tick(token));
            }
        }

        assert_eq!(
            outcomes,
            vec![
                TickOutcome::Ticked { remaining: 2 },
                TickOutcome::Ticked { remaining: 1 },
                TickOutcome::Expired,
            ]
        );
        assert!(!timer.is_running());
        assert_eq!(timer.remaining(), None);
    }

    #[test]
    fn no_tick_is_due_before_a_second_elapses() {
        let mut timer = Countdown::new();
        let now = fixed_now();
        timer.start(5, now);

        assert!(timer.due_token(now).is_none());
        assert!(
            timer
                .due_token(now + Duration::milliseconds(999))
                .is_none()
        );
        assert!(timer.due_token(now + Duration::seconds(1)).is_some());
    }

    #[test]
    fn stop_suppresses_an_in_flight_tick() {
        let mut timer = Countdown::new();
        let now = fixed_now();
        timer.start(5, now);

        let token = timer.due_token(now + Duration::seconds(1)).unwrap();
        timer.stop();

        assert_eq!(timer.tick(token), TickOutcome::Suppressed);
        assert_eq!(timer.remaining(), None);
        assert!(timer.due_token(now + Duration::seconds(2)).is_none());
    }

    #[test]
    fn stop_is_idempotent() {
        let mut timer = Countdown::new();
        timer.start(5, fixed_now());
        timer.stop();
        timer.stop();
        assert!(!timer.is_running());
    }

    #[test]
    fn restart_invalidates_tokens_from_the_previous_run() {
        let mut timer = Countdown::new();
        let now = fixed_now();
        timer.start(5, now);
        let stale = timer.due_token(now + Duration::seconds(1)).unwrap();

        timer.start(5, now);
        assert_eq!(timer.tick(stale), TickOutcome::Suppressed);
        assert_eq!(timer.remaining(), Some(5));
    }

    #[test]
    fn catches_up_when_the_clock_jumps() {
        let mut timer = Countdown::new();
        let now = fixed_now();
        timer.start(5, now);

        let late = now + Duration::seconds(3);
        let mut ticks = 0;
        while let Some(token) = timer.due_token(late) {
            assert!(matches!(timer.tick(token), TickOutcome::Ticked { .. }));
            ticks += 1;
        }

        assert_eq!(ticks, 3);
        assert_eq!(timer.remaining(), Some(2));
    }
}
