//! The single "are you still doing it?" reminder
//!
//! [`ReminderScheduler`] holds at most one [`RepeatingTimer`]. It performs no
//! I/O and spawns nothing: the event loop owns it, awaits [`ReminderScheduler::wait`]
//! and calls [`ReminderScheduler::fire`] when that completes, so arm, cancel
//! and fire are serialized by construction.

use std::time::Duration;

use tokio::time::{Instant, sleep_until};
use tracing::debug;

use crate::utils::format_short;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Phase {
    /// Waiting for the first fire, which may be shorter than the interval
    Arming,
    /// Every fire is one full interval after the previous one
    Steady,
}

#[derive(Debug, Clone)]
pub(crate) struct RepeatingTimer {
    deadline: Instant,
    interval: Duration,
    phase: Phase,
}

impl RepeatingTimer {
    pub(crate) fn new(now: Instant, first: Duration, interval: Duration) -> Self {
        RepeatingTimer {
            deadline: now + first,
            interval,
            phase: Phase::Arming,
        }
    }

    pub(crate) fn deadline(&self) -> Instant {
        self.deadline
    }

    pub(crate) fn interval(&self) -> Duration {
        self.interval
    }

    #[cfg(test)]
    pub(crate) fn phase(&self) -> Phase {
        self.phase
    }

    /// Next fire one full interval from `now`.
    pub(crate) fn reschedule(&mut self, now: Instant) {
        self.deadline = now + self.interval;
        self.phase = Phase::Steady;
    }
}

#[derive(Debug, Default)]
pub(crate) struct ReminderScheduler {
    armed: Option<RepeatingTimer>,
}

impl ReminderScheduler {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Replace any armed reminder with one firing after `after`, then every
    /// `rearm`. A zero for either duration leaves nothing armed.
    pub(crate) fn arm(&mut self, after: Duration, rearm: Duration) -> bool {
        self.cancel();
        if after.is_zero() || rearm.is_zero() {
            debug!("Reminder not armed: no interval configured");
            return false;
        }
        debug!(
            after = %format_short(after),
            every = %format_short(rearm),
            "Reminder armed"
        );
        self.armed = Some(RepeatingTimer::new(Instant::now(), after, rearm));
        true
    }

    /// Drop the armed reminder, if any.
    pub(crate) fn cancel(&mut self) {
        if self.armed.take().is_some() {
            debug!("Reminder cancelled");
        }
    }

    #[cfg(test)]
    pub(crate) fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    #[cfg(test)]
    pub(crate) fn timer(&self) -> Option<&RepeatingTimer> {
        self.armed.as_ref()
    }

    /// Time left until the next fire.
    pub(crate) fn remaining(&self) -> Option<Duration> {
        self.armed
            .as_ref()
            .map(|t| t.deadline().saturating_duration_since(Instant::now()))
    }

    /// Completes at the armed deadline; never completes when nothing is armed.
    pub(crate) async fn wait(&self) {
        match &self.armed {
            Some(timer) => sleep_until(timer.deadline()).await,
            None => std::future::pending().await,
        }
    }

    /// Record a fire and move to the steady cadence. Returns false when
    /// nothing was armed, in which case no reminder should be sent.
    pub(crate) fn fire(&mut self) -> bool {
        let Some(timer) = self.armed.as_mut() else {
            return false;
        };
        let fired_in = timer.phase;
        timer.reschedule(Instant::now());
        debug!(
            phase = ?fired_in,
            every = %format_short(timer.interval()),
            "Reminder fired, re-armed"
        );
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{advance, timeout};

    const MIN: Duration = Duration::from_secs(60);

    #[tokio::test(start_paused = true)]
    async fn zero_duration_arms_nothing() {
        let mut reminder = ReminderScheduler::new();
        assert!(!reminder.arm(Duration::ZERO, 25 * MIN));
        assert!(!reminder.is_armed());

        assert!(reminder.arm(5 * MIN, 5 * MIN));
        assert!(!reminder.arm(5 * MIN, Duration::ZERO));
        assert!(!reminder.is_armed());
    }

    #[tokio::test(start_paused = true)]
    async fn first_fire_then_steady_cadence() {
        let mut reminder = ReminderScheduler::new();
        let start = Instant::now();
        reminder.arm(15 * MIN, 25 * MIN);
        assert_eq!(reminder.timer().unwrap().phase(), Phase::Arming);

        reminder.wait().await;
        assert_eq!(start.elapsed(), 15 * MIN);
        assert!(reminder.fire());
        assert_eq!(reminder.timer().unwrap().phase(), Phase::Steady);

        reminder.wait().await;
        assert_eq!(start.elapsed(), 40 * MIN);
        assert!(reminder.fire());

        reminder.wait().await;
        assert_eq!(start.elapsed(), 65 * MIN);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_leaves_nothing_pending() {
        let mut reminder = ReminderScheduler::new();
        reminder.arm(25 * MIN, 25 * MIN);
        advance(10 * MIN).await;
        assert_eq!(reminder.remaining(), Some(15 * MIN));

        reminder.cancel();
        assert!(!reminder.is_armed());
        assert!(timeout(2 * 60 * MIN, reminder.wait()).await.is_err());
        assert!(!reminder.fire());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_is_idempotent() {
        let mut reminder = ReminderScheduler::new();
        reminder.cancel();
        reminder.cancel();
        assert!(!reminder.is_armed());
    }

    #[tokio::test(start_paused = true)]
    async fn arm_supersedes_previous() {
        let mut reminder = ReminderScheduler::new();
        let start = Instant::now();
        reminder.arm(5 * MIN, 5 * MIN);
        reminder.arm(30 * MIN, 30 * MIN);
        reminder.wait().await;
        assert_eq!(start.elapsed(), 30 * MIN);
    }
}
