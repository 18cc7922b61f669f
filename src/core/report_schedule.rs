//! Weekly report deadline: Sunday 22:30 wall-clock time
//!
//! The deadline is always recomputed from the current time, so a process
//! that slept through a deadline picks up the next one without drift.

use std::time::Duration;

use chrono::{DateTime, Datelike, NaiveDateTime, NaiveTime, TimeDelta, Utc};
use tracing::debug;

use crate::utils::{Timezone, week_start};

/// Shift applied to "now" before reading the ISO week, so that a moment
/// after Sunday's deadline already resolves to the following week.
const REFERENCE_SLACK: TimeDelta = TimeDelta::minutes(91);

/// Offset of the deadline from Monday 00:00 of its ISO week.
const DEADLINE_OFFSET: TimeDelta = TimeDelta::minutes(6 * 24 * 60 + 22 * 60 + 30);

/// Next report deadline for a wall-clock `now`, in the same wall clock.
pub(crate) fn next_report_deadline(now: NaiveDateTime) -> Option<NaiveDateTime> {
    let reference = now.checked_add_signed(REFERENCE_SLACK)?;
    let iso = reference.date().iso_week();
    let monday = week_start(iso.year(), iso.week())?;
    monday
        .and_time(NaiveTime::MIN)
        .checked_add_signed(DEADLINE_OFFSET)
}

/// The repeating weekly schedule, anchored in one timezone.
#[derive(Debug, Clone)]
pub(crate) struct ReportSchedule {
    timezone: Timezone,
    next_deadline: DateTime<Utc>,
}

impl ReportSchedule {
    pub(crate) fn new(timezone: Timezone, now: DateTime<Utc>) -> Self {
        ReportSchedule {
            timezone,
            next_deadline: Self::compute(timezone, now),
        }
    }

    fn compute(timezone: Timezone, now: DateTime<Utc>) -> DateTime<Utc> {
        next_report_deadline(timezone.to_naive_local(now))
            .and_then(|naive| timezone.resolve_local(naive))
            .unwrap_or_else(|| now + TimeDelta::weeks(1))
    }

    #[cfg(test)]
    pub(crate) fn due_at(timezone: Timezone, deadline: DateTime<Utc>) -> Self {
        ReportSchedule {
            timezone,
            next_deadline: deadline,
        }
    }

    pub(crate) fn next_deadline(&self) -> DateTime<Utc> {
        self.next_deadline
    }

    /// Time left until the deadline; zero once it has passed.
    pub(crate) fn until_deadline(&self, now: DateTime<Utc>) -> Duration {
        (self.next_deadline - now).to_std().unwrap_or(Duration::ZERO)
    }

    /// Recompute after a fire. Never yields the deadline that just fired,
    /// even if the wall clock lags the timer slightly.
    pub(crate) fn advance(&mut self, now: DateTime<Utc>) {
        let from = now.max(self.next_deadline + TimeDelta::seconds(1));
        self.next_deadline = Self::compute(self.timezone, from);
        debug!(
            next = %self.next_deadline,
            timezone = %self.timezone.display_name(),
            "Next weekly report scheduled"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naive(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn utc(s: &str) -> DateTime<Utc> {
        naive(s).and_utc()
    }

    #[test]
    fn midweek_targets_coming_sunday() {
        assert_eq!(
            next_report_deadline(naive("2025-01-15 12:00:00")),
            Some(naive("2025-01-19 22:30:00"))
        );
    }

    #[test]
    fn monday_midnight_targets_same_week() {
        assert_eq!(
            next_report_deadline(naive("2025-01-13 00:00:00")),
            Some(naive("2025-01-19 22:30:00"))
        );
    }

    #[test]
    fn sunday_before_deadline_targets_today() {
        assert_eq!(
            next_report_deadline(naive("2025-01-19 21:00:00")),
            Some(naive("2025-01-19 22:30:00"))
        );
    }

    #[test]
    fn sunday_after_deadline_targets_next_week() {
        assert_eq!(
            next_report_deadline(naive("2025-01-19 22:45:00")),
            Some(naive("2025-01-26 22:30:00"))
        );
        // reference lands on Monday 00:00:30
        assert_eq!(
            next_report_deadline(naive("2025-01-19 22:29:30")),
            Some(naive("2025-01-26 22:30:00"))
        );
    }

    #[test]
    fn crosses_iso_year_boundary() {
        // 2025-12-31 is in ISO week 2026-W01
        assert_eq!(
            next_report_deadline(naive("2025-12-31 09:00:00")),
            Some(naive("2026-01-04 22:30:00"))
        );
        // 2026 has 53 ISO weeks
        assert_eq!(
            next_report_deadline(naive("2026-12-29 09:00:00")),
            Some(naive("2027-01-03 22:30:00"))
        );
    }

    #[test]
    fn schedule_resolves_in_named_zone() {
        let tz = Timezone::parse(Some("Europe/Berlin")).unwrap();
        let schedule = ReportSchedule::new(tz, utc("2025-01-15 12:00:00"));
        // CET is UTC+1 in January
        assert_eq!(schedule.next_deadline(), utc("2025-01-19 21:30:00"));
    }

    #[test]
    fn advance_moves_a_full_week() {
        let tz = Timezone::parse(Some("UTC")).unwrap();
        let mut schedule = ReportSchedule::new(tz, utc("2025-01-15 12:00:00"));
        assert_eq!(
            schedule.until_deadline(utc("2025-01-19 22:00:00")),
            Duration::from_secs(30 * 60)
        );

        schedule.advance(utc("2025-01-19 22:30:00"));
        assert_eq!(schedule.next_deadline(), utc("2025-01-26 22:30:00"));
    }

    #[test]
    fn advance_ignores_lagging_clock() {
        let tz = Timezone::parse(Some("UTC")).unwrap();
        let mut schedule = ReportSchedule::new(tz, utc("2025-01-15 12:00:00"));
        schedule.advance(utc("2025-01-19 22:29:59"));
        assert_eq!(schedule.next_deadline(), utc("2025-01-26 22:30:00"));
    }

    #[test]
    fn advance_after_sleeping_through_deadlines() {
        let tz = Timezone::parse(Some("UTC")).unwrap();
        let mut schedule = ReportSchedule::new(tz, utc("2025-01-15 12:00:00"));
        schedule.advance(utc("2025-02-05 08:00:00"));
        assert_eq!(schedule.next_deadline(), utc("2025-02-09 22:30:00"));
        assert_eq!(
            schedule.until_deadline(utc("2025-03-01 00:00:00")),
            Duration::ZERO
        );
    }
}
