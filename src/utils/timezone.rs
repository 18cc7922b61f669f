use chrono::{DateTime, Local, NaiveDateTime, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;
use std::str::FromStr;

use crate::error::AppError;

/// Zone the weekly report deadline is anchored in.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Timezone {
    Local,
    Named(Tz),
}

impl Timezone {
    pub(crate) fn parse(value: Option<&str>) -> Result<Self, AppError> {
        let Some(raw) = value else {
            return Ok(Timezone::Local);
        };
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("local") {
            return Ok(Timezone::Local);
        }
        if trimmed.eq_ignore_ascii_case("utc") || trimmed.eq_ignore_ascii_case("z") {
            return Ok(Timezone::Named(chrono_tz::UTC));
        }
        Tz::from_str(trimmed)
            .map(Timezone::Named)
            .map_err(|_| AppError::InvalidTimezone {
                input: trimmed.to_string(),
            })
    }

    /// Wall-clock time in this zone.
    pub(crate) fn to_naive_local(self, utc: DateTime<Utc>) -> NaiveDateTime {
        match self {
            Timezone::Local => utc.with_timezone(&Local).naive_local(),
            Timezone::Named(tz) => utc.with_timezone(&tz).naive_local(),
        }
    }

    /// Resolve a wall-clock time in this zone to an instant.
    ///
    /// Ambiguous times take the earlier instant; times inside a DST gap are
    /// pushed forward by an hour.
    pub(crate) fn resolve_local(self, naive: NaiveDateTime) -> Option<DateTime<Utc>> {
        fn resolve<Z: TimeZone>(zone: &Z, naive: NaiveDateTime) -> Option<DateTime<Utc>> {
            zone.from_local_datetime(&naive)
                .earliest()
                .or_else(|| {
                    zone.from_local_datetime(&(naive + TimeDelta::hours(1)))
                        .earliest()
                })
                .map(|dt| dt.with_timezone(&Utc))
        }
        match self {
            Timezone::Local => resolve(&Local, naive),
            Timezone::Named(tz) => resolve(&tz, naive),
        }
    }

    pub(crate) fn display_name(self) -> String {
        match self {
            Timezone::Local => "local".to_string(),
            Timezone::Named(tz) => tz.name().to_string(),
        }
    }
}
