use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeDelta, Utc, Weekday};

use crate::consts::EXPORT_TIMESTAMP_FORMAT;

/// Monday of the given ISO week.
///
/// Starts from July 1 of `year`, which always sits inside ISO year `year`,
/// rolls back to that week's Monday and then shifts by whole weeks.
pub(crate) fn week_start(year: i32, week: u32) -> Option<NaiveDate> {
    let july_first = NaiveDate::from_ymd_opt(year, 7, 1)?;
    let back = match july_first.weekday() {
        Weekday::Sun => 6,
        wd => wd.num_days_from_monday() as i64,
    };
    let monday = july_first - TimeDelta::days(back);
    let anchor_week = monday.iso_week().week() as i64;
    monday.checked_add_signed(TimeDelta::weeks(week as i64 - anchor_week))
}

/// Parse a `timew export` timestamp ("20250115T093000Z").
pub(crate) fn parse_export_timestamp(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    NaiveDateTime::parse_from_str(s, EXPORT_TIMESTAMP_FORMAT).map(|naive| naive.and_utc())
}
