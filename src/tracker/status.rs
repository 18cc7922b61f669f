use std::time::Duration;

use crate::consts::TRACKING_MARKER;
use crate::error::StatusParseError;
use crate::utils::parse_hms;

/// What `timew` reports about the currently open interval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TrackerStatus {
    Idle,
    Tracking { tags: Vec<String>, elapsed: Duration },
}

/// Parse `timew` status text.
///
/// ```text
/// Tracking "Deep Work" focus
///   Started 2025-01-15T09:30:00
///   Current               09:55:00
///   Total               0:25:00
/// ```
///
/// Tags are returned as whitespace-separated tokens with quotes stripped,
/// so a quoted multi-word tag comes back as several tokens.
pub(crate) fn parse_status(text: &str) -> Result<TrackerStatus, StatusParseError> {
    let mut lines = text.lines();
    let Some(first) = lines.next() else {
        return Ok(TrackerStatus::Idle);
    };
    let mut fields = first.split_whitespace();
    if fields.next() != Some(TRACKING_MARKER) {
        return Ok(TrackerStatus::Idle);
    }
    let tags: Vec<String> = fields
        .map(|t| t.trim_matches('"').to_string())
        .filter(|t| !t.is_empty())
        .collect();

    let total = lines
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            match fields.next() {
                Some("Total") => Some(fields.next()),
                _ => None,
            }
        })
        .last()
        .ok_or(StatusParseError::MissingTotal)?
        .ok_or(StatusParseError::MissingTotal)?;

    Ok(TrackerStatus::Tracking {
        tags,
        elapsed: parse_hms(total)?,
    })
}
