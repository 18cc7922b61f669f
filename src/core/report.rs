//! Time-per-tag report over an exported range
//!
//! Every closed interval adds its full length to each of its tags, so tag
//! totals overlap and do not sum to wall-clock time.

use chrono::TimeDelta;
use std::collections::BTreeMap;

use tracing::{info, warn};

use crate::consts::DEFAULT_REPORT_RANGE;
use crate::error::ReportError;
use crate::output::render_report_text;
use crate::tracker::{TrackedInterval, Tracker, parse_export};

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Report {
    pub(crate) range: String,
    /// Sorted by tag
    pub(crate) totals: BTreeMap<String, TimeDelta>,
}

impl Report {
    pub(crate) fn title(&self) -> String {
        if self.range == DEFAULT_REPORT_RANGE {
            "Week report".to_string()
        } else {
            format!("Report {}", self.range)
        }
    }
}

/// Sum closed intervals per tag. Open intervals are skipped.
pub(crate) fn aggregate(intervals: &[TrackedInterval]) -> BTreeMap<String, TimeDelta> {
    let mut totals: BTreeMap<String, TimeDelta> = BTreeMap::new();
    for interval in intervals {
        let Some(duration) = interval.duration() else {
            continue;
        };
        for tag in &interval.tags {
            *totals.entry(tag.clone()).or_default() += duration;
        }
    }
    totals
}

/// Export `range` from the tracker and aggregate it.
pub(crate) fn build_report(tracker: &dyn Tracker, range: &str) -> Result<Report, ReportError> {
    let json = tracker.export(range)?;
    let intervals = parse_export(&json)?;
    let totals = aggregate(&intervals);
    info!(range, intervals = intervals.len(), tags = totals.len(), "Report built");
    Ok(Report {
        range: range.to_string(),
        totals,
    })
}

/// Report text for the notification sink; on any failure, a single error
/// line instead of a partial report.
pub(crate) fn generate_report(tracker: &dyn Tracker, range: &str) -> String {
    match build_report(tracker, range) {
        Ok(report) => render_report_text(&report),
        Err(e) => {
            warn!(range, error = %e, "Report failed");
            e.to_string()
        }
    }
}
