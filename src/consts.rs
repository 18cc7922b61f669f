/// Timestamp pattern used by `timew export`: "20250115T093000Z"
pub(crate) const EXPORT_TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Export range used when no range is given
pub(crate) const DEFAULT_REPORT_RANGE: &str = ":week";

/// First word of `timew` status output while an interval is open
pub(crate) const TRACKING_MARKER: &str = "Tracking";

/// Sent every time the reminder fires
pub(crate) const REMINDER_MESSAGE: &str = "are you still doing it?";
