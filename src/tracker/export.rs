use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::ReportError;
use crate::utils::parse_export_timestamp;

/// One interval from `timew export`. `end` is absent while the interval is
/// still open.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TrackedInterval {
    pub(crate) start: Option<DateTime<Utc>>,
    pub(crate) end: Option<DateTime<Utc>>,
    pub(crate) tags: Vec<String>,
}

impl TrackedInterval {
    /// Length of a closed interval.
    pub(crate) fn duration(&self) -> Option<chrono::TimeDelta> {
        Some(self.end? - self.start?)
    }
}

#[derive(Deserialize)]
struct RawInterval {
    #[serde(default)]
    start: Option<String>,
    #[serde(default)]
    end: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
}

fn parse_timestamp(raw: Option<String>) -> Result<Option<DateTime<Utc>>, ReportError> {
    match raw.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => parse_export_timestamp(s)
            .map(Some)
            .map_err(|source| ReportError::Timestamp {
                input: s.to_string(),
                source,
            }),
    }
}

/// Parse the export payload. Any bad timestamp fails the whole payload.
pub(crate) fn parse_export(json: &str) -> Result<Vec<TrackedInterval>, ReportError> {
    let raw: Vec<RawInterval> = serde_json::from_str(json)?;
    raw.into_iter()
        .map(|r| {
            Ok(TrackedInterval {
                start: parse_timestamp(r.start)?,
                end: parse_timestamp(r.end)?,
                tags: r.tags,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_closed_and_open_intervals() {
        let json = r#"[
            {"id":2,"start":"20250115T100000Z","end":"20250115T103000Z","tags":["a"]},
            {"id":1,"start":"20250115T110000Z","tags":["a","b"]}
        ]"#;
        let intervals = parse_export(json).unwrap();
        assert_eq!(intervals.len(), 2);
        assert_eq!(
            intervals[0].duration(),
            Some(chrono::TimeDelta::minutes(30))
        );
        assert!(intervals[1].end.is_none());
        assert_eq!(intervals[1].duration(), None);
    }

    #[test]
    fn empty_strings_count_as_absent() {
        let intervals = parse_export(r#"[{"start":"","end":"","tags":[]}]"#).unwrap();
        assert!(intervals[0].start.is_none());
        assert!(intervals[0].end.is_none());
    }

    #[test]
    fn missing_tags_default_to_empty() {
        let intervals =
            parse_export(r#"[{"start":"20250115T100000Z","end":"20250115T103000Z"}]"#).unwrap();
        assert!(intervals[0].tags.is_empty());
    }

    #[test]
    fn bad_timestamp_fails_whole_payload() {
        let json = r#"[
            {"start":"20250115T100000Z","end":"20250115T103000Z","tags":["a"]},
            {"start":"2025-01-15 10:00","end":"20250115T103000Z","tags":["a"]}
        ]"#;
        assert!(matches!(
            parse_export(json),
            Err(ReportError::Timestamp { .. })
        ));
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(matches!(parse_export("not json"), Err(ReportError::Json(_))));
    }
}
