use std::time::Duration;

use chrono::TimeDelta;

use crate::error::StatusParseError;

/// Parse a Go-style duration string ("25m", "1h30m", "1.5h", "90s", "0").
pub(crate) fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim();
    if s == "0" {
        return Some(Duration::ZERO);
    }
    if s.is_empty() {
        return None;
    }

    let mut total_nanos: f64 = 0.0;
    let mut rest = s;
    while !rest.is_empty() {
        let num_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        if num_len == 0 {
            return None;
        }
        let value: f64 = rest[..num_len].parse().ok()?;
        rest = &rest[num_len..];

        let unit_len = rest
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(rest.len());
        let scale = match &rest[..unit_len] {
            "ns" => 1.0,
            "us" | "µs" => 1e3,
            "ms" => 1e6,
            "s" => 1e9,
            "m" => 60.0 * 1e9,
            "h" => 3600.0 * 1e9,
            _ => return None,
        };
        rest = &rest[unit_len..];
        total_nanos += value * scale;
    }

    let total_nanos = total_nanos.round();
    if !total_nanos.is_finite() || total_nanos >= u64::MAX as f64 {
        return None;
    }
    Some(Duration::from_nanos(total_nanos as u64))
}

/// Parse the cumulative `H:MM:SS` total printed by `timew`.
pub(crate) fn parse_hms(s: &str) -> Result<Duration, StatusParseError> {
    let invalid = || StatusParseError::InvalidElapsed {
        input: s.to_string(),
    };
    let mut parts = s.split(':');
    let (Some(h), Some(m), Some(sec), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(invalid());
    };
    let hours: u64 = h.parse().map_err(|_| invalid())?;
    let minutes: u64 = m.parse().map_err(|_| invalid())?;
    let seconds: u64 = sec.parse().map_err(|_| invalid())?;
    if minutes >= 60 || seconds >= 60 {
        return Err(invalid());
    }
    hours
        .checked_mul(3600)
        .and_then(|secs| secs.checked_add(minutes * 60 + seconds))
        .map(Duration::from_secs)
        .ok_or_else(invalid)
}

/// Round to the nearest minute (halves away from zero) and render as `H:MM`.
pub(crate) fn format_hm(delta: TimeDelta) -> String {
    let secs = delta.num_seconds();
    let sign = if secs < 0 { "-" } else { "" };
    let abs = secs.unsigned_abs();
    let minutes = (abs + 30) / 60;
    format!("{sign}{}:{:02}", minutes / 60, minutes % 60)
}

/// Short human form for log lines and `/status` ("1h30m", "25m", "45s").
pub(crate) fn format_short(d: Duration) -> String {
    let secs = d.as_secs();
    let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    let mut out = String::new();
    if h > 0 {
        out.push_str(&format!("{h}h"));
    }
    if m > 0 {
        out.push_str(&format!("{m}m"));
    }
    if s > 0 || out.is_empty() {
        out.push_str(&format!("{s}s"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_duration_units() {
        assert_eq!(parse_duration("25m"), Some(Duration::from_secs(25 * 60)));
        assert_eq!(parse_duration("1h30m"), Some(Duration::from_secs(5400)));
        assert_eq!(parse_duration("90s"), Some(Duration::from_secs(90)));
        assert_eq!(parse_duration("1.5h"), Some(Duration::from_secs(5400)));
        assert_eq!(parse_duration("500ms"), Some(Duration::from_millis(500)));
        assert_eq!(parse_duration("0"), Some(Duration::ZERO));
        assert_eq!(parse_duration("0s"), Some(Duration::ZERO));
    }

    #[test]
    fn parse_duration_rejects_garbage() {
        assert_eq!(parse_duration(""), None);
        assert_eq!(parse_duration("m"), None);
        assert_eq!(parse_duration("25"), None);
        assert_eq!(parse_duration("25 minutes"), None);
        assert_eq!(parse_duration("1d"), None);
    }

    #[test]
    fn parse_hms_total() {
        assert_eq!(parse_hms("0:10:00"), Ok(Duration::from_secs(600)));
        assert_eq!(parse_hms("1:02:03"), Ok(Duration::from_secs(3723)));
        assert_eq!(parse_hms("26:00:00"), Ok(Duration::from_secs(26 * 3600)));
    }

    #[test]
    fn parse_hms_rejects_malformed() {
        assert!(parse_hms("10:00").is_err());
        assert!(parse_hms("1:2:3:4").is_err());
        assert!(parse_hms("a:00:00").is_err());
        assert!(parse_hms("0:61:00").is_err());
        assert!(parse_hms("").is_err());
    }

    #[test]
    fn parse_hms_rejects_overflowing_hours() {
        assert_eq!(
            parse_hms("9999999999999999:00:00"),
            Err(StatusParseError::InvalidElapsed {
                input: "9999999999999999:00:00".to_string(),
            })
        );
    }

    #[test]
    fn parse_duration_rejects_out_of_range() {
        assert_eq!(parse_duration("99999999999999999999h"), None);
        assert_eq!(parse_duration(&format!("{}h", "9".repeat(400))), None);
    }

    #[test]
    fn format_hm_rounds_to_minute() {
        assert_eq!(format_hm(TimeDelta::minutes(60)), "1:00");
        assert_eq!(format_hm(TimeDelta::minutes(30)), "0:30");
        assert_eq!(format_hm(TimeDelta::seconds(29)), "0:00");
        assert_eq!(format_hm(TimeDelta::seconds(30)), "0:01");
        assert_eq!(format_hm(TimeDelta::seconds(125 * 60 + 40)), "2:06");
        assert_eq!(format_hm(TimeDelta::minutes(-90)), "-1:30");
    }

    #[test]
    fn format_short_forms() {
        assert_eq!(format_short(Duration::from_secs(5400)), "1h30m");
        assert_eq!(format_short(Duration::from_secs(25 * 60)), "25m");
        assert_eq!(format_short(Duration::from_secs(45)), "45s");
        assert_eq!(format_short(Duration::ZERO), "0s");
    }
}
