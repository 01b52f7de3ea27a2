//! Parsing and formatting of the "8 h 00 min" style durations the host prints.

use once_cell::sync::Lazy;
use regex::Regex;

static HOURS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+)\s*h").expect("valid hours pattern"));
static MINUTES_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+)\s*m").expect("valid minutes pattern"));

/// Parse a duration like "8 h 30 min", "8 h", "45 min" or "8h 30m" into minutes.
///
/// Text with neither an hours nor a minutes component parses as `None`.
pub fn parse_duration_minutes(text: &str) -> Option<i64> {
    let hours = HOURS_RE
        .captures(text)
        .and_then(|caps| caps[1].parse::<i64>().ok());
    let minutes = MINUTES_RE
        .captures(text)
        .and_then(|caps| caps[1].parse::<i64>().ok());

    match (hours, minutes) {
        (None, None) => None,
        (h, m) => Some(h.unwrap_or(0) * 60 + m.unwrap_or(0)),
    }
}

/// True for the host's empty-day placeholder ("0 h 00 min")
pub fn is_zero_duration(text: &str) -> bool {
    digits_only(text) == "000"
}

pub(crate) fn digits_only(text: &str) -> String {
    text.chars().filter(char::is_ascii_digit).collect()
}

/// Render minutes as "H h M min", "H h" or "M min".
///
/// With `signed` set, positive values get "+" and negative values "-";
/// zero never carries a sign.
pub fn format_human_time(minutes: i64, signed: bool) -> String {
    let sign = match (signed, minutes.signum()) {
        (true, 1) => "+",
        (true, -1) => "-",
        _ => "",
    };
    let total = minutes.unsigned_abs();
    let hours = total / 60;
    let mins = total % 60;

    if hours > 0 && mins > 0 {
        format!("{}{} h {} min", sign, hours, mins)
    } else if hours > 0 {
        format!("{}{} h", sign, hours)
    } else {
        format!("{}{} min", sign, mins)
    }
}

/// Round fractional minutes to the nearest whole minute
pub fn round_minutes(minutes: f64) -> i64 {
    minutes.round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_form() {
        assert_eq!(parse_duration_minutes("8 h 00 min"), Some(480));
        assert_eq!(parse_duration_minutes("7 h 45 min"), Some(465));
    }

    #[test]
    fn test_parse_partial_forms() {
        assert_eq!(parse_duration_minutes("8 h"), Some(480));
        assert_eq!(parse_duration_minutes("45 min"), Some(45));
        assert_eq!(parse_duration_minutes("8h 30m"), Some(510));
    }

    #[test]
    fn test_parse_garbage() {
        assert_eq!(parse_duration_minutes(""), None);
        assert_eq!(parse_duration_minutes("--"), None);
    }

    #[test]
    fn test_zero_duration_detection() {
        assert!(is_zero_duration("0 h 00 min"));
        assert!(is_zero_duration("0h 00m"));
        assert!(!is_zero_duration("0 h 05 min"));
        assert!(!is_zero_duration(""));
    }

    #[test]
    fn test_human_time_zero_has_no_sign() {
        assert_eq!(format_human_time(0, true), "0 min");
        assert_eq!(format_human_time(0, false), "0 min");
    }

    #[test]
    fn test_human_time_signs() {
        assert_eq!(format_human_time(-90, true), "-1 h 30 min");
        assert_eq!(format_human_time(90, true), "+1 h 30 min");
        assert_eq!(format_human_time(-90, false), "1 h 30 min");
        assert_eq!(format_human_time(-15, true), "-15 min");
    }

    #[test]
    fn test_human_time_whole_hours() {
        assert_eq!(format_human_time(480, false), "8 h");
        assert_eq!(format_human_time(-120, true), "-2 h");
    }

    #[test]
    fn test_round_minutes() {
        assert_eq!(round_minutes(158.4), 158);
        assert_eq!(round_minutes(158.5), 159);
        assert_eq!(round_minutes(-0.4), 0);
    }
}
