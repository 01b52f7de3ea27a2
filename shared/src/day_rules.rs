//! Rules deciding which timesheet days count toward the balance.

use chrono::Month;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{Configuration, DayEntry, ReviewPeriodContext};

const WEEKEND_DAYS: [&str; 2] = ["Sat", "Sun"];

/// Regional holiday that some users work anyway (October 12)
pub const EXCEPTION_DAY: u32 = 12;
pub const EXCEPTION_MONTH: Month = Month::October;

// A lone fraction like "0.5"; digits or dots on either side rule it out
static PARTIAL_LEAVE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|[^\d.])(\d\.\d{1,2})(?:[^\d.]|$)").expect("valid partial leave pattern")
});

static SUSPICIOUS_TIME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(^|-)\s*(12|1|2|3|4|5):\d{2}\sAM|(^|-)\s*(9|10|11):\d{2}\sPM")
        .expect("valid clock time pattern")
});

pub fn is_weekend(day_of_week: &str) -> bool {
    WEEKEND_DAYS.contains(&day_of_week)
}

/// How much of a day the leave annotation takes away
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LeaveKind {
    /// No annotation, or one that is not leave
    None,
    /// Whole day off ("1 holiday day", "Public holiday", "0 holiday day")
    FullDay,
    /// Part of the day off; `fraction` of the workday, e.g. 0.5
    Partial { fraction: f64 },
}

impl LeaveKind {
    pub fn classify(extra_info: Option<&str>) -> Self {
        let text = match extra_info.map(str::trim) {
            Some(text) if !text.is_empty() => text,
            _ => return LeaveKind::None,
        };

        // "0.5 holiday day" starts with a 0 too, so fractions are checked first
        if let Some(found) = PARTIAL_LEAVE_RE.captures(text).and_then(|caps| caps.get(1)) {
            if let Ok(fraction) = found.as_str().parse::<f64>() {
                return LeaveKind::Partial { fraction };
            }
        }

        match text.chars().find(char::is_ascii_digit) {
            None | Some('0') | Some('1') => LeaveKind::FullDay,
            Some(_) => LeaveKind::None,
        }
    }

    pub fn is_full_day(&self) -> bool {
        matches!(self, LeaveKind::FullDay)
    }

    /// Share of the workday taken as leave, in percent
    pub fn leave_percentage(&self) -> f64 {
        match self {
            LeaveKind::Partial { fraction } => fraction * 100.0,
            LeaveKind::FullDay => 100.0,
            LeaveKind::None => 0.0,
        }
    }
}

pub fn is_regional_exception_day(day: Option<u32>, context: &ReviewPeriodContext) -> bool {
    day == Some(EXCEPTION_DAY) && context.month == Some(EXCEPTION_MONTH)
}

/// Whether a day counts toward worked and expected hours.
///
/// Zero-duration and empty rows are filtered later by the calculator; this
/// only applies the calendar rules.
pub fn is_day_considered(
    entry: &DayEntry,
    context: &ReviewPeriodContext,
    config: &Configuration,
) -> bool {
    if !context.is_day_eligible(entry.day) {
        return false;
    }
    if entry.is_weekend() {
        return false;
    }
    if is_regional_exception_day(entry.day, context) && !config.working_breed_day {
        return false;
    }
    !entry.leave_kind().is_full_day()
}

/// Clock entries between midnight and 6 AM or after 9 PM are probably typos
pub fn is_suspicious_time_entry(text: &str) -> bool {
    SUSPICIOUS_TIME_RE.is_match(text.trim())
}
