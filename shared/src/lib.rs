use serde::{Deserialize, Serialize};

pub mod balance;
pub mod day_rules;
pub mod duration;
pub mod settings;

pub use balance::{calculate_balance, expected_total_minutes, included_entries, worked_total_minutes};
pub use day_rules::{is_suspicious_time_entry, LeaveKind};
pub use duration::{format_human_time, is_zero_duration, parse_duration_minutes};
pub use settings::{
    Configuration, SettingsError, SettingsMessage, SettingsResponse, StoredSettings,
    HOURS_PER_DAY_KEY, RESPONSE_OK, WORKING_BREED_DAY_KEY,
};

/// One row of the host timesheet, as read from the rendered page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayEntry {
    /// Day of the month, `None` when the label had no digits
    pub day: Option<u32>,
    /// Day-of-week abbreviation as shown by the host ("Mon", "Sat", ...)
    pub day_of_week: String,
    /// Raw total for the day, e.g. "8 h 00 min"
    pub duration_text: String,
    /// Holiday / leave annotation, if the row carries one
    pub extra_info: Option<String>,
    /// Row has a clock entry at an implausible hour
    pub wrong_hours: bool,
}

impl DayEntry {
    pub fn new(day: Option<u32>, day_of_week: &str, duration_text: &str) -> Self {
        Self {
            day,
            day_of_week: day_of_week.to_string(),
            duration_text: duration_text.to_string(),
            extra_info: None,
            wrong_hours: false,
        }
    }

    pub fn with_extra_info(mut self, extra_info: &str) -> Self {
        self.extra_info = Some(extra_info.to_string());
        self
    }

    pub fn is_weekend(&self) -> bool {
        day_rules::is_weekend(&self.day_of_week)
    }

    pub fn leave_kind(&self) -> LeaveKind {
        LeaveKind::classify(self.extra_info.as_deref())
    }
}

/// The pay period the user is looking at when the snapshot was taken
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReviewPeriodContext {
    /// Month being reviewed, `None` if the header could not be read
    pub month: Option<chrono::Month>,
    /// True for "This Pay Period", false for historical periods
    pub is_current_period: bool,
    /// Today's day of the month from the system clock
    pub today: u32,
}

impl ReviewPeriodContext {
    /// Builds the context from the month abbreviation shown in the header ("Oct")
    pub fn from_header(month_abbrev: &str, is_current_period: bool, today: u32) -> Self {
        Self {
            month: month_from_abbreviation(month_abbrev.trim()),
            is_current_period,
            today,
        }
    }

    /// Historical periods are fully eligible; the current one only up to today
    pub fn is_day_eligible(&self, day: Option<u32>) -> bool {
        match day {
            None => false,
            Some(day) => !self.is_current_period || day <= self.today,
        }
    }
}

/// Only the exact English abbreviation the header prints ("Jan".."Dec") names a month
fn month_from_abbreviation(abbrev: &str) -> Option<chrono::Month> {
    abbrev
        .parse::<chrono::Month>()
        .ok()
        .filter(|month| month.name().get(..3) == Some(abbrev))
}

/// Everything one extraction pass produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySnapshot {
    pub entries: Vec<DayEntry>,
    pub context: ReviewPeriodContext,
}

impl DaySnapshot {
    pub fn new(entries: Vec<DayEntry>, context: ReviewPeriodContext) -> Self {
        Self { entries, context }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Worked / expected totals for the entries that count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceSummary {
    pub worked_minutes: i64,
    pub expected_minutes: i64,
    pub delta_minutes: i64,
    /// Unsigned human time, e.g. "152 h 30 min"
    pub worked: String,
    pub expected: String,
    /// Signed human time, e.g. "-1 h 30 min"
    pub delta: String,
}

impl BalanceSummary {
    pub fn new(worked_minutes: i64, expected_minutes: i64) -> Self {
        let delta_minutes = worked_minutes - expected_minutes;
        Self {
            worked_minutes,
            expected_minutes,
            delta_minutes,
            worked: format_human_time(worked_minutes, false),
            expected: format_human_time(expected_minutes, false),
            delta: format_human_time(delta_minutes, true),
        }
    }

    pub fn is_on_track(&self) -> bool {
        self.delta_minutes >= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Month;

    #[test]
    fn test_context_from_header() {
        let context = ReviewPeriodContext::from_header("Oct", true, 15);
        assert_eq!(context.month, Some(Month::October));

        let unknown = ReviewPeriodContext::from_header("", false, 15);
        assert_eq!(unknown.month, None);
    }

    #[test]
    fn test_header_month_requires_exact_abbreviation() {
        assert_eq!(ReviewPeriodContext::from_header(" Dec ", false, 1).month, Some(Month::December));
        for text in ["OCTOBER", "October", "oct", "OCT", "Octo"] {
            assert_eq!(ReviewPeriodContext::from_header(text, false, 1).month, None, "{text}");
        }
    }

    #[test]
    fn test_current_period_only_counts_up_to_today() {
        let context = ReviewPeriodContext::from_header("Mar", true, 10);
        assert!(context.is_day_eligible(Some(10)));
        assert!(!context.is_day_eligible(Some(11)));
        assert!(!context.is_day_eligible(None));
    }

    #[test]
    fn test_historical_period_counts_every_day() {
        let context = ReviewPeriodContext::from_header("Mar", false, 10);
        assert!(context.is_day_eligible(Some(31)));
        assert!(!context.is_day_eligible(None));
    }

    #[test]
    fn test_summary_sign_and_text() {
        let summary = BalanceSummary::new(390, 480);
        assert_eq!(summary.delta_minutes, -90);
        assert_eq!(summary.delta, "-1 h 30 min");
        assert_eq!(summary.worked, "6 h 30 min");
        assert_eq!(summary.expected, "8 h");
        assert!(!summary.is_on_track());
        assert!(BalanceSummary::new(480, 480).is_on_track());
    }
}
