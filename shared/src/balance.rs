//! Worked vs. expected hours for one pay period.

use crate::day_rules::{is_day_considered, LeaveKind};
use crate::duration::{is_zero_duration, parse_duration_minutes, round_minutes};
use crate::{BalanceSummary, Configuration, DayEntry, DaySnapshot};

/// Entries that count toward the balance, in page order.
///
/// On top of the calendar rules, rows with no total and rows showing the
/// host's "0 h 00 min" placeholder are dropped.
pub fn included_entries<'a>(snapshot: &'a DaySnapshot, config: &Configuration) -> Vec<&'a DayEntry> {
    snapshot
        .entries
        .iter()
        .filter(|entry| is_day_considered(entry, &snapshot.context, config))
        .filter(|entry| !entry.duration_text.trim().is_empty())
        .filter(|entry| !is_zero_duration(&entry.duration_text))
        .collect()
}

pub fn worked_total_minutes(entries: &[&DayEntry]) -> i64 {
    entries
        .iter()
        .filter(|entry| !is_zero_duration(&entry.duration_text))
        .map(|entry| parse_duration_minutes(&entry.duration_text).unwrap_or(0))
        .sum()
}

/// Daily target for every entry, less the leave share of partial holidays
pub fn expected_total_minutes(entries: &[&DayEntry], workday_hours: u32) -> i64 {
    let day_minutes = i64::from(workday_hours) * 60;
    let base = entries.len() as i64 * day_minutes;

    let discount: i64 = entries
        .iter()
        .filter_map(|entry| match entry.leave_kind() {
            partial @ LeaveKind::Partial { .. } => Some(partial.leave_percentage()),
            _ => None,
        })
        .map(|percentage| {
            let leave_hours = percentage * f64::from(workday_hours) / 100.0;
            round_minutes(leave_hours * 60.0)
        })
        .sum();

    base - discount
}

pub fn calculate_balance(snapshot: &DaySnapshot, config: &Configuration) -> BalanceSummary {
    let entries = included_entries(snapshot, config);
    let worked = worked_total_minutes(&entries);
    let expected = expected_total_minutes(&entries, config.workday_hours);
    BalanceSummary::new(worked, expected)
}
