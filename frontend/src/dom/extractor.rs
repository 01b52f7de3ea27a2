//! Reads the rendered timesheet into a [`DaySnapshot`].

use shared::{is_suspicious_time_entry, DayEntry, DaySnapshot, ReviewPeriodContext};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, NodeList};

use super::selectors;
use crate::services::logging::Logger;

/// Take a snapshot of every trackable day row currently on the page.
///
/// Rows also get the wrong-hours marker toggled as a side effect.
pub fn extract_snapshot(document: &Document, today: u32) -> DaySnapshot {
    let entries: Vec<DayEntry> = day_rows(document).iter().map(read_day_entry).collect();
    let context = review_period(document, today);

    Logger::debug_with_component(
        "day-extractor",
        &format!("extracted {} day rows (current period: {})", entries.len(), context.is_current_period),
    );
    DaySnapshot::new(entries, context)
}

fn day_rows(document: &Document) -> Vec<Element> {
    match document.query_selector_all(selectors::DAY_ROWS) {
        Ok(rows) => elements(&rows),
        Err(_) => Vec::new(),
    }
}

fn elements(list: &NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn read_day_entry(row: &Element) -> DayEntry {
    let extra_info = all_text(row, selectors::EXTRA_INFO);
    DayEntry {
        day: parse_day_number(&text_of(row, selectors::DAY_DATE)),
        day_of_week: text_of(row, selectors::DAY_OF_WEEK),
        duration_text: text_of(row, selectors::DAY_TOTAL),
        extra_info: (!extra_info.is_empty()).then_some(extra_info),
        wrong_hours: mark_wrong_hours(row),
    }
}

/// Day number from a label like "Oct 12"; labels without digits give `None`
pub fn parse_day_number(label: &str) -> Option<u32> {
    let digits: String = label.chars().filter(char::is_ascii_digit).collect();
    digits.parse::<u32>().ok().filter(|day| *day > 0)
}

fn text_of(parent: &Element, selector: &str) -> String {
    parent
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.text_content())
        .map(|text| text.trim().to_string())
        .unwrap_or_default()
}

fn all_text(parent: &Element, selector: &str) -> String {
    let items = match parent.query_selector_all(selector) {
        Ok(list) => elements(&list),
        Err(_) => return String::new(),
    };
    items
        .iter()
        .filter_map(|el| el.text_content())
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn first_text(document: &Document, selector: &str) -> String {
    document
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.text_content())
        .map(|text| text.trim().to_string())
        .unwrap_or_default()
}

fn review_period(document: &Document, today: u32) -> ReviewPeriodContext {
    let header = first_text(document, selectors::MONTH_HEADER);
    let month_abbrev = header.split_whitespace().next().unwrap_or_default();
    let is_current = first_text(document, selectors::PERIOD_TOGGLE) == selectors::CURRENT_PERIOD_LABEL;
    ReviewPeriodContext::from_header(month_abbrev, is_current, today)
}

/// Flag rows whose clock entries fall at implausible hours
fn mark_wrong_hours(row: &Element) -> bool {
    let suspicious = match row.query_selector_all(selectors::TIME_ENTRY) {
        Ok(list) => elements(&list)
            .iter()
            .filter_map(|el| el.text_content())
            .any(|text| is_suspicious_time_entry(&text)),
        Err(_) => false,
    };

    if let Ok(Some(wrapper)) = row.query_selector(selectors::DATA_WRAPPER) {
        let classes = wrapper.class_list();
        // Touching the class list always fires a mutation, so only write on change
        let result = match (suspicious, classes.contains(selectors::WRONG_HOURS_CLASS)) {
            (true, false) => classes.add_1(selectors::WRONG_HOURS_CLASS),
            (false, true) => classes.remove_1(selectors::WRONG_HOURS_CLASS),
            _ => Ok(()),
        };
        if result.is_err() {
            Logger::warn_with_component("day-extractor", "could not toggle wrong hours marker");
        }
    }
    suspicious
}
