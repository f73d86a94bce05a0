//! Sale-window extraction from ticket announcements.
//!
//! Announcement bodies state when ticket sales open as a day/month in
//! parentheses followed, possibly much later in the text, by an
//! `a partir das <hour>h` clause:
//!
//! ```text
//! Venda de ingressos (21/5) para sócios a partir das 10h
//! ```
//!
//! The year is not part of the announcement; callers supply it, normally
//! as the current year.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;

/// Regex for the "(day/month) ... a partir das <hour>h" sale clause.
static SALE_WINDOW_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\((\d{1,2})/(\d{1,2})\).*a partir das *(\d{1,2})h")
        .expect("Invalid sale window regex")
});

/// Extracts the sale start from announcement text.
///
/// Newlines are flattened before matching so the date and the hour may
/// sit on different lines. When the clause appears more than once, the
/// last hour after the first date wins. Returns `None` when the pattern
/// is absent or the captured day, month and hour do not form a valid
/// timestamp.
pub fn extract_sale_start(text: &str, year: i32) -> Option<NaiveDateTime> {
    let flattened = text.replace(['\n', '\r'], " ");
    let captures = SALE_WINDOW_REGEX.captures(&flattened)?;

    let day: u32 = captures.get(1)?.as_str().parse().ok()?;
    let month: u32 = captures.get(2)?.as_str().parse().ok()?;
    let hour: u32 = captures.get(3)?.as_str().parse().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, 0, 0)
}
