//! Relative-timestamp normalization
//!
//! Listing pages render start times like "Oct-14 9:05". The sink expects
//! `MM/dd HH:mm` with zero-padded fields and no year or seconds.

use crate::record::ListingRecord;
use regex::Regex;
use std::sync::LazyLock;

/// Matches "<month abbreviation>-<day> <hour>:<minute>" anywhere in the text
static DATE_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(\w+)-(\d+)\s(\d+):(\d+)").ok());

/// Normalizes a raw timestamp string to `MM/dd HH:mm`
///
/// The month abbreviation is mapped through a fixed three-letter table
/// (Jan=01 … Dec=12); day, hour, and minute are zero-padded to two digits.
/// Any input that does not match the pattern, including an unrecognized
/// month abbreviation, yields the literal `"N/A"` rather than an error or
/// a guessed date.
///
/// # Examples
///
/// ```
/// use listing_harvester::scrape::normalize_start_date;
///
/// assert_eq!(normalize_start_date("Oct-5 9:3"), "10/05 09:03");
/// assert_eq!(normalize_start_date("Just now"), "N/A");
/// ```
pub fn normalize_start_date(raw: &str) -> String {
    let Some(pattern) = DATE_PATTERN.as_ref() else {
        return ListingRecord::NOT_AVAILABLE.to_string();
    };

    let Some(captures) = pattern.captures(raw) else {
        return ListingRecord::NOT_AVAILABLE.to_string();
    };

    let Some(month) = month_number(&captures[1]) else {
        return ListingRecord::NOT_AVAILABLE.to_string();
    };

    format!(
        "{}/{:0>2} {:0>2}:{:0>2}",
        month, &captures[2], &captures[3], &captures[4]
    )
}

/// Fixed three-letter month abbreviation table
fn month_number(abbreviation: &str) -> Option<&'static str> {
    match abbreviation {
        "Jan" => Some("01"),
        "Feb" => Some("02"),
        "Mar" => Some("03"),
        "Apr" => Some("04"),
        "May" => Some("05"),
        "Jun" => Some("06"),
        "Jul" => Some("07"),
        "Aug" => Some("08"),
        "Sep" => Some("09"),
        "Oct" => Some("10"),
        "Nov" => Some("11"),
        "Dec" => Some("12"),
        _ => None,
    }
}
