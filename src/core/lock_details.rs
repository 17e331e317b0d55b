//! Human readable lock details for the lock icon dialog.
//!
//! # Public API
//! - [`format_lock_details`]: One text block per locked record
//! - [`normalize_lock_date`]: Tolerant date parsing with raw-text fallback

use crate::core::state::StatusRecord;
use chrono::{DateTime, NaiveDateTime};
use std::fmt::Write as _;
use std::path::Path;

/// Layout every successfully parsed date is printed in.
pub const LOCK_DATE_FORMAT: &str = "%Y-%m-%d %I:%M:%S";

const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S %z", "%Y-%m-%dT%H:%M:%S%z"];
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Format the lock metadata of `records` for display.
///
/// Records without lock details are skipped. Blocks keep the input order and
/// the result carries no trailing newlines; no locked records yield `""`.
pub fn format_lock_details<'a, I>(records: I) -> String
where
    I: IntoIterator<Item = &'a StatusRecord>,
{
    let mut details = String::new();

    for record in records {
        let Some(lock) = record.visible_lock_details() else {
            continue;
        };

        let path = if lock.path.is_empty() {
            &record.path
        } else {
            &lock.path
        };
        let file_name = Path::new(path)
            .file_name()
            .map(|name| name.to_string_lossy())
            .unwrap_or_default();

        // Writing into a String cannot fail.
        let _ = write!(
            details,
            "File: {}\nLock Status: {}\nOwner: {}\nDate: {}\n\n",
            file_name,
            record.lock_status.nicified(),
            lock.owner,
            normalize_lock_date(&lock.date),
        );
    }

    details.trim_end_matches('\n').to_string()
}

/// Parse a backend-reported lock date and print it as [`LOCK_DATE_FORMAT`].
///
/// Backends append localized annotations such as
/// `2020-09-08 23:32:13 +0300 (Tue, 08 Sep 2020)`, so when the full text does
/// not parse, the part before the first `(` is tried. Unparseable input is
/// returned unchanged. The wall-clock time of the stated offset is kept.
pub fn normalize_lock_date(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let parsed = parse_date(raw).or_else(|| {
        raw.find('(')
            .and_then(|paren| parse_date(&raw[..paren]))
    });

    match parsed {
        Some(date) => date.format(LOCK_DATE_FORMAT).to_string(),
        None => {
            log::debug!("Lock date '{raw}' could not be parsed, showing it as is");
            raw.to_string()
        }
    }
}

fn parse_date(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(date) = DateTime::parse_from_rfc3339(text) {
        return Some(date.naive_local());
    }
    if let Ok(date) = DateTime::parse_from_rfc2822(text) {
        return Some(date.naive_local());
    }
    if let Some(date) = OFFSET_FORMATS
        .iter()
        .find_map(|format| DateTime::parse_from_str(text, format).ok())
    {
        return Some(date.naive_local());
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
}
