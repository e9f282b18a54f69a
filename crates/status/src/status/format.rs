// Path: crates/status/src/status/format.rs

//! Display formatting for build and configuration metadata.

use time::format_description::well_known::Rfc3339;
use time::format_description::FormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

/// `YYYY-MM-DD, h:mm:ss am|pm`
const LONG_TIME_FORMAT: &[FormatItem<'static>] = format_description!(
    "[year]-[month]-[day], [hour repr:12 padding:none]:[minute]:[second] [period case:lower]"
);

const LOCAL_BUILD_COMMIT: &str = "?";
const LOCAL_BUILD_LABEL: &str = "Local development";
const BUILD_COMMIT_DISPLAY_LEN: usize = 18;

pub fn long_timestamp(at: OffsetDateTime, offset: UtcOffset) -> Option<String> {
    at.to_offset(offset).format(LONG_TIME_FORMAT).ok()
}

/// Reformats an RFC 3339 timestamp. Empty stays empty; anything unparseable
/// is shown verbatim.
pub fn configured_at(raw: &str, offset: UtcOffset) -> String {
    if raw.is_empty() {
        return String::new();
    }
    OffsetDateTime::parse(raw, &Rfc3339)
        .ok()
        .and_then(|at| long_timestamp(at, offset))
        .unwrap_or_else(|| raw.to_string())
}

/// Reformats a Unix timestamp in seconds. Empty stays empty; anything
/// unparseable is shown verbatim.
pub fn build_date(raw: &str, offset: UtcOffset) -> String {
    if raw.is_empty() {
        return String::new();
    }
    parse_unix_seconds(raw)
        .and_then(|secs| OffsetDateTime::from_unix_timestamp(secs).ok())
        .and_then(|at| long_timestamp(at, offset))
        .unwrap_or_else(|| raw.to_string())
}

pub fn build_commit(raw: &str) -> String {
    if raw == LOCAL_BUILD_COMMIT {
        return LOCAL_BUILD_LABEL.to_string();
    }
    raw.chars().take(BUILD_COMMIT_DISPLAY_LEN).collect()
}

fn parse_unix_seconds(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    raw.parse::<i64>().ok().or_else(|| {
        raw.parse::<f64>()
            .ok()
            .filter(|secs| secs.is_finite())
            .map(|secs| secs.trunc() as i64)
    })
}
