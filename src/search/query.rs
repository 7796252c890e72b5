//! Query-string construction for the `/results` endpoint.
//!
//! The backend expects each parameter to be omitted entirely when its
//! source value is absent, with `course` carrying no `&` prefix and the
//! remaining parameters each carrying one. The punctuation is part of
//! the wire contract, so the query is assembled by hand rather than
//! through a URL builder that would normalize it.

use chrono::{DateTime, NaiveTime};

use super::types::SearchCriteria;

/// Path of the search endpoint.
pub const RESULTS_PATH: &str = "/results";

/// Builds the `/results` query string for a criteria snapshot.
///
/// Multi-valued fields are comma-joined; times are rendered `HH:MM`.
/// Timezone is a validation-only field and never serialized.
pub fn build_results_query(criteria: &SearchCriteria) -> String {
    let course_param = if criteria.course.is_empty() {
        String::new()
    } else {
        format!("course={}", criteria.course.join(","))
    };

    let day_param = if criteria.day.is_empty() {
        String::new()
    } else {
        format!("&day={}", criteria.day.join(","))
    };

    let start_param = match criteria.start_time {
        Some(time) => format!("&start_time={}", format_time(time)),
        None => String::new(),
    };

    let end_param = match criteria.end_time {
        Some(time) => format!("&end_time={}", format_time(time)),
        None => String::new(),
    };

    format!("{RESULTS_PATH}?{course_param}{day_param}{start_param}{end_param}")
}

fn format_time(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Parses user-entered time text.
///
/// Accepts "HH:MM", "HH:MM:SS", or a full RFC 3339 timestamp (the time
/// component is kept). Returns None for anything else.
pub fn parse_time_text(text: &str) -> Option<NaiveTime> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .map(|dt| dt.time())
        })
}
