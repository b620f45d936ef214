//! Turns a raw [`FormRecord`] into the payload that goes over the wire.

use chrono::{DateTime, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use shared::{domain::FormRecord, error::ValidationError, protocol::ApplyPayload};

/// Accepted spellings of a stored meeting time (`datetime-local` style).
const MEETING_TIME_INPUT_FORMATS: [&str; 3] =
    ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// e.g. `Monday, June 3, 2024, 2:30 PM EDT`
const MEETING_TIME_LONG_FORMAT: &str = "%A, %B %-d, %Y, %-I:%M %p %Z";

const DEFAULT_SCHEME: &str = "https://";

/// Prefixes `https://` unless the value already starts with `http`.
pub fn normalize_url(value: &str) -> String {
    if value.starts_with("http") {
        value.to_string()
    } else {
        format!("{DEFAULT_SCHEME}{value}")
    }
}

/// Blank values disappear; anything else follows [`normalize_url`].
pub fn normalize_optional_url(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(normalize_url(value))
    }
}

pub fn parse_meeting_time(value: &str) -> Result<NaiveDateTime, ValidationError> {
    let value = value.trim();
    MEETING_TIME_INPUT_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .ok_or_else(|| ValidationError::InvalidMeetingTime(value.to_string()))
}

/// Pins a wall-clock time to `tz`. A time repeated by a DST fold resolves to
/// its first occurrence; a time skipped by a DST gap is rejected.
pub fn localize_meeting_time(
    naive: NaiveDateTime,
    tz: Tz,
) -> Result<DateTime<Tz>, ValidationError> {
    tz.from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| ValidationError::NonexistentLocalTime(naive.to_string()))
}

pub fn format_meeting_time(value: &str, tz: Tz) -> Result<String, ValidationError> {
    if value.trim().is_empty() {
        return Ok(String::new());
    }
    let localized = localize_meeting_time(parse_meeting_time(value)?, tz)?;
    Ok(localized.format(MEETING_TIME_LONG_FORMAT).to_string())
}

pub fn build_payload(record: &FormRecord, tz: Tz) -> Result<ApplyPayload, ValidationError> {
    Ok(ApplyPayload {
        company_name: record.company_name.clone(),
        website: normalize_url(&record.website),
        linkedin: record.linkedin.clone(),
        pitch_deck: normalize_url(&record.pitch_deck),
        github: normalize_optional_url(&record.github),
        email: record.email.trim().to_string(),
        meeting_time: format_meeting_time(&record.meeting_time, tz)?,
    })
}

#[cfg(test)]
#[path = "tests/normalize_tests.rs"]
mod tests;
