//! Checks a browser would enforce through `required`, `type="email"` and `min`
//! before letting the form submit.

use chrono::{DateTime, Timelike, Utc};
use chrono_tz::Tz;
use shared::{
    domain::{FormField, FormRecord},
    error::ValidationError,
};

use crate::normalize::{localize_meeting_time, parse_meeting_time};

const MAX_EMAIL_LEN: usize = 254;

pub fn validate_record(
    record: &FormRecord,
    tz: Tz,
    now: DateTime<Utc>,
) -> Result<(), ValidationError> {
    if let Some(field) = record.missing_required().next() {
        return Err(ValidationError::MissingField(field));
    }
    if !is_valid_email(record.get(FormField::Email)) {
        return Err(ValidationError::InvalidEmail);
    }

    let meeting = localize_meeting_time(parse_meeting_time(&record.meeting_time)?, tz)?;
    // The earliest selectable slot is the current minute.
    let floor = now
        .with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(now);
    if meeting.with_timezone(&Utc) < floor {
        return Err(ValidationError::MeetingTimeInPast);
    }
    Ok(())
}

pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    if email.is_empty() || email.len() > MAX_EMAIL_LEN || email.chars().any(char::is_whitespace)
    {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain.contains('.') && domain.split('.').all(|label| !label.is_empty())
}
