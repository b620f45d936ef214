use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::FormField;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Validation,
    Rejected,
    Transport,
}

/// Reasons a record is refused before anything is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{} is required", .0.label())]
    MissingField(FormField),
    #[error("unknown form field '{0}'")]
    UnknownField(String),
    #[error("Contact Email must be a valid address")]
    InvalidEmail,
    #[error("Preferred Time '{0}' is not a valid date and time (expected YYYY-MM-DDTHH:MM)")]
    InvalidMeetingTime(String),
    #[error("Preferred Time '{0}' does not exist in the selected time zone")]
    NonexistentLocalTime(String),
    #[error("Preferred Time must not be in the past")]
    MeetingTimeInPast,
}

impl ValidationError {
    pub fn field(&self) -> Option<FormField> {
        match self {
            ValidationError::MissingField(field) => Some(*field),
            ValidationError::InvalidEmail => Some(FormField::Email),
            ValidationError::InvalidMeetingTime(_)
            | ValidationError::NonexistentLocalTime(_)
            | ValidationError::MeetingTimeInPast => Some(FormField::MeetingTime),
            ValidationError::UnknownField(_) => None,
        }
    }
}
