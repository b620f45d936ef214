use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    CompanyName,
    Website,
    Linkedin,
    PitchDeck,
    Github,
    Email,
    MeetingTime,
}

impl FormField {
    /// Every field in the order the form presents them.
    pub const ALL: [FormField; 7] = [
        FormField::CompanyName,
        FormField::Website,
        FormField::Linkedin,
        FormField::PitchDeck,
        FormField::Github,
        FormField::Email,
        FormField::MeetingTime,
    ];

    /// Key used on the wire and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            FormField::CompanyName => "company_name",
            FormField::Website => "website",
            FormField::Linkedin => "linkedin",
            FormField::PitchDeck => "pitch_deck",
            FormField::Github => "github",
            FormField::Email => "email",
            FormField::MeetingTime => "meeting_time",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::CompanyName => "Company Name",
            FormField::Website => "Website",
            FormField::Linkedin => "Founders LinkedIn",
            FormField::PitchDeck => "Pitch Deck URL",
            FormField::Github => "GitHub (optional)",
            FormField::Email => "Contact Email",
            FormField::MeetingTime => "Preferred Time",
        }
    }

    pub fn is_required(self) -> bool {
        !matches!(self, FormField::Github)
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FormField {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = value.trim().replace('-', "_").to_ascii_lowercase();
        FormField::ALL
            .into_iter()
            .find(|field| field.name() == wanted)
            .ok_or_else(|| ValidationError::UnknownField(value.to_string()))
    }
}

/// Raw field values exactly as the user entered them.
///
/// The record is never validated on write; normalization happens once, when a
/// payload is built from it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormRecord {
    pub company_name: String,
    pub website: String,
    pub linkedin: String,
    pub pitch_deck: String,
    pub github: String,
    pub email: String,
    /// Local date-time in `YYYY-MM-DDTHH:MM` form.
    pub meeting_time: String,
}

impl FormRecord {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::CompanyName => &self.company_name,
            FormField::Website => &self.website,
            FormField::Linkedin => &self.linkedin,
            FormField::PitchDeck => &self.pitch_deck,
            FormField::Github => &self.github,
            FormField::Email => &self.email,
            FormField::MeetingTime => &self.meeting_time,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let slot = match field {
            FormField::CompanyName => &mut self.company_name,
            FormField::Website => &mut self.website,
            FormField::Linkedin => &mut self.linkedin,
            FormField::PitchDeck => &mut self.pitch_deck,
            FormField::Github => &mut self.github,
            FormField::Email => &mut self.email,
            FormField::MeetingTime => &mut self.meeting_time,
        };
        *slot = value.into();
    }

    pub fn is_blank(&self, field: FormField) -> bool {
        self.get(field).trim().is_empty()
    }

    pub fn is_empty(&self) -> bool {
        FormField::ALL.into_iter().all(|field| self.get(field).is_empty())
    }

    pub fn missing_required(&self) -> impl Iterator<Item = FormField> + '_ {
        FormField::ALL
            .into_iter()
            .filter(|field| field.is_required() && self.is_blank(*field))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_field_names_from_wire_and_flag_spellings() {
        assert_eq!("pitch_deck".parse::<FormField>().unwrap(), FormField::PitchDeck);
        assert_eq!("meeting-time".parse::<FormField>().unwrap(), FormField::MeetingTime);
        assert!(matches!(
            "twitter".parse::<FormField>(),
            Err(ValidationError::UnknownField(name)) if name == "twitter"
        ));
    }

    #[test]
    fn only_github_is_optional() {
        let optional: Vec<_> = FormField::ALL
            .into_iter()
            .filter(|field| !field.is_required())
            .collect();
        assert_eq!(optional, vec![FormField::Github]);
    }

    #[test]
    fn set_then_get_touches_only_the_named_field() {
        let mut record = FormRecord::default();
        record.set(FormField::Email, "founder@acme.io");
        assert_eq!(record.get(FormField::Email), "founder@acme.io");
        assert_eq!(record.get(FormField::CompanyName), "");
        assert!(!record.is_empty());
    }

    #[test]
    fn whitespace_counts_as_missing_for_required_fields() {
        let mut record = FormRecord::default();
        record.set(FormField::CompanyName, "   ");
        let missing: Vec<_> = record.missing_required().collect();
        assert_eq!(missing.first(), Some(&FormField::CompanyName));
        assert!(!missing.contains(&FormField::Github));
    }
}
