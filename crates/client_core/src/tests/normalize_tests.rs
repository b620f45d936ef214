use super::*;
use chrono_tz::America::New_York;

fn record() -> FormRecord {
    FormRecord {
        company_name: "Acme".into(),
        website: "acme.io".into(),
        linkedin: "linkedin.com/in/founder".into(),
        pitch_deck: "docs.acme.io/deck.pdf".into(),
        github: String::new(),
        email: "founder@acme.io".into(),
        meeting_time: "2024-06-03T14:30".into(),
    }
}

#[test]
fn prefixes_scheme_verbatim_when_missing() {
    for input in ["acme.io", "www.acme.io/about", " acme.io", "ftp://acme.io", "HTTPS://acme.io"] {
        assert_eq!(normalize_url(input), format!("https://{input}"));
    }
}

#[test]
fn leaves_values_starting_with_http_untouched() {
    for input in ["http://acme.io", "https://acme.io/deck", "httpbin.org"] {
        assert_eq!(normalize_url(input), input);
    }
}

#[test]
fn blank_github_is_dropped() {
    assert_eq!(normalize_optional_url(""), None);
    assert_eq!(normalize_optional_url(" \t "), None);
}

#[test]
fn non_blank_github_follows_the_website_rule() {
    for input in ["github.com/acme", "https://github.com/acme"] {
        assert_eq!(normalize_optional_url(input), Some(normalize_url(input)));
    }
}

#[test]
fn formats_meeting_time_in_long_form() {
    assert_eq!(
        format_meeting_time("2024-06-03T14:30", New_York).expect("format"),
        "Monday, June 3, 2024, 2:30 PM EDT"
    );
}

#[test]
fn formats_standard_time_and_midnight_hour() {
    assert_eq!(
        format_meeting_time("2024-12-02T00:05", New_York).expect("format"),
        "Monday, December 2, 2024, 12:05 AM EST"
    );
    assert_eq!(
        format_meeting_time("2024-06-03T09:00:00", chrono_tz::UTC).expect("format"),
        "Monday, June 3, 2024, 9:00 AM UTC"
    );
}

#[test]
fn empty_meeting_time_formats_to_empty_string() {
    assert_eq!(format_meeting_time("", New_York).expect("format"), "");
    assert_eq!(format_meeting_time("  ", New_York).expect("format"), "");
}

#[test]
fn ambiguous_fold_resolves_to_first_occurrence() {
    assert_eq!(
        format_meeting_time("2024-11-03T01:30", New_York).expect("format"),
        "Sunday, November 3, 2024, 1:30 AM EDT"
    );
}

#[test]
fn skipped_wall_clock_time_is_rejected() {
    assert!(matches!(
        format_meeting_time("2024-03-10T02:30", New_York),
        Err(ValidationError::NonexistentLocalTime(_))
    ));
}

#[test]
fn garbage_meeting_time_is_rejected() {
    assert_eq!(
        format_meeting_time("June 3rd", New_York),
        Err(ValidationError::InvalidMeetingTime("June 3rd".into()))
    );
}

#[test]
fn payload_normalizes_urls_and_keeps_linkedin_raw() {
    let payload = build_payload(&record(), New_York).expect("payload");
    assert_eq!(payload.website, "https://acme.io");
    assert_eq!(payload.pitch_deck, "https://docs.acme.io/deck.pdf");
    assert_eq!(payload.linkedin, "linkedin.com/in/founder");
    assert_eq!(payload.github, None);
    assert_eq!(payload.meeting_time, "Monday, June 3, 2024, 2:30 PM EDT");
}

#[test]
fn payload_json_omits_blank_github_key() {
    let mut source = record();
    source.github = "   ".into();
    let json = serde_json::to_value(build_payload(&source, New_York).expect("payload"))
        .expect("json");
    assert!(json.get("github").is_none());

    source.github = "github.com/acme".into();
    let json = serde_json::to_value(build_payload(&source, New_York).expect("payload"))
        .expect("json");
    assert_eq!(json["github"], "https://github.com/acme");
}

#[test]
fn payload_email_is_sent_without_surrounding_whitespace() {
    let mut source = record();
    source.email = "  founder@acme.io \n".into();
    let payload = build_payload(&source, New_York).expect("payload");
    assert_eq!(payload.email, "founder@acme.io");
}
