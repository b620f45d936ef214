//! Line-based field entry on a terminal.

use std::io::{self, BufRead, Write};

use client_core::{ApplyTransport, SubmissionController};
use shared::domain::FormField;

/// Asks for each of `fields`. An empty answer keeps the current value, so
/// optional fields may be skipped and a retry only needs the edits.
pub fn prompt_fields<T, R, W>(
    controller: &mut SubmissionController<T>,
    fields: &[FormField],
    input: &mut R,
    output: &mut W,
) -> io::Result<()>
where
    T: ApplyTransport,
    R: BufRead,
    W: Write,
{
    for &field in fields {
        let current = controller.record().get(field);
        if current.is_empty() {
            write!(output, "{}: ", prompt_label(field))?;
        } else {
            write!(output, "{} [{current}]: ", prompt_label(field))?;
        }
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed before the form was complete",
            ));
        }
        let answer = line.trim_end_matches(&['\r', '\n'][..]);
        if !answer.trim().is_empty() {
            controller.update_field(field, answer);
        }
    }
    Ok(())
}

/// Fields still empty on the record, in form order.
pub fn unfilled<T: ApplyTransport>(controller: &SubmissionController<T>) -> Vec<FormField> {
    FormField::ALL
        .into_iter()
        .filter(|field| controller.record().is_blank(*field))
        .collect()
}

pub fn confirm<R: BufRead, W: Write>(
    question: &str,
    input: &mut R,
    output: &mut W,
) -> io::Result<bool> {
    write!(output, "{question} [y/N]: ")?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

fn prompt_label(field: FormField) -> String {
    match field {
        FormField::MeetingTime => format!("{} (YYYY-MM-DDTHH:MM)", field.label()),
        _ => field.label().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use client_core::HttpApplyClient;

    use super::*;

    fn controller() -> SubmissionController<HttpApplyClient> {
        let transport = HttpApplyClient::new("http://localhost:8000").expect("transport");
        SubmissionController::new(transport, chrono_tz::UTC)
    }

    #[test]
    fn fills_each_prompted_field_in_order() {
        let mut controller = controller();
        let mut input = Cursor::new("Acme\nacme.io\n");
        let mut output = Vec::new();

        prompt_fields(
            &mut controller,
            &[FormField::CompanyName, FormField::Website],
            &mut input,
            &mut output,
        )
        .expect("prompt");

        assert_eq!(controller.record().company_name, "Acme");
        assert_eq!(controller.record().website, "acme.io");
        let shown = String::from_utf8(output).expect("utf8");
        assert!(shown.starts_with("Company Name: Website: "));
    }

    #[test]
    fn empty_answer_keeps_current_value() {
        let mut controller = controller();
        controller.update_field(FormField::Email, "founder@acme.io");
        let mut input = Cursor::new("\n\n");
        let mut output = Vec::new();

        prompt_fields(
            &mut controller,
            &[FormField::Email, FormField::Github],
            &mut input,
            &mut output,
        )
        .expect("prompt");

        assert_eq!(controller.record().email, "founder@acme.io");
        assert_eq!(controller.record().github, "");
        assert!(String::from_utf8(output)
            .expect("utf8")
            .contains("Contact Email [founder@acme.io]: "));
    }

    #[test]
    fn closed_input_is_reported() {
        let mut controller = controller();
        let err = prompt_fields(
            &mut controller,
            &[FormField::CompanyName],
            &mut Cursor::new(""),
            &mut Vec::new(),
        )
        .expect_err("eof");
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn unfilled_lists_blank_fields_including_optional() {
        let mut controller = controller();
        controller.update_field(FormField::CompanyName, "Acme");
        let missing = unfilled(&controller);
        assert_eq!(missing.len(), 6);
        assert!(missing.contains(&FormField::Github));
        assert!(!missing.contains(&FormField::CompanyName));
    }

    #[test]
    fn confirm_accepts_yes_only() {
        assert!(confirm("Retry?", &mut Cursor::new("y\n"), &mut Vec::new()).expect("io"));
        assert!(confirm("Retry?", &mut Cursor::new("YES\n"), &mut Vec::new()).expect("io"));
        assert!(!confirm("Retry?", &mut Cursor::new("\n"), &mut Vec::new()).expect("io"));
    }
}
