use std::io::{self, Write};

use client_core::{ApplyTransport, ControllerEvent, SubmissionController, SubmitError};
use tracing::debug;

pub fn render_event<W: Write>(event: &ControllerEvent, output: &mut W) -> io::Result<()> {
    match event {
        ControllerEvent::StatusChanged {
            message: Some(message),
            ..
        } => writeln!(output, "{message}"),
        ControllerEvent::StatusChanged { message: None, .. } => Ok(()),
        ControllerEvent::FieldUpdated { field } => {
            debug!(%field, "field updated");
            Ok(())
        }
        ControllerEvent::Reset => {
            debug!("form cleared");
            Ok(())
        }
    }
}

/// Runs one submission while printing each status line as the controller
/// publishes it, so "Submitting..." shows up before the server answers.
pub async fn submit_with_status<T, W>(
    controller: &mut SubmissionController<T>,
    output: &mut W,
) -> io::Result<Result<String, SubmitError>>
where
    T: ApplyTransport,
    W: Write,
{
    let mut events = controller.subscribe();
    let result = {
        let submit = controller.submit();
        tokio::pin!(submit);
        loop {
            tokio::select! {
                result = &mut submit => break result,
                Ok(event) = events.recv() => render_event(&event, output)?,
            }
        }
    };
    while let Ok(event) = events.try_recv() {
        render_event(&event, output)?;
    }
    output.flush()?;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use client_core::{error::CONNECTION_FAILURE_MESSAGE, SubmitStatus};
    use shared::domain::FormField;
    use tokio::net::TcpListener;

    use super::*;

    #[test]
    fn prints_only_status_messages() {
        let mut output = Vec::new();
        render_event(
            &ControllerEvent::FieldUpdated {
                field: FormField::Email,
            },
            &mut output,
        )
        .expect("render");
        render_event(&ControllerEvent::Reset, &mut output).expect("render");
        render_event(
            &ControllerEvent::StatusChanged {
                status: SubmitStatus::Idle,
                message: Some("Error: Invalid email".into()),
            },
            &mut output,
        )
        .expect("render");
        assert_eq!(String::from_utf8(output).expect("utf8"), "Error: Invalid email\n");
    }

    #[tokio::test]
    async fn status_lines_are_printed_in_lifecycle_order() {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");
        drop(listener);

        let mut controller =
            client_core::connect(&format!("http://{addr}"), chrono_tz::UTC).expect("client");
        controller.update_field(FormField::CompanyName, "Acme");
        controller.update_field(FormField::Website, "acme.io");
        controller.update_field(FormField::Linkedin, "linkedin.com/in/founder");
        controller.update_field(FormField::PitchDeck, "acme.io/deck");
        controller.update_field(FormField::Email, "founder@acme.io");
        controller.update_field(FormField::MeetingTime, "2099-06-03T14:30");

        let mut output = Vec::new();
        let result = submit_with_status(&mut controller, &mut output)
            .await
            .expect("io");

        assert!(result.is_err());
        assert_eq!(
            String::from_utf8(output).expect("utf8"),
            format!("Submitting...\n{CONNECTION_FAILURE_MESSAGE}\n")
        );
    }
}
