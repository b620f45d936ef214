//! Owns the form record and drives a single submission from idle to idle.

use chrono::Utc;
use chrono_tz::Tz;
use shared::{
    domain::{FormField, FormRecord},
    protocol::ApplyPayload,
};
use tokio::sync::broadcast;
use tracing::{info, warn};

use crate::{
    error::{success_message, SubmitError, SUBMITTING_MESSAGE},
    normalize::build_payload,
    transport::{ApplyReply, ApplyTransport},
    validate::validate_record,
};

const EVENT_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitStatus {
    Idle,
    Submitting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerEvent {
    FieldUpdated {
        field: FormField,
    },
    StatusChanged {
        status: SubmitStatus,
        message: Option<String>,
    },
    Reset,
}

/// Marks a submission as in flight for as long as it is alive. Dropping it,
/// including when the submit future itself is dropped, returns to idle.
struct InFlight<'a> {
    status: &'a mut SubmitStatus,
    message: &'a mut Option<String>,
}

impl<'a> InFlight<'a> {
    fn enter(status: &'a mut SubmitStatus, message: &'a mut Option<String>) -> Self {
        *status = SubmitStatus::Submitting;
        *message = Some(SUBMITTING_MESSAGE.to_string());
        Self { status, message }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        *self.status = SubmitStatus::Idle;
        if self.message.as_deref() == Some(SUBMITTING_MESSAGE) {
            *self.message = None;
        }
    }
}

pub struct SubmissionController<T: ApplyTransport> {
    transport: T,
    timezone: Tz,
    record: FormRecord,
    status: SubmitStatus,
    message: Option<String>,
    events: broadcast::Sender<ControllerEvent>,
}

impl<T: ApplyTransport> SubmissionController<T> {
    pub fn new(transport: T, timezone: Tz) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            transport,
            timezone,
            record: FormRecord::default(),
            status: SubmitStatus::Idle,
            message: None,
            events,
        }
    }

    pub fn record(&self) -> &FormRecord {
        &self.record
    }

    pub fn status(&self) -> SubmitStatus {
        self.status
    }

    /// Last status line, if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn can_submit(&self) -> bool {
        self.status == SubmitStatus::Idle
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ControllerEvent> {
        self.events.subscribe()
    }

    pub fn update_field(&mut self, field: FormField, value: impl Into<String>) {
        self.record.set(field, value);
        let _ = self.events.send(ControllerEvent::FieldUpdated { field });
    }

    /// Validates and normalizes the current record without sending it.
    pub fn preview(&self) -> Result<ApplyPayload, SubmitError> {
        validate_record(&self.record, self.timezone, Utc::now())?;
        Ok(build_payload(&self.record, self.timezone)?)
    }

    /// Runs one submission attempt and returns the meeting link on success.
    ///
    /// The record is cleared only when the server accepts the application.
    pub async fn submit(&mut self) -> Result<String, SubmitError> {
        if let Err(err) = validate_record(&self.record, self.timezone, Utc::now()) {
            warn!(field = ?err.field(), error = %err, "submission blocked before sending");
            return Err(self.conclude_with_error(err.into()));
        }

        let result = {
            let _in_flight = InFlight::enter(&mut self.status, &mut self.message);
            let _ = self.events.send(ControllerEvent::StatusChanged {
                status: SubmitStatus::Submitting,
                message: Some(SUBMITTING_MESSAGE.to_string()),
            });
            info!(company = %self.record.company_name, "submitting application");

            match build_payload(&self.record, self.timezone) {
                Ok(payload) => match self.transport.apply(&payload).await {
                    Ok(reply) => reply_into_result(reply),
                    Err(err) => Err(SubmitError::Transport(err)),
                },
                Err(err) => Err(err.into()),
            }
        };

        match result {
            Ok(zoom) => {
                info!(%zoom, "application scheduled");
                self.record = FormRecord::default();
                let _ = self.events.send(ControllerEvent::Reset);
                self.set_idle_message(success_message(&zoom));
                Ok(zoom)
            }
            Err(err) => Err(self.conclude_with_error(err)),
        }
    }

    fn conclude_with_error(&mut self, err: SubmitError) -> SubmitError {
        match &err {
            SubmitError::Invalid(_) => {}
            SubmitError::Transport(source) => warn!(error = %source, "scheduling server unreachable"),
            other => warn!(code = ?other.code(), error = %other, "submission failed"),
        }
        self.set_idle_message(err.status_message());
        err
    }

    fn set_idle_message(&mut self, message: String) {
        self.status = SubmitStatus::Idle;
        self.message = Some(message.clone());
        let _ = self.events.send(ControllerEvent::StatusChanged {
            status: SubmitStatus::Idle,
            message: Some(message),
        });
    }
}

fn reply_into_result(reply: ApplyReply) -> Result<String, SubmitError> {
    match reply {
        ApplyReply::Accepted(accepted) => Ok(accepted.zoom),
        ApplyReply::Rejected { status, detail } => Err(SubmitError::Rejected { status, detail }),
        ApplyReply::Malformed { status, reason } => Err(SubmitError::MalformedResponse(format!(
            "status {status}: {reason}"
        ))),
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
