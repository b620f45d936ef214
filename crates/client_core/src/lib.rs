use chrono_tz::Tz;

pub mod controller;
pub mod error;
pub mod normalize;
pub mod transport;
pub mod validate;

pub use controller::{ControllerEvent, SubmissionController, SubmitStatus};
pub use error::{SubmitError, TransportError};
pub use transport::{ApplyReply, ApplyTransport, HttpApplyClient};

/// Controller wired to the real scheduling endpoint.
pub type PitchClient = SubmissionController<HttpApplyClient>;

pub fn connect(api_base_url: &str, timezone: Tz) -> Result<PitchClient, TransportError> {
    let transport = HttpApplyClient::new(api_base_url)?;
    tracing::info!(endpoint = %transport.endpoint(), %timezone, "scheduling client ready");
    Ok(SubmissionController::new(transport, timezone))
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
