use async_trait::async_trait;
use reqwest::Client;
use shared::protocol::{ApplyErrorBody, ApplyPayload, ApplyResponse, APPLY_PATH};
use tracing::{debug, warn};
use url::Url;

use crate::error::TransportError;

/// What the scheduling endpoint answered, once it answered at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyReply {
    Accepted(ApplyResponse),
    Rejected { status: u16, detail: Option<String> },
    /// 2xx, but without a usable `zoom` link.
    Malformed { status: u16, reason: String },
}

#[async_trait]
pub trait ApplyTransport: Send + Sync {
    async fn apply(&self, payload: &ApplyPayload) -> Result<ApplyReply, TransportError>;
}

pub struct HttpApplyClient {
    http: Client,
    endpoint: Url,
}

impl HttpApplyClient {
    pub fn new(base_url: &str) -> Result<Self, TransportError> {
        Ok(Self {
            http: Client::new(),
            endpoint: apply_endpoint(base_url)?,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

/// Appends [`APPLY_PATH`] to the base, keeping any path prefix the base has.
pub fn apply_endpoint(base_url: &str) -> Result<Url, TransportError> {
    let base_url = base_url.trim();
    let invalid = |source| TransportError::InvalidEndpoint {
        url: base_url.to_string(),
        source,
    };
    let mut base = Url::parse(base_url).map_err(invalid)?;
    if !base.path().ends_with('/') {
        let prefix = format!("{}/", base.path());
        base.set_path(&prefix);
    }
    base.join(APPLY_PATH.trim_start_matches('/')).map_err(invalid)
}

#[async_trait]
impl ApplyTransport for HttpApplyClient {
    async fn apply(&self, payload: &ApplyPayload) -> Result<ApplyReply, TransportError> {
        debug!(endpoint = %self.endpoint, company = %payload.company_name, "posting application");
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(payload)
            .send()
            .await?;
        let status = response.status();
        // A status has arrived, so a failed body read is no longer a transport failure.
        let body = match response.bytes().await {
            Ok(body) => body,
            Err(err) if status.is_success() => {
                return Ok(ApplyReply::Malformed {
                    status: status.as_u16(),
                    reason: format!("failed to read response body: {err}"),
                });
            }
            Err(err) => {
                warn!(status = status.as_u16(), error = %err, "failed to read rejection body");
                return Ok(ApplyReply::Rejected {
                    status: status.as_u16(),
                    detail: None,
                });
            }
        };

        if !status.is_success() {
            let detail = ApplyErrorBody::from_slice_lenient(&body).detail();
            warn!(status = status.as_u16(), ?detail, "application rejected");
            return Ok(ApplyReply::Rejected {
                status: status.as_u16(),
                detail,
            });
        }

        match serde_json::from_slice::<ApplyResponse>(&body) {
            Ok(accepted) if !accepted.zoom.trim().is_empty() => Ok(ApplyReply::Accepted(accepted)),
            Ok(_) => Ok(ApplyReply::Malformed {
                status: status.as_u16(),
                reason: "empty zoom link".to_string(),
            }),
            Err(err) => Ok(ApplyReply::Malformed {
                status: status.as_u16(),
                reason: err.to_string(),
            }),
        }
    }
}
