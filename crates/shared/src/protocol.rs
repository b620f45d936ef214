use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Path of the scheduling endpoint, relative to the API base URL.
pub const APPLY_PATH: &str = "/api/apply";

/// Normalized body of `POST /api/apply`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyPayload {
    pub company_name: String,
    pub website: String,
    pub linkedin: String,
    pub pitch_deck: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    pub email: String,
    pub meeting_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyResponse {
    pub zoom: String,
}

/// Error body of a rejected application. `detail` is usually a string; request
/// validation failures carry a list of `{ "loc", "msg" }` objects instead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApplyErrorBody {
    #[serde(default)]
    pub detail: Option<Value>,
}

impl ApplyErrorBody {
    /// Reads an error body, treating anything that is not the expected JSON
    /// shape as carrying no detail.
    pub fn from_slice_lenient(body: &[u8]) -> Self {
        serde_json::from_slice::<Self>(body).unwrap_or_default()
    }

    pub fn detail(&self) -> Option<String> {
        let detail = match self.detail.as_ref()? {
            Value::String(text) => text.trim().to_string(),
            Value::Array(items) => items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .map(str::trim)
                .filter(|msg| !msg.is_empty())
                .collect::<Vec<_>>()
                .join("; "),
            _ => String::new(),
        };
        (!detail.is_empty()).then_some(detail)
    }
}
