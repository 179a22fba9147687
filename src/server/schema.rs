//! Request and response bodies for the humanise API.

use serde::Serialize;
use serde_json::Value;

/// Fixed message returned for every processing failure
pub const FAILURE_MESSAGE: &str = "Failed to humanise text";

/// Incoming humanise request.
///
/// Parsed leniently: a body that is not a JSON object, a missing `text` field
/// or a non-string `text` all mean an empty passage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HumaniseRequest {
    /// Passage to humanise
    pub text: String,
}

impl HumaniseRequest {
    /// Build a request from a raw request body
    pub fn from_body(body: &[u8]) -> Self {
        let text = serde_json::from_slice::<Value>(body)
            .ok()
            .and_then(|value| match value.get("text") {
                Some(Value::String(text)) => Some(text.clone()),
                _ => None,
            })
            .unwrap_or_default();

        Self { text }
    }
}

/// Successful humanise response.
#[derive(Debug, Clone, Serialize)]
pub struct HumaniseResponse {
    /// The humanised passage
    #[serde(rename = "humanisedText")]
    pub humanised_text: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    /// Active strategy identifier
    pub strategy: String,
}
