//! Submission envelope.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The payload posted to the submission sink.
///
/// Built at submit time and never stored between sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionEnvelope {
    /// Author identity, or the configured fallback.
    pub username: String,
    /// Name of the form being submitted.
    pub form_fname: String,
    /// Version of the form schema the answers were collected under.
    pub form_version: String,
    /// Submission instant, UTC.
    pub timestamp: DateTime<Utc>,
    /// The answers tree.
    pub answers: Value,
}

impl SubmissionEnvelope {
    /// Builds an envelope stamped with the current time.
    pub fn new(
        username: impl Into<String>,
        form_fname: impl Into<String>,
        form_version: impl Into<String>,
        answers: Value,
    ) -> Self {
        Self {
            username: username.into(),
            form_fname: form_fname.into(),
            form_version: form_version.into(),
            timestamp: Utc::now(),
            answers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_form_is_camel_case() {
        let envelope = SubmissionEnvelope::new(
            "ada",
            "registration",
            "3",
            json!({"name": "Ada"}),
        );
        let wire = serde_json::to_value(&envelope).unwrap();
        assert_eq!(wire["username"], json!("ada"));
        assert_eq!(wire["formFname"], json!("registration"));
        assert_eq!(wire["formVersion"], json!("3"));
        assert_eq!(wire["answers"]["name"], json!("Ada"));
        // RFC 3339 timestamp
        assert!(wire["timestamp"].as_str().unwrap().contains('T'));
    }
}
