//! Collaborator traits and transport types.
//!
//! The engine never talks to the network itself. Hosts implement these
//! traits over whatever transport they have; the engine only sees the
//! typed results. All async methods return boxed futures so the traits
//! stay object-safe.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

use serde::Deserialize;
use serde_json::Value;

use formwork_schema::SchemaNode;

use crate::envelope::SubmissionEnvelope;
use crate::error::Result;

/// A boxed future for async collaborator operations.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The document a schema source returns for a form name.
#[derive(Debug, Clone, Deserialize)]
pub struct FormDocument {
    /// Schema version, echoed into the submission envelope.
    pub version: String,
    /// The form schema.
    pub schema: SchemaNode,
    /// UI hint tree mirroring the schema's shape.
    #[serde(default)]
    pub metadata: Value,
}

/// A reply from the submission sink.
#[derive(Debug, Clone, Default)]
pub struct SinkResponse {
    /// HTTP-style status code.
    pub status: u16,
    /// Response headers.
    pub headers: HashMap<String, String>,
    /// Response body.
    pub body: Vec<u8>,
}

impl SinkResponse {
    /// Creates a response with the given status.
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: Vec::new(),
        }
    }

    /// Creates a 200 OK response.
    pub fn ok() -> Self {
        Self::new(200)
    }

    /// Sets a header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Sets the body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Sets a JSON body.
    #[must_use]
    pub fn json_body(self, data: &Value) -> Self {
        self.body(data.to_string())
    }

    /// Returns whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Gets a header value, case-insensitively.
    pub fn get_header(&self, key: &str) -> Option<&str> {
        let key_lower = key.to_lowercase();
        self.headers
            .iter()
            .find(|(k, _)| k.to_lowercase() == key_lower)
            .map(|(_, v)| v.as_str())
    }

    /// Parses the body as JSON.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> std::result::Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// Structured fields of a sink reply body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReplyBody {
    /// Messages to surface to the user.
    #[serde(default)]
    pub messages: Vec<String>,
    /// A single headline message.
    #[serde(rename = "messageHeader", default)]
    pub message_header: Option<String>,
}

/// Supplies form schemas by name.
pub trait SchemaSource: Send + Sync {
    /// Fetches the schema document for a form.
    fn fetch<'a>(&'a self, form_name: &'a str) -> BoxFuture<'a, Result<FormDocument>>;
}

/// Supplies previously saved answers by form name.
pub trait AnswersSource: Send + Sync {
    /// Fetches prior answers; `None` means none were stored.
    fn fetch<'a>(&'a self, form_name: &'a str) -> BoxFuture<'a, Result<Option<Value>>>;
}

/// Accepts submission envelopes.
pub trait SubmissionSink: Send + Sync {
    /// Posts an envelope, attaching the bearer credential when present.
    fn submit<'a>(
        &'a self,
        envelope: &'a SubmissionEnvelope,
        bearer: Option<&'a str>,
    ) -> BoxFuture<'a, Result<SinkResponse>>;
}

/// Supplies the author identity and bearer credential.
///
/// The engine treats the credential as opaque; a 403 reply triggers one
/// refresh through this same collaborator.
pub trait CredentialProvider: Send + Sync {
    /// The author identity for the envelope, if known.
    fn username(&self) -> Option<String>;

    /// Fetches the current bearer credential.
    fn token(&self) -> BoxFuture<'_, Result<String>>;

    /// Refreshes the credential after an authorization failure.
    fn refresh(&self) -> BoxFuture<'_, Result<String>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let reply = SinkResponse::ok().header("X-Next-Form", "followup");
        assert_eq!(reply.get_header("x-next-form"), Some("followup"));
        assert_eq!(reply.get_header("X-NEXT-FORM"), Some("followup"));
        assert_eq!(reply.get_header("x-other"), None);
    }

    #[test]
    fn test_status_ranges() {
        assert!(SinkResponse::ok().is_success());
        assert!(SinkResponse::new(204).is_success());
        assert!(!SinkResponse::new(403).is_success());
        assert!(!SinkResponse::new(500).is_success());
    }

    #[test]
    fn test_reply_body_parsing() {
        let reply = SinkResponse::ok().json_body(&json!({
            "messages": ["saved"],
            "messageHeader": "All good"
        }));
        let body: ReplyBody = reply.json().unwrap();
        assert_eq!(body.messages, ["saved"]);
        assert_eq!(body.message_header.as_deref(), Some("All good"));

        // an empty body is not structured data
        assert!(SinkResponse::ok().json::<ReplyBody>().is_err());
    }

    #[test]
    fn test_form_document_metadata_defaults() {
        let document: FormDocument = serde_json::from_value(json!({
            "version": "1",
            "schema": {"type": "object"}
        }))
        .unwrap();
        assert_eq!(document.version, "1");
        assert!(document.metadata.is_null());
    }
}
