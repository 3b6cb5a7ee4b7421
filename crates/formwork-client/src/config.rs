//! Client configuration.

/// Policy knobs for the form client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Envelope author when no credential provider is configured.
    pub fallback_username: String,
    /// Response header carrying the forward directive.
    pub forward_header: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            fallback_username: "unknown".to_string(),
            forward_header: "x-next-form".to_string(),
        }
    }
}

impl ClientConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the fallback author identity.
    #[must_use]
    pub fn fallback_username(mut self, username: impl Into<String>) -> Self {
        self.fallback_username = username.into();
        self
    }

    /// Sets the forward-directive header name.
    #[must_use]
    pub fn forward_header(mut self, header: impl Into<String>) -> Self {
        self.forward_header = header.into();
        self
    }
}
