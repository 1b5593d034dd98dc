//! Generation and transport option structures.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// A secret string type for sensitive data like API keys.
/// Prevents accidental logging or display of secrets.
#[derive(Clone)]
pub struct SecretString(String);

impl SecretString {
    /// Create a new secret string.
    pub fn new(s: String) -> Self {
        Self(s)
    }

    /// Get the underlying secret value.
    pub fn expose_secret(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SecretString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SecretString([REDACTED])")
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        Self::new(s.to_string())
    }
}

/// Model behavior parameters for one generation request.
///
/// Defaults mirror the generation endpoint's own defaults, so an
/// unconfigured client behaves the same as an unconfigured request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// Model identifier.
    pub model: String,

    /// Maximum tokens to generate.
    pub max_tokens: u32,

    /// Temperature for sampling (0.0 - 2.0). Kept as `f64` so the
    /// serialized value is exactly what was configured.
    pub temperature: f64,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            model: "gpt-3.5-turbo".to_string(),
            max_tokens: 1000,
            temperature: 0.7,
        }
    }
}

impl GenerateOptions {
    /// Set the model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set maximum tokens to generate.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set the temperature.
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }
}

/// Transport configuration for the generation endpoint.
#[derive(Debug, Clone)]
pub struct TransportOptions {
    /// Base URL of the assistant backend.
    pub base_url: String,

    /// Whole-request timeout. Applies to the non-streaming path; a
    /// streaming response is bounded per chunk instead.
    pub timeout: Option<Duration>,

    /// Deadline for the suspended wait between consecutive stream
    /// chunks. Expiry is a stream-level failure.
    pub chunk_timeout: Option<Duration>,

    /// Bearer token, when the backend requires one.
    pub api_key: Option<SecretString>,

    /// Additional HTTP headers to include in requests.
    pub extra_headers: Option<HashMap<String, String>>,
}

impl TransportOptions {
    /// Create transport options pointing at the given backend.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: None,
            chunk_timeout: None,
            api_key: None,
            extra_headers: None,
        }
    }

    /// Set the whole-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the per-chunk wait deadline for streaming responses.
    pub fn with_chunk_timeout(mut self, deadline: Duration) -> Self {
        self.chunk_timeout = Some(deadline);
        self
    }

    /// Set the bearer token.
    pub fn with_api_key(mut self, api_key: impl Into<SecretString>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Add a single extra header.
    pub fn with_header(mut self, key: String, value: String) -> Self {
        self.extra_headers
            .get_or_insert_with(HashMap::new)
            .insert(key, value);
        self
    }
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self::new("http://127.0.0.1:5000")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_defaults_match_endpoint_defaults() {
        let options = GenerateOptions::default();
        assert_eq!(options.model, "gpt-3.5-turbo");
        assert_eq!(options.max_tokens, 1000);
        assert_eq!(options.temperature, 0.7);
    }

    #[test]
    fn secret_string_debug_is_redacted() {
        let secret = SecretString::new("sk-very-secret".to_string());
        let rendered = format!("{:?}", secret);
        assert!(!rendered.contains("very-secret"));
        assert_eq!(secret.expose_secret(), "sk-very-secret");
    }

    #[test]
    fn builders_compose() {
        let transport = TransportOptions::new("https://assistant.example.com")
            .with_timeout(Duration::from_secs(30))
            .with_chunk_timeout(Duration::from_secs(10))
            .with_header("x-request-source".into(), "editor".into());

        assert_eq!(transport.base_url, "https://assistant.example.com");
        assert_eq!(transport.timeout, Some(Duration::from_secs(30)));
        assert_eq!(transport.chunk_timeout, Some(Duration::from_secs(10)));
        assert_eq!(
            transport.extra_headers.unwrap().get("x-request-source"),
            Some(&"editor".to_string())
        );
    }
}
