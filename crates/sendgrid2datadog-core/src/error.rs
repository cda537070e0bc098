//! Shared error type across sendgrid2datadog crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Body is not a JSON array of well-formed events.
    MalformedPayload,
    /// Body exceeds the configured limit.
    PayloadTooLarge,
    /// The monitoring backend rejected or never received a point.
    BackendUnavailable,
    /// Invalid startup configuration.
    Config,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::MalformedPayload => "MALFORMED_PAYLOAD",
            ClientCode::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            ClientCode::BackendUnavailable => "BACKEND_UNAVAILABLE",
            ClientCode::Config => "CONFIG",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, RelayError>;

/// Unified error type used by core and relay.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("malformed payload: {0}")]
    MalformedPayload(String),
    #[error("payload too large")]
    PayloadTooLarge,
    #[error("metrics backend unavailable: {0}")]
    MetricsBackendUnavailable(String),
    #[error("invalid config: {0}")]
    Config(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl RelayError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            RelayError::MalformedPayload(_) => ClientCode::MalformedPayload,
            RelayError::PayloadTooLarge => ClientCode::PayloadTooLarge,
            RelayError::MetricsBackendUnavailable(_) => ClientCode::BackendUnavailable,
            RelayError::Config(_) => ClientCode::Config,
            RelayError::Internal(_) => ClientCode::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        let e = RelayError::MalformedPayload("x".into());
        assert_eq!(e.client_code().as_str(), "MALFORMED_PAYLOAD");
        assert_eq!(
            RelayError::MetricsBackendUnavailable("down".into()).client_code(),
            ClientCode::BackendUnavailable
        );
        assert_eq!(e.to_string(), "malformed payload: x");
    }
}
