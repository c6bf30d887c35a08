//! Error types for the Chatwork client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because looking up a message that was
//! deleted (or never existed) is routine. Chatwork reports most other
//! failures with a `{"errors": [...]}` body; those land in `Api` with the
//! messages unpacked. Anything else non-2xx keeps its raw body in `HttpError`.

use serde::Deserialize;
use thiserror::Error;

/// Errors returned by `ChatworkClient` parse methods and `Chatwork` calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server rejected the request and explained why.
    #[error("chatwork API error (HTTP {status}): {}", .errors.join("; "))]
    Api { status: u16, errors: Vec<String> },

    /// The server returned an unexpected status without an error envelope.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The HTTP round-trip itself failed (DNS, connect, TLS, I/O).
    #[error("transport failed: {0}")]
    Transport(String),
}

impl ApiError {
    /// HTTP status carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::NotFound => Some(404),
            ApiError::Api { status, .. } | ApiError::HttpError { status, .. } => Some(*status),
            ApiError::DeserializationError(_) | ApiError::Transport(_) => None,
        }
    }
}

/// Problems assembling a `ChatworkConfig` from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    Missing(&'static str),

    #[error("environment variable {0} is empty")]
    Empty(&'static str),
}

/// Body shape Chatwork uses for rejected requests.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub errors: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display_joins_messages() {
        let err = ApiError::Api {
            status: 400,
            errors: vec!["Invalid body".to_string(), "Invalid to_ids".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "chatwork API error (HTTP 400): Invalid body; Invalid to_ids"
        );
    }

    #[test]
    fn status_is_exposed_for_server_errors_only() {
        assert_eq!(ApiError::NotFound.status(), Some(404));
        let err = ApiError::HttpError {
            status: 502,
            body: "bad gateway".to_string(),
        };
        assert_eq!(err.status(), Some(502));
        assert_eq!(ApiError::Transport("refused".to_string()).status(), None);
    }

    #[test]
    fn config_error_names_variable() {
        let err = ConfigError::Missing("CHATWORK_API_TOKEN");
        assert_eq!(
            err.to_string(),
            "environment variable CHATWORK_API_TOKEN is not set"
        );
    }
}
