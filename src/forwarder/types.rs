//! Forwarder result and error types.

use axum::body::Bytes;
use reqwest::StatusCode;
use thiserror::Error;

/// A fully read upstream response.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    /// Status returned by GitHub. Not inspected by the forwarder.
    pub status: StatusCode,
    /// Complete, unmodified response body.
    pub body: Bytes,
}

/// Errors raised before a complete response body was obtained.
#[derive(Debug, Error)]
pub enum ForwardError {
    /// The HTTP client itself could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The substituted URL template is not a URL.
    #[error("invalid request URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The request could not be built (e.g. a token that is not a valid
    /// header value).
    #[error("invalid request: {0}")]
    InvalidRequest(#[source] reqwest::Error),

    /// DNS, connect, TLS, timeout or any other failure before a response.
    #[error("upstream request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The response body could not be read to completion.
    #[error("failed to read upstream body: {0}")]
    Body(#[source] reqwest::Error),
}

impl ForwardError {
    /// Short machine-readable error kind, used in logs, metrics and the
    /// structured error body.
    pub fn kind(&self) -> &'static str {
        match self {
            ForwardError::Client(_) => "client",
            ForwardError::InvalidUrl { .. } | ForwardError::InvalidRequest(_) => "invalid_request",
            ForwardError::Transport(_) => "transport",
            ForwardError::Body(_) => "body",
        }
    }

    /// Classify an error returned by `RequestBuilder::send`.
    pub(crate) fn from_send(err: reqwest::Error) -> Self {
        if err.is_builder() {
            ForwardError::InvalidRequest(err)
        } else {
            ForwardError::Transport(err)
        }
    }
}

/// Result type for forwarder operations.
pub type ForwardResult<T> = Result<T, ForwardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_url_display() {
        let source = url::Url::parse("::").unwrap_err();
        let err = ForwardError::InvalidUrl {
            url: "::/repos/a/b/issues".into(),
            source,
        };
        assert_eq!(err.kind(), "invalid_request");
        assert!(err.to_string().starts_with("invalid request URL '::/repos/a/b/issues'"));
    }
}
