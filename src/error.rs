//! Error taxonomy for photo fetching and configuration.

use thiserror::Error;

/// Failure of a single photo request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request never produced an HTTP response (DNS, TLS, connection reset...).
    #[error("network error: {0}")]
    Transport(String),

    /// The provider answered with a non-success status.
    #[error("request failed with status {status}{}", format_messages(.messages))]
    Status { status: u16, messages: Vec<String> },

    /// The response body could not be decoded.
    #[error("invalid response body: {0}")]
    Decode(String),

    /// The request was superseded before it could commit. Never shown to the user.
    #[error("request cancelled")]
    Cancelled,

    /// The background worker died before reporting a result.
    #[error("photo loader failed: {0}")]
    Worker(String),
}

impl FetchError {
    pub fn is_cancellation(&self) -> bool {
        matches!(self, FetchError::Cancelled)
    }
}

fn format_messages(messages: &[String]) -> String {
    if messages.is_empty() {
        String::new()
    } else {
        format!(": {}", messages.join("; "))
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FetchError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            FetchError::Status {
                status: status.as_u16(),
                messages: Vec::new(),
            }
        } else {
            FetchError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Decode(err.to_string())
    }
}

/// Configuration problems detected before any request is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("no API access key configured (set UNSPLASH_ACCESS_KEY or enter one in Settings)")]
    MissingAccessKey,

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("could not build HTTP client: {0}")]
    HttpClient(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_lists_provider_messages() {
        let err = FetchError::Status {
            status: 401,
            messages: vec!["OAuth error".to_string(), "try again".to_string()],
        };
        assert_eq!(err.to_string(), "request failed with status 401: OAuth error; try again");

        let bare = FetchError::Status { status: 503, messages: Vec::new() };
        assert_eq!(bare.to_string(), "request failed with status 503");
    }

    #[test]
    fn test_only_cancelled_is_cancellation() {
        assert!(FetchError::Cancelled.is_cancellation());
        assert!(!FetchError::Transport("reset".into()).is_cancellation());
        assert!(!FetchError::Worker("panic".into()).is_cancellation());
    }
}
