//! API error types

use std::time::Duration;

use super::ValidationErrors;

/// Errors that can occur while talking to the remote data endpoint.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// HTTP error response from the endpoint.
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Error message (usually the response body).
        message: String,
    },

    /// The endpoint rejected the request with field-level validation errors (HTTP 422).
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// Too many requests and retries were exhausted or disabled.
    #[error("Rate limited")]
    RateLimited {
        /// Server-suggested wait, from `Retry-After`.
        retry_after: Option<Duration>,
    },

    /// Network error during the call.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Request timed out.
    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse the response body.
    #[error("Response parse error: {message}")]
    Parse {
        /// Description of the parse error.
        message: String,
        /// Raw response body, if available.
        body: Option<String>,
    },

    /// The endpoint does not implement this operation.
    #[error("Operation not supported by endpoint: {0}")]
    Unsupported(&'static str),
}

impl ApiError {
    /// Creates a new HTTP error.
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Creates a new parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            body: None,
        }
    }

    /// Creates a new parse error with the raw response body.
    pub fn parse_with_body(message: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            body: Some(body.into()),
        }
    }

    /// Returns the HTTP status code if this is an HTTP error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Validation(_) => Some(422),
            Self::RateLimited { .. } => Some(429),
            _ => None,
        }
    }

    /// Returns `true` if this error is potentially retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http { status, .. } => matches!(status, 429 | 500 | 502 | 503 | 504),
            Self::RateLimited { .. } => true,
            Self::Network(_) => true,
            Self::Timeout(_) => true,
            _ => false,
        }
    }
}

impl From<url::ParseError> for ApiError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_statuses() {
        assert!(ApiError::http(503, "unavailable").is_retryable());
        assert!(ApiError::Timeout(Duration::from_secs(1)).is_retryable());
        assert!(!ApiError::http(404, "missing").is_retryable());
        assert!(!ApiError::Unsupported("verify").is_retryable());
    }

    #[test]
    fn test_status_code() {
        assert_eq!(ApiError::http(500, "boom").status_code(), Some(500));
        assert_eq!(
            ApiError::Validation(ValidationErrors::default()).status_code(),
            Some(422)
        );
        assert_eq!(ApiError::parse("bad json").status_code(), None);
    }
}
