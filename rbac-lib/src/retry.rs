//! Retry policy for endpoint requests.

use std::time::Duration;

use crate::error::ApiError;

/// When and how long to wait before re-sending a failed request.
///
/// Rate limiting (429), server errors (5xx), network errors and timeouts
/// are transient. Everything else, including validation failures, is
/// returned at once. Only list, verify and the retry-safe requests go
/// through this; deletes are sent once.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use rbac_lib::RetryConfig;
///
/// let patient = RetryConfig::default()
///     .max_retries(5)
///     .initial_delay(Duration::from_millis(200));
///
/// let none = RetryConfig::no_retry();
/// assert_eq!(none.max_retries, 0);
/// ```
#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_retries: u32,
    /// First backoff step; doubles per attempt.
    pub initial_delay: Duration,
    pub max_delay: Duration,
    /// Retry 429 responses, waiting for `Retry-After` when the server sends it.
    pub retry_on_429: bool,
    pub retry_on_5xx: bool,
    /// Retry connection failures and request timeouts.
    pub retry_on_network: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(10),
            retry_on_429: true,
            retry_on_5xx: true,
            retry_on_network: true,
        }
    }
}

impl RetryConfig {
    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            retry_on_429: false,
            retry_on_5xx: false,
            retry_on_network: false,
            ..Default::default()
        }
    }

    pub fn max_retries(mut self, n: u32) -> Self {
        self.max_retries = n;
        self
    }

    pub fn initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    pub fn max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Delay before retry number `attempt` (0-based), capped at `max_delay`.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt);
        self.initial_delay.saturating_mul(factor).min(self.max_delay)
    }

    /// How long to wait before retrying `error`, or `None` to give up.
    ///
    /// `attempt` counts the retries already made.
    pub(crate) fn retry_delay(&self, error: &ApiError, attempt: u32) -> Option<Duration> {
        if attempt >= self.max_retries {
            return None;
        }
        match error {
            ApiError::RateLimited { retry_after } if self.retry_on_429 => {
                Some(retry_after.unwrap_or_else(|| self.backoff(attempt)).min(self.max_delay))
            }
            ApiError::Http { status: 500..=599, .. } if self.retry_on_5xx => Some(self.backoff(attempt)),
            ApiError::Network(_) | ApiError::Timeout(_) if self.retry_on_network => Some(self.backoff(attempt)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationErrors;

    fn config() -> RetryConfig {
        RetryConfig::default()
            .initial_delay(Duration::from_millis(100))
            .max_delay(Duration::from_millis(350))
    }

    #[test]
    fn test_backoff_doubles_and_caps() {
        let config = config();
        assert_eq!(config.backoff(0), Duration::from_millis(100));
        assert_eq!(config.backoff(1), Duration::from_millis(200));
        assert_eq!(config.backoff(2), Duration::from_millis(350));
        assert_eq!(config.backoff(40), Duration::from_millis(350));
    }

    #[test]
    fn test_transient_failures_are_retried() {
        let config = config();
        assert_eq!(
            config.retry_delay(&ApiError::http(503, ""), 1),
            Some(Duration::from_millis(200))
        );
        assert!(config.retry_delay(&ApiError::Timeout(Duration::from_secs(1)), 0).is_some());
        assert_eq!(
            config.retry_delay(&ApiError::RateLimited { retry_after: Some(Duration::from_millis(50)) }, 0),
            Some(Duration::from_millis(50))
        );
    }

    #[test]
    fn test_permanent_failures_are_not_retried() {
        let config = config();
        assert_eq!(config.retry_delay(&ApiError::http(404, "missing"), 0), None);
        assert_eq!(config.retry_delay(&ApiError::Validation(ValidationErrors::default()), 0), None);
        assert_eq!(config.retry_delay(&ApiError::parse("bad json"), 0), None);
    }

    #[test]
    fn test_attempts_are_bounded() {
        let config = config().max_retries(1);
        assert!(config.retry_delay(&ApiError::http(500, ""), 0).is_some());
        assert_eq!(config.retry_delay(&ApiError::http(500, ""), 1), None);
        assert_eq!(RetryConfig::no_retry().retry_delay(&ApiError::http(500, ""), 0), None);
    }
}
