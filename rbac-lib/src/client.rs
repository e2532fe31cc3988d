//! Main AdminClient

use std::sync::Arc;
use std::time::Duration;

use log::debug;
use log::warn;
use reqwest::Client;
use reqwest::Method;
use reqwest::header::ACCEPT;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderName;
use reqwest::header::HeaderValue;
use url::Url;

use crate::error::ApiError;
use crate::error::ValidationErrors;
use crate::retry::RetryConfig;

/// HTTP client for the admin panel's JSON endpoints.
///
/// This client is cheap to clone (uses `Arc` internally) and can be shared
/// across tables. Authentication is handled upstream; session cookies or a
/// bearer token can be attached through the builder.
///
/// # Example
///
/// ```ignore
/// use rbac_lib::AdminClient;
/// use rbac_lib::api::{ListQuery, Resource};
///
/// let client = AdminClient::builder()
///     .url("https://panel.example.com")
///     .bearer_token("token")
///     .build()?;
///
/// let page = client.list(&Resource::users(), &ListQuery::default()).await?;
/// ```
#[derive(Clone)]
pub struct AdminClient {
    inner: Arc<AdminClientInner>,
}

struct AdminClientInner {
    base_url: Url,
    http_client: Client,
    headers: HeaderMap,
    bearer_token: Option<String>,
    timeout: Option<Duration>,
    retry_config: RetryConfig,
}

impl AdminClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> AdminClientBuilder<Missing> {
        AdminClientBuilder::new()
    }

    /// Returns the base URL of the panel.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Resolves a route path against the base URL.
    pub(crate) fn url(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.inner.base_url.join(path.trim_start_matches('/'))?)
    }

    /// Makes an HTTP request, retrying transient failures when `retry` is set.
    ///
    /// Non-success statuses are turned into errors: 422 with a field error
    /// body becomes [`ApiError::Validation`], 429 becomes
    /// [`ApiError::RateLimited`] once retries are exhausted.
    pub(crate) async fn request(
        &self,
        method: Method,
        url: Url,
        body: Option<&serde_json::Value>,
        retry: bool,
    ) -> Result<reqwest::Response, ApiError> {
        let mut attempts = 0;

        loop {
            debug!("{} {} (attempt {})", method, url, attempts + 1);
            let error = match self.send_once(method.clone(), url.clone(), body).await {
                Ok(response) if response.status().is_success() => return Ok(response),
                Ok(response) => error_from_response(response).await,
                Err(e) => e,
            };

            let delay = if retry {
                self.inner.retry_config.retry_delay(&error, attempts)
            } else {
                None
            };
            let Some(delay) = delay else {
                return Err(error);
            };
            warn!("{} {} failed: {}, retrying in {:?}", method, url, error, delay);
            tokio::time::sleep(delay).await;
            attempts += 1;
        }
    }

    /// Inner request method without retry logic.
    async fn send_once(
        &self,
        method: Method,
        url: Url,
        body: Option<&serde_json::Value>,
    ) -> Result<reqwest::Response, ApiError> {
        let mut request = self
            .inner
            .http_client
            .request(method, url)
            .headers(self.inner.headers.clone());

        if let Some(token) = &self.inner.bearer_token {
            request = request.bearer_auth(token);
        }

        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        if let Some(body) = body {
            request = request.json(body);
        }

        request.send().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout(self.inner.timeout.unwrap_or_default())
            } else {
                ApiError::Network(e)
            }
        })
    }
}

/// Maps a non-success response to an error, reading the body.
async fn error_from_response(response: reqwest::Response) -> ApiError {
    let status = response.status().as_u16();
    if status == 429 {
        return ApiError::RateLimited {
            retry_after: parse_retry_after(&response),
        };
    }
    let body = response.text().await.unwrap_or_default();
    if status == 422 {
        if let Some(errors) = ValidationErrors::from_body(&body) {
            return ApiError::Validation(errors);
        }
    }
    ApiError::http(status, body)
}

/// Parses the Retry-After header value (seconds).
fn parse_retry_after(response: &reqwest::Response) -> Option<Duration> {
    response
        .headers()
        .get("Retry-After")?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing an [`AdminClient`].
///
/// Uses the typestate pattern to ensure the base URL is set at compile time.
///
/// # Example
///
/// ```ignore
/// let client = AdminClient::builder()
///     .url("http://localhost:8000")
///     .header("X-XSRF-TOKEN", token)
///     .timeout(Duration::from_secs(15))
///     .retry(RetryConfig::no_retry())
///     .build()?;
/// ```
pub struct AdminClientBuilder<U> {
    url: U,
    headers: Vec<(String, String)>,
    bearer_token: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    retry_config: RetryConfig,
    http_client: Option<Client>,
}

impl AdminClientBuilder<Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            url: Missing,
            headers: Vec::new(),
            bearer_token: None,
            timeout: None,
            connect_timeout: None,
            retry_config: RetryConfig::default(),
            http_client: None,
        }
    }

    /// Sets the panel base URL, e.g. `http://localhost:8000`.
    pub fn url(self, url: impl Into<String>) -> AdminClientBuilder<Set<String>> {
        AdminClientBuilder {
            url: Set(url.into()),
            headers: self.headers,
            bearer_token: self.bearer_token,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            retry_config: self.retry_config,
            http_client: self.http_client,
        }
    }
}

impl Default for AdminClientBuilder<Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U> AdminClientBuilder<U> {
    /// Adds a header sent with every request (session cookie, CSRF token...).
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Sets a bearer token sent with every request.
    pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Sets the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets the retry behavior for transient failures.
    pub fn retry(mut self, config: RetryConfig) -> Self {
        self.retry_config = config;
        self
    }

    /// Sets a custom HTTP client.
    ///
    /// If not set, a default client will be created.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl AdminClientBuilder<Set<String>> {
    /// Builds the [`AdminClient`].
    ///
    /// Fails if the URL or a header is invalid, or the HTTP client cannot be created.
    pub fn build(self) -> Result<AdminClient, ApiError> {
        let mut base_url = Url::parse(&self.url.0)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert("X-Requested-With", HeaderValue::from_static("XMLHttpRequest"));
        for (name, value) in &self.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| ApiError::InvalidUrl(format!("invalid header name '{}': {}", name, e)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| ApiError::InvalidUrl(format!("invalid header value for '{}': {}", name, e)))?;
            headers.insert(name, value);
        }

        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = Client::builder();
                if let Some(timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                builder.build()?
            }
        };

        Ok(AdminClient {
            inner: Arc::new(AdminClientInner {
                base_url,
                http_client,
                headers,
                bearer_token: self.bearer_token,
                timeout: self.timeout,
                retry_config: self.retry_config,
            }),
        })
    }
}
