//! Authenticated JSON GET transport
//!
//! Every catalog management read is a GET against an absolute URL plus a
//! query string. Failed attempts are sorted into retryable and fatal
//! outcomes; retryable ones are re-sent after a backoff delay.

use super::query::QueryParams;
use super::rate_limit::{RateLimiter, RateLimiterConfig};
use crate::auth::{AuthConfig, Authenticator};
use crate::error::{Error, Result};
use crate::types::BackoffType;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Delay used when a 429 carries no usable `Retry-After`
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Transport settings
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Per-attempt timeout
    pub timeout: Duration,
    /// Retries after the first attempt
    pub max_retries: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
    pub backoff_type: BackoffType,
    /// `None` disables client-side throttling
    pub rate_limit: Option<RateLimiterConfig>,
    /// Extra headers sent with every request
    pub headers: HashMap<String, String>,
    pub user_agent: String,
    /// Accept invalid TLS certificates (private endpoints with self-signed certs)
    pub disable_ssl_verification: bool,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_retries: 3,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(30),
            backoff_type: BackoffType::Exponential,
            rate_limit: Some(RateLimiterConfig::default()),
            headers: HashMap::new(),
            user_agent: format!("catalog-management-rs/{}", env!("CARGO_PKG_VERSION")),
            disable_ssl_verification: false,
        }
    }
}

impl HttpClientConfig {
    /// Delay before retry number `attempt + 1`, capped at `max_backoff`
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let delay = match self.backoff_type {
            BackoffType::Constant => self.initial_backoff,
            BackoffType::Linear => self
                .initial_backoff
                .saturating_mul(attempt.saturating_add(1)),
            BackoffType::Exponential => self
                .initial_backoff
                .saturating_mul(2u32.saturating_pow(attempt)),
        };
        delay.min(self.max_backoff)
    }

    /// Headers attached to every request: `Accept` plus the configured extras
    fn header_map(&self) -> Result<HeaderMap> {
        let mut map = HeaderMap::new();
        map.insert(ACCEPT, HeaderValue::from_static("application/json"));
        for (key, value) in &self.headers {
            let name = HeaderName::from_bytes(key.as_bytes())
                .map_err(|e| Error::invalid_config(format!("headers.{key}"), e.to_string()))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| Error::invalid_config(format!("headers.{key}"), e.to_string()))?;
            map.insert(name, value);
        }
        Ok(map)
    }
}

/// How one attempt ended
enum Attempt {
    Success(Response),
    /// Worth re-sending; `retry_after` overrides the backoff schedule
    Retryable {
        error: Error,
        retry_after: Option<Duration>,
    },
    Fatal(Error),
}

/// GET client with authentication, retries and rate limiting
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
    authenticator: Option<Authenticator>,
    rate_limiter: Option<RateLimiter>,
}

impl HttpClient {
    /// Build a client; `AuthConfig::None` sends unauthenticated requests
    pub fn with_auth(config: HttpClientConfig, auth: AuthConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .default_headers(config.header_map()?)
            .danger_accept_invalid_certs(config.disable_ssl_verification)
            .build()?;

        let authenticator = match auth {
            AuthConfig::None => None,
            other => Some(Authenticator::with_client(other, client.clone())),
        };
        let rate_limiter = config.rate_limit.as_ref().map(RateLimiter::new);

        Ok(Self {
            client,
            config,
            authenticator,
            rate_limiter,
        })
    }

    pub fn has_authenticator(&self) -> bool {
        self.authenticator.is_some()
    }

    pub fn has_rate_limiter(&self) -> bool {
        self.rate_limiter.is_some()
    }

    /// GET `url` with `query` and decode the JSON body
    pub async fn get_json<T: DeserializeOwned>(&self, url: &Url, query: &QueryParams) -> Result<T> {
        let response = self.send(url, query).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn send(&self, url: &Url, query: &QueryParams) -> Result<Response> {
        let max_retries = self.config.max_retries;
        let mut attempt = 0;

        loop {
            if let Some(limiter) = &self.rate_limiter {
                limiter.wait().await;
            }

            let mut request = self.client.get(url.clone());
            if !query.is_empty() {
                request = request.query(query.pairs());
            }
            if let Some(auth) = &self.authenticator {
                request = auth.apply(request).await?;
            }

            let outcome = match request.send().await {
                Ok(response) => classify_response(response).await,
                Err(e) => classify_transport(e, self.config.timeout),
            };

            match outcome {
                Attempt::Success(response) => {
                    debug!(%url, attempt, "GET succeeded");
                    return Ok(response);
                }
                Attempt::Fatal(error) => return Err(error),
                Attempt::Retryable { error, .. } if attempt >= max_retries => return Err(error),
                Attempt::Retryable { error, retry_after } => {
                    let delay = retry_after.map_or_else(
                        || self.config.backoff_delay(attempt),
                        |after| after.min(self.config.max_backoff),
                    );
                    warn!(
                        %url,
                        attempt = attempt + 1,
                        max_attempts = max_retries + 1,
                        ?delay,
                        %error,
                        "Retrying GET"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .field("authenticator", &self.authenticator)
            .field("has_rate_limiter", &self.rate_limiter.is_some())
            .finish_non_exhaustive()
    }
}

async fn classify_response(response: Response) -> Attempt {
    let status = response.status();
    if status.is_success() {
        return Attempt::Success(response);
    }

    if status == StatusCode::TOO_MANY_REQUESTS {
        let seconds = retry_after_secs(&response);
        return Attempt::Retryable {
            error: Error::RateLimited {
                retry_after_seconds: seconds,
            },
            retry_after: Some(Duration::from_secs(seconds)),
        };
    }

    let body = response.text().await.unwrap_or_default();
    let error = Error::http_status(status.as_u16(), body);
    if is_retryable_status(status) {
        Attempt::Retryable {
            error,
            retry_after: None,
        }
    } else {
        Attempt::Fatal(error)
    }
}

fn classify_transport(error: reqwest::Error, timeout: Duration) -> Attempt {
    if error.is_timeout() {
        Attempt::Retryable {
            error: Error::Timeout {
                timeout_ms: timeout.as_millis() as u64,
            },
            retry_after: None,
        }
    } else if error.is_connect() {
        Attempt::Retryable {
            error: Error::Http(error),
            retry_after: None,
        }
    } else {
        Attempt::Fatal(Error::Http(error))
    }
}

/// Gateway and overload statuses worth another attempt
fn is_retryable_status(status: StatusCode) -> bool {
    matches!(
        status.as_u16(),
        500 | 502 | 503 | 504 | 520 | 521 | 522 | 523 | 524
    )
}

fn retry_after_secs(response: &Response) -> u64 {
    response
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}
