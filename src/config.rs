//! Service configuration
//!
//! A [`ServiceConfig`] describes the endpoint, credentials and transport
//! settings of a catalog management client. It can be read from
//! `CATALOG_MANAGEMENT_*` environment variables or from a YAML file.

use crate::auth::{AuthConfig, DEFAULT_IAM_URL};
use crate::error::{Error, Result, ResultExt};
use crate::http::{HttpClientConfig, RateLimiterConfig};
use crate::types::{BackoffType, CursorPolicy, OptionStringExt};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Default public endpoint of the catalog management API
pub const DEFAULT_SERVICE_URL: &str = "https://cm.globalcatalog.cloud.ibm.com/api/v1-beta";

/// Prefix of the environment variables read by [`ServiceConfig::from_env`]
pub const ENV_PREFIX: &str = "CATALOG_MANAGEMENT";

/// Complete client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Base URL of the service, including the API version path
    pub service_url: String,

    /// Authentication scheme
    pub auth: AuthConfig,

    /// Per-request timeout in seconds
    pub timeout_seconds: u64,

    /// Retries for 429/5xx responses, timeouts and connection errors
    pub max_retries: u32,

    /// Backoff strategy between retries
    pub backoff: BackoffType,

    /// First backoff delay in milliseconds
    pub initial_backoff_ms: u64,

    /// Upper bound on any single backoff delay in milliseconds
    pub max_backoff_ms: u64,

    /// Client-side rate limit; `None` disables throttling
    pub rate_limit: Option<RateLimiterConfig>,

    /// Overrides the default user agent
    pub user_agent: Option<String>,

    /// Headers added to every request
    pub headers: HashMap<String, String>,

    /// Accept invalid TLS certificates
    pub disable_ssl_verification: bool,

    /// Policy for pagers built by the service client
    pub cursor_policy: CursorPolicy,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            service_url: DEFAULT_SERVICE_URL.to_string(),
            auth: AuthConfig::None,
            timeout_seconds: 30,
            max_retries: 3,
            backoff: BackoffType::Exponential,
            initial_backoff_ms: 100,
            max_backoff_ms: 30_000,
            rate_limit: Some(RateLimiterConfig::default()),
            user_agent: None,
            headers: HashMap::new(),
            disable_ssl_verification: false,
            cursor_policy: CursorPolicy::Lenient,
        }
    }
}

impl ServiceConfig {
    /// Config for the given endpoint with default settings
    pub fn new(service_url: impl Into<String>, auth: AuthConfig) -> Self {
        Self {
            service_url: service_url.into(),
            auth,
            ..Default::default()
        }
    }

    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through a variable lookup function.
    ///
    /// Recognised variables (all prefixed with `CATALOG_MANAGEMENT_`): `URL`,
    /// `AUTH_TYPE` (`iam`, `bearertoken`, `basic`, `noauth`), `APIKEY`,
    /// `AUTH_URL`, `CLIENT_ID`, `CLIENT_SECRET`, `SCOPE`, `BEARER_TOKEN`,
    /// `USERNAME`, `PASSWORD`, `DISABLE_SSL`. Without `AUTH_TYPE`, an API key
    /// selects IAM and a bearer token selects bearer auth.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| format!("{ENV_PREFIX}_{name}");
        let get = |name: &str| lookup(&var(name)).none_if_empty();
        let require = |name: &str| get(name).ok_or_else(|| Error::missing_field(var(name)));

        let mut config = Self::default();
        if let Some(url) = get("URL") {
            config.service_url = url;
        }

        let auth_type = get("AUTH_TYPE")
            .map(|t| t.to_ascii_lowercase())
            .or_else(|| get("APIKEY").map(|_| "iam".to_string()))
            .or_else(|| get("BEARER_TOKEN").map(|_| "bearertoken".to_string()));

        config.auth = match auth_type.as_deref() {
            None | Some("noauth") => AuthConfig::None,
            Some("iam") => AuthConfig::Iam {
                apikey: require("APIKEY")?,
                url: get("AUTH_URL").unwrap_or_else(|| DEFAULT_IAM_URL.to_string()),
                client_id: get("CLIENT_ID"),
                client_secret: get("CLIENT_SECRET"),
                scope: get("SCOPE"),
            },
            Some("bearertoken") => AuthConfig::Bearer {
                token: require("BEARER_TOKEN")?,
            },
            Some("basic") => AuthConfig::Basic {
                username: require("USERNAME")?,
                password: require("PASSWORD")?,
            },
            Some(other) => {
                return Err(Error::invalid_config(
                    var("AUTH_TYPE"),
                    format!("unsupported auth type '{other}'"),
                ))
            }
        };

        if let Some(value) = get("DISABLE_SSL") {
            config.disable_ssl_verification = parse_bool(&value)
                .ok_or_else(|| Error::invalid_config(var("DISABLE_SSL"), "expected true or false"))?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from YAML
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_yaml_str(&content)
    }

    /// Check the configuration for values that can never work
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.service_url)
            .map_err(|e| Error::invalid_config("service_url", e.to_string()))?;
        if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_config(
                "service_url",
                format!("'{}' is not an http(s) URL", self.service_url),
            ));
        }
        if self.timeout_seconds == 0 {
            return Err(Error::invalid_config("timeout_seconds", "must be positive"));
        }
        if let AuthConfig::Iam { apikey, .. } = &self.auth {
            if apikey.is_empty() {
                return Err(Error::missing_field("auth.apikey"));
            }
        }
        Ok(())
    }

    /// Transport settings derived from this config
    pub fn http_client_config(&self) -> HttpClientConfig {
        let defaults = HttpClientConfig::default();
        HttpClientConfig {
            timeout: Duration::from_secs(self.timeout_seconds),
            max_retries: self.max_retries,
            initial_backoff: Duration::from_millis(self.initial_backoff_ms),
            max_backoff: Duration::from_millis(self.max_backoff_ms),
            backoff_type: self.backoff,
            rate_limit: self.rate_limit.clone(),
            headers: self.headers.clone(),
            user_agent: self.user_agent.clone().unwrap_or(defaults.user_agent),
            disable_ssl_verification: self.disable_ssl_verification,
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
