//! Auth configuration types
//!
//! These types describe how requests to the catalog management service are
//! authenticated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default IAM endpoint used to exchange API keys for access tokens
pub const DEFAULT_IAM_URL: &str = "https://iam.cloud.ibm.com";

/// Authentication configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuthConfig {
    /// No authentication required
    #[default]
    None,

    /// Static bearer token, managed by the caller
    Bearer {
        /// The bearer token
        token: String,
    },

    /// HTTP Basic authentication
    Basic {
        /// Username
        username: String,
        /// Password
        password: String,
    },

    /// IAM API key exchanged for short-lived bearer tokens
    Iam {
        /// The IAM API key
        apikey: String,
        /// IAM base URL (defaults to the public IAM endpoint)
        #[serde(default = "default_iam_url")]
        url: String,
        /// Optional client id sent as basic auth on the token request
        #[serde(default)]
        client_id: Option<String>,
        /// Optional client secret sent as basic auth on the token request
        #[serde(default)]
        client_secret: Option<String>,
        /// Optional scope for the requested token
        #[serde(default)]
        scope: Option<String>,
    },
}

fn default_iam_url() -> String {
    DEFAULT_IAM_URL.to_string()
}

impl AuthConfig {
    /// IAM auth against the public IAM endpoint
    pub fn iam(apikey: impl Into<String>) -> Self {
        Self::Iam {
            apikey: apikey.into(),
            url: default_iam_url(),
            client_id: None,
            client_secret: None,
            scope: None,
        }
    }

    /// Bearer token auth
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer {
            token: token.into(),
        }
    }

    /// Short name of the auth scheme, as used in environment configuration
    pub fn kind(&self) -> &'static str {
        match self {
            AuthConfig::None => "noauth",
            AuthConfig::Bearer { .. } => "bearertoken",
            AuthConfig::Basic { .. } => "basic",
            AuthConfig::Iam { .. } => "iam",
        }
    }
}

/// Cached token with expiration
#[derive(Debug, Clone)]
pub struct CachedToken {
    /// The access token
    pub token: String,
    /// When the token expires
    pub expires_at: Option<DateTime<Utc>>,
}

impl CachedToken {
    /// Create a new cached token
    pub fn new(token: String, expires_at: Option<DateTime<Utc>>) -> Self {
        Self { token, expires_at }
    }

    /// Create a token that expires in N seconds from now
    pub fn expires_in(token: String, seconds: i64) -> Self {
        let expires_at = Utc::now() + chrono::Duration::seconds(seconds);
        Self {
            token,
            expires_at: Some(expires_at),
        }
    }

    /// Check if the token is expired (with 30 second buffer)
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => {
                let buffer = chrono::Duration::seconds(30);
                Utc::now() + buffer >= expires_at
            }
            None => false,
        }
    }
}
