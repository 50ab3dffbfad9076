//! Authenticator implementation
//!
//! Handles applying authentication to requests and managing token refresh.

use super::types::{AuthConfig, CachedToken};
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, DecodingKey, Validation};
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

const IAM_GRANT_TYPE: &str = "urn:ibm:params:oauth:grant-type:apikey";

/// Authenticator handles applying authentication to HTTP requests
pub struct Authenticator {
    /// Auth configuration
    config: AuthConfig,
    /// Cached IAM access token
    cached_token: Arc<RwLock<Option<CachedToken>>>,
    /// HTTP client for token requests
    http_client: Client,
}

impl Authenticator {
    /// Create a new authenticator with the given config
    pub fn new(config: AuthConfig) -> Self {
        Self::with_client(config, Client::new())
    }

    /// Create an authenticator with a custom HTTP client
    pub fn with_client(config: AuthConfig, http_client: Client) -> Self {
        Self {
            config,
            cached_token: Arc::new(RwLock::new(None)),
            http_client,
        }
    }

    /// Apply authentication to a request builder
    pub async fn apply(&self, req: RequestBuilder) -> Result<RequestBuilder> {
        match &self.config {
            AuthConfig::None => Ok(req),

            AuthConfig::Bearer { token } => Ok(req.bearer_auth(token)),

            AuthConfig::Basic { username, password } => {
                Ok(req.basic_auth(username, Some(password)))
            }

            AuthConfig::Iam { .. } => {
                let token = self.get_or_refresh_token().await?;
                Ok(req.bearer_auth(token))
            }
        }
    }

    /// Get a valid token, refreshing if necessary
    async fn get_or_refresh_token(&self) -> Result<String> {
        {
            let cached = self.cached_token.read().await;
            if let Some(token) = cached.as_ref() {
                if !token.is_expired() {
                    return Ok(token.token.clone());
                }
            }
        }

        let mut cached = self.cached_token.write().await;

        // Another task may have refreshed while we waited for the write lock
        if let Some(token) = cached.as_ref() {
            if !token.is_expired() {
                return Ok(token.token.clone());
            }
        }

        let new_token = self.fetch_new_token().await?;
        let token_str = new_token.token.clone();
        *cached = Some(new_token);

        Ok(token_str)
    }

    /// Fetch a new token based on auth type
    async fn fetch_new_token(&self) -> Result<CachedToken> {
        match &self.config {
            AuthConfig::Iam {
                apikey,
                url,
                client_id,
                client_secret,
                scope,
            } => {
                self.fetch_iam_token(
                    apikey,
                    url,
                    client_id.as_deref(),
                    client_secret.as_deref(),
                    scope.as_deref(),
                )
                .await
            }
            _ => Err(Error::auth(
                "Token refresh not supported for this auth type",
            )),
        }
    }

    /// Exchange an API key for an IAM access token
    async fn fetch_iam_token(
        &self,
        apikey: &str,
        url: &str,
        client_id: Option<&str>,
        client_secret: Option<&str>,
        scope: Option<&str>,
    ) -> Result<CachedToken> {
        let token_url = format!("{}/identity/token", url.trim_end_matches('/'));
        debug!("Requesting IAM token from {}", token_url);

        let mut form = vec![
            ("grant_type", IAM_GRANT_TYPE),
            ("apikey", apikey),
            ("response_type", "cloud_iam"),
        ];
        if let Some(scope) = scope {
            form.push(("scope", scope));
        }

        let mut req = self
            .http_client
            .post(&token_url)
            .header("Accept", "application/json")
            .form(&form);

        match (client_id, client_secret) {
            (Some(id), Some(secret)) => req = req.basic_auth(id, Some(secret)),
            (None, None) => {}
            _ => {
                return Err(Error::auth(
                    "IAM client_id and client_secret must be provided together",
                ))
            }
        }

        let response = req.send().await.map_err(Error::Http)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::TokenRefresh {
                message: format!("IAM token request failed with status {status}: {body}"),
            });
        }

        let token_response: IamTokenResponse = response.json().await.map_err(Error::Http)?;
        info!("Obtained new IAM access token");
        Ok(token_response.into_cached_token())
    }

    /// Clear the cached token (forces a refresh on the next request)
    pub async fn clear_cache(&self) {
        let mut cached = self.cached_token.write().await;
        *cached = None;
    }

    /// Get the current auth config
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("kind", &self.config.kind())
            .finish_non_exhaustive()
    }
}

/// IAM token response
#[derive(Debug, Deserialize)]
struct IamTokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    expiration: Option<i64>,
}

impl IamTokenResponse {
    fn into_cached_token(self) -> CachedToken {
        if let Some(secs) = self.expires_in {
            return CachedToken::expires_in(self.access_token, secs);
        }
        let expires_at = self
            .expiration
            .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0))
            .or_else(|| jwt_expiry(&self.access_token));
        CachedToken::new(self.access_token, expires_at)
    }
}

#[derive(Debug, Deserialize)]
struct ExpiryClaims {
    exp: i64,
}

/// Read the `exp` claim of a JWT without verifying its signature
pub fn jwt_expiry(token: &str) -> Option<DateTime<Utc>> {
    let mut validation = Validation::default();
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    let data = decode::<ExpiryClaims>(token, &DecodingKey::from_secret(&[]), &validation).ok()?;
    DateTime::<Utc>::from_timestamp(data.claims.exp, 0)
}
