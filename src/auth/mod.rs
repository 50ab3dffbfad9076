//! Authentication module
//!
//! Supports: IAM API key, Bearer token, Basic, No auth
//!
//! The `Authenticator` applies the configured scheme to outgoing requests
//! and caches IAM access tokens until shortly before they expire.

mod authenticator;
mod types;

pub use authenticator::{jwt_expiry, Authenticator};
pub use types::{AuthConfig, CachedToken, DEFAULT_IAM_URL};
