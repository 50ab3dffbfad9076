//! HTTP transport
//!
//! The collaborator behind every catalog management call: an authenticated
//! GET with retries, backoff and a governor token bucket.

mod client;
mod query;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig};
pub use query::QueryParams;
pub use rate_limit::{RateLimiter, RateLimiterConfig};
