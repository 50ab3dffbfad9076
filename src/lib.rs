// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Catalog Management Client
//!
//! An async client for the IBM Cloud catalog management API, built around a
//! single generic pager for its paginated list operations.
//!
//! ## Features
//!
//! - **Generic Pagination**: One [`Pager`](pagination::Pager) for token (`start`) and offset (`offset`) cursors
//! - **Auth**: IAM API key exchange with token caching, bearer and basic auth
//! - **HTTP**: Retries with backoff, client-side rate limiting
//! - **Config**: `CATALOG_MANAGEMENT_*` environment variables or YAML
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use catalog_management::service::{CatalogManagementService, ListCatalogAuditsOptions};
//!
//! #[tokio::main]
//! async fn main() -> catalog_management::Result<()> {
//!     let service = CatalogManagementService::from_env()?;
//!
//!     let options = ListCatalogAuditsOptions::new("my-catalog");
//!     let audits = service.catalog_audits_pager(&options)?.get_all().await?;
//!     println!("{} audit entries", audits.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                  CatalogManagementService                    │
//! │   list_* / get_* (one page)      *_pager() → Pager<'_, _, _> │
//! └──────────────────────────────────────────────────────────────┘
//!                               │
//! ┌──────────┬──────────────┬───┴──────────┬─────────────────────┐
//! │   Auth   │     HTTP     │  Pagination  │       Models        │
//! ├──────────┼──────────────┼──────────────┼─────────────────────┤
//! │ IAM      │ GET + query  │ Pager        │ OffsetPage<T>       │
//! │ Bearer   │ Retry        │ Token cursor │ TokenPage<T>        │
//! │ Basic    │ Rate Limit   │ Offset cursor│ Catalog, Offering.. │
//! └──────────┴──────────────┴──────────────┴─────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the client
pub mod error;

/// Common types and type aliases
pub mod types;

/// Authentication implementations
pub mod auth;

/// HTTP client with retry and rate limiting
pub mod http;

/// Generic cursor pagination
pub mod pagination;

/// Response models
pub mod models;

/// Service configuration
pub mod config;

/// Catalog management operations and pagers
pub mod service;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use config::ServiceConfig;
pub use pagination::{Pager, PagerItem};
pub use service::CatalogManagementService;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
