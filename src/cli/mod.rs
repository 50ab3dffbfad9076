//! CLI module
//!
//! Command-line interface over the catalog management service.
//!
//! # Commands
//!
//! - `catalogs` - List catalogs in the account
//! - `offerings` - List offerings of a catalog or across catalogs
//! - `objects` - List or search catalog objects
//! - `namespaces` - List object namespaces
//! - `audits` - List audit log entries
//! - `access` - List the access list of an object
//! - `share-approvals` - List the share approval list of an object kind
//!
//! List commands print the first page unless `--all` is given.

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat, PageArgs};
pub use runner::{render, Runner};
