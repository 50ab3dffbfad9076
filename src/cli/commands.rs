//! CLI commands and argument parsing

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// IBM Cloud catalog management CLI
#[derive(Parser, Debug)]
#[command(name = "catalog-mgmt")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Service URL (overrides config file and CATALOG_MANAGEMENT_URL)
    #[arg(long, global = true)]
    pub service_url: Option<String>,

    /// Configuration file (YAML); CATALOG_MANAGEMENT_* variables are used when absent
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Paging flags shared by every list command
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct PageArgs {
    /// Page size
    #[arg(long)]
    pub limit: Option<i64>,

    /// Fetch every page instead of only the first
    #[arg(long)]
    pub all: bool,

    /// Fail instead of stopping when a next-page link cannot be parsed
    #[arg(long)]
    pub strict_cursor: bool,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List catalogs in the account
    Catalogs,

    /// List offerings of a catalog, or all consumable offerings
    Offerings {
        /// Catalog id; omit to list offerings across catalogs
        #[arg(long)]
        catalog: Option<String>,

        /// Only offerings with this name (requires --catalog)
        #[arg(long, requires = "catalog")]
        name: Option<String>,

        /// Include hidden offerings
        #[arg(long)]
        include_hidden: bool,

        #[command(flatten)]
        page: PageArgs,
    },

    /// List objects of a catalog, or search objects across catalogs
    Objects {
        /// Catalog id
        #[arg(long, conflicts_with = "query", required_unless_present = "query")]
        catalog: Option<String>,

        /// Search query
        #[arg(long)]
        query: Option<String>,

        /// Object kind to search (with --query)
        #[arg(long, requires = "query")]
        kind: Option<String>,

        #[command(flatten)]
        page: PageArgs,
    },

    /// List namespaces
    Namespaces {
        #[command(flatten)]
        page: PageArgs,
    },

    /// List audit log entries
    ///
    /// Scope is the account by default, or a catalog, offering, object or
    /// enterprise when the matching flags are given.
    Audits {
        /// Catalog id
        #[arg(long, conflicts_with = "enterprise")]
        catalog: Option<String>,

        /// Offering id (requires --catalog)
        #[arg(long, requires = "catalog", conflicts_with = "object")]
        offering: Option<String>,

        /// Object id (requires --catalog)
        #[arg(long, requires = "catalog")]
        object: Option<String>,

        /// Enterprise id
        #[arg(long)]
        enterprise: Option<String>,

        /// Resolve ids to names
        #[arg(long)]
        lookupnames: bool,

        #[command(flatten)]
        page: PageArgs,
    },

    /// List accounts with access to an object or an offering
    Access {
        /// Catalog id
        #[arg(long)]
        catalog: String,

        /// Object id
        #[arg(long, required_unless_present = "offering", conflicts_with = "offering")]
        object: Option<String>,

        /// Offering id
        #[arg(long)]
        offering: Option<String>,

        #[command(flatten)]
        page: PageArgs,
    },

    /// List the share approval list for an object kind
    ShareApprovals {
        /// Object kind, for example offering or vpe
        #[arg(long)]
        object_type: String,

        /// List the approvals this account requested as the source
        #[arg(long)]
        as_source: bool,

        #[command(flatten)]
        page: PageArgs,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one resource per line)
    Json,
    /// Human-readable output
    Pretty,
}
