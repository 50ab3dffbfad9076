//! Response models
//!
//! Page envelopes implement [`Paginated`](crate::pagination::Paginated) so
//! the generic pager can walk them.

mod page;
mod resources;

pub use page::{OffsetPage, PaginationTokenLink, TokenPage};
pub use resources::{
    AuditLogDigest, AuditLogs, Catalog, CatalogObject, CatalogSearchResult, NamespaceSearchResult,
    ObjectAccess, ObjectAccessListResult, ObjectListResult, ObjectSearchResult, Offering,
    OfferingAccessListResult, OfferingSearchResult, ShareApprovalAccess, ShareApprovalListAccessResult,
};
