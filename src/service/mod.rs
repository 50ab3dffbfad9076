//! Catalog management service
//!
//! [`CatalogManagementService`] exposes the read operations of the catalog
//! management API. Paginated operations fetch one page per call; the pager
//! constructors defined in `pagers` walk every page through the generic
//! [`Pager`](crate::pagination::Pager).
//!
//! # Example
//!
//! ```no_run
//! use catalog_management::service::{CatalogManagementService, ListOfferingsOptions};
//!
//! # async fn example() -> catalog_management::Result<()> {
//! let service = CatalogManagementService::from_env()?;
//! let options = ListOfferingsOptions {
//!     limit: Some(50),
//!     ..ListOfferingsOptions::new("my-catalog")
//! };
//! let mut pager = service.offerings_pager(&options)?;
//! while pager.has_next() {
//!     for offering in pager.get_next().await? {
//!         println!("{:?}", offering.name);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod options;
mod pagers;

pub use client::CatalogManagementService;
pub use options::{
    GetCatalogAccountAuditsOptions, GetCatalogOptions, GetConsumptionOfferingsOptions,
    GetNamespacesOptions, GetObjectAccessListOptions, GetObjectOptions,
    GetOfferingAccessListOptions, GetOfferingOptions, GetShareApprovalListAsSourceOptions,
    GetShareApprovalListOptions, ListCatalogAuditsOptions, ListEnterpriseAuditsOptions,
    ListObjectAuditsOptions, ListObjectsOptions, ListOfferingAuditsOptions, ListOfferingsOptions,
    SearchObjectsOptions,
};
pub use pagers::{
    CatalogAccountAuditsPager, CatalogAuditsPager, ConsumptionOfferingsPager,
    EnterpriseAuditsPager, NamespacesPager, ObjectAccessPager, ObjectAuditsPager, ObjectsPager,
    OfferingAccessPager, OfferingAuditsPager, OfferingsPager, SearchObjectsPager,
    ShareApprovalsAsSourcePager, ShareApprovalsPager,
};
