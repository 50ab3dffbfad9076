//! Pagers for the paginated catalog management operations
//!
//! Each paginated list method is bound to the generic [`Pager`] through a
//! [`ListOperation`] impl. The named pager types are aliases over it.

use super::client::CatalogManagementService;
use super::options::{
    GetCatalogAccountAuditsOptions, GetConsumptionOfferingsOptions, GetNamespacesOptions,
    GetObjectAccessListOptions, GetOfferingAccessListOptions,
    GetShareApprovalListAsSourceOptions, GetShareApprovalListOptions, ListCatalogAuditsOptions,
    ListEnterpriseAuditsOptions, ListObjectAuditsOptions, ListObjectsOptions,
    ListOfferingAuditsOptions, ListOfferingsOptions, SearchObjectsOptions,
};
use crate::error::Result;
use crate::models::{
    AuditLogs, NamespaceSearchResult, ObjectAccessListResult, ObjectListResult,
    ObjectSearchResult, OfferingAccessListResult, OfferingSearchResult,
    ShareApprovalListAccessResult,
};
use crate::pagination::{ListOperation, Pager};
use async_trait::async_trait;

macro_rules! bind_pager {
    ($pager:ident, $ctor:ident, $method:ident, $options:ty, $page:ty) => {
        #[doc = concat!(
            "Pager over [`CatalogManagementService::",
            stringify!($method),
            "`]"
        )]
        pub type $pager<'a> = Pager<'a, CatalogManagementService, $options>;

        #[async_trait]
        impl ListOperation<$options> for CatalogManagementService {
            type Page = $page;

            async fn list(&self, options: &$options) -> Result<$page> {
                self.$method(options).await
            }
        }

        impl CatalogManagementService {
            #[doc = concat!(
                "Start a [`",
                stringify!($pager),
                "`] from the first page.\n\n",
                "Fails with `InvalidArgument` when a required field is blank or the ",
                "cursor field of `options` is already set."
            )]
            pub fn $ctor(&self, options: &$options) -> Result<$pager<'_>> {
                Ok(Pager::new(self, options)?.with_cursor_policy(self.cursor_policy()))
            }
        }
    };
}

// Offset cursors
bind_pager!(OfferingsPager, offerings_pager, list_offerings, ListOfferingsOptions, OfferingSearchResult);
bind_pager!(
    ConsumptionOfferingsPager,
    consumption_offerings_pager,
    get_consumption_offerings,
    GetConsumptionOfferingsOptions,
    OfferingSearchResult
);
bind_pager!(ObjectsPager, objects_pager, list_objects, ListObjectsOptions, ObjectListResult);
bind_pager!(
    SearchObjectsPager,
    search_objects_pager,
    search_objects,
    SearchObjectsOptions,
    ObjectSearchResult
);
bind_pager!(
    NamespacesPager,
    namespaces_pager,
    get_namespaces,
    GetNamespacesOptions,
    NamespaceSearchResult
);

// Token cursors
bind_pager!(
    CatalogAuditsPager,
    catalog_audits_pager,
    list_catalog_audits,
    ListCatalogAuditsOptions,
    AuditLogs
);
bind_pager!(
    CatalogAccountAuditsPager,
    catalog_account_audits_pager,
    get_catalog_account_audits,
    GetCatalogAccountAuditsOptions,
    AuditLogs
);
bind_pager!(
    EnterpriseAuditsPager,
    enterprise_audits_pager,
    list_enterprise_audits,
    ListEnterpriseAuditsOptions,
    AuditLogs
);
bind_pager!(
    OfferingAuditsPager,
    offering_audits_pager,
    list_offering_audits,
    ListOfferingAuditsOptions,
    AuditLogs
);
bind_pager!(
    ObjectAuditsPager,
    object_audits_pager,
    list_object_audits,
    ListObjectAuditsOptions,
    AuditLogs
);
bind_pager!(
    ObjectAccessPager,
    object_access_pager,
    get_object_access_list,
    GetObjectAccessListOptions,
    ObjectAccessListResult
);
bind_pager!(
    OfferingAccessPager,
    offering_access_pager,
    get_offering_access_list,
    GetOfferingAccessListOptions,
    OfferingAccessListResult
);
bind_pager!(
    ShareApprovalsPager,
    share_approvals_pager,
    get_share_approval_list,
    GetShareApprovalListOptions,
    ShareApprovalListAccessResult
);
bind_pager!(
    ShareApprovalsAsSourcePager,
    share_approvals_as_source_pager,
    get_share_approval_list_as_source,
    GetShareApprovalListAsSourceOptions,
    ShareApprovalListAccessResult
);
