//! Catalog management service client

use super::options::{
    require, GetCatalogAccountAuditsOptions, GetCatalogOptions, GetConsumptionOfferingsOptions,
    GetNamespacesOptions, GetObjectAccessListOptions, GetObjectOptions,
    GetOfferingAccessListOptions, GetOfferingOptions, GetShareApprovalListAsSourceOptions,
    GetShareApprovalListOptions, ListCatalogAuditsOptions, ListEnterpriseAuditsOptions,
    ListObjectAuditsOptions, ListObjectsOptions, ListOfferingAuditsOptions, ListOfferingsOptions,
    SearchObjectsOptions,
};
use crate::config::ServiceConfig;
use crate::error::{Error, Result};
use crate::http::{HttpClient, QueryParams};
use crate::models::{
    AuditLogs, Catalog, CatalogObject, CatalogSearchResult, NamespaceSearchResult,
    ObjectAccessListResult, ObjectListResult, ObjectSearchResult, Offering,
    OfferingAccessListResult, OfferingSearchResult, ShareApprovalListAccessResult,
};
use crate::pagination::CursorOptions;
use crate::types::CursorPolicy;
use serde::de::DeserializeOwned;
use tracing::{debug, info};
use url::Url;

/// Client for the IBM Cloud catalog management API
///
/// Every list method fetches exactly one page. Use the pager constructors
/// (for example [`offerings_pager`](Self::offerings_pager)) to walk all of
/// them.
pub struct CatalogManagementService {
    http: HttpClient,
    service_url: Url,
    cursor_policy: CursorPolicy,
}

impl CatalogManagementService {
    /// Build a client from a config
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        config.validate()?;
        let service_url = Url::parse(&config.service_url)?;
        let http = HttpClient::with_auth(config.http_client_config(), config.auth.clone())?;

        info!(
            service_url = %service_url,
            auth = config.auth.kind(),
            "Created catalog management client"
        );

        Ok(Self {
            http,
            service_url,
            cursor_policy: config.cursor_policy,
        })
    }

    /// Build a client from `CATALOG_MANAGEMENT_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(&ServiceConfig::from_env()?)
    }

    /// Base URL requests are sent to
    pub fn service_url(&self) -> &str {
        self.service_url.as_str()
    }

    /// Cursor policy applied to pagers built by this client
    pub fn cursor_policy(&self) -> CursorPolicy {
        self.cursor_policy
    }

    /// Change the cursor policy applied to new pagers
    pub fn set_cursor_policy(&mut self, policy: CursorPolicy) {
        self.cursor_policy = policy;
    }

    /// The underlying HTTP client
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    // ========================================================================
    // Catalogs
    // ========================================================================

    /// List the catalogs visible to the caller's account
    pub async fn list_catalogs(&self) -> Result<CatalogSearchResult> {
        self.get(&["catalogs"], QueryParams::new()).await
    }

    /// Get a catalog by id
    pub async fn get_catalog(&self, options: &GetCatalogOptions) -> Result<Catalog> {
        require("catalog_identifier", &options.catalog_identifier)?;
        self.get(&["catalogs", &options.catalog_identifier], QueryParams::new())
            .await
    }

    // ========================================================================
    // Offerings
    // ========================================================================

    /// List one page of the offerings in a catalog
    pub async fn list_offerings(
        &self,
        options: &ListOfferingsOptions,
    ) -> Result<OfferingSearchResult> {
        options.validate()?;
        let query = QueryParams::new()
            .set_opt("digest", options.digest)
            .set_opt("limit", options.limit)
            .set_opt("offset", options.offset)
            .set_opt("name", options.name.as_deref())
            .set_opt("sort", options.sort.as_deref())
            .set_opt("includeHidden", options.include_hidden);
        self.get(&["catalogs", &options.catalog_identifier, "offerings"], query)
            .await
    }

    /// Get an offering by id
    pub async fn get_offering(&self, options: &GetOfferingOptions) -> Result<Offering> {
        require("catalog_identifier", &options.catalog_identifier)?;
        require("offering_id", &options.offering_id)?;
        self.get(
            &[
                "catalogs",
                &options.catalog_identifier,
                "offerings",
                &options.offering_id,
            ],
            QueryParams::new(),
        )
        .await
    }

    /// List one page of the offerings consumable by the caller across catalogs
    pub async fn get_consumption_offerings(
        &self,
        options: &GetConsumptionOfferingsOptions,
    ) -> Result<OfferingSearchResult> {
        options.validate()?;
        let query = QueryParams::new()
            .set_opt("digest", options.digest)
            .set_opt("catalog", options.catalog.as_deref())
            .set_opt("select", options.select.as_deref())
            .set_opt("includeHidden", options.include_hidden)
            .set_opt("limit", options.limit)
            .set_opt("offset", options.offset);
        self.get(&["offerings"], query).await
    }

    // ========================================================================
    // Objects
    // ========================================================================

    /// List one page of the objects in a catalog
    pub async fn list_objects(&self, options: &ListObjectsOptions) -> Result<ObjectListResult> {
        options.validate()?;
        let query = QueryParams::new()
            .set_opt("limit", options.limit)
            .set_opt("offset", options.offset)
            .set_opt("name", options.name.as_deref())
            .set_opt("sort", options.sort.as_deref());
        self.get(&["catalogs", &options.catalog_identifier, "objects"], query)
            .await
    }

    /// Get an object by id
    pub async fn get_object(&self, options: &GetObjectOptions) -> Result<CatalogObject> {
        require("catalog_identifier", &options.catalog_identifier)?;
        require("object_identifier", &options.object_identifier)?;
        self.get(
            &[
                "catalogs",
                &options.catalog_identifier,
                "objects",
                &options.object_identifier,
            ],
            QueryParams::new(),
        )
        .await
    }

    /// Search one page of objects across all catalogs
    pub async fn search_objects(
        &self,
        options: &SearchObjectsOptions,
    ) -> Result<ObjectSearchResult> {
        options.validate()?;
        let query = QueryParams::new()
            .set("query", options.query.as_str())
            .set_opt("kind", options.kind.as_deref())
            .set_opt("limit", options.limit)
            .set_opt("offset", options.offset)
            .set_opt("collapse", options.collapse)
            .set_opt("digest", options.digest);
        self.get(&["objects"], query).await
    }

    /// List one page of the namespaces objects are grouped in
    pub async fn get_namespaces(
        &self,
        options: &GetNamespacesOptions,
    ) -> Result<NamespaceSearchResult> {
        let query = QueryParams::new()
            .set_opt("limit", options.limit)
            .set_opt("offset", options.offset);
        self.get(&["namespaces"], query).await
    }

    // ========================================================================
    // Audits
    // ========================================================================

    /// List one page of the audit log of a catalog
    pub async fn list_catalog_audits(&self, options: &ListCatalogAuditsOptions) -> Result<AuditLogs> {
        options.validate()?;
        let query = audit_query(options.start.as_deref(), options.limit, options.lookupnames);
        self.get(&["catalogs", &options.catalog_identifier, "audits"], query)
            .await
    }

    /// List one page of the audit log of the caller's catalog account
    pub async fn get_catalog_account_audits(
        &self,
        options: &GetCatalogAccountAuditsOptions,
    ) -> Result<AuditLogs> {
        let query = audit_query(options.start.as_deref(), options.limit, options.lookupnames);
        self.get(&["catalogaccount", "audits"], query).await
    }

    /// List one page of the audit log of an enterprise
    pub async fn list_enterprise_audits(
        &self,
        options: &ListEnterpriseAuditsOptions,
    ) -> Result<AuditLogs> {
        options.validate()?;
        let query = audit_query(options.start.as_deref(), options.limit, options.lookupnames);
        self.get(&["enterprises", &options.enterprise_identifier, "audits"], query)
            .await
    }

    /// List one page of the audit log of an offering
    pub async fn list_offering_audits(
        &self,
        options: &ListOfferingAuditsOptions,
    ) -> Result<AuditLogs> {
        options.validate()?;
        let query = audit_query(options.start.as_deref(), options.limit, options.lookupnames);
        self.get(
            &[
                "catalogs",
                &options.catalog_identifier,
                "offerings",
                &options.offering_id,
                "audits",
            ],
            query,
        )
        .await
    }

    /// List one page of the audit log of an object
    pub async fn list_object_audits(&self, options: &ListObjectAuditsOptions) -> Result<AuditLogs> {
        options.validate()?;
        let query = audit_query(options.start.as_deref(), options.limit, options.lookupnames);
        self.get(
            &[
                "catalogs",
                &options.catalog_identifier,
                "objects",
                &options.object_identifier,
                "audits",
            ],
            query,
        )
        .await
    }

    // ========================================================================
    // Access Lists
    // ========================================================================

    /// List one page of the accounts granted access to an object
    pub async fn get_object_access_list(
        &self,
        options: &GetObjectAccessListOptions,
    ) -> Result<ObjectAccessListResult> {
        options.validate()?;
        let query = QueryParams::new()
            .set_opt("start", options.start.as_deref())
            .set_opt("limit", options.limit);
        self.get(
            &[
                "catalogs",
                &options.catalog_identifier,
                "objects",
                &options.object_identifier,
                "access",
            ],
            query,
        )
        .await
    }

    /// List one page of the accounts granted access to an offering
    pub async fn get_offering_access_list(
        &self,
        options: &GetOfferingAccessListOptions,
    ) -> Result<OfferingAccessListResult> {
        options.validate()?;
        let query = QueryParams::new()
            .set_opt("start", options.start.as_deref())
            .set_opt("limit", options.limit);
        self.get(
            &[
                "catalogs",
                &options.catalog_identifier,
                "offerings",
                &options.offering_id,
                "access",
            ],
            query,
        )
        .await
    }

    /// List one page of the share approval list for an object kind
    pub async fn get_share_approval_list(
        &self,
        options: &GetShareApprovalListOptions,
    ) -> Result<ShareApprovalListAccessResult> {
        options.validate()?;
        let query = QueryParams::new()
            .set_opt("start", options.start.as_deref())
            .set_opt("limit", options.limit);
        self.get(&["shareapproval", &options.object_type, "access"], query)
            .await
    }

    /// List one page of the share approvals this account requested as the source
    pub async fn get_share_approval_list_as_source(
        &self,
        options: &GetShareApprovalListAsSourceOptions,
    ) -> Result<ShareApprovalListAccessResult> {
        options.validate()?;
        let query = QueryParams::new()
            .set_opt("start", options.start.as_deref())
            .set_opt("limit", options.limit);
        self.get(
            &["shareapproval", &options.object_type, "access", "source"],
            query,
        )
        .await
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    /// URL of the resource at `segments` below the service URL.
    ///
    /// Segments are percent-encoded, so ids containing `/` or spaces stay a
    /// single path segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.service_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::config(format!("service URL '{}' cannot be a base", self.service_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(&self, segments: &[&str], query: QueryParams) -> Result<T> {
        let url = self.endpoint(segments)?;
        debug!(url = %url, query = ?query.pairs(), "GET");
        self.http.get_json(&url, &query).await
    }
}

impl std::fmt::Debug for CatalogManagementService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogManagementService")
            .field("service_url", &self.service_url.as_str())
            .field("cursor_policy", &self.cursor_policy)
            .field("authenticated", &self.http.has_authenticator())
            .finish()
    }
}

fn audit_query(start: Option<&str>, limit: Option<i64>, lookupnames: Option<bool>) -> QueryParams {
    QueryParams::new()
        .set_opt("start", start)
        .set_opt("limit", limit)
        .set_opt("lookupnames", lookupnames)
}
