//! Request options for catalog management operations
//!
//! Required path parameters are plain `String` fields and are checked before
//! any request is sent. Optional query parameters are `Option`s and are only
//! sent when set.

use crate::error::{Error, Result};
use crate::pagination::{Cursor, CursorOptions, CursorStyle};

/// Fail with `InvalidArgument` when a required field is blank
pub(crate) fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::required(field));
    }
    Ok(())
}

/// Implements [`CursorOptions`] for an options type with an `offset` field
macro_rules! offset_cursor {
    ($options:ty $(, required = [$($field:ident),+])?) => {
        impl CursorOptions for $options {
            const STYLE: CursorStyle = CursorStyle::Offset;

            fn cursor_is_set(&self) -> bool {
                self.offset.is_some_and(|offset| offset != 0)
            }

            fn apply_cursor(&mut self, cursor: Cursor) {
                if let Cursor::Offset(offset) = cursor {
                    self.offset = Some(offset);
                }
            }

            fn validate(&self) -> Result<()> {
                $($(require(stringify!($field), &self.$field)?;)+)?
                Ok(())
            }
        }
    };
}

/// Implements [`CursorOptions`] for an options type with a `start` field
macro_rules! token_cursor {
    ($options:ty $(, required = [$($field:ident),+])?) => {
        impl CursorOptions for $options {
            const STYLE: CursorStyle = CursorStyle::Token;

            fn cursor_is_set(&self) -> bool {
                self.start.as_deref().is_some_and(|start| !start.is_empty())
            }

            fn apply_cursor(&mut self, cursor: Cursor) {
                if let Cursor::Start(start) = cursor {
                    self.start = Some(start);
                }
            }

            fn validate(&self) -> Result<()> {
                $($(require(stringify!($field), &self.$field)?;)+)?
                Ok(())
            }
        }
    };
}

// ============================================================================
// Single Resource Options
// ============================================================================

/// Options for `get_catalog`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetCatalogOptions {
    pub catalog_identifier: String,
}

impl GetCatalogOptions {
    pub fn new(catalog_identifier: impl Into<String>) -> Self {
        Self {
            catalog_identifier: catalog_identifier.into(),
        }
    }
}

/// Options for `get_offering`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetOfferingOptions {
    pub catalog_identifier: String,
    pub offering_id: String,
}

impl GetOfferingOptions {
    pub fn new(catalog_identifier: impl Into<String>, offering_id: impl Into<String>) -> Self {
        Self {
            catalog_identifier: catalog_identifier.into(),
            offering_id: offering_id.into(),
        }
    }
}

/// Options for `get_object`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetObjectOptions {
    pub catalog_identifier: String,
    pub object_identifier: String,
}

impl GetObjectOptions {
    pub fn new(catalog_identifier: impl Into<String>, object_identifier: impl Into<String>) -> Self {
        Self {
            catalog_identifier: catalog_identifier.into(),
            object_identifier: object_identifier.into(),
        }
    }
}

// ============================================================================
// Offset-Paginated Options
// ============================================================================

/// Options for `list_offerings`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOfferingsOptions {
    pub catalog_identifier: String,
    /// Return digested offerings
    pub digest: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    /// Only offerings with this name
    pub name: Option<String>,
    /// Sort field, prefix with `-` for descending
    pub sort: Option<String>,
    pub include_hidden: Option<bool>,
}

impl ListOfferingsOptions {
    pub fn new(catalog_identifier: impl Into<String>) -> Self {
        Self {
            catalog_identifier: catalog_identifier.into(),
            ..Default::default()
        }
    }
}

offset_cursor!(ListOfferingsOptions, required = [catalog_identifier]);

/// Options for `get_consumption_offerings`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetConsumptionOfferingsOptions {
    pub digest: Option<bool>,
    /// Restrict results to one catalog
    pub catalog: Option<String>,
    /// `all`, `public` or `private`
    pub select: Option<String>,
    pub include_hidden: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

offset_cursor!(GetConsumptionOfferingsOptions);

/// Options for `list_objects`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListObjectsOptions {
    pub catalog_identifier: String,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub name: Option<String>,
    pub sort: Option<String>,
}

impl ListObjectsOptions {
    pub fn new(catalog_identifier: impl Into<String>) -> Self {
        Self {
            catalog_identifier: catalog_identifier.into(),
            ..Default::default()
        }
    }
}

offset_cursor!(ListObjectsOptions, required = [catalog_identifier]);

/// Options for `search_objects`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchObjectsOptions {
    /// Lucene style search query
    pub query: String,
    /// Object kind to search, for example `vpe`
    pub kind: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    /// Collapse results to the latest revision per object
    pub collapse: Option<bool>,
    pub digest: Option<bool>,
}

impl SearchObjectsOptions {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }
}

offset_cursor!(SearchObjectsOptions, required = [query]);

/// Options for `get_namespaces`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetNamespacesOptions {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

offset_cursor!(GetNamespacesOptions);

// ============================================================================
// Token-Paginated Options
// ============================================================================

/// Options for `list_catalog_audits`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListCatalogAuditsOptions {
    pub catalog_identifier: String,
    pub start: Option<String>,
    pub limit: Option<i64>,
    /// Resolve account and user ids to names
    pub lookupnames: Option<bool>,
}

impl ListCatalogAuditsOptions {
    pub fn new(catalog_identifier: impl Into<String>) -> Self {
        Self {
            catalog_identifier: catalog_identifier.into(),
            ..Default::default()
        }
    }
}

token_cursor!(ListCatalogAuditsOptions, required = [catalog_identifier]);

/// Options for `get_catalog_account_audits`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetCatalogAccountAuditsOptions {
    pub start: Option<String>,
    pub limit: Option<i64>,
    pub lookupnames: Option<bool>,
}

token_cursor!(GetCatalogAccountAuditsOptions);

/// Options for `list_enterprise_audits`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListEnterpriseAuditsOptions {
    pub enterprise_identifier: String,
    pub start: Option<String>,
    pub limit: Option<i64>,
    pub lookupnames: Option<bool>,
}

impl ListEnterpriseAuditsOptions {
    pub fn new(enterprise_identifier: impl Into<String>) -> Self {
        Self {
            enterprise_identifier: enterprise_identifier.into(),
            ..Default::default()
        }
    }
}

token_cursor!(ListEnterpriseAuditsOptions, required = [enterprise_identifier]);

/// Options for `list_offering_audits`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOfferingAuditsOptions {
    pub catalog_identifier: String,
    pub offering_id: String,
    pub start: Option<String>,
    pub limit: Option<i64>,
    pub lookupnames: Option<bool>,
}

impl ListOfferingAuditsOptions {
    pub fn new(catalog_identifier: impl Into<String>, offering_id: impl Into<String>) -> Self {
        Self {
            catalog_identifier: catalog_identifier.into(),
            offering_id: offering_id.into(),
            ..Default::default()
        }
    }
}

token_cursor!(
    ListOfferingAuditsOptions,
    required = [catalog_identifier, offering_id]
);

/// Options for `list_object_audits`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListObjectAuditsOptions {
    pub catalog_identifier: String,
    pub object_identifier: String,
    pub start: Option<String>,
    pub limit: Option<i64>,
    pub lookupnames: Option<bool>,
}

impl ListObjectAuditsOptions {
    pub fn new(catalog_identifier: impl Into<String>, object_identifier: impl Into<String>) -> Self {
        Self {
            catalog_identifier: catalog_identifier.into(),
            object_identifier: object_identifier.into(),
            ..Default::default()
        }
    }
}

token_cursor!(
    ListObjectAuditsOptions,
    required = [catalog_identifier, object_identifier]
);

/// Options for `get_object_access_list`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetObjectAccessListOptions {
    pub catalog_identifier: String,
    pub object_identifier: String,
    pub start: Option<String>,
    pub limit: Option<i64>,
}

impl GetObjectAccessListOptions {
    pub fn new(catalog_identifier: impl Into<String>, object_identifier: impl Into<String>) -> Self {
        Self {
            catalog_identifier: catalog_identifier.into(),
            object_identifier: object_identifier.into(),
            ..Default::default()
        }
    }
}

token_cursor!(
    GetObjectAccessListOptions,
    required = [catalog_identifier, object_identifier]
);

/// Options for `get_offering_access_list`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetOfferingAccessListOptions {
    pub catalog_identifier: String,
    pub offering_id: String,
    pub start: Option<String>,
    pub limit: Option<i64>,
}

impl GetOfferingAccessListOptions {
    pub fn new(catalog_identifier: impl Into<String>, offering_id: impl Into<String>) -> Self {
        Self {
            catalog_identifier: catalog_identifier.into(),
            offering_id: offering_id.into(),
            ..Default::default()
        }
    }
}

token_cursor!(
    GetOfferingAccessListOptions,
    required = [catalog_identifier, offering_id]
);

/// Options for `get_share_approval_list`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetShareApprovalListOptions {
    /// Object kind, for example `offering` or `vpe`
    pub object_type: String,
    pub start: Option<String>,
    pub limit: Option<i64>,
}

impl GetShareApprovalListOptions {
    pub fn new(object_type: impl Into<String>) -> Self {
        Self {
            object_type: object_type.into(),
            ..Default::default()
        }
    }
}

token_cursor!(GetShareApprovalListOptions, required = [object_type]);

/// Options for `get_share_approval_list_as_source`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetShareApprovalListAsSourceOptions {
    /// Object kind, for example `offering` or `vpe`
    pub object_type: String,
    pub start: Option<String>,
    pub limit: Option<i64>,
}

impl GetShareApprovalListAsSourceOptions {
    pub fn new(object_type: impl Into<String>) -> Self {
        Self {
            object_type: object_type.into(),
            ..Default::default()
        }
    }
}

token_cursor!(GetShareApprovalListAsSourceOptions, required = [object_type]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_options_cursor() {
        let mut options = ListOfferingsOptions::new("cat");
        assert_eq!(ListOfferingsOptions::STYLE, CursorStyle::Offset);
        assert!(!options.cursor_is_set());

        options.offset = Some(0);
        assert!(!options.cursor_is_set());

        options.apply_cursor(Cursor::Offset(20));
        assert_eq!(options.offset, Some(20));
        assert!(options.cursor_is_set());

        // a token cursor never lands in an offset field
        options.apply_cursor(Cursor::Start("abc".to_string()));
        assert_eq!(options.offset, Some(20));
    }

    #[test]
    fn test_token_options_cursor() {
        let mut options = GetCatalogAccountAuditsOptions::default();
        assert_eq!(GetCatalogAccountAuditsOptions::STYLE, CursorStyle::Token);

        options.start = Some(String::new());
        assert!(!options.cursor_is_set());

        options.apply_cursor(Cursor::Start("tok".to_string()));
        assert_eq!(options.start.as_deref(), Some("tok"));
        assert!(options.cursor_is_set());
    }

    #[test]
    fn test_required_fields() {
        assert!(ListOfferingsOptions::default().validate().is_err());
        assert!(ListOfferingsOptions::new("cat").validate().is_ok());
        assert!(GetNamespacesOptions::default().validate().is_ok());

        let err = ListOfferingAuditsOptions::new("cat", " ").validate().unwrap_err();
        assert!(err.to_string().contains("offering_id"));

        let err = SearchObjectsOptions::default().validate().unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }));
        assert!(err.to_string().contains("query"));
    }
}
