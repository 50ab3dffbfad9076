//! Paginated response envelopes
//!
//! Offset-paginated endpoints answer with [`OffsetPage`], token-paginated
//! endpoints with [`TokenPage`].

use crate::pagination::{NextLocator, Paginated};
use serde::{Deserialize, Serialize};

/// Page of an offset-paginated listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct OffsetPage<T> {
    /// Offset of the first resource on this page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    /// Page size requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    /// Total resources matching the query
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_count: Option<i64>,
    /// Resources on this page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_count: Option<i64>,
    /// URL of the first page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first: Option<String>,
    /// URL of the last page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last: Option<String>,
    /// URL of the previous page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev: Option<String>,
    /// URL of the next page, absent on the last page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    #[serde(default = "Vec::new")]
    pub resources: Vec<T>,
}

impl<T> Paginated for OffsetPage<T> {
    type Item = T;

    fn next_locator(&self) -> Option<NextLocator<'_>> {
        self.next.as_deref().map(NextLocator::Url)
    }

    fn item_count(&self) -> usize {
        self.resources.len()
    }

    fn into_items(self) -> Vec<T> {
        self.resources
    }
}

/// Link to a page of a token-paginated listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationTokenLink {
    /// Full URL of the page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    /// Token to send as `start` to fetch the page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
}

/// Page of a token-paginated listing
///
/// Audit endpoints name their item array `audits`, access list endpoints
/// name it `resources`; both deserialize into `resources`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct TokenPage<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first: Option<PaginationTokenLink>,
    /// Link to the next page, absent on the last page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<PaginationTokenLink>,
    #[serde(default = "Vec::new", alias = "audits")]
    pub resources: Vec<T>,
}

impl<T> Paginated for TokenPage<T> {
    type Item = T;

    fn next_locator(&self) -> Option<NextLocator<'_>> {
        let link = self.next.as_ref()?;
        match link.start.as_deref() {
            Some(start) if !start.is_empty() => Some(NextLocator::Cursor(start)),
            _ => link.href.as_deref().map(NextLocator::Url),
        }
    }

    fn item_count(&self) -> usize {
        self.resources.len()
    }

    fn into_items(self) -> Vec<T> {
        self.resources
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_offset_page_locator() {
        let page: OffsetPage<String> = serde_json::from_value(json!({
            "offset": 0,
            "limit": 2,
            "total_count": 3,
            "resource_count": 2,
            "first": "/namespaces?limit=2",
            "next": "/namespaces?limit=2&offset=2",
            "resources": ["ns-a", "ns-b"]
        }))
        .unwrap();

        assert_eq!(
            page.next_locator(),
            Some(NextLocator::Url("/namespaces?limit=2&offset=2"))
        );
        assert_eq!(page.item_count(), 2);
        assert_eq!(page.into_items(), vec!["ns-a", "ns-b"]);
    }

    #[test]
    fn test_offset_page_last_page() {
        let page: OffsetPage<String> = serde_json::from_value(json!({
            "total_count": 0
        }))
        .unwrap();

        assert!(page.next_locator().is_none());
        assert_eq!(page.item_count(), 0);
    }

    #[test]
    fn test_token_page_prefers_start_field() {
        let page: TokenPage<serde_json::Value> = serde_json::from_value(json!({
            "limit": 1,
            "next": {"href": "/catalogs/c/audits?start=from-href", "start": "from-field"},
            "audits": [{"id": "a1"}]
        }))
        .unwrap();

        assert_eq!(page.next_locator(), Some(NextLocator::Cursor("from-field")));
        assert_eq!(page.item_count(), 1);
    }

    #[test]
    fn test_token_page_falls_back_to_href() {
        let page: TokenPage<serde_json::Value> = serde_json::from_value(json!({
            "next": {"href": "/catalogs/c/audits?start=from-href"},
            "resources": []
        }))
        .unwrap();

        assert_eq!(
            page.next_locator(),
            Some(NextLocator::Url("/catalogs/c/audits?start=from-href"))
        );
    }
}
