//! Pagination types and traits
//!
//! Defines the contracts between the pager, the list options it mutates,
//! the pages it consumes, and the list operations it drives.

use super::cursor::extract_cursor_param;
use crate::error::Result;
use async_trait::async_trait;

/// The two cursor conventions used by the catalog management API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorStyle {
    /// Opaque server-issued token sent as `start`
    Token,
    /// Integer position sent as `offset`, paired with `limit`
    Offset,
}

impl CursorStyle {
    /// Query parameter carrying the cursor
    pub fn param_name(self) -> &'static str {
        match self {
            Self::Token => "start",
            Self::Offset => "offset",
        }
    }
}

/// A resolved position to resume listing from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cursor {
    /// Token cursor value
    Start(String),
    /// Offset cursor value
    Offset(i64),
}

impl std::fmt::Display for Cursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cursor::Start(start) => f.write_str(start),
            Cursor::Offset(offset) => write!(f, "{offset}"),
        }
    }
}

/// Where a page says the next page lives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextLocator<'a> {
    /// A next-page URL; the cursor is one of its query parameters
    Url(&'a str),
    /// A raw cursor value supplied directly by the server
    Cursor(&'a str),
}

impl<'a> NextLocator<'a> {
    /// The locator text as received
    pub fn as_str(&self) -> &'a str {
        match self {
            Self::Url(s) | Self::Cursor(s) => s,
        }
    }
}

/// Options of a paginated list operation
///
/// Each options type holds exactly one cursor field. The pager owns that
/// field once traversal begins.
pub trait CursorOptions: Clone + Send + Sync {
    /// Cursor convention of the bound list operation
    const STYLE: CursorStyle;

    /// Whether the cursor field already carries a value
    fn cursor_is_set(&self) -> bool;

    /// Store the cursor for the next call
    fn apply_cursor(&mut self, cursor: Cursor);

    /// Check required fields before any request is made
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

/// One page returned by a list operation
pub trait Paginated {
    /// Element type of the page
    type Item;

    /// Locator of the next page, `None` on the last page
    fn next_locator(&self) -> Option<NextLocator<'_>>;

    /// Number of items on this page
    fn item_count(&self) -> usize;

    /// Consume the page, yielding its items in server order
    fn into_items(self) -> Vec<Self::Item>;
}

/// A list endpoint the pager can drive
#[async_trait]
pub trait ListOperation<O: CursorOptions>: Send + Sync {
    /// Page type returned by the endpoint
    type Page: Paginated + Send;

    /// Fetch one page using the given options
    async fn list(&self, options: &O) -> Result<Self::Page>;
}

/// Outcome of reading the next cursor from a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextCursor {
    /// Another page exists and starts at this cursor
    Continue(Cursor),
    /// The page was the last one
    End,
    /// A locator was present but no cursor could be read from it
    Malformed {
        /// Locator as received
        locator: String,
        /// Why it could not be used
        reason: String,
    },
}

/// Resolve the next cursor of the given style from a page locator
pub fn resolve_next_cursor(style: CursorStyle, locator: Option<NextLocator<'_>>) -> NextCursor {
    let Some(locator) = locator else {
        return NextCursor::End;
    };
    if locator.as_str().trim().is_empty() {
        return NextCursor::End;
    }

    let param = style.param_name();
    let raw = match locator {
        NextLocator::Cursor(value) => Some(value.to_string()),
        NextLocator::Url(url) => extract_cursor_param(url, param),
    };
    let Some(raw) = raw else {
        return NextCursor::Malformed {
            locator: locator.as_str().to_string(),
            reason: format!("no '{param}' query parameter"),
        };
    };

    match style {
        CursorStyle::Token => NextCursor::Continue(Cursor::Start(raw)),
        CursorStyle::Offset => match raw.parse::<i64>() {
            Ok(offset) if offset >= 0 => NextCursor::Continue(Cursor::Offset(offset)),
            _ => NextCursor::Malformed {
                locator: locator.as_str().to_string(),
                reason: format!("'{param}' value '{raw}' is not a non-negative integer"),
            },
        },
    }
}
