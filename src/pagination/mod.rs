//! Pagination module
//!
//! Supports: token cursors (`start`) and offset cursors (`offset` + `limit`)
//!
//! # Overview
//!
//! A single generic [`Pager`] drives every paginated list operation of the
//! service. Each list options type declares its cursor convention through
//! [`CursorOptions`], each page type exposes its items and next-page locator
//! through [`Paginated`], and each endpoint is bound through
//! [`ListOperation`].

mod cursor;
mod pager;
mod types;

pub use cursor::extract_cursor_param;
pub use pager::{Pager, PagerItem};
pub use types::{
    resolve_next_cursor, Cursor, CursorOptions, CursorStyle, ListOperation, NextCursor,
    NextLocator, Paginated,
};

#[cfg(test)]
mod tests;
