//! Generic pager
//!
//! Drives any [`ListOperation`] page by page, carrying the next cursor from
//! each response into the options of the following call.

use super::types::{
    resolve_next_cursor, Cursor, CursorOptions, ListOperation, NextCursor, Paginated,
};
use crate::error::{Error, Result};
use crate::types::CursorPolicy;
use futures::stream::{self, Stream};
use tracing::{debug, warn};

/// Item type produced by a pager over `L` with options `O`
pub type PagerItem<L, O> = <<L as ListOperation<O>>::Page as Paginated>::Item;

/// Stateful iterator over the pages of one list operation
///
/// A pager works on a private copy of the options it was built from and is
/// good for a single traversal: `NotStarted -> HasMore -> Exhausted`. Start a
/// new traversal by building a new pager.
pub struct Pager<'a, L, O>
where
    L: ListOperation<O>,
    O: CursorOptions,
{
    operation: &'a L,
    options: O,
    has_next: bool,
    pages_fetched: usize,
    policy: CursorPolicy,
    /// Cursor the pager last wrote into `options`
    cursor: Option<Cursor>,
}

impl<'a, L, O> Pager<'a, L, O>
where
    L: ListOperation<O>,
    O: CursorOptions,
{
    /// Create a pager over `operation`, starting from the beginning.
    ///
    /// Fails with [`Error::InvalidArgument`] when required option fields are
    /// missing or the cursor field is already set. Performs no I/O.
    pub fn new(operation: &'a L, options: &O) -> Result<Self> {
        options.validate()?;
        if options.cursor_is_set() {
            return Err(Error::invalid_argument(format!(
                "the '{}' field should not be set",
                O::STYLE.param_name()
            )));
        }

        Ok(Self {
            operation,
            options: options.clone(),
            has_next: true,
            pages_fetched: 0,
            policy: CursorPolicy::default(),
            cursor: None,
        })
    }

    /// Set how malformed next-page locators are handled
    #[must_use]
    pub fn with_cursor_policy(mut self, policy: CursorPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Whether another call to [`get_next`](Self::get_next) may return results
    pub fn has_next(&self) -> bool {
        self.has_next
    }

    /// Number of pages fetched successfully so far
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// The options the next request will be sent with
    pub fn options(&self) -> &O {
        &self.options
    }

    /// Fetch the next page of items.
    ///
    /// On a failed request the error is returned unchanged and the cursor is
    /// not advanced, so the same call can be retried. An empty page does not
    /// end the traversal; only a page without a next locator does. A next
    /// cursor equal to the one just sent is treated like a malformed locator,
    /// so a server that repeats itself cannot stall `get_all`.
    pub async fn get_next(&mut self) -> Result<Vec<PagerItem<L, O>>> {
        if !self.has_next {
            return Err(Error::IteratorExhausted);
        }

        let page = self.operation.list(&self.options).await?;

        let next = match resolve_next_cursor(O::STYLE, page.next_locator()) {
            NextCursor::Continue(cursor) => Some(cursor),
            NextCursor::End => None,
            NextCursor::Malformed { locator, reason } => match self.policy {
                CursorPolicy::Strict => return Err(Error::cursor_parse(locator, reason)),
                CursorPolicy::Lenient => {
                    warn!(
                        "Ignoring malformed next-page locator '{}' ({}), ending pagination",
                        locator, reason
                    );
                    None
                }
            },
        };

        let next = match next {
            Some(cursor) if self.cursor.as_ref() == Some(&cursor) => match self.policy {
                CursorPolicy::Strict => {
                    return Err(Error::cursor_parse(
                        cursor.to_string(),
                        "next page cursor repeats the current one",
                    ));
                }
                CursorPolicy::Lenient => {
                    warn!(
                        %cursor,
                        "Next page cursor repeats the current one, ending pagination"
                    );
                    None
                }
            },
            other => other,
        };

        self.pages_fetched += 1;
        debug!(
            page = self.pages_fetched,
            items = page.item_count(),
            next = ?next,
            "Fetched page"
        );

        match next {
            Some(cursor) => {
                self.options.apply_cursor(cursor.clone());
                self.cursor = Some(cursor);
            }
            None => self.has_next = false,
        }

        Ok(page.into_items())
    }

    /// Fetch every remaining page and concatenate the items in page order.
    ///
    /// Aborts on the first failed page; items gathered before the failure are
    /// discarded.
    pub async fn get_all(&mut self) -> Result<Vec<PagerItem<L, O>>> {
        let mut all = Vec::new();
        while self.has_next() {
            let mut items = self.get_next().await?;
            all.append(&mut items);
        }
        Ok(all)
    }

    /// Turn the pager into a stream of pages.
    ///
    /// The stream ends after the last page, or right after yielding the first
    /// error.
    pub fn into_stream(self) -> impl Stream<Item = Result<Vec<PagerItem<L, O>>>> + 'a
    where
        L: 'a,
        O: 'a,
    {
        stream::try_unfold(self, |mut pager| async move {
            if !pager.has_next() {
                return Ok::<_, Error>(None);
            }
            let items = pager.get_next().await?;
            Ok(Some((items, pager)))
        })
    }
}

impl<L, O> std::fmt::Debug for Pager<'_, L, O>
where
    L: ListOperation<O>,
    O: CursorOptions + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pager")
            .field("options", &self.options)
            .field("has_next", &self.has_next)
            .field("pages_fetched", &self.pages_fetched)
            .field("policy", &self.policy)
            .field("cursor", &self.cursor)
            .finish_non_exhaustive()
    }
}
