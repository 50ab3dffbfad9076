//! Tests for pagination module

use super::*;
use crate::error::{Error, Result};
use crate::types::CursorPolicy;
use async_trait::async_trait;
use futures::TryStreamExt;
use pretty_assertions::assert_eq;
use std::collections::VecDeque;
use std::sync::Mutex;

// ============================================================================
// Mock list operation
// ============================================================================

#[derive(Debug, Clone, Default)]
struct OffsetOptions {
    name: Option<String>,
    limit: Option<i64>,
    offset: Option<i64>,
}

impl CursorOptions for OffsetOptions {
    const STYLE: CursorStyle = CursorStyle::Offset;

    fn cursor_is_set(&self) -> bool {
        self.offset.is_some()
    }

    fn apply_cursor(&mut self, cursor: Cursor) {
        if let Cursor::Offset(offset) = cursor {
            self.offset = Some(offset);
        }
    }

    fn validate(&self) -> Result<()> {
        match self.name.as_deref() {
            Some("") => Err(Error::required("name")),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Default)]
struct TokenOptions {
    limit: Option<i64>,
    start: Option<String>,
}

impl CursorOptions for TokenOptions {
    const STYLE: CursorStyle = CursorStyle::Token;

    fn cursor_is_set(&self) -> bool {
        self.start.is_some()
    }

    fn apply_cursor(&mut self, cursor: Cursor) {
        if let Cursor::Start(start) = cursor {
            self.start = Some(start);
        }
    }
}

#[derive(Debug)]
struct MockPage {
    items: Vec<String>,
    next_url: Option<String>,
    next_token: Option<String>,
}

impl Paginated for MockPage {
    type Item = String;

    fn next_locator(&self) -> Option<NextLocator<'_>> {
        self.next_token
            .as_deref()
            .map(NextLocator::Cursor)
            .or_else(|| self.next_url.as_deref().map(NextLocator::Url))
    }

    fn item_count(&self) -> usize {
        self.items.len()
    }

    fn into_items(self) -> Vec<String> {
        self.items
    }
}

/// Replays canned responses and records the cursor each call was made with
#[derive(Default)]
struct MockList {
    responses: Mutex<VecDeque<Result<MockPage>>>,
    cursors_seen: Mutex<Vec<Option<String>>>,
}

impl MockList {
    fn new(responses: Vec<Result<MockPage>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            cursors_seen: Mutex::new(Vec::new()),
        }
    }

    fn record(&self, cursor: Option<String>) -> Result<MockPage> {
        self.cursors_seen.lock().unwrap().push(cursor);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected list call")
    }

    fn cursors_seen(&self) -> Vec<Option<String>> {
        self.cursors_seen.lock().unwrap().clone()
    }

    fn calls(&self) -> usize {
        self.cursors_seen.lock().unwrap().len()
    }
}

#[async_trait]
impl ListOperation<OffsetOptions> for MockList {
    type Page = MockPage;

    async fn list(&self, options: &OffsetOptions) -> Result<MockPage> {
        self.record(options.offset.map(|o| o.to_string()))
    }
}

#[async_trait]
impl ListOperation<TokenOptions> for MockList {
    type Page = MockPage;

    async fn list(&self, options: &TokenOptions) -> Result<MockPage> {
        self.record(options.start.clone())
    }
}

fn page(items: &[&str], next_url: Option<&str>) -> Result<MockPage> {
    Ok(MockPage {
        items: items.iter().map(|s| (*s).to_string()).collect(),
        next_url: next_url.map(str::to_string),
        next_token: None,
    })
}

fn token_page(items: &[&str], next_token: Option<&str>) -> Result<MockPage> {
    Ok(MockPage {
        items: items.iter().map(|s| (*s).to_string()).collect(),
        next_url: None,
        next_token: next_token.map(str::to_string),
    })
}

fn unavailable() -> Result<MockPage> {
    Err(Error::http_status(503, "service unavailable"))
}

fn three_offset_pages() -> MockList {
    MockList::new(vec![
        page(&["A"], Some("https://cm.example.com/api/v1-beta/list?limit=1&offset=1")),
        page(&["B"], Some("https://cm.example.com/api/v1-beta/list?limit=1&offset=2")),
        page(&["C"], None),
    ])
}

fn limit_one() -> OffsetOptions {
    OffsetOptions {
        limit: Some(1),
        ..Default::default()
    }
}

// ============================================================================
// Offset-style traversal
// ============================================================================

#[tokio::test]
async fn test_offset_pages_one_at_a_time() {
    let list = three_offset_pages();
    let mut pager = Pager::new(&list, &limit_one()).unwrap();

    assert!(pager.has_next());
    assert_eq!(pager.get_next().await.unwrap(), vec!["A"]);
    assert!(pager.has_next());
    assert_eq!(pager.options().offset, Some(1));

    assert_eq!(pager.get_next().await.unwrap(), vec!["B"]);
    assert!(pager.has_next());

    assert_eq!(pager.get_next().await.unwrap(), vec!["C"]);
    assert!(!pager.has_next());
    assert_eq!(pager.pages_fetched(), 3);

    assert_eq!(
        list.cursors_seen(),
        vec![None, Some("1".to_string()), Some("2".to_string())]
    );
}

#[tokio::test]
async fn test_get_next_after_exhaustion_fails() {
    let list = three_offset_pages();
    let mut pager = Pager::new(&list, &limit_one()).unwrap();
    pager.get_all().await.unwrap();

    let err = pager.get_next().await.unwrap_err();
    assert!(matches!(err, Error::IteratorExhausted));
    assert_eq!(list.calls(), 3);
}

#[tokio::test]
async fn test_get_all_concatenates_in_page_order() {
    let list = MockList::new(vec![
        page(&["A", "B"], Some("/list?offset=2")),
        page(&["C"], Some("/list?offset=3")),
        page(&["D", "E", "F"], None),
    ]);
    let mut pager = Pager::new(&list, &OffsetOptions::default()).unwrap();

    let all = pager.get_all().await.unwrap();
    assert_eq!(all, vec!["A", "B", "C", "D", "E", "F"]);
    assert!(!pager.has_next());
}

#[tokio::test]
async fn test_exhaustion_is_monotonic() {
    let list = MockList::new(vec![page(&["only"], None)]);
    let mut pager = Pager::new(&list, &OffsetOptions::default()).unwrap();

    pager.get_next().await.unwrap();
    for _ in 0..3 {
        assert!(!pager.has_next());
        assert!(pager.get_next().await.is_err());
    }
    assert!(pager.get_all().await.unwrap().is_empty());
    assert_eq!(list.calls(), 1);
}

#[tokio::test]
async fn test_caller_options_are_not_mutated() {
    let list = three_offset_pages();
    let original = limit_one();
    let mut pager = Pager::new(&list, &original).unwrap();

    pager.get_next().await.unwrap();
    pager.get_next().await.unwrap();

    assert_eq!(pager.options().offset, Some(2));
    assert_eq!(original.offset, None);
    assert_eq!(original.limit, Some(1));
}

#[tokio::test]
async fn test_failed_fetch_does_not_advance_cursor() {
    let list = MockList::new(vec![
        page(&["A"], Some("/list?offset=1")),
        unavailable(),
        page(&["B"], None),
    ]);
    let mut pager = Pager::new(&list, &limit_one()).unwrap();

    assert_eq!(pager.get_next().await.unwrap(), vec!["A"]);

    let err = pager.get_next().await.unwrap_err();
    assert!(matches!(err, Error::HttpStatus { status: 503, .. }));
    assert!(pager.has_next());
    assert_eq!(pager.options().offset, Some(1));
    assert_eq!(pager.pages_fetched(), 1);

    assert_eq!(pager.get_next().await.unwrap(), vec!["B"]);
    assert_eq!(
        list.cursors_seen(),
        vec![None, Some("1".to_string()), Some("1".to_string())]
    );
}

#[tokio::test]
async fn test_error_on_first_page_leaves_pager_fresh() {
    let list = MockList::new(vec![unavailable(), page(&["A"], None)]);
    let mut pager = Pager::new(&list, &OffsetOptions::default()).unwrap();

    assert!(pager.get_next().await.is_err());
    assert!(pager.has_next());
    assert_eq!(pager.options().offset, None);
    assert_eq!(pager.get_next().await.unwrap(), vec!["A"]);
}

#[tokio::test]
async fn test_empty_page_is_not_exhaustion() {
    let list = MockList::new(vec![
        page(&[], Some("/list?offset=10")),
        page(&["late"], None),
    ]);
    let mut pager = Pager::new(&list, &OffsetOptions::default()).unwrap();

    assert!(pager.get_next().await.unwrap().is_empty());
    assert!(pager.has_next());
    assert_eq!(pager.get_next().await.unwrap(), vec!["late"]);
    assert_eq!(list.calls(), 2);
}

#[tokio::test]
async fn test_get_all_aborts_without_partial_results() {
    let list = MockList::new(vec![
        page(&["1"], Some("/list?offset=1")),
        page(&["2"], Some("/list?offset=2")),
        unavailable(),
        page(&["4"], Some("/list?offset=4")),
        page(&["5"], None),
    ]);
    let mut pager = Pager::new(&list, &OffsetOptions::default()).unwrap();

    let result = pager.get_all().await;
    assert!(matches!(result, Err(Error::HttpStatus { status: 503, .. })));
    assert_eq!(list.calls(), 3);
}

// ============================================================================
// Token-style traversal
// ============================================================================

#[tokio::test]
async fn test_token_pages_with_raw_cursor() {
    let list = MockList::new(vec![
        token_page(&["X"], Some("tok123")),
        token_page(&["Y"], None),
    ]);
    let mut pager = Pager::new(&list, &TokenOptions::default()).unwrap();

    assert_eq!(pager.get_all().await.unwrap(), vec!["X", "Y"]);
    assert_eq!(list.cursors_seen(), vec![None, Some("tok123".to_string())]);
}

#[tokio::test]
async fn test_token_pages_with_next_url() {
    let list = MockList::new(vec![
        page(
            &["X"],
            Some("/api/v1-beta/catalogs/c1/audits?limit=1&start=g1AAAA%3D%3D"),
        ),
        page(&["Y"], Some("")),
    ]);
    let options = TokenOptions {
        limit: Some(1),
        start: None,
    };
    let mut pager = Pager::new(&list, &options).unwrap();

    assert_eq!(pager.get_all().await.unwrap(), vec!["X", "Y"]);
    assert_eq!(list.cursors_seen(), vec![None, Some("g1AAAA==".to_string())]);
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_new_rejects_preset_offset() {
    let list = MockList::default();
    let options = OffsetOptions {
        offset: Some(5),
        ..Default::default()
    };

    let err = Pager::new(&list, &options).unwrap_err();
    match err {
        Error::InvalidArgument { message } => assert!(message.contains("'offset'")),
        other => panic!("Expected InvalidArgument, got {other:?}"),
    }
}

#[test]
fn test_new_rejects_preset_start() {
    let list = MockList::default();
    let options = TokenOptions {
        limit: None,
        start: Some("abc".to_string()),
    };

    assert!(matches!(
        Pager::new(&list, &options),
        Err(Error::InvalidArgument { .. })
    ));
}

#[test]
fn test_new_runs_option_validation() {
    let list = MockList::default();
    let options = OffsetOptions {
        name: Some(String::new()),
        ..Default::default()
    };

    assert!(matches!(
        Pager::new(&list, &options),
        Err(Error::InvalidArgument { .. })
    ));
    assert_eq!(list.calls(), 0);
}

// ============================================================================
// Malformed locators
// ============================================================================

#[tokio::test]
async fn test_lenient_policy_ends_on_missing_param() {
    let list = MockList::new(vec![page(&["A"], Some("/list?limit=1&page=2"))]);
    let mut pager = Pager::new(&list, &OffsetOptions::default()).unwrap();

    assert_eq!(pager.get_next().await.unwrap(), vec!["A"]);
    assert!(!pager.has_next());
}

#[tokio::test]
async fn test_lenient_policy_ends_on_non_integer_offset() {
    let list = MockList::new(vec![page(&["A"], Some("/list?offset=ten"))]);
    let mut pager = Pager::new(&list, &OffsetOptions::default()).unwrap();

    assert_eq!(pager.get_all().await.unwrap(), vec!["A"]);
    assert!(!pager.has_next());
}

#[tokio::test]
async fn test_strict_policy_fails_on_malformed_locator() {
    let list = MockList::new(vec![
        page(&["A"], Some("/list?offset=1")),
        page(&["B"], Some("/list?offset=ten")),
    ]);
    let mut pager = Pager::new(&list, &OffsetOptions::default())
        .unwrap()
        .with_cursor_policy(CursorPolicy::Strict);

    pager.get_next().await.unwrap();
    let err = pager.get_next().await.unwrap_err();
    match err {
        Error::CursorParse { locator, message } => {
            assert_eq!(locator, "/list?offset=ten");
            assert!(message.contains("ten"));
        }
        other => panic!("Expected CursorParse, got {other:?}"),
    }
    assert!(pager.has_next());
    assert_eq!(pager.pages_fetched(), 1);
    assert_eq!(pager.options().offset, Some(1));
}

#[tokio::test]
async fn test_strict_policy_accepts_well_formed_locators() {
    let list = three_offset_pages();
    let mut pager = Pager::new(&list, &limit_one())
        .unwrap()
        .with_cursor_policy(CursorPolicy::Strict);

    assert_eq!(pager.get_all().await.unwrap(), vec!["A", "B", "C"]);
}

#[tokio::test]
async fn test_repeated_offset_ends_get_all() {
    let list = MockList::new(vec![
        page(&["A"], Some("/list?limit=1&offset=1")),
        page(&["B"], Some("/list?limit=1&offset=1")),
    ]);
    let mut pager = Pager::new(&list, &limit_one()).unwrap();

    assert_eq!(pager.get_all().await.unwrap(), vec!["A", "B"]);
    assert!(!pager.has_next());
    assert_eq!(list.calls(), 2);
}

#[tokio::test]
async fn test_repeated_token_ends_traversal() {
    let list = MockList::new(vec![
        token_page(&["A"], Some("tok-2")),
        token_page(&["B"], Some("tok-3")),
        token_page(&["C"], Some("tok-3")),
    ]);
    let mut pager = Pager::new(&list, &TokenOptions::default()).unwrap();

    assert_eq!(pager.get_all().await.unwrap(), vec!["A", "B", "C"]);
    assert_eq!(
        list.cursors_seen(),
        vec![None, Some("tok-2".to_string()), Some("tok-3".to_string())]
    );
}

#[tokio::test]
async fn test_strict_policy_fails_on_repeated_cursor() {
    let list = MockList::new(vec![
        page(&["A"], Some("/list?offset=1")),
        page(&["B"], Some("/list?offset=1")),
    ]);
    let mut pager = Pager::new(&list, &OffsetOptions::default())
        .unwrap()
        .with_cursor_policy(CursorPolicy::Strict);

    let err = pager.get_all().await.unwrap_err();
    assert!(matches!(err, Error::CursorParse { ref locator, .. } if locator == "1"));
    assert_eq!(pager.pages_fetched(), 1);
    assert_eq!(list.calls(), 2);
}

// ============================================================================
// Streams
// ============================================================================

#[tokio::test]
async fn test_into_stream_yields_pages() {
    let list = three_offset_pages();
    let pager = Pager::new(&list, &limit_one()).unwrap();

    let pages: Vec<Vec<String>> = pager.into_stream().try_collect().await.unwrap();
    assert_eq!(pages, vec![vec!["A"], vec!["B"], vec!["C"]]);
}

#[tokio::test]
async fn test_into_stream_stops_after_error() {
    let list = MockList::new(vec![page(&["A"], Some("/list?offset=1")), unavailable()]);
    let pager = Pager::new(&list, &OffsetOptions::default()).unwrap();

    let results: Vec<Result<Vec<String>>> = futures::StreamExt::collect(pager.into_stream()).await;
    assert_eq!(results.len(), 2);
    assert!(results[0].is_ok());
    assert!(results[1].is_err());
}

// ============================================================================
// Cursor resolution
// ============================================================================

#[test]
fn test_resolve_next_cursor() {
    assert_eq!(
        resolve_next_cursor(CursorStyle::Offset, None),
        NextCursor::End
    );
    assert_eq!(
        resolve_next_cursor(CursorStyle::Offset, Some(NextLocator::Url("  "))),
        NextCursor::End
    );
    assert_eq!(
        resolve_next_cursor(CursorStyle::Offset, Some(NextLocator::Url("/x?offset=40"))),
        NextCursor::Continue(Cursor::Offset(40))
    );
    assert_eq!(
        resolve_next_cursor(CursorStyle::Token, Some(NextLocator::Cursor("abc"))),
        NextCursor::Continue(Cursor::Start("abc".to_string()))
    );
    assert_eq!(
        resolve_next_cursor(CursorStyle::Token, Some(NextLocator::Url("/x?start=s1&offset=9"))),
        NextCursor::Continue(Cursor::Start("s1".to_string()))
    );
    assert!(matches!(
        resolve_next_cursor(CursorStyle::Offset, Some(NextLocator::Url("/x?offset=-3"))),
        NextCursor::Malformed { .. }
    ));
    assert!(matches!(
        resolve_next_cursor(CursorStyle::Token, Some(NextLocator::Url("/x?offset=9"))),
        NextCursor::Malformed { .. }
    ));
}

#[test]
fn test_cursor_style_param_names() {
    assert_eq!(CursorStyle::Token.param_name(), "start");
    assert_eq!(CursorStyle::Offset.param_name(), "offset");
}
