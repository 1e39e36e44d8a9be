//! Incrementally paginated feed.
//!
//! [`Feed`] drives a listing surface over any [`PageSource`]: an initial
//! load, pull-to-refresh, and append-on-scroll, with the state machine the
//! surfaces render from. Pages are fetched one at a time with a 1-based
//! counter that only advances after a page reporting more data.
//!
//! Refresh and load-more are tracked as flags orthogonal to the content
//! state, so a surface can keep showing the current items while either is
//! in flight. Overlapping triggers of the same kind are coalesced: a
//! refresh while one is running is a no-op, as is a load-more.

use async_trait::async_trait;

/// One fetched page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub has_more: bool,
}

/// Something that can fetch numbered pages.
#[async_trait]
pub trait PageSource: Send + Sync {
    type Item: Clone + Send + Sync;

    /// Fetch page `page` (1-based).
    async fn fetch(&self, page: u32) -> Result<Page<Self::Item>, String>;
}

/// What a listing surface renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedState<T> {
    /// The first page is in flight and nothing is displayable yet.
    Loading,
    /// The first page came back empty.
    Empty,
    /// At least one item is loaded.
    Success { items: Vec<T>, has_more: bool },
    /// The initial load failed.
    Error(String),
}

/// A paginated feed over a [`PageSource`].
pub struct Feed<S: PageSource> {
    source: S,
    state: FeedState<S::Item>,
    next_page: u32,
    refreshing: bool,
    loading_more: bool,
}

impl<S: PageSource> Feed<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: FeedState::Loading,
            next_page: 1,
            refreshing: false,
            loading_more: false,
        }
    }

    /// The current content state.
    pub fn state(&self) -> &FeedState<S::Item> {
        &self.state
    }

    /// Whether a refresh is in flight.
    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    /// Whether a load-more is in flight.
    pub fn is_loading_more(&self) -> bool {
        self.loading_more
    }

    fn apply_first_page(&mut self, page: Page<S::Item>) {
        if page.items.is_empty() {
            self.state = FeedState::Empty;
            self.next_page = 1;
        } else {
            self.next_page = if page.has_more { 2 } else { 1 };
            self.state = FeedState::Success {
                items: page.items,
                has_more: page.has_more,
            };
        }
    }

    /// Load the first page, discarding whatever is currently shown.
    pub async fn load_initial(&mut self) {
        self.state = FeedState::Loading;
        self.next_page = 1;

        match self.source.fetch(1).await {
            Ok(page) => self.apply_first_page(page),
            Err(message) => self.state = FeedState::Error(message),
        }
    }

    /// Refetch page one and replace the content wholesale.
    ///
    /// The page cursor resets before the fetch, so whatever happens next
    /// starts over from the top. The current items stay on screen while
    /// the fetch runs. A failure leaves them untouched when any exist;
    /// only a feed with nothing loaded falls to [`FeedState::Error`].
    pub async fn refresh(&mut self) {
        if self.refreshing {
            return;
        }
        self.refreshing = true;
        self.next_page = 1;

        let result = self.source.fetch(1).await;
        self.refreshing = false;

        match result {
            Ok(page) => self.apply_first_page(page),
            Err(message) => {
                if !matches!(self.state, FeedState::Success { .. }) {
                    self.state = FeedState::Error(message);
                }
            }
        }
    }

    /// Fetch the next page and append it.
    ///
    /// A no-op unless the feed has content, reports more data, and no
    /// load-more is already in flight. A failed append keeps the loaded
    /// items and leaves `has_more` set so the surface can retry.
    pub async fn load_more(&mut self) {
        if self.loading_more {
            return;
        }
        let FeedState::Success { has_more: true, .. } = self.state else {
            return;
        };
        self.loading_more = true;

        let result = self.source.fetch(self.next_page).await;
        self.loading_more = false;

        let Ok(page) = result else {
            return;
        };
        if let FeedState::Success { items, has_more } = &mut self.state {
            if page.has_more {
                self.next_page += 1;
            }
            items.extend(page.items);
            *has_more = page.has_more;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Page source serving scripted results and recording requested pages.
    struct ScriptedSource {
        results: Mutex<VecDeque<Result<Page<u32>, String>>>,
        fetched: Mutex<Vec<u32>>,
    }

    impl ScriptedSource {
        fn new(results: Vec<Result<Page<u32>, String>>) -> Self {
            Self {
                results: Mutex::new(results.into()),
                fetched: Mutex::new(Vec::new()),
            }
        }

        fn fetched(&self) -> Vec<u32> {
            self.fetched.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PageSource for ScriptedSource {
        type Item = u32;

        async fn fetch(&self, page: u32) -> Result<Page<u32>, String> {
            self.fetched.lock().unwrap().push(page);
            self.results
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(Page { items: Vec::new(), has_more: false }))
        }
    }

    fn page(items: Vec<u32>, has_more: bool) -> Result<Page<u32>, String> {
        Ok(Page { items, has_more })
    }

    #[tokio::test]
    async fn initial_load_fills_success_state() {
        let mut feed = Feed::new(ScriptedSource::new(vec![page(vec![1, 2], true)]));
        assert_eq!(*feed.state(), FeedState::Loading);

        feed.load_initial().await;
        assert_eq!(
            *feed.state(),
            FeedState::Success { items: vec![1, 2], has_more: true }
        );
    }

    #[tokio::test]
    async fn empty_first_page_yields_empty_state() {
        let mut feed = Feed::new(ScriptedSource::new(vec![page(Vec::new(), false)]));
        feed.load_initial().await;
        assert_eq!(*feed.state(), FeedState::Empty);
    }

    #[tokio::test]
    async fn failed_initial_load_yields_error_state() {
        let mut feed = Feed::new(ScriptedSource::new(vec![Err("offline".to_string())]));
        feed.load_initial().await;
        assert_eq!(*feed.state(), FeedState::Error("offline".to_string()));
    }

    #[tokio::test]
    async fn load_more_appends_in_fetch_order() {
        let source = ScriptedSource::new(vec![
            page(vec![1, 2], true),
            page(vec![3, 4], true),
            page(vec![5], false),
        ]);
        let mut feed = Feed::new(source);

        feed.load_initial().await;
        feed.load_more().await;
        feed.load_more().await;

        assert_eq!(
            *feed.state(),
            FeedState::Success { items: vec![1, 2, 3, 4, 5], has_more: false }
        );
        assert_eq!(feed.source.fetched(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn load_more_is_a_no_op_when_exhausted() {
        let mut feed = Feed::new(ScriptedSource::new(vec![page(vec![1], false)]));
        feed.load_initial().await;
        feed.load_more().await;
        feed.load_more().await;

        assert_eq!(feed.source.fetched(), vec![1]);
        assert_eq!(
            *feed.state(),
            FeedState::Success { items: vec![1], has_more: false }
        );
    }

    #[tokio::test]
    async fn failed_load_more_keeps_items_and_allows_retry() {
        let source = ScriptedSource::new(vec![
            page(vec![1, 2], true),
            Err("offline".to_string()),
            page(vec![3], false),
        ]);
        let mut feed = Feed::new(source);

        feed.load_initial().await;
        feed.load_more().await;
        assert_eq!(
            *feed.state(),
            FeedState::Success { items: vec![1, 2], has_more: true }
        );

        // The failed attempt did not advance the page counter.
        feed.load_more().await;
        assert_eq!(feed.source.fetched(), vec![1, 2, 2]);
        assert_eq!(
            *feed.state(),
            FeedState::Success { items: vec![1, 2, 3], has_more: false }
        );
    }

    #[tokio::test]
    async fn refresh_replaces_content_wholesale() {
        let source = ScriptedSource::new(vec![
            page(vec![1, 2], true),
            page(vec![3, 4], true),
            page(vec![9], true),
        ]);
        let mut feed = Feed::new(source);

        feed.load_initial().await;
        feed.load_more().await;
        feed.refresh().await;

        assert_eq!(
            *feed.state(),
            FeedState::Success { items: vec![9], has_more: true }
        );
        // The refresh refetched page one and reset the cursor after it.
        assert_eq!(feed.source.fetched(), vec![1, 2, 1]);
        assert!(!feed.is_refreshing());
    }

    #[tokio::test]
    async fn failed_refresh_keeps_existing_items() {
        let source = ScriptedSource::new(vec![
            page(vec![1, 2], true),
            Err("offline".to_string()),
        ]);
        let mut feed = Feed::new(source);

        feed.load_initial().await;
        feed.refresh().await;

        assert_eq!(
            *feed.state(),
            FeedState::Success { items: vec![1, 2], has_more: true }
        );
        assert!(!feed.is_refreshing());
    }

    #[tokio::test]
    async fn refresh_resets_cursor_before_the_fetch() {
        let source = ScriptedSource::new(vec![
            page(vec![1, 2], true),
            page(vec![3], true),
            Err("offline".to_string()),
            page(vec![9], true),
        ]);
        let mut feed = Feed::new(source);

        feed.load_initial().await;
        feed.load_more().await;
        feed.refresh().await;

        // The failed refresh kept the items but already moved the cursor
        // back to the top, so the next append starts over from page one.
        assert_eq!(
            *feed.state(),
            FeedState::Success { items: vec![1, 2, 3], has_more: true }
        );
        feed.load_more().await;
        assert_eq!(feed.source.fetched(), vec![1, 2, 1, 1]);
    }

    #[tokio::test]
    async fn failed_refresh_with_no_content_becomes_error() {
        let source = ScriptedSource::new(vec![
            page(Vec::new(), false),
            Err("offline".to_string()),
        ]);
        let mut feed = Feed::new(source);

        feed.load_initial().await;
        assert_eq!(*feed.state(), FeedState::Empty);

        feed.refresh().await;
        assert_eq!(*feed.state(), FeedState::Error("offline".to_string()));
    }
}
