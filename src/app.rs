use std::borrow::Cow;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

use crate::feed::{articles_for, Article, FeedClient, FeedResult, FeedSet};
use crate::store::{AddOutcome, FeedStore, StoreError, Subscription};

/// How long transient status notifications stay visible.
const STATUS_TTL: Duration = Duration::from_secs(5);

/// Which panel has focus in the browse view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Feeds,
    Articles,
}

/// Active input field of the add-feed dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogField {
    Url,
    Name,
}

/// State machine for the add-feed dialog.
///
/// At most one dialog, and therefore at most one add, is ever in flight,
/// which is what lets the store skip locking against the fetch worker.
#[derive(Debug, Clone)]
pub enum AddFeedState {
    /// User is typing the URL and optional display name.
    Input {
        url: String,
        name: String,
        field: DialogField,
    },
    /// Validation and append are running on a background task.
    Submitting { url: String, name: String },
}

/// Events posted back to the UI loop by background tasks.
pub enum AppEvent {
    /// One full fetch cycle finished. `generation` is the refresh token the
    /// cycle was started with; stale generations are discarded.
    RefreshComplete { generation: u64, feeds: FeedSet },
    /// An add-feed attempt finished (validation + append).
    AddFeedDone {
        url: String,
        result: Result<AddOutcome, StoreError>,
    },
}

/// Central application state.
///
/// Holds immutable snapshots of the loaded subscriptions and the last fetch
/// cycle's results; both are replaced wholesale on load/refresh rather than
/// mutated in place.
pub struct App {
    pub store: FeedStore,
    pub client: FeedClient,

    // Data snapshots
    pub subscriptions: Vec<Subscription>,
    pub feed_set: Option<Arc<FeedSet>>,
    /// Articles of the feed opened with Enter, normalized once on open.
    pub articles: Vec<Article>,

    // UI state
    pub focus: Focus,
    pub selected_feed: usize,
    pub selected_article: usize,
    /// Feed slot the article list was populated from.
    pub opened_feed: Option<usize>,
    /// Article shown in the detail panel, as an index into `articles`.
    pub detail: Option<usize>,
    pub detail_scroll: u16,
    pub add_dialog: Option<AddFeedState>,

    // Refresh re-entrancy token: the generation of the outstanding cycle,
    // if any. A bare bool would work today but gives stale completions no
    // identity to be rejected by.
    refresh_generation: u64,
    refresh_in_flight: Option<u64>,

    pub status_message: Option<(Cow<'static, str>, Instant)>,
    pub needs_redraw: bool,
}

impl App {
    pub fn new(store: FeedStore, client: FeedClient) -> Self {
        let subscriptions = store.load();
        Self {
            store,
            client,
            subscriptions,
            feed_set: None,
            articles: Vec::new(),
            focus: Focus::Feeds,
            selected_feed: 0,
            selected_article: 0,
            opened_feed: None,
            detail: None,
            detail_scroll: 0,
            add_dialog: None,
            refresh_generation: 0,
            refresh_in_flight: None,
            status_message: None,
            needs_redraw: true,
        }
    }

    /// Shows a transient notification in the status bar.
    pub fn set_status(&mut self, msg: impl Into<Cow<'static, str>>) {
        self.status_message = Some((msg.into(), Instant::now()));
        self.needs_redraw = true;
    }

    /// Clears the status message once its TTL has elapsed. Returns true if
    /// a message was cleared.
    pub fn clear_expired_status(&mut self) -> bool {
        match &self.status_message {
            Some((_, shown_at)) if shown_at.elapsed() >= STATUS_TTL => {
                self.status_message = None;
                true
            }
            _ => false,
        }
    }

    /// Re-reads the subscription file, replacing the snapshot wholesale.
    pub fn reload_subscriptions(&mut self) {
        self.subscriptions = self.store.load();
    }

    /// Claims the refresh token for a new fetch cycle, or `None` while one
    /// is already in flight (the caller surfaces that as a no-op).
    pub fn begin_refresh(&mut self) -> Option<u64> {
        if self.refresh_in_flight.is_some() {
            return None;
        }
        self.refresh_generation = self.refresh_generation.wrapping_add(1);
        self.refresh_in_flight = Some(self.refresh_generation);
        Some(self.refresh_generation)
    }

    pub fn refresh_in_flight(&self) -> bool {
        self.refresh_in_flight.is_some()
    }

    /// Installs a completed fetch cycle, swapping the whole snapshot in
    /// atomically. Results from a cycle that no longer holds the token are
    /// dropped. Returns true if the snapshot was installed.
    pub fn complete_refresh(&mut self, generation: u64, feeds: FeedSet) -> bool {
        if self.refresh_in_flight != Some(generation) {
            tracing::debug!(generation, "Dropping stale fetch cycle result");
            return false;
        }
        self.refresh_in_flight = None;
        self.feed_set = Some(Arc::new(feeds));
        self.selected_feed = 0;
        self.opened_feed = None;
        self.articles = Vec::new();
        self.selected_article = 0;
        self.detail = None;
        self.detail_scroll = 0;
        true
    }

    pub fn feed_count(&self) -> usize {
        self.feed_set.as_ref().map_or(0, |set| set.len())
    }

    /// Currently highlighted feed slot.
    pub fn selected_slot(&self) -> Option<(&str, &FeedResult)> {
        self.feed_set.as_ref()?.slot(self.selected_feed)
    }

    /// Feed slot the article list was populated from.
    pub fn opened_slot(&self) -> Option<(&str, &FeedResult)> {
        self.feed_set.as_ref()?.slot(self.opened_feed?)
    }

    /// Populates the article list from the highlighted feed.
    pub fn open_selected_feed(&mut self) {
        let articles = self
            .selected_slot()
            .map(|(_, result)| articles_for(result))
            .unwrap_or_default();
        self.articles = articles;
        self.opened_feed = Some(self.selected_feed);
        self.selected_article = 0;
        self.detail = None;
        self.detail_scroll = 0;
    }

    /// Currently highlighted article, if any.
    pub fn selected_article(&self) -> Option<&Article> {
        self.articles.get(self.selected_article)
    }

    /// Article shown in the detail panel, if one was opened.
    pub fn detail_article(&self) -> Option<&Article> {
        self.detail.and_then(|i| self.articles.get(i))
    }

    pub fn nav_down(&mut self) {
        match self.focus {
            Focus::Feeds => {
                let count = self.feed_count();
                if count > 0 && self.selected_feed + 1 < count {
                    self.selected_feed += 1;
                }
            }
            Focus::Articles => {
                if !self.articles.is_empty() && self.selected_article + 1 < self.articles.len() {
                    self.selected_article += 1;
                }
            }
        }
    }

    pub fn nav_up(&mut self) {
        match self.focus {
            Focus::Feeds => self.selected_feed = self.selected_feed.saturating_sub(1),
            Focus::Articles => self.selected_article = self.selected_article.saturating_sub(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::Entry;
    use std::time::Duration;

    fn test_app() -> App {
        let store = FeedStore::new("/tmp/feedmark-test-feeds.md");
        let client = FeedClient::new(Duration::from_secs(1)).unwrap();
        App::new(store, client)
    }

    fn one_feed_set() -> FeedSet {
        let mut set = FeedSet::new();
        set.insert(
            "https://example.com/rss".to_string(),
            FeedResult::Fetched {
                title: "Example".to_string(),
                entries: vec![Entry {
                    title: Some("Post".to_string()),
                    ..Entry::default()
                }],
            },
        );
        set
    }

    #[tokio::test]
    async fn refresh_token_rejects_reentry() {
        let mut app = test_app();

        let generation = app.begin_refresh().expect("first refresh starts");
        assert!(app.begin_refresh().is_none(), "second refresh is rejected");

        assert!(app.complete_refresh(generation, one_feed_set()));
        assert!(!app.refresh_in_flight());
        assert!(app.begin_refresh().is_some(), "token free again");
    }

    #[tokio::test]
    async fn stale_completion_is_dropped() {
        let mut app = test_app();

        let stale = app.begin_refresh().unwrap();
        assert!(app.complete_refresh(stale, FeedSet::new()));

        // A completion carrying an old generation must not clobber state.
        let current = app.begin_refresh().unwrap();
        assert!(!app.complete_refresh(stale, one_feed_set()));
        assert!(app.refresh_in_flight(), "token still held by live cycle");
        assert!(app.complete_refresh(current, one_feed_set()));
    }

    #[tokio::test]
    async fn open_selected_feed_populates_articles() {
        let mut app = test_app();
        let generation = app.begin_refresh().unwrap();
        app.complete_refresh(generation, one_feed_set());

        assert!(app.articles.is_empty());
        app.open_selected_feed();
        assert_eq!(app.articles.len(), 1);
        assert_eq!(app.articles[0].title, "Post");
        assert_eq!(app.opened_feed, Some(0));
    }

    #[tokio::test]
    async fn navigation_is_clamped() {
        let mut app = test_app();
        let generation = app.begin_refresh().unwrap();
        app.complete_refresh(generation, one_feed_set());

        app.nav_up();
        assert_eq!(app.selected_feed, 0);
        app.nav_down();
        assert_eq!(app.selected_feed, 0, "single feed, cannot move past end");
    }
}
