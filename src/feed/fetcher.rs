use crate::store::Subscription;

use super::article::Entry;
use super::client::{FeedClient, GENERIC_FEED_TITLE};

/// Per-subscription outcome of one fetch cycle.
#[derive(Debug, Clone)]
pub enum FeedResult {
    /// The feed was fetched and parsed; `title` is the display title
    /// resolved against the subscription's stored name.
    Fetched {
        title: String,
        entries: Vec<Entry>,
    },
    /// The fetch failed; the subscription's stored name stands in so the
    /// feed stays visible in the UI.
    Unavailable { fallback_title: String },
}

impl FeedResult {
    /// Display title regardless of outcome.
    pub fn title(&self) -> &str {
        match self {
            FeedResult::Fetched { title, .. } => title,
            FeedResult::Unavailable { fallback_title } => fallback_title,
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, FeedResult::Unavailable { .. })
    }
}

/// Insertion-ordered mapping from subscription URL to [`FeedResult`],
/// produced by one fetch cycle.
///
/// First-occurrence order is preserved for rendering; re-inserting a URL
/// replaces its slot in place, so duplicate subscriptions collapse to one
/// entry and repeated cycles are idempotent.
#[derive(Debug, Clone, Default)]
pub struct FeedSet {
    slots: Vec<(String, FeedResult)>,
}

impl FeedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, url: String, result: FeedResult) {
        if let Some(slot) = self.slots.iter_mut().find(|(u, _)| *u == url) {
            slot.1 = result;
        } else {
            self.slots.push((url, result));
        }
    }

    pub fn get(&self, url: &str) -> Option<&FeedResult> {
        self.slots
            .iter()
            .find(|(u, _)| u == url)
            .map(|(_, result)| result)
    }

    /// Slot at `index`, in first-occurrence order.
    pub fn slot(&self, index: usize) -> Option<(&str, &FeedResult)> {
        self.slots.get(index).map(|(u, r)| (u.as_str(), r))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FeedResult)> {
        self.slots.iter().map(|(u, r)| (u.as_str(), r))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Runs one fetch cycle: every subscription, sequentially, in input order.
///
/// Failures are per-URL and never abort the rest of the cycle: an
/// unreachable feed becomes an `Unavailable` slot with the subscription's
/// stored name as its title. A fetched feed keeps its advertised title
/// unless that title is missing or the generic placeholder, in which case
/// the stored name wins.
pub async fn fetch_all(client: &FeedClient, subscriptions: &[Subscription]) -> FeedSet {
    tracing::info!(feeds = subscriptions.len(), "Starting fetch cycle");

    let mut set = FeedSet::new();
    for sub in subscriptions {
        let result = match client.fetch_channel(&sub.url).await {
            Ok(channel) => {
                let title = channel
                    .title
                    .filter(|t| t != GENERIC_FEED_TITLE)
                    .unwrap_or_else(|| sub.name.clone());
                FeedResult::Fetched {
                    title,
                    entries: channel.entries,
                }
            }
            Err(e) => {
                tracing::warn!(url = %sub.url, error = %e, "Feed unavailable");
                FeedResult::Unavailable {
                    fallback_title: sub.name.clone(),
                }
            }
        };
        set.insert(sub.url.clone(), result);
    }

    tracing::info!(fetched = set.len(), "Fetch cycle complete");
    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const VALID_RSS: &str = r#"<?xml version="1.0"?>
<rss version="2.0"><channel>
    <title>Example News</title>
    <item><title>First</title><link>https://example.com/1</link></item>
    <item><title>Second</title><link>https://example.com/2</link></item>
</channel></rss>"#;

    const GENERIC_TITLE_RSS: &str = r#"<?xml version="1.0"?>
<rss version="2.0"><channel>
    <title>Unknown Feed</title>
    <item><title>Entry</title></item>
</channel></rss>"#;

    fn sub(name: &str, url: String) -> Subscription {
        Subscription {
            name: name.to_string(),
            url,
        }
    }

    async fn client() -> FeedClient {
        FeedClient::new(Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn partial_failure_keeps_remaining_fetches() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/good/rss"))
            .respond_with(ResponseTemplate::new(200).set_body_string(VALID_RSS))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/gone/rss"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let subs = vec![
            sub("Dead", format!("{}/gone/rss", server.uri())),
            sub("Alive", format!("{}/good/rss", server.uri())),
        ];
        let set = fetch_all(&client().await, &subs).await;

        assert_eq!(set.len(), 2);

        // Input order preserved: the failed feed still occupies slot 0.
        let (_, first) = set.slot(0).unwrap();
        assert!(first.is_unavailable());
        assert_eq!(first.title(), "Dead");

        match set.slot(1).unwrap().1 {
            FeedResult::Fetched { title, entries } => {
                assert_eq!(title, "Example News");
                assert_eq!(entries.len(), 2);
                assert_eq!(entries[0].title.as_deref(), Some("First"));
            }
            other => panic!("expected Fetched, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn generic_title_falls_back_to_stored_name() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(GENERIC_TITLE_RSS))
            .mount(&server)
            .await;

        let subs = vec![sub("My Name For It", format!("{}/rss", server.uri()))];
        let set = fetch_all(&client().await, &subs).await;

        assert_eq!(set.slot(0).unwrap().1.title(), "My Name For It");
    }

    #[tokio::test]
    async fn duplicate_subscriptions_collapse_to_one_slot() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(VALID_RSS))
            .mount(&server)
            .await;

        let url = format!("{}/rss", server.uri());
        let subs = vec![sub("First Label", url.clone()), sub("Second Label", url)];
        let set = fetch_all(&client().await, &subs).await;

        assert_eq!(set.len(), 1);
    }

    #[test]
    fn feed_set_replaces_in_place() {
        let mut set = FeedSet::new();
        set.insert(
            "https://a.example/rss".to_string(),
            FeedResult::Unavailable {
                fallback_title: "A".to_string(),
            },
        );
        set.insert(
            "https://b.example/rss".to_string(),
            FeedResult::Unavailable {
                fallback_title: "B".to_string(),
            },
        );
        set.insert(
            "https://a.example/rss".to_string(),
            FeedResult::Fetched {
                title: "A Live".to_string(),
                entries: Vec::new(),
            },
        );

        assert_eq!(set.len(), 2);
        // Replacement kept the original position.
        assert_eq!(set.slot(0).unwrap().1.title(), "A Live");
        assert_eq!(set.slot(1).unwrap().1.title(), "B");
        assert!(!set.get("https://a.example/rss").unwrap().is_unavailable());
    }
}
