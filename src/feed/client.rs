use std::time::Duration;

use thiserror::Error;

use super::article::Entry;

/// Placeholder title some feeds advertise when they have none configured.
/// Treated the same as a missing title when deriving display names.
pub const GENERIC_FEED_TITLE: &str = "Unknown Feed";

/// Errors from fetching or parsing a single feed URL.
///
/// All variants are per-URL and non-fatal: the fetcher degrades them to an
/// unavailable feed, the validator to a rejected URL.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level error (DNS, connection, TLS, timeout)
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// Non-2xx HTTP response
    #[error("HTTP status {0}")]
    Status(u16),
    /// Body could not be parsed as RSS or Atom
    #[error("feed parse error: {0}")]
    Parse(String),
}

/// A successfully parsed feed: its advertised title (if any) and raw
/// entries in document order.
#[derive(Debug, Clone)]
pub struct Channel {
    pub title: Option<String>,
    pub entries: Vec<Entry>,
}

/// Result of checking whether a URL is a usable feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Valid { title: String },
    Invalid,
}

/// HTTP client + feed parser behind a single fetch-and-parse call.
///
/// Cheap to clone (the inner `reqwest::Client` is an `Arc` handle), so the
/// UI can hand copies to background tasks freely.
#[derive(Debug, Clone)]
pub struct FeedClient {
    http: reqwest::Client,
}

impl FeedClient {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("feedmark/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http })
    }

    /// Fetches the feed at `url` and parses it into a [`Channel`].
    ///
    /// An empty or whitespace-only advertised title is reported as no title
    /// at all, so callers never branch on blank strings.
    pub async fn fetch_channel(&self, url: &str) -> Result<Channel, FetchError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let bytes = response.bytes().await?;
        let parsed =
            feed_rs::parser::parse(bytes.as_ref()).map_err(|e| FetchError::Parse(e.to_string()))?;

        let title = parsed
            .title
            .map(|t| t.content)
            .filter(|t| !t.trim().is_empty());
        let entries = parsed.entries.into_iter().map(Entry::from_parsed).collect();

        Ok(Channel { title, entries })
    }

    /// Determines whether `url` points at a usable feed.
    ///
    /// Valid iff fetch-and-parse succeeds and the feed advertises a
    /// non-empty title. Any network failure, bad status, or parse error is
    /// `Invalid`; there are no retries.
    pub async fn validate(&self, url: &str) -> Validation {
        match self.fetch_channel(url).await {
            Ok(Channel {
                title: Some(title), ..
            }) => Validation::Valid { title },
            Ok(Channel { title: None, .. }) => Validation::Invalid,
            Err(e) => {
                tracing::debug!(url, error = %e, "Feed validation failed");
                Validation::Invalid
            }
        }
    }
}
