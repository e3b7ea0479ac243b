use chrono::{DateTime, Utc};

use crate::util::strip_tags;

use super::fetcher::FeedResult;

/// Raw per-item snapshot as reported by the parser. Every field is optional;
/// filling in defaults is the normalizer's job, so nothing downstream of
/// [`normalize`] ever branches on field presence.
///
/// `published` is an opaque display string rendered once at the parse
/// boundary; the core never does timestamp arithmetic on it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entry {
    pub title: Option<String>,
    pub published: Option<String>,
    pub link: Option<String>,
    pub summary_html: Option<String>,
}

impl Entry {
    /// Converts a `feed-rs` entry into our raw snapshot.
    ///
    /// The first link is taken as the item link; `updated` stands in for a
    /// missing publication date; Atom feeds without a summary fall back to
    /// the content body.
    pub fn from_parsed(entry: feed_rs::model::Entry) -> Self {
        let link = entry.links.first().map(|l| l.href.clone());
        let published = entry.published.or(entry.updated).map(display_date);
        let summary_html = entry
            .summary
            .map(|s| s.content)
            .or_else(|| entry.content.and_then(|c| c.body));
        let title = entry.title.map(|t| t.content);

        Self {
            title,
            published,
            link,
            summary_html,
        }
    }
}

/// Renders a parsed timestamp into the opaque display string carried on
/// `Entry::published`. The core never computes with dates after this.
fn display_date(dt: DateTime<Utc>) -> String {
    dt.to_rfc2822()
}

/// Display-ready projection of an [`Entry`]: placeholders filled in, HTML
/// stripped, owning feed title attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub title: String,
    pub published: String,
    pub link: String,
    pub summary_text: String,
    pub feed_title: String,
}

const NO_TITLE: &str = "No Title";
const NO_DATE: &str = "Unknown Date";
const NO_LINK: &str = "No Link";
const NO_SUMMARY: &str = "No Summary";

/// Normalizes a raw entry into an [`Article`]. Pure and total: absent fields
/// map to fixed placeholders and the summary loses its HTML tags.
pub fn normalize(entry: &Entry, feed_title: &str) -> Article {
    Article {
        title: entry.title.clone().unwrap_or_else(|| NO_TITLE.to_string()),
        published: entry
            .published
            .clone()
            .unwrap_or_else(|| NO_DATE.to_string()),
        link: entry.link.clone().unwrap_or_else(|| NO_LINK.to_string()),
        summary_text: entry
            .summary_html
            .as_deref()
            .map(|s| strip_tags(s).into_owned())
            .unwrap_or_else(|| NO_SUMMARY.to_string()),
        feed_title: feed_title.to_string(),
    }
}

/// Normalizes every entry of a fetch outcome. Unavailable feeds have no
/// articles to show.
pub fn articles_for(result: &FeedResult) -> Vec<Article> {
    match result {
        FeedResult::Fetched { title, entries } => {
            entries.iter().map(|e| normalize(e, title)).collect()
        }
        FeedResult::Unavailable { .. } => Vec::new(),
    }
}
