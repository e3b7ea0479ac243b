use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::feed::{FeedClient, Validation, GENERIC_FEED_TITLE};
use crate::util::host_component;

/// A named feed URL persisted in the subscription file.
///
/// `url` is unique within the store (enforced on write, not on read);
/// `name` is a free-form display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    pub name: String,
    pub url: String,
}

/// Errors from subscription file writes.
///
/// Reads never error: a missing or unreadable file is treated as an empty
/// store, so the only failure the store can surface is a failed save.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to write subscription file: {0}")]
    Io(#[from] std::io::Error),
}

/// Outcome of an add-feed attempt. `Invalid` and `AlreadyExists` leave the
/// file untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    AlreadyExists,
    Invalid,
}

/// Matches markdown links `[name](url)` anywhere in the document, section
/// structure ignored. Only absolute http(s) URLs are captured.
static LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([^\]]+)\]\((https?://[^\s)]+)\)").expect("link pattern is valid")
});

/// Keywords in a URL or display name that suggest a feed link.
const FEED_KEYWORDS: &[&str] = &["rss", "xml", "feed", "atom"];

/// Hosting domains that serve feeds without feed-looking paths.
const FEED_HOSTS: &[&str] = &["feedburner", "campaign-archive"];

const TITLE_HEADING: &str = "# RSS Feeds";
const UNCATEGORIZED_HEADING: &str = "## Uncategorized";
const DEFAULT_SKELETON: &str = "# RSS Feeds\n\n\
    This file contains the list of RSS feeds for the terminal RSS reader.\n\n\
    ## Uncategorized\n";

/// Extracts `(name, url)` pairs from the subscription file at `path`.
///
/// A missing file is a normal, handled state and yields an empty list, as
/// does any other read failure. Results follow first-occurrence document
/// order and are NOT deduplicated; callers must tolerate repeated URLs.
///
/// Links are kept only when they look like feeds: a keyword in the URL or
/// name, a `/feed` or `/rss` path ending, or a known feed host. This is a
/// heuristic filter, not a strict parser; misses in either direction are
/// accepted behavior.
pub fn extract_subscriptions(path: &Path) -> Vec<Subscription> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to read subscription file");
            return Vec::new();
        }
    };
    extract_from_str(&content)
}

fn extract_from_str(content: &str) -> Vec<Subscription> {
    LINK_RE
        .captures_iter(content)
        .filter(|cap| looks_like_feed(&cap[1], &cap[2]))
        .map(|cap| Subscription {
            name: cap[1].to_string(),
            url: cap[2].to_string(),
        })
        .collect()
}

fn looks_like_feed(name: &str, url: &str) -> bool {
    let url_lower = url.to_lowercase();
    let name_lower = name.to_lowercase();
    if FEED_KEYWORDS
        .iter()
        .any(|kw| url_lower.contains(kw) || name_lower.contains(kw))
    {
        return true;
    }
    let trimmed = url_lower.trim_end_matches('/');
    if trimmed.ends_with("/feed") || trimmed.ends_with("/rss") {
        return true;
    }
    FEED_HOSTS.iter().any(|host| url.contains(host))
}

/// Handle to the subscription file. Sole writer of that file; reads go
/// through [`extract_subscriptions`].
#[derive(Debug, Clone)]
pub struct FeedStore {
    path: PathBuf,
}

impl FeedStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads all subscriptions in document order.
    pub fn load(&self) -> Vec<Subscription> {
        extract_subscriptions(&self.path)
    }

    /// Validates `url` against the live feed and, if usable, appends it to
    /// the subscription file.
    ///
    /// An empty `name` is derived from the feed's advertised title when that
    /// title is non-generic, else from the URL's host. The write is a
    /// whole-file rewrite; the process is assumed to be the only instance
    /// touching the file.
    pub async fn add(
        &self,
        client: &FeedClient,
        url: &str,
        name: &str,
    ) -> Result<AddOutcome, StoreError> {
        let feed_title = match client.validate(url).await {
            Validation::Valid { title } => title,
            Validation::Invalid => return Ok(AddOutcome::Invalid),
        };

        let name = if name.trim().is_empty() {
            derive_name(url, &feed_title)
        } else {
            name.trim().to_string()
        };

        append_subscription(&self.path, url, &name)
    }
}

fn derive_name(url: &str, feed_title: &str) -> String {
    if !feed_title.is_empty() && feed_title != GENERIC_FEED_TITLE {
        feed_title.to_string()
    } else {
        host_component(url).unwrap_or_else(|| url.to_string())
    }
}

/// Appends a `- [name](url)` bullet to the file at `path`, creating the
/// default document skeleton when the file is missing or has no title
/// heading, and an "Uncategorized" section when only that is missing.
///
/// The duplicate check is a literal substring match on the parenthesized
/// URL. A URL that is a textual prefix of one already stored can therefore
/// report `AlreadyExists` spuriously; see DESIGN.md before changing this.
pub(crate) fn append_subscription(
    path: &Path,
    url: &str,
    name: &str,
) -> Result<AddOutcome, StoreError> {
    let mut content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => DEFAULT_SKELETON.to_string(),
        Err(e) => return Err(e.into()),
    };

    if !content.contains(TITLE_HEADING) {
        content = format!("{DEFAULT_SKELETON}{content}");
    } else if !content.contains(UNCATEGORIZED_HEADING) {
        content.push_str(&format!("\n{UNCATEGORIZED_HEADING}\n"));
    }

    if content.contains(&format!("({url})")) {
        return Ok(AddOutcome::AlreadyExists);
    }

    content.push_str(&format!("- [{name}]({url})\n"));
    std::fs::write(path, content)?;
    Ok(AddOutcome::Added)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn pairs(content: &str) -> Vec<(String, String)> {
        extract_from_str(content)
            .into_iter()
            .map(|s| (s.name, s.url))
            .collect()
    }

    #[test]
    fn extract_keeps_only_feed_looking_links() {
        let doc = "# RSS Feeds\n\n## Tech\n\
            - [Hacker News](https://news.ycombinator.com/rss)\n\
            - [Example](https://example.com/page)\n";
        assert_eq!(
            pairs(doc),
            vec![(
                "Hacker News".to_string(),
                "https://news.ycombinator.com/rss".to_string()
            )]
        );
    }

    #[test]
    fn extract_preserves_document_order() {
        let doc = "## News\n\
            - [BBC News](https://feeds.bbci.co.uk/news/rss.xml)\n\n\
            ## Tech\n\
            - [TechCrunch](https://techcrunch.com/feed/)\n\
            - [Hacker News](https://news.ycombinator.com/rss)\n";
        let urls: Vec<String> = extract_from_str(doc).into_iter().map(|s| s.url).collect();
        assert_eq!(
            urls,
            vec![
                "https://feeds.bbci.co.uk/news/rss.xml",
                "https://techcrunch.com/feed/",
                "https://news.ycombinator.com/rss",
            ]
        );
    }

    #[test]
    fn extract_ignores_section_boundaries() {
        // A feed link in free text outside any section still counts.
        let doc = "# RSS Feeds\n\nSee [Atom Example](https://example.org/atom.xml) inline.\n";
        assert_eq!(pairs(doc).len(), 1);
    }

    #[test]
    fn extract_does_not_deduplicate() {
        let doc = "- [A](https://example.com/feed)\n- [B](https://example.com/feed)\n";
        assert_eq!(pairs(doc).len(), 2);
    }

    #[test]
    fn extract_matches_keyword_in_name() {
        let doc = "- [Weekly RSS digest](https://example.com/weekly)\n";
        assert_eq!(pairs(doc).len(), 1);
    }

    #[test]
    fn extract_matches_known_feed_hosts() {
        let doc = "- [Old Blog](https://feedburner.google.com/oldblog)\n";
        assert_eq!(pairs(doc).len(), 1);
    }

    #[test]
    fn extract_trailing_slash_endings() {
        let doc = "- [Site A](https://a.example.com/feed/)\n- [Site B](https://b.example.com/rss/)\n";
        assert_eq!(pairs(doc).len(), 2);
    }

    #[test]
    fn extract_skips_non_http_schemes() {
        let doc = "- [Local](file:///tmp/feed.xml)\n";
        assert!(pairs(doc).is_empty());
    }

    #[test]
    fn extract_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("does-not-exist.md");
        assert!(extract_subscriptions(&path).is_empty());
    }

    #[test]
    fn extract_empty_file_is_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("feeds.md");
        std::fs::write(&path, "").unwrap();
        assert!(extract_subscriptions(&path).is_empty());
    }

    #[test]
    fn append_creates_skeleton_on_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("feeds.md");

        let outcome = append_subscription(&path, "https://example.com/rss", "Example").unwrap();
        assert_eq!(outcome, AddOutcome::Added);

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("# RSS Feeds\n"));
        assert!(content.contains("## Uncategorized"));
        assert!(content.contains("- [Example](https://example.com/rss)"));
    }

    #[test]
    fn append_twice_reports_already_exists_once() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("feeds.md");

        assert_eq!(
            append_subscription(&path, "https://example.com/rss", "Example").unwrap(),
            AddOutcome::Added
        );
        assert_eq!(
            append_subscription(&path, "https://example.com/rss", "Example").unwrap(),
            AddOutcome::AlreadyExists
        );

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content.matches("(https://example.com/rss)").count(),
            1,
            "exactly one bullet line for the URL"
        );
    }

    #[test]
    fn append_adds_uncategorized_section_when_absent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("feeds.md");
        std::fs::write(&path, "# RSS Feeds\n\n## Tech\n- [HN](https://news.ycombinator.com/rss)\n")
            .unwrap();

        append_subscription(&path, "https://example.com/feed", "Example").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("## Uncategorized"));
        assert!(content.ends_with("- [Example](https://example.com/feed)\n"));
    }

    #[test]
    fn append_prepends_skeleton_when_title_missing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("feeds.md");
        std::fs::write(&path, "some stray notes\n").unwrap();

        append_subscription(&path, "https://example.com/feed", "Example").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("# RSS Feeds\n"));
        assert!(content.contains("some stray notes"));
    }

    #[test]
    fn duplicate_check_is_substring_not_bullet_match() {
        // Documented quirk: the duplicate check is a raw substring match on
        // "(url)" anywhere in the document, not a per-bullet comparison. A
        // URL mentioned only in prose still blocks the add.
        let dir = tempdir().unwrap();
        let path = dir.path().join("feeds.md");
        std::fs::write(
            &path,
            "# RSS Feeds\n\nSee (https://example.com/rss) for details.\n\n## Uncategorized\n",
        )
        .unwrap();

        assert_eq!(
            append_subscription(&path, "https://example.com/rss", "Example").unwrap(),
            AddOutcome::AlreadyExists
        );
    }

    #[test]
    fn derive_name_prefers_feed_title() {
        assert_eq!(
            derive_name("https://example.com/rss", "Example News"),
            "Example News"
        );
    }

    #[test]
    fn derive_name_falls_back_to_host_for_generic_title() {
        assert_eq!(
            derive_name("https://example.com/rss", GENERIC_FEED_TITLE),
            "example.com"
        );
        assert_eq!(derive_name("https://example.com/rss", ""), "example.com");
    }
}
