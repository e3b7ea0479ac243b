//! Subscription persistence.
//!
//! Subscriptions live in a human-editable markdown file rather than a
//! database: one bullet line `- [name](url)` per feed, grouped under
//! cosmetic `##` section headings. The store is the only writer of that
//! file.

mod markdown;

pub use markdown::{
    extract_subscriptions, AddOutcome, FeedStore, StoreError, Subscription,
};
