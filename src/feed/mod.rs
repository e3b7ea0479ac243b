//! Feed fetching, validation, and normalization.
//!
//! - [`client`] wraps the HTTP client and the `feed-rs` parser behind one
//!   fetch-and-parse call, plus URL validation for the add-feed flow
//! - [`fetcher`] runs one fetch cycle over all subscriptions
//! - [`article`] turns raw parsed entries into display-ready articles

mod article;
mod client;
mod fetcher;

pub use article::{articles_for, normalize, Article, Entry};
pub use client::{Channel, FeedClient, FetchError, Validation, GENERIC_FEED_TITLE};
pub use fetcher::{fetch_all, FeedResult, FeedSet};
