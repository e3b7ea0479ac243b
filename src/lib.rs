//! feedmark, a terminal RSS reader whose subscription list lives in a
//! markdown file.
//!
//! The crate is split into a small core (`store`, `feed`) consumed by the
//! TUI (`ui`, `app`):
//!
//! - [`store`] - the markdown-backed subscription file
//! - [`feed`] - fetching, validation, and normalization of feed entries
//! - [`app`] - central application state and background-task events
//! - [`ui`] - ratatui event loop, input handling, and rendering
//! - [`config`] - optional TOML configuration
//! - [`util`] - text and URL helpers shared across the crate

pub mod app;
pub mod config;
pub mod feed;
pub mod store;
pub mod ui;
pub mod util;
