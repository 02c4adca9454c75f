//! Data access for the polls dashboard.
//!
//! [`PollsClient`] talks to the polls backend over HTTP, [`PageCache`] keeps
//! fetched pages keyed by `(resource, page)` with in-flight deduplication,
//! and [`config`] resolves where the backend lives.

pub mod api;
pub mod cache;
pub mod config;

pub use api::PollsClient;
pub use cache::{FetchStatus, FetchTicket, PageCache, PageKey, PageView};
