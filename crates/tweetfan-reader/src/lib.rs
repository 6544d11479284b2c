//! Paginated, date-filtered timeline reading with concurrent fan-out.
//!
//! A [`PaginatedReader`] walks one account's timeline through a [`RawFetcher`],
//! following `max_id` cursors until the source runs short. [`get_tweets_from`]
//! runs many readers at once and merges what they emit.

pub mod batch;
pub mod client;
pub mod error;
pub mod fetcher;
pub mod mapping;
pub mod reader;
pub mod summary;
pub mod types;

#[cfg(test)]
pub(crate) mod fixtures;

pub use batch::{get_tweets_from, BatchResult, SourceFailure};
pub use client::{
    create_readers_for, fetch_bearer_token, resolve_bearer_token, TimelineClient, TimelineFetcher,
};
pub use error::{FetchError, MappingError, ReaderError};
pub use fetcher::RawFetcher;
pub use reader::{PaginatedReader, ReadOutcome, ReadState, MAX_PAGES};
pub use summary::{summarize_timelines, FailedSource, TimelineSummary};
pub use types::RawPage;
