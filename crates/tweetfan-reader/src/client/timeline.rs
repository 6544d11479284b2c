use tweetfan_core::{AcceptFn, ConfigError};

use super::TimelineClient;
use crate::error::FetchError;
use crate::fetcher::RawFetcher;
use crate::reader::PaginatedReader;
use crate::types::RawPage;

/// [`RawFetcher`] for one account's timeline over HTTP.
///
/// Follow-up pages request `page_size + 1` items because `max_id` is
/// inclusive and the boundary item comes back again.
#[derive(Debug, Clone)]
pub struct TimelineFetcher {
    client: TimelineClient,
    screen_name: String,
    page_size: usize,
}

impl TimelineFetcher {
    #[must_use]
    pub fn new(client: TimelineClient, screen_name: &str, page_size: usize) -> Self {
        Self {
            client,
            screen_name: screen_name.to_owned(),
            page_size,
        }
    }
}

impl RawFetcher for TimelineFetcher {
    fn source_identifier(&self) -> &str {
        &self.screen_name
    }

    async fn fetch_first_page(&self) -> Result<RawPage, FetchError> {
        self.client
            .fetch_timeline_page(&self.screen_name, self.page_size, None)
            .await
    }

    async fn fetch_page(&self, after_id: &str) -> Result<RawPage, FetchError> {
        self.client
            .fetch_timeline_page(&self.screen_name, self.page_size + 1, Some(after_id))
            .await
    }
}

/// Builds one reader per screen name, all sharing `client` and `accept`.
///
/// # Errors
///
/// Returns [`ConfigError::Validation`] if `page_size` is out of range.
pub fn create_readers_for(
    client: &TimelineClient,
    accept: &AcceptFn,
    page_size: usize,
    screen_names: &[String],
) -> Result<Vec<PaginatedReader<TimelineFetcher>>, ConfigError> {
    screen_names
        .iter()
        .map(|name| {
            PaginatedReader::with_page_size(
                TimelineFetcher::new(client.clone(), name, page_size),
                accept.clone(),
                page_size,
            )
        })
        .collect()
}
