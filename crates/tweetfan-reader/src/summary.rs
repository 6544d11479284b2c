//! The aggregated view served by the HTTP API and printed by the CLI.

use std::collections::BTreeMap;

use chrono::Utc;
use serde::Serialize;
use tweetfan_core::{
    count_per_account, cross_mention_count_per_account, sort_by_time, AppConfig, ConfigError,
    PostRecord, SortOrder,
};

use crate::batch::{get_tweets_from, BatchResult};
use crate::client::{create_readers_for, TimelineClient};

/// An account whose reader stopped with an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedSource {
    pub source_id: String,
    pub message: String,
}

/// Batch output with the derived per-account views.
///
/// Every requested account appears in both count maps, with zero when it
/// produced no posts.
#[derive(Debug, Clone, Serialize)]
pub struct TimelineSummary {
    /// Newest first.
    pub posts: Vec<PostRecord>,
    pub count_per_account: BTreeMap<String, usize>,
    pub cross_mention_count_per_account: BTreeMap<String, usize>,
    pub accounts: Vec<String>,
    pub failed_sources: Vec<FailedSource>,
}

impl TimelineSummary {
    #[must_use]
    pub fn from_batch(accounts: Vec<String>, batch: BatchResult) -> Self {
        let mut count = count_per_account(&batch.records);
        let mut mentions = cross_mention_count_per_account(&batch.records);
        for account in &accounts {
            count.entry(account.clone()).or_insert(0);
            mentions.entry(account.clone()).or_insert(0);
        }

        let failed_sources = batch
            .failures
            .iter()
            .map(|f| FailedSource {
                source_id: f.source_id.clone(),
                message: f.error.to_string(),
            })
            .collect();

        Self {
            posts: sort_by_time(&batch.records, SortOrder::Descending),
            count_per_account: count,
            cross_mention_count_per_account: mentions,
            accounts,
            failed_sources,
        }
    }

    #[must_use]
    pub fn is_partial(&self) -> bool {
        !self.failed_sources.is_empty()
    }
}

/// Reads every account in `screen_names` with the configured cutoff and page
/// size, then aggregates the merged result.
///
/// The cutoff is resolved against the current time once, before any fetch.
///
/// # Errors
///
/// Returns [`ConfigError::Validation`] if the configured cutoff cannot be
/// resolved or the page size is out of range. Per-account fetch failures land in
/// [`TimelineSummary::failed_sources`] instead.
pub async fn summarize_timelines(
    client: &TimelineClient,
    config: &AppConfig,
    screen_names: Vec<String>,
) -> Result<TimelineSummary, ConfigError> {
    let accept = config.cutoff.predicate(Utc::now().fixed_offset())?;
    let readers = create_readers_for(client, &accept, config.page_size, &screen_names)?;
    tracing::info!(cutoff = %config.cutoff, accounts = screen_names.len(), "summarizing timelines");

    let batch = get_tweets_from(&readers).await;
    Ok(TimelineSummary::from_batch(screen_names, batch))
}
