//! Concurrent fan-out over many readers.

use futures::stream::{self, StreamExt};
use tweetfan_core::PostRecord;

use crate::error::ReaderError;
use crate::fetcher::RawFetcher;
use crate::reader::{PaginatedReader, ReadOutcome};

/// A reader that stopped with an error.
#[derive(Debug)]
pub struct SourceFailure {
    pub source_id: String,
    pub error: ReaderError,
}

/// Merged output of a batch. `records` carries no cross-source ordering.
#[derive(Debug, Default)]
pub struct BatchResult {
    pub records: Vec<PostRecord>,
    pub failures: Vec<SourceFailure>,
}

impl BatchResult {
    #[must_use]
    pub fn is_partial(&self) -> bool {
        !self.failures.is_empty()
    }

    fn absorb(&mut self, outcome: ReadOutcome) {
        self.records.extend(outcome.records);
        if let Some(error) = outcome.error {
            self.failures.push(SourceFailure {
                source_id: outcome.source_id,
                error,
            });
        }
    }
}

/// Runs every reader concurrently and merges their output.
///
/// A failing reader does not cancel its siblings; its error lands in
/// [`BatchResult::failures`] and whatever it emitted before failing is kept.
pub async fn get_tweets_from<F: RawFetcher>(readers: &[PaginatedReader<F>]) -> BatchResult {
    let degree = readers.len().max(1);
    tracing::info!(sources = readers.len(), "reading timelines");

    let outcomes: Vec<ReadOutcome> = stream::iter(readers.iter().map(PaginatedReader::read_all))
        .buffer_unordered(degree)
        .collect()
        .await;

    let mut result = BatchResult::default();
    for outcome in outcomes {
        match &outcome.error {
            Some(error) => tracing::warn!(
                source = %outcome.source_id,
                records = outcome.records.len(),
                error = %error,
                "timeline read failed"
            ),
            None => tracing::debug!(
                source = %outcome.source_id,
                records = outcome.records.len(),
                "timeline read complete"
            ),
        }
        result.absorb(outcome);
    }

    tracing::info!(
        records = result.records.len(),
        failures = result.failures.len(),
        "timeline batch complete"
    );
    result
}
