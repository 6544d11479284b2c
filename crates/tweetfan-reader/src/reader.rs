//! Cursor-driven reader for one source.
//!
//! Pagination runs as an explicit state machine: `Fetching` pulls a raw page,
//! `Filtering` maps it, drops the boundary duplicate and out-of-window items,
//! and decides via [`next_state`] whether another page is worth fetching.

use std::collections::VecDeque;

use futures::stream::{self, Stream, StreamExt};
use tweetfan_core::{validate_page_size, AcceptFn, ConfigError, PostRecord, DEFAULT_PAGE_SIZE};

use crate::error::ReaderError;
use crate::fetcher::RawFetcher;
use crate::mapping::{map_item, raw_id};
use crate::types::RawPage;

/// Upper bound on pages fetched for one source in a single read.
pub const MAX_PAGES: usize = 200;

#[derive(Debug, Clone, PartialEq)]
pub enum ReadState {
    /// Next page to request; `None` means the first page.
    Fetching { cursor: Option<String> },
    /// A page arrived and has not been mapped yet.
    Filtering { page: RawPage, cursor: Option<String> },
    Done,
    Failed,
}

/// Decides what follows a filtered page.
///
/// `kept` is the raw item count after boundary exclusion but before date
/// filtering. A short page ends the read regardless of how many items the
/// date filter let through.
#[must_use]
pub fn next_state(
    kept: usize,
    cursor_used: Option<&str>,
    next_cursor: Option<String>,
    page_size: usize,
) -> ReadState {
    if kept == 0 || kept < page_size {
        return ReadState::Done;
    }
    match next_cursor {
        Some(next) if cursor_used != Some(next.as_str()) => ReadState::Fetching { cursor: Some(next) },
        _ => ReadState::Done,
    }
}

/// Everything one reader produced, including a terminal error if any.
///
/// Records emitted before the failure are kept.
#[derive(Debug)]
pub struct ReadOutcome {
    pub source_id: String,
    pub records: Vec<PostRecord>,
    pub error: Option<ReaderError>,
}

/// Reads one account's timeline, newest first, within the accept window.
pub struct PaginatedReader<F> {
    fetcher: F,
    accept: AcceptFn,
    page_size: usize,
}

impl<F: RawFetcher> PaginatedReader<F> {
    /// Creates a reader with the default page size of 15.
    pub fn new(fetcher: F, accept: AcceptFn) -> Self {
        Self {
            fetcher,
            accept,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Creates a reader with an explicit page size.
    ///
    /// The fetcher must request the same size, or the short-page check stops
    /// the read early.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] if `page_size` is out of range.
    pub fn with_page_size(fetcher: F, accept: AcceptFn, page_size: usize) -> Result<Self, ConfigError> {
        validate_page_size(page_size).map_err(ConfigError::Validation)?;
        Ok(Self {
            fetcher,
            accept,
            page_size,
        })
    }

    #[must_use]
    pub fn source_id(&self) -> &str {
        self.fetcher.source_identifier()
    }

    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Lazily reads the timeline. Pages are fetched only as records are
    /// pulled. The stream ends after the first error.
    pub fn read(&self) -> impl Stream<Item = Result<PostRecord, ReaderError>> + Send + '_ {
        let machine = ReadMachine {
            reader: self,
            state: ReadState::Fetching { cursor: None },
            pending: VecDeque::new(),
            pages_fetched: 0,
        };
        stream::unfold(machine, |mut machine| async move {
            let item = machine.next_record().await?;
            Some((item, machine))
        })
    }

    /// Drains [`Self::read`] into memory.
    pub async fn read_all(&self) -> ReadOutcome {
        let mut records = Vec::new();
        let mut error = None;

        let mut stream = std::pin::pin!(self.read());
        while let Some(item) = stream.next().await {
            match item {
                Ok(record) => records.push(record),
                Err(e) => {
                    error = Some(e);
                    break;
                }
            }
        }

        ReadOutcome {
            source_id: self.source_id().to_string(),
            records,
            error,
        }
    }

    /// Maps one page. Returns the emitted records and the state that follows.
    fn filter_page(&self, page: RawPage, cursor: Option<&str>) -> (Vec<PostRecord>, ReadState) {
        let source = self.source_id();
        let raw_count = page.len();
        let mut kept = 0usize;
        let mut last_raw_id: Option<String> = None;
        let mut records = Vec::new();

        for item in page.items {
            let id = raw_id(&item).map(str::to_owned);
            if cursor.is_some() && id.as_deref() == cursor {
                continue;
            }
            kept += 1;
            if id.is_some() {
                last_raw_id.clone_from(&id);
            }

            match map_item(item, source) {
                Ok(record) if (self.accept)(&record.created_at) => records.push(record),
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(source, id = ?id, error = %e, "skipping malformed timeline item");
                }
            }
        }

        let next_cursor = records.last().map(|r| r.id.clone()).or(last_raw_id);
        let next = next_state(kept, cursor, next_cursor, self.page_size);

        tracing::debug!(
            source,
            raw_count,
            kept,
            emitted = records.len(),
            more = matches!(next, ReadState::Fetching { .. }),
            "filtered timeline page"
        );

        (records, next)
    }
}

struct ReadMachine<'a, F> {
    reader: &'a PaginatedReader<F>,
    state: ReadState,
    pending: VecDeque<PostRecord>,
    pages_fetched: usize,
}

impl<F: RawFetcher> ReadMachine<'_, F> {
    async fn next_record(&mut self) -> Option<Result<PostRecord, ReaderError>> {
        loop {
            if let Some(record) = self.pending.pop_front() {
                return Some(Ok(record));
            }

            match std::mem::replace(&mut self.state, ReadState::Done) {
                ReadState::Fetching { cursor } => {
                    let source_id = self.reader.source_id();
                    if self.pages_fetched >= MAX_PAGES {
                        self.state = ReadState::Failed;
                        return Some(Err(ReaderError::PaginationLimit {
                            source_id: source_id.to_string(),
                            max_pages: MAX_PAGES,
                        }));
                    }

                    let fetcher = &self.reader.fetcher;
                    let result = match cursor.as_deref() {
                        None => fetcher.fetch_first_page().await,
                        Some(after_id) => fetcher.fetch_page(after_id).await,
                    };
                    self.pages_fetched += 1;

                    match result {
                        Ok(page) => self.state = ReadState::Filtering { page, cursor },
                        Err(source) => {
                            self.state = ReadState::Failed;
                            return Some(Err(ReaderError::Fetch {
                                source_id: source_id.to_string(),
                                source,
                            }));
                        }
                    }
                }
                ReadState::Filtering { page, cursor } => {
                    let (records, next) = self.reader.filter_page(page, cursor.as_deref());
                    self.pending.extend(records);
                    self.state = next;
                }
                ReadState::Done | ReadState::Failed => return None,
            }
        }
    }
}

#[cfg(test)]
#[path = "reader_test.rs"]
mod tests;
