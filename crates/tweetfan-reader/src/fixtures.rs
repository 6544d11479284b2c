//! In-memory fetchers for reader and batch tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, FixedOffset};
use serde_json::{json, Value};
use tweetfan_core::{AcceptFn, Cutoff};

use crate::error::FetchError;
use crate::fetcher::RawFetcher;
use crate::types::RawPage;

/// Serves scripted pages in order; an exhausted script yields empty pages.
pub(crate) struct ScriptedFetcher {
    source: String,
    pages: Mutex<VecDeque<Result<RawPage, FetchError>>>,
    calls: Arc<Mutex<Vec<Option<String>>>>,
}

impl ScriptedFetcher {
    pub(crate) fn new(source: &str, pages: Vec<Result<RawPage, FetchError>>) -> Self {
        Self {
            source: source.to_string(),
            pages: Mutex::new(pages.into()),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Cursors requested so far; `None` is the first page.
    pub(crate) fn calls(&self) -> Arc<Mutex<Vec<Option<String>>>> {
        Arc::clone(&self.calls)
    }

    fn next_page(&self, cursor: Option<&str>) -> Result<RawPage, FetchError> {
        self.calls.lock().unwrap().push(cursor.map(str::to_owned));
        self.pages
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(RawPage::default()))
    }
}

impl RawFetcher for ScriptedFetcher {
    fn source_identifier(&self) -> &str {
        &self.source
    }

    async fn fetch_first_page(&self) -> Result<RawPage, FetchError> {
        self.next_page(None)
    }

    async fn fetch_page(&self, after_id: &str) -> Result<RawPage, FetchError> {
        self.next_page(Some(after_id))
    }
}

/// Reference "now" for fixtures: 2013-11-28T00:00:00Z.
pub(crate) fn now() -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339("2013-11-28T00:00:00+00:00").unwrap()
}

/// Accepts anything within 14 days of [`now`].
pub(crate) fn two_weeks() -> AcceptFn {
    Cutoff::DaysBack(14).predicate(now()).unwrap()
}

pub(crate) fn accept_all() -> AcceptFn {
    Arc::new(|_: &DateTime<FixedOffset>| true)
}

/// Formats a timestamp the way the timeline API does.
pub(crate) fn created_at(at: DateTime<FixedOffset>) -> String {
    at.format(tweetfan_core::CREATED_AT_FORMAT).to_string()
}

pub(crate) fn status(id: u64, source: &str, at: DateTime<FixedOffset>, mentions: &[&str]) -> Value {
    json!({
        "id_str": id.to_string(),
        "created_at": created_at(at),
        "text": format!("status {id}"),
        "user": { "screen_name": source },
        "entities": {
            "user_mentions": mentions.iter().map(|m| json!({ "screen_name": m })).collect::<Vec<_>>()
        }
    })
}

/// Newest-first page of ids `from` down to `from - len + 1`, one hour apart,
/// starting `start_hours_ago` before [`now`].
pub(crate) fn page(source: &str, from: u64, len: u64, start_hours_ago: i64) -> RawPage {
    let items = (0..len)
        .map(|i| {
            let at = now() - Duration::hours(start_hours_ago + i64::try_from(i).unwrap());
            status(from - i, source, at, &[])
        })
        .collect();
    RawPage::new(items)
}

pub(crate) fn ids(records: &[tweetfan_core::PostRecord]) -> Vec<String> {
    records.iter().map(|r| r.id.clone()).collect()
}
