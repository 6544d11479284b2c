//! Derived views over a finished batch of records.
//!
//! Every function here is pure: the same input slice always yields the same
//! output, regardless of call order.

use std::collections::BTreeMap;

use crate::PostRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// Stable sort by `created_at`. Records with equal timestamps keep their
/// input order in both directions.
#[must_use]
pub fn sort_by_time(records: &[PostRecord], order: SortOrder) -> Vec<PostRecord> {
    let mut sorted = records.to_vec();
    match order {
        SortOrder::Ascending => sorted.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        SortOrder::Descending => sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
    }
    sorted
}

/// Number of records per `source_account`.
#[must_use]
pub fn count_per_account(records: &[PostRecord]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for record in records {
        *counts.entry(record.source_account.clone()).or_insert(0) += 1;
    }
    counts
}

/// Sum of `cross_mention_count` per `source_account`.
#[must_use]
pub fn cross_mention_count_per_account(records: &[PostRecord]) -> BTreeMap<String, usize> {
    let mut totals = BTreeMap::new();
    for record in records {
        *totals.entry(record.source_account.clone()).or_insert(0) += record.cross_mention_count;
    }
    totals
}

#[cfg(test)]
#[path = "aggregate_test.rs"]
mod tests;
