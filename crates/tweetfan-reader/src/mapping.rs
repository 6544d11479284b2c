//! Raw status → [`PostRecord`].

use serde_json::Value;
use tweetfan_core::{parse_created_at, PostRecord};

use crate::error::MappingError;
use crate::types::RawStatus;

/// Maps one raw timeline item to a record for `source_account`.
///
/// `id_str`, `created_at` and `user.screen_name` must be present. An empty
/// `created_at` string maps to the zero timestamp; a missing one is an error.
/// A missing `text` maps to an empty string.
///
/// # Errors
///
/// Returns [`MappingError`] when the item is not an object, lacks a required
/// field, or carries an unparsable timestamp.
pub fn map_item(item: Value, source_account: &str) -> Result<PostRecord, MappingError> {
    let status: RawStatus = serde_json::from_value(item)?;

    let id = status
        .id_str
        .filter(|id| !id.is_empty())
        .ok_or(MappingError::MissingField { field: "id_str" })?;
    let raw_created_at = status
        .created_at
        .ok_or(MappingError::MissingField { field: "created_at" })?;
    let author = status
        .user
        .and_then(|u| u.screen_name)
        .ok_or(MappingError::MissingField {
            field: "user.screen_name",
        })?;

    let created_at = parse_created_at(&raw_created_at)?;

    if !author.eq_ignore_ascii_case(source_account) {
        tracing::trace!(id = %id, author = %author, source = source_account, "item authored by another account");
    }

    let cross_mention_count = PostRecord::count_cross_mentions(
        source_account,
        status
            .entities
            .user_mentions
            .iter()
            .map(|m| m.screen_name.as_str()),
    );

    Ok(PostRecord {
        id,
        created_at,
        source_account: source_account.to_string(),
        text: status.text.unwrap_or_default(),
        cross_mention_count,
    })
}

/// Best-effort id lookup for items that failed to map.
pub(crate) fn raw_id(item: &Value) -> Option<&str> {
    item.get("id_str").and_then(Value::as_str)
}
