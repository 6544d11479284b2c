//! Wire types for the `statuses/user_timeline` payload.
//!
//! Only the handful of fields the reader needs are modelled; everything else
//! in the (large) status object is ignored.

use serde::Deserialize;
use serde_json::Value;

use crate::error::FetchError;

/// One fetched page, before date filtering or boundary exclusion.
///
/// Items stay as loose JSON so a single malformed entry can be skipped
/// without losing the rest of the page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawPage {
    pub items: Vec<Value>,
}

impl RawPage {
    #[must_use]
    pub fn new(items: Vec<Value>) -> Self {
        Self { items }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Parses a response body. Blank bodies are an empty page.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Deserialize`] if the body is not a JSON array.
    pub fn parse(body: &str, context: &str) -> Result<Self, FetchError> {
        if body.trim().is_empty() {
            return Ok(Self::default());
        }

        let items =
            serde_json::from_str::<Vec<Value>>(body).map_err(|e| FetchError::Deserialize {
                context: context.to_string(),
                source: e,
            })?;
        Ok(Self { items })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawStatus {
    pub id_str: Option<String>,
    pub created_at: Option<String>,
    pub text: Option<String>,
    pub user: Option<RawUser>,
    #[serde(default)]
    pub entities: RawEntities,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawUser {
    pub screen_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawEntities {
    #[serde(default)]
    pub user_mentions: Vec<RawMention>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawMention {
    pub screen_name: String,
}
