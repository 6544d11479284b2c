use thiserror::Error;

/// The collaborator could not produce a parsable page.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("rate limited while reading {source_id} (retry after {retry_after_secs}s)")]
    RateLimited {
        source_id: String,
        retry_after_secs: u64,
    },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid API base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    #[error("token request rejected: {0}")]
    TokenRejected(String),

    #[error("no bearer token or consumer credentials configured")]
    MissingCredentials,
}

/// A single raw item could not be turned into a record. Never fatal to a page.
#[derive(Debug, Error)]
pub enum MappingError {
    #[error("item is not a timeline entry: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("item is missing required field `{field}`")]
    MissingField { field: &'static str },

    #[error(transparent)]
    InvalidTimestamp(#[from] tweetfan_core::CoreError),
}

/// Terminal failure of one reader's stream.
#[derive(Debug, Error)]
pub enum ReaderError {
    #[error("fetch failed for {source_id}: {source}")]
    Fetch {
        source_id: String,
        #[source]
        source: FetchError,
    },

    #[error("pagination limit reached for {source_id}: exceeded {max_pages} pages")]
    PaginationLimit { source_id: String, max_pages: usize },
}
