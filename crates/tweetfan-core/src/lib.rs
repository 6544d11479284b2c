//! Domain types and pure helpers for timeline aggregation.
//!
//! Holds the normalized [`PostRecord`], timestamp parsing for the timeline
//! API's `created_at` format, the cutoff predicate injected into readers, the
//! aggregation helpers run over a finished batch, and configuration loading.

pub mod accounts;
pub mod aggregate;
pub mod app_config;
pub mod config;
pub mod cutoff;
pub mod error;
pub mod post;
pub mod timestamp;

pub use accounts::{load_accounts, parse_accounts, AccountConfig, AccountsFile};
pub use aggregate::{
    count_per_account, cross_mention_count_per_account, sort_by_time, SortOrder,
};
pub use app_config::{AppConfig, Environment};
pub use config::{
    load_app_config, load_app_config_from_env, validate_days_back, validate_page_size,
    DEFAULT_PAGE_SIZE, MAX_DAYS_BACK, MAX_PAGE_SIZE,
};
pub use cutoff::{AcceptFn, Cutoff};
pub use error::{ConfigError, CoreError};
pub use post::PostRecord;
pub use timestamp::{parse_created_at, zero_timestamp, CREATED_AT_FORMAT};
