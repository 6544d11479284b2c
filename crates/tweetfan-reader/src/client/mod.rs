//! HTTP client for the timeline REST API.
//!
//! Wraps `reqwest` with bearer-token auth, status-code mapping and page
//! parsing. [`TimelineFetcher`] adapts it to [`crate::RawFetcher`] for one
//! account; [`fetch_bearer_token`] performs the app-only token exchange.

mod auth;
mod timeline;

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use tweetfan_core::AppConfig;

use crate::error::FetchError;
use crate::types::RawPage;

pub use auth::{fetch_bearer_token, resolve_bearer_token};
pub use timeline::{create_readers_for, TimelineFetcher};

pub const DEFAULT_BASE_URL: &str = "https://api.twitter.com/";
const USER_TIMELINE_PATH: &str = "1.1/statuses/user_timeline.json";
/// Rate-limit windows are 15 minutes.
const DEFAULT_RETRY_AFTER_SECS: u64 = 900;

/// Client for `statuses/user_timeline`.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct TimelineClient {
    client: Client,
    timeline_url: Url,
    bearer_token: String,
}

impl std::fmt::Debug for TimelineClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimelineClient")
            .field("timeline_url", &self.timeline_url.as_str())
            .field("bearer_token", &"[redacted]")
            .finish_non_exhaustive()
    }
}

impl TimelineClient {
    /// Creates a client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(bearer_token: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, FetchError> {
        Self::with_base_url(bearer_token, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`FetchError::InvalidBaseUrl`] if `base_url` is not an absolute URL.
    pub fn with_base_url(
        bearer_token: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, FetchError> {
        let client = build_http_client(timeout_secs, user_agent)?;
        let timeline_url = endpoint_url(base_url, USER_TIMELINE_PATH)?;
        Ok(Self {
            client,
            timeline_url,
            bearer_token: bearer_token.to_owned(),
        })
    }

    /// Creates a client from the loaded configuration.
    ///
    /// # Errors
    ///
    /// See [`Self::with_base_url`].
    pub fn from_app_config(config: &AppConfig, bearer_token: &str) -> Result<Self, FetchError> {
        Self::with_base_url(
            bearer_token,
            config.request_timeout_secs,
            &config.user_agent,
            &config.api_base_url,
        )
    }

    /// Fetches one page of `screen_name`'s timeline, newest first.
    ///
    /// With `max_id` set the API returns items with ids at or below it, so
    /// the page usually starts with the `max_id` item itself.
    ///
    /// # Errors
    ///
    /// - [`FetchError::RateLimited`] on HTTP 429 (not retried).
    /// - [`FetchError::UnexpectedStatus`] on any other non-2xx status.
    /// - [`FetchError::Http`] on network or TLS failure.
    /// - [`FetchError::Deserialize`] if the body is not a JSON array.
    pub async fn fetch_timeline_page(
        &self,
        screen_name: &str,
        count: usize,
        max_id: Option<&str>,
    ) -> Result<RawPage, FetchError> {
        let url = self.timeline_url(screen_name, count, max_id);
        tracing::debug!(screen_name, count, max_id, "fetching timeline page");

        let response = self
            .client
            .get(url.clone())
            .bearer_auth(&self.bearer_token)
            .send()
            .await?;
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
            return Err(FetchError::RateLimited {
                source_id: screen_name.to_owned(),
                retry_after_secs,
            });
        }

        if !status.is_success() {
            return Err(FetchError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        RawPage::parse(&body, &format!("user_timeline(screen_name={screen_name})"))
    }

    /// Builds the request URL; values are percent-encoded by `query_pairs_mut`.
    fn timeline_url(&self, screen_name: &str, count: usize, max_id: Option<&str>) -> Url {
        let mut url = self.timeline_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("count", &count.to_string());
            pairs.append_pair("screen_name", screen_name);
            if let Some(max_id) = max_id {
                pairs.append_pair("max_id", max_id);
            }
        }
        url
    }
}

pub(crate) fn build_http_client(timeout_secs: u64, user_agent: &str) -> Result<Client, FetchError> {
    Ok(Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(user_agent)
        .build()?)
}

/// Joins `path` onto `base_url`, treating the base as a directory whether or
/// not it ends in a slash.
pub(crate) fn endpoint_url(base_url: &str, path: &str) -> Result<Url, FetchError> {
    let invalid = |reason: String| FetchError::InvalidBaseUrl {
        base_url: base_url.to_owned(),
        reason,
    };

    let normalised = format!("{}/", base_url.trim_end_matches('/'));
    let base = Url::parse(&normalised).map_err(|e| invalid(e.to_string()))?;
    if base.cannot_be_a_base() {
        return Err(invalid("URL cannot be a base".to_string()));
    }
    base.join(path).map_err(|e| invalid(e.to_string()))
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
