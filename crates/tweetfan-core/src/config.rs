use chrono::DateTime;

use crate::app_config::{AppConfig, Environment};
use crate::{ConfigError, Cutoff};

/// Items requested per timeline page unless `TWEETFAN_PAGE_SIZE` says otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 15;

/// Largest page size that still leaves room for the boundary item.
///
/// Follow-up pages request `page_size + 1` and the timeline API caps `count`
/// at 200.
pub const MAX_PAGE_SIZE: usize = 199;

/// Longest relative window accepted for `TWEETFAN_FOR_DAYS` and `--days`.
pub const MAX_DAYS_BACK: u32 = 36_500;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can use a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let or_default = |var: &str, default: &str| -> String {
        optional(var).unwrap_or_else(|| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let env = parse_environment(&or_default("TWEETFAN_ENV", "development"))?;

    let bind_addr = or_default("TWEETFAN_BIND_ADDR", "0.0.0.0:3000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("TWEETFAN_BIND_ADDR", e.to_string()))?;

    let log_level = or_default("TWEETFAN_LOG_LEVEL", "info");
    let api_base_url = or_default("TWEETFAN_API_BASE_URL", "https://api.twitter.com");
    let bearer_token = optional("TWEETFAN_BEARER_TOKEN");
    let consumer_key = optional("TWEETFAN_CONSUMER_KEY");
    let consumer_secret = optional("TWEETFAN_CONSUMER_SECRET");
    let screen_names = optional("TWEETFAN_SCREEN_NAMES")
        .map(|raw| parse_screen_names(&raw))
        .unwrap_or_default();
    let accounts_path = PathBuf::from(or_default(
        "TWEETFAN_ACCOUNTS_PATH",
        "./config/accounts.yaml",
    ));

    let cutoff = match optional("TWEETFAN_CUTOFF") {
        Some(raw) => Cutoff::Absolute(
            DateTime::parse_from_rfc3339(&raw)
                .map_err(|e| invalid("TWEETFAN_CUTOFF", e.to_string()))?,
        ),
        None => {
            let days = or_default("TWEETFAN_FOR_DAYS", "14")
                .parse::<u32>()
                .map_err(|e| invalid("TWEETFAN_FOR_DAYS", e.to_string()))?;
            validate_days_back(days).map_err(|reason| invalid("TWEETFAN_FOR_DAYS", reason))?;
            Cutoff::DaysBack(days)
        }
    };

    let page_size = or_default("TWEETFAN_PAGE_SIZE", &DEFAULT_PAGE_SIZE.to_string())
        .parse::<usize>()
        .map_err(|e| invalid("TWEETFAN_PAGE_SIZE", e.to_string()))?;
    validate_page_size(page_size)
        .map_err(|reason| invalid("TWEETFAN_PAGE_SIZE", reason))?;

    let request_timeout_secs = or_default("TWEETFAN_REQUEST_TIMEOUT_SECS", "30")
        .parse::<u64>()
        .map_err(|e| invalid("TWEETFAN_REQUEST_TIMEOUT_SECS", e.to_string()))?;

    let user_agent = or_default("TWEETFAN_USER_AGENT", "tweetfan/0.1 (timeline-aggregation)");

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        api_base_url,
        bearer_token,
        consumer_key,
        consumer_secret,
        screen_names,
        accounts_path,
        cutoff,
        page_size,
        request_timeout_secs,
        user_agent,
    })
}

/// Checks a page size against the range the timeline API accepts.
///
/// # Errors
///
/// Returns a human-readable reason when `page_size` is outside
/// `1..=MAX_PAGE_SIZE`.
pub fn validate_page_size(page_size: usize) -> Result<(), String> {
    if page_size == 0 || page_size > MAX_PAGE_SIZE {
        return Err(format!(
            "page size must be between 1 and {MAX_PAGE_SIZE}, got {page_size}"
        ));
    }
    Ok(())
}

/// Checks a relative cutoff window against [`MAX_DAYS_BACK`].
///
/// # Errors
///
/// Returns a human-readable reason when `days` exceeds the limit.
pub fn validate_days_back(days: u32) -> Result<(), String> {
    if days > MAX_DAYS_BACK {
        return Err(format!(
            "days back must be at most {MAX_DAYS_BACK}, got {days}"
        ));
    }
    Ok(())
}

/// Splits a comma-separated account list, dropping blanks.
fn parse_screen_names(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "TWEETFAN_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

impl AppConfig {
    /// Accounts to read: `TWEETFAN_SCREEN_NAMES` when set, otherwise the
    /// accounts file at `accounts_path`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the accounts file cannot be loaded or lists
    /// no accounts.
    pub fn resolve_screen_names(&self) -> Result<Vec<String>, ConfigError> {
        if !self.screen_names.is_empty() {
            return Ok(self.screen_names.clone());
        }

        let file = crate::load_accounts(&self.accounts_path)?;
        if file.accounts.is_empty() {
            return Err(ConfigError::Validation(format!(
                "no accounts configured in {}",
                self.accounts_path.display()
            )));
        }
        Ok(file
            .accounts
            .into_iter()
            .map(|account| account.screen_name)
            .collect())
    }

    /// Consumer key and secret for the token exchange.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] naming the first one not set.
    pub fn consumer_credentials(&self) -> Result<(&str, &str), ConfigError> {
        let key = self
            .consumer_key
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar("TWEETFAN_CONSUMER_KEY".to_string()))?;
        let secret = self
            .consumer_secret
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar("TWEETFAN_CONSUMER_SECRET".to_string()))?;
        Ok((key, secret))
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
