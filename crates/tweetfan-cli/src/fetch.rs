//! Handlers for `fetch` and `token`.

use std::fmt::Write as _;

use chrono::{DateTime, FixedOffset};
use tweetfan_core::{AppConfig, Cutoff};
use tweetfan_reader::{
    fetch_bearer_token, resolve_bearer_token, summarize_timelines, TimelineClient, TimelineSummary,
};

const TEXT_WIDTH: usize = 60;

/// Applies command-line overrides on top of the environment configuration.
pub(crate) fn apply_overrides(
    config: &mut AppConfig,
    screen_names: Vec<String>,
    days: Option<u32>,
    since: Option<DateTime<FixedOffset>>,
) {
    if !screen_names.is_empty() {
        config.screen_names = screen_names;
    }
    if let Some(at) = since {
        config.cutoff = Cutoff::Absolute(at);
    } else if let Some(days) = days {
        config.cutoff = Cutoff::DaysBack(days);
    }
}

/// Reads every account and prints the summary.
///
/// Accounts that failed are reported on stderr; the command still succeeds
/// when at least the batch itself ran.
///
/// # Errors
///
/// Returns an error if no accounts are configured, no credentials are
/// available, or the client cannot be built.
pub(crate) async fn run_fetch(config: &AppConfig, json: bool) -> anyhow::Result<()> {
    let screen_names = config.resolve_screen_names()?;
    let token = resolve_bearer_token(config).await?;
    let client = TimelineClient::from_app_config(config, &token)
        .map_err(|e| anyhow::anyhow!("failed to build timeline client: {e}"))?;

    let summary = summarize_timelines(&client, config, screen_names).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", render_summary(&summary)?);
    }

    for failed in &summary.failed_sources {
        eprintln!("error: failed to read {}: {}", failed.source_id, failed.message);
    }

    Ok(())
}

/// Prints a freshly exchanged bearer token.
///
/// # Errors
///
/// Returns an error if the consumer key or secret is missing, or the
/// exchange fails.
pub(crate) async fn run_token(config: &AppConfig) -> anyhow::Result<()> {
    let (key, secret) = config.consumer_credentials()?;

    let token = fetch_bearer_token(
        &config.api_base_url,
        key,
        secret,
        config.request_timeout_secs,
        &config.user_agent,
    )
    .await?;
    println!("{token}");
    Ok(())
}

/// Renders the per-account tables followed by the posts, newest first.
///
/// # Errors
///
/// Returns [`std::fmt::Error`] if formatting into the buffer fails.
pub(crate) fn render_summary(summary: &TimelineSummary) -> Result<String, std::fmt::Error> {
    let mut out = String::new();

    writeln!(out, "{:<20}{:>8}{:>10}", "ACCOUNT", "POSTS", "MENTIONS")?;
    for account in &summary.accounts {
        let posts = summary.count_per_account.get(account).copied().unwrap_or(0);
        let mentions = summary
            .cross_mention_count_per_account
            .get(account)
            .copied()
            .unwrap_or(0);
        writeln!(out, "{account:<20}{posts:>8}{mentions:>10}")?;
    }

    if summary.posts.is_empty() {
        writeln!(out, "\nno posts in window")?;
        return Ok(out);
    }

    writeln!(out, "\n{:<27}{:<20}{:<20}TEXT", "CREATED", "ACCOUNT", "ID")?;
    for post in &summary.posts {
        writeln!(
            out,
            "{:<27}{:<20}{:<20}{}",
            post.created_at.to_rfc3339(),
            post.source_account,
            post.id,
            truncate(&single_line(&post.text), TEXT_WIDTH)
        )?;
    }
    Ok(out)
}

fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        format!("{}...", text.chars().take(width).collect::<String>())
    } else {
        text.to_string()
    }
}
