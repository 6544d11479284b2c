mod fetch;

use chrono::{DateTime, FixedOffset};
use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "tweetfan")]
#[command(about = "Read and aggregate recent posts from a set of timeline accounts")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Read every configured account and print the aggregated result
    Fetch {
        /// Account to read; repeat for several. Overrides configured accounts.
        #[arg(long = "screen-name")]
        screen_names: Vec<String>,
        /// Keep posts from the last N days
        #[arg(long, conflicts_with = "since", value_parser = parse_days)]
        days: Option<u32>,
        /// Keep posts at or after this RFC 3339 timestamp
        #[arg(long, value_parser = parse_since)]
        since: Option<DateTime<FixedOffset>>,
        /// Print JSON instead of tables
        #[arg(long)]
        json: bool,
    },
    /// Exchange the consumer key and secret for an application bearer token
    Token,
}

fn parse_days(raw: &str) -> Result<u32, String> {
    let days = raw
        .parse::<u32>()
        .map_err(|e| format!("expected a whole number of days: {e}"))?;
    tweetfan_core::validate_days_back(days)?;
    Ok(days)
}

fn parse_since(raw: &str) -> Result<DateTime<FixedOffset>, String> {
    DateTime::parse_from_rfc3339(raw).map_err(|e| format!("expected an RFC 3339 timestamp: {e}"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = tweetfan_core::load_app_config_from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::Fetch {
            screen_names,
            days,
            since,
            json,
        }) => {
            fetch::apply_overrides(&mut config, screen_names, days, since);
            fetch::run_fetch(&config, json).await?;
        }
        Some(Commands::Token) => fetch::run_token(&config).await?,
        None => Cli::command().print_help()?,
    }

    Ok(())
}

#[cfg(test)]
mod tests;
