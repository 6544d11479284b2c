use std::collections::BTreeMap;
use std::path::PathBuf;

use tweetfan_core::{AppConfig, Cutoff, Environment, PostRecord};
use tweetfan_reader::{FailedSource, TimelineSummary};

use super::*;

fn base_config() -> AppConfig {
    AppConfig {
        env: Environment::Test,
        bind_addr: "127.0.0.1:3000".parse().unwrap(),
        log_level: "info".to_string(),
        api_base_url: "https://api.twitter.com".to_string(),
        bearer_token: None,
        consumer_key: None,
        consumer_secret: None,
        screen_names: vec!["configured".to_string()],
        accounts_path: PathBuf::from("./config/accounts.yaml"),
        cutoff: Cutoff::DaysBack(14),
        page_size: 15,
        request_timeout_secs: 30,
        user_agent: "tweetfan-test/0.1".to_string(),
    }
}

fn at(rfc3339: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(rfc3339).unwrap()
}

// ---------------------------------------------------------------------------
// argument parsing
// ---------------------------------------------------------------------------

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["tweetfan"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_bare_fetch() {
    let cli = Cli::try_parse_from(["tweetfan", "fetch"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Fetch {
            ref screen_names,
            days: None,
            since: None,
            json: false,
        }) if screen_names.is_empty()
    ));
}

#[test]
fn parses_repeated_screen_names() {
    let cli = Cli::try_parse_from([
        "tweetfan",
        "fetch",
        "--screen-name",
        "pay_by_phone",
        "--screen-name",
        "PayByPhone_UK",
        "--json",
    ])
    .expect("expected valid cli args");

    let Some(Commands::Fetch {
        screen_names, json, ..
    }) = cli.command
    else {
        panic!("expected fetch command");
    };
    assert_eq!(screen_names, vec!["pay_by_phone", "PayByPhone_UK"]);
    assert!(json);
}

#[test]
fn parses_days() {
    let cli = Cli::try_parse_from(["tweetfan", "fetch", "--days", "7"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Fetch { days: Some(7), .. })
    ));
}

#[test]
fn rejects_days_beyond_limit() {
    let result = Cli::try_parse_from(["tweetfan", "fetch", "--days", "200000000"]);
    assert!(result.is_err(), "expected --days to be rejected");
}

#[test]
fn accepts_days_at_limit() {
    let limit = tweetfan_core::MAX_DAYS_BACK.to_string();
    let cli = Cli::try_parse_from(["tweetfan", "fetch", "--days", limit.as_str()]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Fetch { days: Some(d), .. }) if d == tweetfan_core::MAX_DAYS_BACK
    ));
}

#[test]
fn parses_since_as_rfc3339() {
    let cli = Cli::try_parse_from(["tweetfan", "fetch", "--since", "2013-11-14T00:00:00-08:00"])
        .unwrap();
    let Some(Commands::Fetch { since, .. }) = cli.command else {
        panic!("expected fetch command");
    };
    assert_eq!(since, Some(at("2013-11-14T00:00:00-08:00")));
}

#[test]
fn rejects_malformed_since() {
    assert!(Cli::try_parse_from(["tweetfan", "fetch", "--since", "last tuesday"]).is_err());
}

#[test]
fn days_and_since_conflict() {
    let result = Cli::try_parse_from([
        "tweetfan",
        "fetch",
        "--days",
        "3",
        "--since",
        "2013-11-14T00:00:00Z",
    ]);
    assert!(result.is_err());
}

#[test]
fn parses_token_command() {
    let cli = Cli::try_parse_from(["tweetfan", "token"]).unwrap();
    assert!(matches!(cli.command, Some(Commands::Token)));
}

// ---------------------------------------------------------------------------
// overrides
// ---------------------------------------------------------------------------

#[test]
fn overrides_keep_config_when_absent() {
    let mut config = base_config();
    fetch::apply_overrides(&mut config, Vec::new(), None, None);
    assert_eq!(config.screen_names, vec!["configured"]);
    assert_eq!(config.cutoff, Cutoff::DaysBack(14));
}

#[test]
fn overrides_replace_accounts_and_days() {
    let mut config = base_config();
    fetch::apply_overrides(&mut config, vec!["a".into(), "b".into()], Some(3), None);
    assert_eq!(config.screen_names, vec!["a", "b"]);
    assert_eq!(config.cutoff, Cutoff::DaysBack(3));
}

#[test]
fn since_override_is_absolute() {
    let mut config = base_config();
    let since = at("2013-11-14T00:00:00+00:00");
    fetch::apply_overrides(&mut config, Vec::new(), None, Some(since));
    assert_eq!(config.cutoff, Cutoff::Absolute(since));
}

// ---------------------------------------------------------------------------
// rendering
// ---------------------------------------------------------------------------

fn summary() -> TimelineSummary {
    let post = |id: &str, account: &str, created: &str, text: &str| PostRecord {
        id: id.to_string(),
        created_at: at(created),
        source_account: account.to_string(),
        text: text.to_string(),
        cross_mention_count: 1,
    };
    TimelineSummary {
        posts: vec![
            post("2", "PayByPhone", "2013-11-27T23:50:44+00:00", "newest"),
            post("1", "pay_by_phone", "2013-11-26T18:31:34+00:00", &"long ".repeat(30)),
        ],
        count_per_account: BTreeMap::from([
            ("PayByPhone".to_string(), 1),
            ("pay_by_phone".to_string(), 1),
            ("PayByPhone_UK".to_string(), 0),
        ]),
        cross_mention_count_per_account: BTreeMap::from([
            ("PayByPhone".to_string(), 1),
            ("pay_by_phone".to_string(), 1),
            ("PayByPhone_UK".to_string(), 0),
        ]),
        accounts: vec![
            "pay_by_phone".to_string(),
            "PayByPhone".to_string(),
            "PayByPhone_UK".to_string(),
        ],
        failed_sources: vec![FailedSource {
            source_id: "PayByPhone_UK".to_string(),
            message: "unexpected HTTP status 500".to_string(),
        }],
    }
}

#[test]
fn render_lists_every_account_in_configured_order() {
    let out = fetch::render_summary(&summary()).unwrap();
    let first = out.find("pay_by_phone").unwrap();
    let second = out.find("PayByPhone ").unwrap();
    let third = out.find("PayByPhone_UK").unwrap();
    assert!(first < second && second < third, "{out}");
}

#[test]
fn render_keeps_post_order_and_truncates_text() {
    let out = fetch::render_summary(&summary()).unwrap();
    let newest = out.find("newest").unwrap();
    let older = out.find("long long").unwrap();
    assert!(newest < older);
    assert!(out.contains("..."));
    assert!(out.contains("2013-11-27T23:50:44+00:00"));
}

#[test]
fn render_reports_empty_window() {
    let mut empty = summary();
    empty.posts.clear();
    let out = fetch::render_summary(&empty).unwrap();
    assert!(out.contains("no posts in window"));
}
