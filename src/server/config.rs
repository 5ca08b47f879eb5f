use chrono::Duration;
use std::str::FromStr;

use crate::server::error::{config::ConfigError, AppError};

const DEFAULT_HTTP_BIND: &str = "0.0.0.0:8080";
const DEFAULT_CORE_ROLE_NAME: &str = "core";
const DEFAULT_GENERAL_CHANNEL: &str = "general-proposals";
const DEFAULT_BUDGET_CHANNEL: &str = "budget-proposals";
const DEFAULT_EVENTS_CHANNEL: &str = "events";
const DEFAULT_VOTE_WINDOW_HOURS: i64 = 48;
const DEFAULT_VOTE_QUORUM: u64 = 5;
const DEFAULT_EVENT_POLL_CRON: &str = "0 0 * * * *";
const DEFAULT_EVENT_LOOKAHEAD_HOURS: i64 = 24;
const DEFAULT_EVENT_CREATION_DELAY_MINUTES: i64 = 30;
const DEFAULT_PUBLISHER_TIMEOUT_SECS: u64 = 120;
const DEFAULT_PUBLISHER_BASE_URL: &str = "https://snapshot.org";

/// Settings for the external proposal publisher process.
#[derive(Debug, Clone)]
pub struct PublisherConfig {
    /// Executable invoked with the proposal text as positional arguments.
    pub command: String,
    pub timeout_secs: u64,
    /// Passed to the process as `PUBLISHER_SPACE` and used to build the result URL.
    pub space: String,
    pub network: String,
    pub rpc_url: String,
    /// Base of the URL built from the ledger id the process prints.
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub discord_bot_token: String,
    pub http_bind: String,

    /// Name of the role allowed to manage contributors, events and votes.
    pub core_role_name: String,
    pub general_channel_name: String,
    pub budget_channel_name: String,
    pub events_channel_name: String,

    pub vote_window: Duration,
    /// Absolute number of yes votes a proposal needs to pass.
    pub vote_quorum: u64,

    pub event_poll_cron: String,
    pub event_lookahead: Duration,
    pub event_creation_delay: Duration,

    /// `None` disables ledger submission for passed proposals.
    pub publisher: Option<PublisherConfig>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let publisher = match optional_var("PUBLISHER_COMMAND") {
            Some(command) => Some(PublisherConfig {
                command,
                timeout_secs: positive_var("PUBLISHER_TIMEOUT_SECS", DEFAULT_PUBLISHER_TIMEOUT_SECS)?,
                space: required_var("PUBLISHER_SPACE")?,
                network: optional_var("PUBLISHER_NETWORK").unwrap_or_else(|| "1".to_string()),
                rpc_url: required_var("PUBLISHER_RPC_URL")?,
                base_url: optional_var("PUBLISHER_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_PUBLISHER_BASE_URL.to_string()),
            }),
            None => None,
        };

        Ok(Self {
            database_url: required_var("DATABASE_URL")?,
            discord_bot_token: required_var("DISCORD_BOT_TOKEN")?,
            http_bind: optional_var("HTTP_BIND").unwrap_or_else(|| DEFAULT_HTTP_BIND.to_string()),
            core_role_name: optional_var("CORE_ROLE_NAME")
                .unwrap_or_else(|| DEFAULT_CORE_ROLE_NAME.to_string()),
            general_channel_name: optional_var("GENERAL_PROPOSAL_CHANNEL")
                .unwrap_or_else(|| DEFAULT_GENERAL_CHANNEL.to_string()),
            budget_channel_name: optional_var("BUDGET_PROPOSAL_CHANNEL")
                .unwrap_or_else(|| DEFAULT_BUDGET_CHANNEL.to_string()),
            events_channel_name: optional_var("EVENTS_CHANNEL")
                .unwrap_or_else(|| DEFAULT_EVENTS_CHANNEL.to_string()),
            vote_window: duration_var(
                "VOTE_WINDOW_HOURS",
                DEFAULT_VOTE_WINDOW_HOURS,
                Duration::try_hours,
            )?,
            vote_quorum: positive_var("VOTE_QUORUM", DEFAULT_VOTE_QUORUM)?,
            event_poll_cron: optional_var("EVENT_POLL_CRON")
                .unwrap_or_else(|| DEFAULT_EVENT_POLL_CRON.to_string()),
            event_lookahead: duration_var(
                "EVENT_LOOKAHEAD_HOURS",
                DEFAULT_EVENT_LOOKAHEAD_HOURS,
                Duration::try_hours,
            )?,
            event_creation_delay: duration_var(
                "EVENT_CREATION_DELAY_MINUTES",
                DEFAULT_EVENT_CREATION_DELAY_MINUTES,
                Duration::try_minutes,
            )?,
            publisher,
        })
    }
}

fn required_var(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

/// Reads a variable, treating unset and empty as absent.
fn optional_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}

/// Reads a numeric variable that must be greater than zero.
fn positive_var<T>(name: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr + PartialOrd + Default,
{
    parse_positive(name, optional_var(name), default)
}

/// Reads a positive amount of time units and builds a duration from it.
fn duration_var(
    name: &str,
    default: i64,
    build: fn(i64) -> Option<Duration>,
) -> Result<Duration, ConfigError> {
    parse_duration(name, optional_var(name), default, build)
}

fn parse_duration(
    name: &str,
    raw: Option<String>,
    default: i64,
    build: fn(i64) -> Option<Duration>,
) -> Result<Duration, ConfigError> {
    let amount = parse_positive(name, raw.clone(), default)?;

    build(amount).ok_or_else(|| ConfigError::InvalidEnvVar {
        name: name.to_string(),
        value: raw.unwrap_or_else(|| amount.to_string()),
    })
}

fn parse_positive<T>(name: &str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr + PartialOrd + Default,
{
    let Some(value) = raw else {
        return Ok(default);
    };

    match value.trim().parse::<T>() {
        Ok(parsed) if parsed > T::default() => Ok(parsed),
        _ => Err(ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value,
        }),
    }
}
