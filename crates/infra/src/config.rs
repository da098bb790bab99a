use std::{str::FromStr, time::Duration};
use tracing::warn;

#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// How often the scheduler polls for due reminders
    pub poll_interval: Duration,
    /// Upper bound for a single poll. A tick that takes longer is abandoned
    pub tick_timeout: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(30),
            tick_timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// MongoDB connection string. Reminders are kept in memory when missing
    pub mongodb_url: Option<String>,
    pub database_name: String,
    /// Server selection and connect timeout
    pub timeout: Duration,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            mongodb_url: None,
            database_name: "reminders".into(),
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EventsConfig {
    /// Events are only written to the log when no webhook is configured
    pub webhook_url: Option<String>,
    /// Sent in the `reminder-scheduler-webhook-key` header so that the receiver
    /// can verify the sender
    pub webhook_key: String,
    pub webhook_timeout: Duration,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            webhook_url: None,
            webhook_key: String::new(),
            webhook_timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub scheduler: SchedulerConfig,
    pub storage: StorageConfig,
    pub events: EventsConfig,
}

impl Config {
    /// Reads the configuration from environment variables, falling back to
    /// the defaults for anything missing or invalid
    pub fn new() -> Self {
        let defaults = Self::default();
        Self {
            scheduler: SchedulerConfig {
                poll_interval: secs_from_env(
                    "SCHEDULER_POLL_INTERVAL_SECS",
                    defaults.scheduler.poll_interval,
                ),
                tick_timeout: secs_from_env(
                    "SCHEDULER_TICK_TIMEOUT_SECS",
                    defaults.scheduler.tick_timeout,
                ),
            },
            storage: StorageConfig {
                mongodb_url: optional_env("MONGODB_URL"),
                database_name: optional_env("DATABASE_NAME")
                    .unwrap_or(defaults.storage.database_name),
                timeout: secs_from_env("STORAGE_TIMEOUT_SECS", defaults.storage.timeout),
            },
            events: EventsConfig {
                webhook_url: optional_env("EVENTS_WEBHOOK_URL"),
                webhook_key: optional_env("EVENTS_WEBHOOK_KEY")
                    .unwrap_or(defaults.events.webhook_key),
                webhook_timeout: secs_from_env(
                    "EVENTS_WEBHOOK_TIMEOUT_SECS",
                    defaults.events.webhook_timeout,
                ),
            },
        }
    }
}

fn optional_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn secs_from_env(name: &str, default: Duration) -> Duration {
    match optional_env(name) {
        Some(value) => parse_secs(&value).unwrap_or_else(|| {
            warn!(
                "The given {}: {} is not valid, falling back to the default: {}s.",
                name,
                value,
                default.as_secs()
            );
            default
        }),
        None => default,
    }
}

/// A positive number of seconds
fn parse_secs(value: &str) -> Option<Duration> {
    u64::from_str(value.trim())
        .ok()
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
}
