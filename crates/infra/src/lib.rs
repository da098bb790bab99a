mod config;
mod repos;
mod services;
mod system;

pub use config::{Config, EventsConfig, SchedulerConfig, StorageConfig};
pub use repos::{IReminderRepo, ISnoozeHistoryRepo, ReminderOwner, ReminderQuery, Repos};
pub use repos::{DeleteResult, UpdateResult};
pub use services::*;
use std::sync::Arc;
pub use system::{ISys, RealSys, StaticTimeSys};
use tracing::{info, warn};

#[derive(Clone)]
pub struct ReminderContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub publisher: Arc<dyn IEventPublisher>,
}

impl ReminderContext {
    async fn create(config: Config) -> anyhow::Result<Self> {
        let repos = match &config.storage.mongodb_url {
            Some(url) => {
                Repos::create_mongodb(url, &config.storage.database_name, config.storage.timeout)
                    .await?
            }
            None => {
                warn!("MONGODB_URL is not set, reminders are kept in memory and lost on restart");
                Repos::create_inmemory()
            }
        };

        let publisher: Arc<dyn IEventPublisher> = match &config.events.webhook_url {
            Some(url) => {
                info!("Publishing events to webhook: {}", url);
                Arc::new(WebhookEventPublisher::new(
                    url.clone(),
                    config.events.webhook_key.clone(),
                    config.events.webhook_timeout,
                )?)
            }
            None => Arc::new(TracingEventPublisher::new()),
        };

        Ok(Self {
            repos,
            config,
            sys: Arc::new(RealSys {}),
            publisher,
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            repos: Repos::create_inmemory(),
            config: Config::default(),
            sys: Arc::new(RealSys {}),
            publisher: Arc::new(InMemoryEventPublisher::new()),
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> anyhow::Result<ReminderContext> {
    ReminderContext::create(Config::new()).await
}
