mod inmemory;
mod log;
mod webhook;

pub use inmemory::InMemoryEventPublisher;
pub use log::TracingEventPublisher;
use reminder_scheduler_domain::ReminderEvent;
use thiserror::Error;
pub use webhook::{WebhookEventPublisher, WEBHOOK_KEY_HEADER};

#[derive(Error, Debug)]
pub enum PublishError {
    #[error("Unable to serialize payload for topic `{topic}`: {source}")]
    Serialize {
        topic: &'static str,
        source: serde_json::Error,
    },
    #[error("Unable to deliver event on topic `{topic}`: {source}")]
    Transport {
        topic: &'static str,
        source: reqwest::Error,
    },
    #[error("The event channel is closed")]
    Closed,
}

/// Publish only channel for `ReminderEvent`s. Delivery is fire and forget,
/// consumers are expected to handle duplicates.
#[async_trait::async_trait]
pub trait IEventPublisher: Send + Sync {
    async fn publish(&self, event: &ReminderEvent) -> Result<(), PublishError>;
}
