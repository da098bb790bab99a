use super::{IEventPublisher, PublishError};
use reminder_scheduler_domain::ReminderEvent;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

pub const WEBHOOK_KEY_HEADER: &str = "reminder-scheduler-webhook-key";

#[derive(Debug, Serialize)]
struct WebhookEnvelope<'a> {
    topic: &'static str,
    payload: &'a ReminderEvent,
}

/// Posts every event as `{ topic, payload }` to a configured url
pub struct WebhookEventPublisher {
    client: Client,
    url: String,
    key: String,
}

impl WebhookEventPublisher {
    pub fn new(url: String, key: String, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, url, key })
    }
}

#[async_trait::async_trait]
impl IEventPublisher for WebhookEventPublisher {
    async fn publish(&self, event: &ReminderEvent) -> Result<(), PublishError> {
        let topic = event.topic();
        self.client
            .post(&self.url)
            .header(WEBHOOK_KEY_HEADER, &self.key)
            .json(&WebhookEnvelope {
                topic,
                payload: event,
            })
            .send()
            .await
            .and_then(|res| res.error_for_status())
            .map_err(|source| PublishError::Transport { topic, source })?;
        Ok(())
    }
}
