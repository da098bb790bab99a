use super::{IEventPublisher, PublishError};
use reminder_scheduler_domain::ReminderEvent;
use tracing::info;

/// Writes events to the log. Used when no event sink is configured
pub struct TracingEventPublisher {}

impl TracingEventPublisher {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for TracingEventPublisher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IEventPublisher for TracingEventPublisher {
    async fn publish(&self, event: &ReminderEvent) -> Result<(), PublishError> {
        let topic = event.topic();
        let payload = serde_json::to_string(event)
            .map_err(|source| PublishError::Serialize { topic, source })?;
        info!(topic, %payload, "Published event");
        Ok(())
    }
}
