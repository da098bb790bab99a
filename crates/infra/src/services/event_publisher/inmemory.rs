use super::{IEventPublisher, PublishError};
use reminder_scheduler_domain::ReminderEvent;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Mutex,
};

/// Keeps every published event in memory so that they can be inspected
pub struct InMemoryEventPublisher {
    events: Mutex<Vec<ReminderEvent>>,
    closed: AtomicBool,
}

impl InMemoryEventPublisher {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            closed: AtomicBool::new(false),
        }
    }

    pub fn events(&self) -> Vec<ReminderEvent> {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn events_on(&self, topic: &str) -> Vec<ReminderEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.topic() == topic)
            .collect()
    }

    /// When closed every publish fails with `PublishError::Closed`
    pub fn set_closed(&self, closed: bool) {
        self.closed.store(closed, Ordering::SeqCst);
    }
}

impl Default for InMemoryEventPublisher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IEventPublisher for InMemoryEventPublisher {
    async fn publish(&self, event: &ReminderEvent) -> Result<(), PublishError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(PublishError::Closed);
        }
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(event.clone());
        Ok(())
    }
}
