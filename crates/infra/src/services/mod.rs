mod event_publisher;

pub use event_publisher::{
    IEventPublisher, InMemoryEventPublisher, PublishError, TracingEventPublisher,
    WebhookEventPublisher, WEBHOOK_KEY_HEADER,
};
