use reminder_scheduler_domain::ReminderEvent;
use reminder_scheduler_infra::ReminderContext;
use tracing::error;

/// Publishes the event after the state change has been persisted.
/// A failing publish is logged and never undoes the state change
pub async fn publish(ctx: &ReminderContext, event: ReminderEvent) {
    if let Err(e) = ctx.publisher.publish(&event).await {
        error!(topic = event.topic(), "Unable to publish event: {}", e);
    }
}
