use super::{
    create_reminder::CreateReminderUseCase,
    trigger_reminder::{TriggerOutcome, TriggerReminderUseCase},
};
use crate::shared::usecase::{execute, Subscriber};
use reminder_scheduler_infra::ReminderContext;
use tracing::info;

/// Creates the next `Reminder` of a recurring series once the current one has fired
pub struct ScheduleNextOccurrenceOnTriggered;

#[async_trait::async_trait]
impl Subscriber<TriggerReminderUseCase> for ScheduleNextOccurrenceOnTriggered {
    async fn notify(&self, e: &TriggerOutcome, ctx: &ReminderContext) {
        let reminder = match e {
            TriggerOutcome::Triggered(reminder) => reminder,
            TriggerOutcome::AlreadyClaimed(_) => return,
        };
        let (next, recurrence) = match reminder.next_in_series() {
            Some(next) => next,
            None => return,
        };

        let create_next = CreateReminderUseCase::next_in_series(reminder, next, recurrence);
        // Sideeffect, the failure is logged by the usecase executor
        if let Ok(successor) = execute(create_next, ctx).await {
            info!(
                reminder_id = %reminder.id,
                successor_id = %successor.id,
                "Scheduled next occurrence at {}", successor.remind_at
            );
        }
    }
}
