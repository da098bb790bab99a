use crate::error::ReminderError;
use crate::shared::{events::publish, usecase::UseCase};
use reminder_scheduler_domain::{
    InvalidDurationError, Reminder, ReminderEvent, ReminderStatus, SnoozeDuration, SnoozeEntry, ID,
};
use reminder_scheduler_infra::ReminderContext;
use tracing::error;

/// Postpones a reminder by `duration`, counted from now, and puts it back in
/// the queue of pending reminders
#[derive(Debug)]
pub struct SnoozeReminderUseCase {
    pub reminder_id: ID,
    /// Compact duration like `15m` or `1h30m`
    pub duration: String,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidDuration(InvalidDurationError),
    NotFound(ID),
    Terminal(ID, ReminderStatus),
    StorageError(String),
}

impl From<UseCaseError> for ReminderError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidDuration(e) => Self::InvalidDuration(e),
            UseCaseError::NotFound(id) => {
                Self::NotFound(format!("The reminder with id: {}, was not found.", id))
            }
            UseCaseError::Terminal(id, status) => Self::Conflict(format!(
                "The reminder with id: {} is {} and can not be snoozed.",
                id, status
            )),
            UseCaseError::StorageError(msg) => Self::Persistence(msg),
        }
    }
}

#[async_trait::async_trait]
impl UseCase for SnoozeReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "SnoozeReminder";

    async fn execute(&mut self, ctx: &ReminderContext) -> Result<Self::Response, Self::Error> {
        // Validate before touching the reminder so that a bad request leaves it unmodified
        let duration = self
            .duration
            .parse::<SnoozeDuration>()
            .map_err(UseCaseError::InvalidDuration)?;

        let reminder = ctx
            .repos
            .reminders
            .find(&self.reminder_id)
            .await
            .map_err(|e| UseCaseError::StorageError(e.to_string()))?
            .ok_or_else(|| UseCaseError::NotFound(self.reminder_id.clone()))?;
        if reminder.status.is_terminal() {
            return Err(UseCaseError::Terminal(reminder.id, reminder.status));
        }

        let now = ctx.sys.get_timestamp_millis();
        let new_remind_at = now
            .checked_add(duration.as_millis())
            .ok_or_else(|| {
                UseCaseError::InvalidDuration(InvalidDurationError::Malformed(
                    self.duration.clone(),
                ))
            })?;

        let matched = ctx
            .repos
            .reminders
            .snooze(&reminder.id, new_remind_at, now)
            .await
            .map_err(|e| UseCaseError::StorageError(e.to_string()))?;
        if !matched {
            // Cancelled, completed or deleted after it was read
            let current = ctx
                .repos
                .reminders
                .find(&reminder.id)
                .await
                .map_err(|e| UseCaseError::StorageError(e.to_string()))?;
            return Err(match current {
                Some(current) => UseCaseError::Terminal(current.id, current.status),
                None => UseCaseError::NotFound(reminder.id),
            });
        }

        let entry = SnoozeEntry {
            id: ID::new(),
            reminder_id: reminder.id.clone(),
            user_id: reminder.user_id.clone(),
            snoozed_at: now,
            duration: self.duration.clone(),
            new_remind_at,
        };
        if let Err(e) = ctx.repos.snooze_history.insert(&entry).await {
            error!(
                reminder_id = %reminder.id,
                "Unable to record snooze history: {:?}", e
            );
        }

        let mut snoozed = reminder;
        snoozed.remind_at = new_remind_at;
        snoozed.status = ReminderStatus::Pending;
        snoozed.updated = now;

        publish(ctx, ReminderEvent::snoozed(&snoozed)).await;

        Ok(snoozed)
    }
}
