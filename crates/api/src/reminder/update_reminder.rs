use crate::error::ReminderError;
use crate::shared::{events::publish, usecase::UseCase};
use reminder_scheduler_domain::{Reminder, ReminderEvent, ReminderUpdate, ID};
use reminder_scheduler_infra::ReminderContext;

/// Applies a partial update. Status is never changed here, it only moves
/// through the dedicated lifecycle operations
#[derive(Debug)]
pub struct UpdateReminderUseCase {
    pub reminder_id: ID,
    pub update: ReminderUpdate,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    InvalidRecurrence(String),
    StorageError(String),
}

impl From<UseCaseError> for ReminderError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(id) => {
                Self::NotFound(format!("The reminder with id: {}, was not found.", id))
            }
            UseCaseError::InvalidRecurrence(msg) => Self::Validation(msg),
            UseCaseError::StorageError(msg) => Self::Persistence(msg),
        }
    }
}

#[async_trait::async_trait]
impl UseCase for UpdateReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateReminder";

    async fn execute(&mut self, ctx: &ReminderContext) -> Result<Self::Response, Self::Error> {
        let update = self.update.clone().normalized();
        if let Some(recurrence) = &update.recurrence {
            recurrence
                .validate()
                .map_err(|e| UseCaseError::InvalidRecurrence(e.to_string()))?;
        }

        let now = ctx.sys.get_timestamp_millis();
        let res = ctx
            .repos
            .reminders
            .update(&self.reminder_id, &update, now)
            .await
            .map_err(|e| UseCaseError::StorageError(e.to_string()))?;
        if !res.matched() {
            return Err(UseCaseError::NotFound(self.reminder_id.clone()));
        }

        let reminder = ctx
            .repos
            .reminders
            .find(&self.reminder_id)
            .await
            .map_err(|e| UseCaseError::StorageError(e.to_string()))?
            .ok_or_else(|| UseCaseError::NotFound(self.reminder_id.clone()))?;

        publish(ctx, ReminderEvent::updated(&reminder)).await;

        Ok(reminder)
    }
}
