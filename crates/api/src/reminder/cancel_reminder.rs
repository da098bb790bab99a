use crate::error::ReminderError;
use crate::shared::{events::publish, usecase::UseCase};
use reminder_scheduler_domain::{Reminder, ReminderEvent, ReminderStatus, ID};
use reminder_scheduler_infra::ReminderContext;

#[derive(Debug)]
pub struct CancelReminderUseCase {
    pub reminder_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    AlreadyCompleted(ID),
    StorageError(String),
}

impl From<UseCaseError> for ReminderError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(id) => {
                Self::NotFound(format!("The reminder with id: {}, was not found.", id))
            }
            UseCaseError::AlreadyCompleted(id) => Self::Conflict(format!(
                "The reminder with id: {} is completed and can not be cancelled.",
                id
            )),
            UseCaseError::StorageError(msg) => Self::Persistence(msg),
        }
    }
}

#[async_trait::async_trait]
impl UseCase for CancelReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "CancelReminder";

    async fn execute(&mut self, ctx: &ReminderContext) -> Result<Self::Response, Self::Error> {
        let mut reminder = ctx
            .repos
            .reminders
            .find(&self.reminder_id)
            .await
            .map_err(|e| UseCaseError::StorageError(e.to_string()))?
            .ok_or_else(|| UseCaseError::NotFound(self.reminder_id.clone()))?;

        match reminder.status {
            ReminderStatus::Cancelled => return Ok(reminder),
            ReminderStatus::Completed => return Err(UseCaseError::AlreadyCompleted(reminder.id)),
            _ => (),
        }

        let now = ctx.sys.get_timestamp_millis();
        let transitioned = ctx
            .repos
            .reminders
            .transition_status(
                &reminder.id,
                ReminderStatus::Cancelled,
                &ReminderStatus::active(),
                now,
            )
            .await
            .map_err(|e| UseCaseError::StorageError(e.to_string()))?;
        if !transitioned {
            // Moved into a terminal status after it was read
            let current = ctx
                .repos
                .reminders
                .find(&reminder.id)
                .await
                .map_err(|e| UseCaseError::StorageError(e.to_string()))?;
            return match current {
                Some(current) if current.status == ReminderStatus::Cancelled => Ok(current),
                Some(current) => Err(UseCaseError::AlreadyCompleted(current.id)),
                None => Err(UseCaseError::NotFound(reminder.id)),
            };
        }
        reminder.status = ReminderStatus::Cancelled;
        reminder.updated = now;

        publish(ctx, ReminderEvent::cancelled(&reminder)).await;

        Ok(reminder)
    }
}
