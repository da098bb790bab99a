use crate::error::ReminderError;
use crate::shared::{events::publish, usecase::UseCase};
use reminder_scheduler_domain::{Reminder, ReminderEvent, ReminderStatus, ID};
use reminder_scheduler_infra::ReminderContext;

#[derive(Debug)]
pub struct CompleteReminderUseCase {
    pub reminder_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    AlreadyCancelled(ID),
    StorageError(String),
}

impl From<UseCaseError> for ReminderError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(id) => {
                Self::NotFound(format!("The reminder with id: {}, was not found.", id))
            }
            UseCaseError::AlreadyCancelled(id) => Self::Conflict(format!(
                "The reminder with id: {} is cancelled and can not be completed.",
                id
            )),
            UseCaseError::StorageError(msg) => Self::Persistence(msg),
        }
    }
}

#[async_trait::async_trait]
impl UseCase for CompleteReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "CompleteReminder";

    async fn execute(&mut self, ctx: &ReminderContext) -> Result<Self::Response, Self::Error> {
        let mut reminder = ctx
            .repos
            .reminders
            .find(&self.reminder_id)
            .await
            .map_err(|e| UseCaseError::StorageError(e.to_string()))?
            .ok_or_else(|| UseCaseError::NotFound(self.reminder_id.clone()))?;

        match reminder.status {
            ReminderStatus::Completed => return Ok(reminder),
            ReminderStatus::Cancelled => return Err(UseCaseError::AlreadyCancelled(reminder.id)),
            _ => (),
        }

        let now = ctx.sys.get_timestamp_millis();
        let transitioned = ctx
            .repos
            .reminders
            .transition_status(
                &reminder.id,
                ReminderStatus::Completed,
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
                Some(current) if current.status == ReminderStatus::Completed => Ok(current),
                Some(current) => Err(UseCaseError::AlreadyCancelled(current.id)),
                None => Err(UseCaseError::NotFound(reminder.id)),
            };
        }
        reminder.status = ReminderStatus::Completed;
        reminder.updated = now;

        publish(ctx, ReminderEvent::completed(&reminder)).await;

        Ok(reminder)
    }
}
