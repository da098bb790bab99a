use crate::error::ReminderError;
use crate::shared::usecase::UseCase;
use reminder_scheduler_domain::{SnoozeEntry, ID};
use reminder_scheduler_infra::ReminderContext;

/// Lists how a reminder was snoozed, newest first
#[derive(Debug)]
pub struct GetSnoozeHistoryUseCase {
    pub reminder_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError(String),
}

impl From<UseCaseError> for ReminderError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError(msg) => Self::Persistence(msg),
        }
    }
}

#[async_trait::async_trait]
impl UseCase for GetSnoozeHistoryUseCase {
    type Response = Vec<SnoozeEntry>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetSnoozeHistory";

    async fn execute(&mut self, ctx: &ReminderContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .snooze_history
            .find_by_reminder(&self.reminder_id)
            .await
            .map_err(|e| UseCaseError::StorageError(e.to_string()))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::reminder::snooze_reminder::SnoozeReminderUseCase;
    use crate::shared::{testing::*, usecase::execute};
    use reminder_scheduler_domain::ReminderStatus;

    #[tokio::test]
    async fn lists_snoozes_of_reminder() {
        let TestContext { ctx, .. } = setup();
        let reminder = insert_reminder(&ctx, ReminderStatus::Pending, NOW).await;
        let other = insert_reminder(&ctx, ReminderStatus::Pending, NOW).await;

        for (reminder_id, duration) in [
            (&reminder.id, "15m"),
            (&other.id, "1h"),
            (&reminder.id, "1d"),
        ] {
            execute(
                SnoozeReminderUseCase {
                    reminder_id: reminder_id.clone(),
                    duration: duration.into(),
                },
                &ctx,
            )
            .await
            .unwrap();
        }

        let mut usecase = GetSnoozeHistoryUseCase {
            reminder_id: reminder.id.clone(),
        };
        let history = usecase.execute(&ctx).await.unwrap();
        assert_eq!(history.len(), 2);
        assert!(history.iter().all(|e| e.reminder_id == reminder.id));
    }
}
