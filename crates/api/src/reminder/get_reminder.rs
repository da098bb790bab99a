use crate::error::ReminderError;
use crate::shared::usecase::UseCase;
use reminder_scheduler_domain::{Reminder, ID};
use reminder_scheduler_infra::ReminderContext;

#[derive(Debug)]
pub struct GetReminderUseCase {
    pub reminder_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    StorageError(String),
}

impl From<UseCaseError> for ReminderError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(id) => {
                Self::NotFound(format!("The reminder with id: {}, was not found.", id))
            }
            UseCaseError::StorageError(msg) => Self::Persistence(msg),
        }
    }
}

#[async_trait::async_trait]
impl UseCase for GetReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "GetReminder";

    async fn execute(&mut self, ctx: &ReminderContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .reminders
            .find(&self.reminder_id)
            .await
            .map_err(|e| UseCaseError::StorageError(e.to_string()))?
            .ok_or_else(|| UseCaseError::NotFound(self.reminder_id.clone()))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::testing::*;
    use reminder_scheduler_domain::ReminderStatus;

    #[tokio::test]
    async fn finds_existing_reminder() {
        let TestContext { ctx, .. } = setup();
        let reminder = insert_reminder(&ctx, ReminderStatus::Pending, NOW).await;

        let mut usecase = GetReminderUseCase {
            reminder_id: reminder.id.clone(),
        };
        assert_eq!(usecase.execute(&ctx).await, Ok(reminder));
    }

    #[tokio::test]
    async fn rejects_unknown_id() {
        let TestContext { ctx, .. } = setup();

        let reminder_id = ID::new();
        let mut usecase = GetReminderUseCase {
            reminder_id: reminder_id.clone(),
        };
        assert_eq!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::NotFound(reminder_id))
        );
    }

    #[tokio::test]
    async fn store_failure_is_not_reported_as_missing() {
        let TestContext { ctx, .. } = setup_unavailable_store();

        let mut usecase = GetReminderUseCase {
            reminder_id: ID::new(),
        };
        let res = usecase.execute(&ctx).await;
        assert!(matches!(res, Err(UseCaseError::StorageError(_))));
        assert!(matches!(
            ReminderError::from(res.unwrap_err()),
            ReminderError::Persistence(_)
        ));
    }
}
