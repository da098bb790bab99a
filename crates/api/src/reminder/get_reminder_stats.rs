use crate::error::ReminderError;
use crate::shared::usecase::UseCase;
use reminder_scheduler_domain::ReminderStats;
use reminder_scheduler_infra::ReminderContext;

#[derive(Debug)]
pub struct GetReminderStatsUseCase {
    pub user_id: String,
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
impl UseCase for GetReminderStatsUseCase {
    type Response = ReminderStats;

    type Error = UseCaseError;

    const NAME: &'static str = "GetReminderStats";

    async fn execute(&mut self, ctx: &ReminderContext) -> Result<Self::Response, Self::Error> {
        let reminders = ctx
            .repos
            .reminders
            .find_all_by_user(&self.user_id)
            .await
            .map_err(|e| UseCaseError::StorageError(e.to_string()))?;

        Ok(ReminderStats::compute(
            &reminders,
            ctx.sys.get_timestamp_millis(),
        ))
    }
}
