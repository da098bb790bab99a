use crate::error::ReminderError;
use crate::reminder::complete_reminder::CompleteReminderUseCase;
use crate::shared::usecase::{execute, UseCase};
use reminder_scheduler_domain::{BulkResult, ID};
use reminder_scheduler_infra::ReminderContext;
use std::convert::Infallible;

#[derive(Debug)]
pub struct BulkCompleteRemindersUseCase {
    pub reminder_ids: Vec<String>,
}

#[async_trait::async_trait]
impl UseCase for BulkCompleteRemindersUseCase {
    type Response = BulkResult;

    type Error = Infallible;

    const NAME: &'static str = "BulkCompleteReminders";

    async fn execute(&mut self, ctx: &ReminderContext) -> Result<Self::Response, Self::Error> {
        let mut result = BulkResult::default();
        for reminder_id in &self.reminder_ids {
            let id = match reminder_id.parse::<ID>() {
                Ok(id) => id,
                Err(e) => {
                    result.record_failure(e.to_string());
                    continue;
                }
            };
            match execute(CompleteReminderUseCase { reminder_id: id }, ctx).await {
                Ok(_) => result.record_success(),
                Err(e) => result.record_failure(ReminderError::from(e).to_string()),
            }
        }

        Ok(result)
    }
}
