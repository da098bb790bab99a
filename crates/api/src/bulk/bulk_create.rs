use crate::error::ReminderError;
use crate::reminder::create_reminder::CreateReminderUseCase;
use crate::shared::usecase::{execute, UseCase};
use reminder_scheduler_domain::BulkResult;
use reminder_scheduler_infra::ReminderContext;
use std::convert::Infallible;

#[derive(Debug)]
pub struct BulkCreateRemindersUseCase {
    pub reminders: Vec<CreateReminderUseCase>,
}

#[async_trait::async_trait]
impl UseCase for BulkCreateRemindersUseCase {
    type Response = BulkResult;

    type Error = Infallible;

    const NAME: &'static str = "BulkCreateReminders";

    async fn execute(&mut self, ctx: &ReminderContext) -> Result<Self::Response, Self::Error> {
        let mut result = BulkResult::default();
        for request in self.reminders.drain(..) {
            let title = request.title.clone();
            match execute(request, ctx).await {
                Ok(_) => result.record_success(),
                Err(e) => result.record_failure(format!("{}: {}", title, ReminderError::from(e))),
            }
        }

        Ok(result)
    }
}
