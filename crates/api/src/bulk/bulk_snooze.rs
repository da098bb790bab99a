use crate::error::ReminderError;
use crate::reminder::snooze_reminder::SnoozeReminderUseCase;
use crate::shared::usecase::{execute, UseCase};
use reminder_scheduler_domain::{BulkResult, InvalidDurationError, SnoozeDuration, ID};
use reminder_scheduler_infra::ReminderContext;

#[derive(Debug)]
pub struct BulkSnoozeRemindersUseCase {
    pub reminder_ids: Vec<String>,
    pub duration: String,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidDuration(InvalidDurationError),
}

impl From<UseCaseError> for ReminderError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidDuration(e) => Self::InvalidDuration(e),
        }
    }
}

#[async_trait::async_trait]
impl UseCase for BulkSnoozeRemindersUseCase {
    type Response = BulkResult;

    type Error = UseCaseError;

    const NAME: &'static str = "BulkSnoozeReminders";

    async fn execute(&mut self, ctx: &ReminderContext) -> Result<Self::Response, Self::Error> {
        // The duration is shared by every item, so a bad one rejects the whole request
        self.duration
            .parse::<SnoozeDuration>()
            .map_err(UseCaseError::InvalidDuration)?;

        let mut result = BulkResult::default();
        for reminder_id in &self.reminder_ids {
            let id = match reminder_id.parse::<ID>() {
                Ok(id) => id,
                Err(e) => {
                    result.record_failure(e.to_string());
                    continue;
                }
            };
            let usecase = SnoozeReminderUseCase {
                reminder_id: id,
                duration: self.duration.clone(),
            };
            match execute(usecase, ctx).await {
                Ok(_) => result.record_success(),
                Err(e) => result.record_failure(ReminderError::from(e).to_string()),
            }
        }

        Ok(result)
    }
}
