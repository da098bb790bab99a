use super::pagination::{find_page, PageRequest, ReminderPage};
use crate::error::ReminderError;
use crate::shared::usecase::UseCase;
use reminder_scheduler_domain::ReminderStatus;
use reminder_scheduler_infra::{ReminderContext, ReminderOwner};

/// Lists the reminders of a user ordered by `remind_at`
#[derive(Debug)]
pub struct GetRemindersByUserUseCase {
    pub user_id: String,
    pub status: Option<ReminderStatus>,
    pub page: PageRequest,
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
impl UseCase for GetRemindersByUserUseCase {
    type Response = ReminderPage;

    type Error = UseCaseError;

    const NAME: &'static str = "GetRemindersByUser";

    async fn execute(&mut self, ctx: &ReminderContext) -> Result<Self::Response, Self::Error> {
        find_page(
            ctx,
            ReminderOwner::User(self.user_id.clone()),
            self.status,
            self.page,
        )
        .await
        .map_err(|e| UseCaseError::StorageError(e.to_string()))
    }
}
