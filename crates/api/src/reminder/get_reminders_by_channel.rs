use super::pagination::{find_page, PageRequest, ReminderPage};
use crate::error::ReminderError;
use crate::shared::usecase::UseCase;
use reminder_scheduler_infra::{ReminderContext, ReminderOwner};

/// Lists every reminder attached to a channel ordered by `remind_at`
#[derive(Debug)]
pub struct GetRemindersByChannelUseCase {
    pub channel_id: String,
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
impl UseCase for GetRemindersByChannelUseCase {
    type Response = ReminderPage;

    type Error = UseCaseError;

    const NAME: &'static str = "GetRemindersByChannel";

    async fn execute(&mut self, ctx: &ReminderContext) -> Result<Self::Response, Self::Error> {
        find_page(
            ctx,
            ReminderOwner::Channel(self.channel_id.clone()),
            None,
            self.page,
        )
        .await
        .map_err(|e| UseCaseError::StorageError(e.to_string()))
    }
}
