use super::parse_ids;
use crate::shared::{events::publish, usecase::UseCase};
use reminder_scheduler_domain::{BulkResult, ReminderEvent};
use reminder_scheduler_infra::ReminderContext;
use std::convert::Infallible;
use tracing::error;

#[derive(Debug)]
pub struct BulkDeleteRemindersUseCase {
    pub reminder_ids: Vec<String>,
}

#[async_trait::async_trait]
impl UseCase for BulkDeleteRemindersUseCase {
    type Response = BulkResult;

    type Error = Infallible;

    const NAME: &'static str = "BulkDeleteReminders";

    async fn execute(&mut self, ctx: &ReminderContext) -> Result<Self::Response, Self::Error> {
        let submitted = self.reminder_ids.len();
        let ids = parse_ids(&self.reminder_ids);

        let result = match ctx.repos.reminders.bulk_delete(&ids).await {
            Ok(res) => {
                publish(
                    ctx,
                    ReminderEvent::BulkDeleted {
                        ids: self.reminder_ids.clone(),
                        deleted: res.deleted_count,
                    },
                )
                .await;
                BulkResult::from_matched(submitted, res.deleted_count)
            }
            Err(e) => {
                error!("Bulk delete failed: {:?}", e);
                BulkResult::from_batch_error(submitted, e.to_string())
            }
        };

        Ok(result)
    }
}
