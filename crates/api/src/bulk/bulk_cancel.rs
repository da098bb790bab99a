use super::parse_ids;
use crate::shared::{events::publish, usecase::UseCase};
use reminder_scheduler_domain::{BulkResult, ReminderEvent, ReminderStatus, ID};
use reminder_scheduler_infra::ReminderContext;
use std::convert::Infallible;
use tracing::error;

/// Returns how many of `ids` were already cancelled and how many were
/// cancelled now. Terminal reminders are never rewritten
async fn cancel(ctx: &ReminderContext, ids: &[ID], now: i64) -> anyhow::Result<(u64, u64)> {
    let already_cancelled = ctx
        .repos
        .reminders
        .count_with_status(ids, &[ReminderStatus::Cancelled])
        .await?;
    let matched = ctx
        .repos
        .reminders
        .bulk_update_status(ids, ReminderStatus::Cancelled, &ReminderStatus::active(), now)
        .await?;
    Ok((already_cancelled, matched))
}

#[derive(Debug)]
pub struct BulkCancelRemindersUseCase {
    pub reminder_ids: Vec<String>,
}

#[async_trait::async_trait]
impl UseCase for BulkCancelRemindersUseCase {
    type Response = BulkResult;

    type Error = Infallible;

    const NAME: &'static str = "BulkCancelReminders";

    async fn execute(&mut self, ctx: &ReminderContext) -> Result<Self::Response, Self::Error> {
        let submitted = self.reminder_ids.len();
        let ids = parse_ids(&self.reminder_ids);
        let now = ctx.sys.get_timestamp_millis();

        let result = match cancel(ctx, &ids, now).await {
            Ok((already_cancelled, matched)) => {
                publish(
                    ctx,
                    ReminderEvent::BulkCancelled {
                        ids: self.reminder_ids.clone(),
                        cancelled: matched,
                    },
                )
                .await;
                BulkResult::from_matched(submitted, already_cancelled + matched)
            }
            Err(e) => {
                error!("Bulk cancel failed: {:?}", e);
                BulkResult::from_batch_error(submitted, e.to_string())
            }
        };

        Ok(result)
    }
}
