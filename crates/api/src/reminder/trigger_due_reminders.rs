use super::trigger_reminder::{TriggerOutcome, TriggerReminderUseCase};
use crate::error::ReminderError;
use crate::shared::usecase::{execute, UseCase};
use reminder_scheduler_infra::ReminderContext;
use tokio::time::Instant;
use tracing::{info, warn};

/// One poll of the scheduler: triggers every pending reminder whose time has arrived
#[derive(Debug, Default)]
pub struct TriggerDueRemindersUseCase {
    /// No further reminder is claimed once this has passed. A reminder that
    /// was already claimed is always notified and its successor scheduled.
    pub deadline: Option<Instant>,
}

/// What happened during a single poll
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickSummary {
    pub due: usize,
    pub triggered: usize,
    /// Claimed by someone else between the query and the claim
    pub skipped: usize,
    pub failed: usize,
    /// Left pending for the next poll because the deadline passed
    pub deferred: usize,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError(String),
    DueQueryTimedOut,
}

impl From<UseCaseError> for ReminderError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError(msg) => Self::Persistence(msg),
            UseCaseError::DueQueryTimedOut => {
                Self::Persistence("Timed out while loading due reminders".into())
            }
        }
    }
}

#[async_trait::async_trait]
impl UseCase for TriggerDueRemindersUseCase {
    type Response = TickSummary;

    type Error = UseCaseError;

    const NAME: &'static str = "TriggerDueReminders";

    async fn execute(&mut self, ctx: &ReminderContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp_millis();
        let find_due = ctx.repos.reminders.find_pending_due_before(now);
        let due = match self.deadline {
            Some(deadline) => tokio::time::timeout_at(deadline, find_due)
                .await
                .map_err(|_| UseCaseError::DueQueryTimedOut)?,
            None => find_due.await,
        }
        .map_err(|e| UseCaseError::StorageError(e.to_string()))?;

        let mut summary = TickSummary {
            due: due.len(),
            ..Default::default()
        };
        for reminder in due {
            if self.deadline.map_or(false, |deadline| Instant::now() >= deadline) {
                summary.deferred += 1;
                continue;
            }
            let reminder_id = reminder.id.clone();
            match execute(TriggerReminderUseCase { reminder }, ctx).await {
                Ok(TriggerOutcome::Triggered(_)) => summary.triggered += 1,
                Ok(TriggerOutcome::AlreadyClaimed(_)) => summary.skipped += 1,
                Err(e) => {
                    warn!(reminder_id = %reminder_id, "Failed to trigger reminder: {:?}", e);
                    summary.failed += 1;
                }
            }
        }

        if summary.due > 0 {
            info!(
                due = summary.due,
                triggered = summary.triggered,
                skipped = summary.skipped,
                failed = summary.failed,
                deferred = summary.deferred,
                "Processed due reminders"
            );
        }

        Ok(summary)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::testing::*;
    use reminder_scheduler_domain::ReminderStatus;

    #[tokio::test]
    async fn triggers_only_due_pending_reminders() {
        let TestContext { ctx, events } = setup();
        let due = insert_reminder(&ctx, ReminderStatus::Pending, NOW - MINUTE).await;
        let on_time = insert_reminder(&ctx, ReminderStatus::Pending, NOW).await;
        let future = insert_reminder(&ctx, ReminderStatus::Pending, NOW + MINUTE).await;
        let snoozed = insert_reminder(&ctx, ReminderStatus::Snoozed, NOW - MINUTE).await;

        let summary = TriggerDueRemindersUseCase::default().execute(&ctx).await.unwrap();
        assert_eq!(
            summary,
            TickSummary {
                due: 2,
                triggered: 2,
                skipped: 0,
                failed: 0,
                deferred: 0,
            }
        );

        for (reminder, status) in [
            (due, ReminderStatus::Triggered),
            (on_time, ReminderStatus::Triggered),
            (future, ReminderStatus::Pending),
            (snoozed, ReminderStatus::Snoozed),
        ] {
            let stored = ctx.repos.reminders.find(&reminder.id).await.unwrap().unwrap();
            assert_eq!(stored.status, status);
        }
        assert_eq!(events.events_on("notifications.send").len(), 2);

        // Nothing left to do on the next poll
        let summary = TriggerDueRemindersUseCase::default().execute(&ctx).await.unwrap();
        assert_eq!(summary, TickSummary::default());
    }

    #[tokio::test]
    async fn passed_deadline_leaves_reminders_for_the_next_poll() {
        let TestContext { ctx, events } = setup();
        let reminder = insert_reminder(&ctx, ReminderStatus::Pending, NOW - MINUTE).await;

        let mut usecase = TriggerDueRemindersUseCase {
            deadline: Some(Instant::now()),
        };
        let summary = usecase.execute(&ctx).await.unwrap();
        assert_eq!(
            summary,
            TickSummary {
                due: 1,
                deferred: 1,
                ..Default::default()
            }
        );
        let stored = ctx.repos.reminders.find(&reminder.id).await.unwrap().unwrap();
        assert_eq!(stored.status, ReminderStatus::Pending);
        assert!(events.events().is_empty());

        let summary = TriggerDueRemindersUseCase::default()
            .execute(&ctx)
            .await
            .unwrap();
        assert_eq!(summary.triggered, 1);
    }
}
