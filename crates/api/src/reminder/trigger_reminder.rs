use super::subscribers::ScheduleNextOccurrenceOnTriggered;
use crate::error::ReminderError;
use crate::shared::{
    events::publish,
    usecase::{Subscriber, UseCase},
};
use reminder_scheduler_domain::{Reminder, ReminderEvent, ReminderStatus, ID};
use reminder_scheduler_infra::ReminderContext;

/// Fires a reminder that was found to be due.
///
/// The reminder is first claimed with a conditional `pending -> triggered`
/// write. Only the caller that wins the claim publishes the notification,
/// so a reminder is never triggered twice.
#[derive(Debug)]
pub struct TriggerReminderUseCase {
    pub reminder: Reminder,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TriggerOutcome {
    Triggered(Reminder),
    /// The reminder was no longer pending when it was about to be claimed
    AlreadyClaimed(ID),
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError(ID, String),
}

impl From<UseCaseError> for ReminderError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError(id, msg) => Self::Persistence(format!(
                "Unable to trigger reminder with id: {}. {}",
                id, msg
            )),
        }
    }
}

#[async_trait::async_trait]
impl UseCase for TriggerReminderUseCase {
    type Response = TriggerOutcome;

    type Error = UseCaseError;

    const NAME: &'static str = "TriggerReminder";

    async fn execute(&mut self, ctx: &ReminderContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp_millis();
        let reminder_id = self.reminder.id.clone();

        let claimed = ctx
            .repos
            .reminders
            .claim_for_trigger(&reminder_id, now)
            .await
            .map_err(|e| UseCaseError::StorageError(reminder_id.clone(), e.to_string()))?;
        if !claimed {
            return Ok(TriggerOutcome::AlreadyClaimed(reminder_id));
        }

        let mut reminder = self.reminder.clone();
        reminder.status = ReminderStatus::Triggered;
        reminder.triggered_at = Some(now);
        reminder.updated = now;

        publish(ctx, ReminderEvent::notification(&reminder)).await;

        Ok(TriggerOutcome::Triggered(reminder))
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(ScheduleNextOccurrenceOnTriggered)]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::{testing::*, usecase::execute};
    use reminder_scheduler_domain::{Recurrence, RecurrencePattern};
    use reminder_scheduler_infra::{ReminderOwner, ReminderQuery};

    async fn reminders_of_user(ctx: &ReminderContext) -> Vec<Reminder> {
        let query = ReminderQuery {
            owner: ReminderOwner::User("user".into()),
            status: None,
            skip: 0,
            limit: 100,
        };
        ctx.repos.reminders.find_page(&query).await.unwrap().0
    }

    #[tokio::test]
    async fn triggers_and_notifies() {
        let TestContext { ctx, events } = setup();
        let reminder = insert_reminder(&ctx, ReminderStatus::Pending, NOW - MINUTE).await;

        let res = execute(
            TriggerReminderUseCase {
                reminder: reminder.clone(),
            },
            &ctx,
        )
        .await
        .unwrap();
        let triggered = match res {
            TriggerOutcome::Triggered(r) => r,
            other => panic!("Expected reminder to be triggered, got: {:?}", other),
        };
        assert_eq!(triggered.triggered_at, Some(NOW));

        let stored = ctx.repos.reminders.find(&reminder.id).await.unwrap().unwrap();
        assert_eq!(stored.status, ReminderStatus::Triggered);
        assert_eq!(stored.triggered_at, Some(NOW));
        assert_eq!(stored, triggered);

        // Not recurring, so nothing else happens
        assert_eq!(events.events(), vec![ReminderEvent::notification(&reminder)]);
        assert_eq!(reminders_of_user(&ctx).await.len(), 1);
    }

    #[tokio::test]
    async fn recurring_reminder_spawns_successor() {
        let TestContext { ctx, events } = setup();
        let mut reminder = reminder_factory(ReminderStatus::Pending, NOW - MINUTE);
        reminder.recurrence = Some(Recurrence::new(RecurrencePattern::Daily, 1));
        ctx.repos.reminders.insert(&reminder).await.unwrap();

        execute(
            TriggerReminderUseCase {
                reminder: reminder.clone(),
            },
            &ctx,
        )
        .await
        .unwrap();

        let reminders = reminders_of_user(&ctx).await;
        assert_eq!(reminders.len(), 2);
        let successor = reminders.iter().find(|r| r.id != reminder.id).unwrap();
        assert_eq!(successor.status, ReminderStatus::Pending);
        assert_eq!(successor.remind_at, reminder.remind_at + DAY);
        assert_eq!(successor.recurrence, reminder.recurrence);

        // The rule of the original is left untouched
        let original = ctx.repos.reminders.find(&reminder.id).await.unwrap().unwrap();
        assert_eq!(original.recurrence, reminder.recurrence);

        assert_eq!(events.events_on("notifications.send").len(), 1);
        assert_eq!(events.events_on("reminders.created").len(), 1);
    }

    #[tokio::test]
    async fn ended_series_does_not_spawn_successor() {
        let TestContext { ctx, events } = setup();
        let mut reminder = reminder_factory(ReminderStatus::Pending, NOW - MINUTE);
        let mut recurrence = Recurrence::new(RecurrencePattern::Daily, 1);
        recurrence.end_date = Some(NOW);
        reminder.recurrence = Some(recurrence);
        ctx.repos.reminders.insert(&reminder).await.unwrap();

        execute(TriggerReminderUseCase { reminder }, &ctx)
            .await
            .unwrap();

        assert_eq!(reminders_of_user(&ctx).await.len(), 1);
        assert_eq!(events.events_on("notifications.send").len(), 1);
        assert!(events.events_on("reminders.created").is_empty());
    }

    #[tokio::test]
    async fn does_not_trigger_twice() {
        let TestContext { ctx, events } = setup();
        let mut reminder = reminder_factory(ReminderStatus::Pending, NOW - MINUTE);
        reminder.recurrence = Some(Recurrence::new(RecurrencePattern::Weekly, 1));
        ctx.repos.reminders.insert(&reminder).await.unwrap();

        for _ in 0..2 {
            execute(
                TriggerReminderUseCase {
                    reminder: reminder.clone(),
                },
                &ctx,
            )
            .await
            .unwrap();
        }

        let res = execute(
            TriggerReminderUseCase {
                reminder: reminder.clone(),
            },
            &ctx,
        )
        .await;
        assert_eq!(res, Ok(TriggerOutcome::AlreadyClaimed(reminder.id.clone())));
        assert_eq!(events.events_on("notifications.send").len(), 1);
        assert_eq!(reminders_of_user(&ctx).await.len(), 2);
    }

    #[tokio::test]
    async fn cancelled_reminder_is_not_triggered() {
        let TestContext { ctx, events } = setup();
        let reminder = insert_reminder(&ctx, ReminderStatus::Cancelled, NOW - MINUTE).await;

        let res = execute(
            TriggerReminderUseCase {
                reminder: reminder.clone(),
            },
            &ctx,
        )
        .await;
        assert_eq!(res, Ok(TriggerOutcome::AlreadyClaimed(reminder.id.clone())));
        let stored = ctx.repos.reminders.find(&reminder.id).await.unwrap().unwrap();
        assert_eq!(stored.status, ReminderStatus::Cancelled);
        assert!(events.events().is_empty());
    }
}
