use chrono::{TimeZone, Utc};
use reminder_scheduler_domain::{
    Recurrence, Reminder, ReminderPriority, ReminderStatus, ReminderType, ID,
};
use reminder_scheduler_infra::{
    IReminderRepo, InMemoryEventPublisher, ReminderContext, ReminderOwner, ReminderQuery,
    StaticTimeSys,
};
use std::sync::Arc;

pub const MINUTE: i64 = 1000 * 60;
pub const DAY: i64 = MINUTE * 60 * 24;

pub fn now() -> i64 {
    Utc.with_ymd_and_hms(2021, 3, 1, 9, 0, 0)
        .unwrap()
        .timestamp_millis()
}

pub struct TestApp {
    pub ctx: ReminderContext,
    pub events: Arc<InMemoryEventPublisher>,
}

/// Inmemory context with a frozen clock and an inspectable event channel
pub fn spawn_app() -> TestApp {
    let mut ctx = ReminderContext::create_inmemory();
    let events = Arc::new(InMemoryEventPublisher::new());
    ctx.sys = Arc::new(StaticTimeSys(now()));
    ctx.publisher = events.clone();
    TestApp { ctx, events }
}

pub async fn insert_reminder(
    reminders: &Arc<dyn IReminderRepo>,
    remind_at: i64,
    recurrence: Option<Recurrence>,
) -> Reminder {
    let reminder = Reminder {
        id: ID::new(),
        user_id: "user".into(),
        workspace_id: "workspace".into(),
        channel_id: Some("general".into()),
        message_id: None,
        reminder_type: ReminderType::Message,
        title: "Daily standup".into(),
        description: Some("Share what you are working on".into()),
        metadata: Default::default(),
        remind_at,
        status: ReminderStatus::Pending,
        priority: ReminderPriority::Medium,
        recurrence,
        created: remind_at - DAY,
        updated: remind_at - DAY,
        triggered_at: None,
    };
    reminders.insert(&reminder).await.unwrap();
    reminder
}

pub async fn reminders_of_user(ctx: &ReminderContext) -> Vec<Reminder> {
    let query = ReminderQuery {
        owner: ReminderOwner::User("user".into()),
        status: None,
        skip: 0,
        limit: 100,
    };
    ctx.repos.reminders.find_page(&query).await.unwrap().0
}
