use anyhow::anyhow;
use reminder_scheduler_domain::{
    Reminder, ReminderPriority, ReminderStatus, ReminderType, ReminderUpdate, ID,
};
use reminder_scheduler_infra::{
    DeleteResult, IReminderRepo, InMemoryEventPublisher, ReminderContext, ReminderQuery,
    StaticTimeSys, UpdateResult,
};
use std::sync::{Arc, Mutex};

/// 2021-02-20T23:00:00Z
pub const NOW: i64 = 1613862000000;
pub const MINUTE: i64 = 1000 * 60;
pub const DAY: i64 = MINUTE * 60 * 24;

pub struct TestContext {
    pub ctx: ReminderContext,
    pub events: Arc<InMemoryEventPublisher>,
}

pub fn setup() -> TestContext {
    let mut ctx = ReminderContext::create_inmemory();
    let events = Arc::new(InMemoryEventPublisher::new());
    ctx.sys = Arc::new(StaticTimeSys(NOW));
    ctx.publisher = events.clone();
    TestContext { ctx, events }
}

pub fn reminder_factory(status: ReminderStatus, remind_at: i64) -> Reminder {
    Reminder {
        id: ID::new(),
        user_id: "user".into(),
        workspace_id: "workspace".into(),
        channel_id: Some("channel".into()),
        message_id: Some("message".into()),
        reminder_type: ReminderType::Message,
        title: "Follow up on the release".into(),
        description: Some("Check the rollout dashboards".into()),
        metadata: Default::default(),
        remind_at,
        status,
        priority: ReminderPriority::High,
        recurrence: None,
        created: NOW - DAY,
        updated: NOW - DAY,
        triggered_at: None,
    }
}

pub async fn insert_reminder(
    ctx: &ReminderContext,
    status: ReminderStatus,
    remind_at: i64,
) -> Reminder {
    let reminder = reminder_factory(status, remind_at);
    ctx.repos
        .reminders
        .insert(&reminder)
        .await
        .expect("inmemory insert to succeed");
    reminder
}

/// Reminder store that fails every call, as when the database is down
pub struct UnavailableReminderRepo;

fn unavailable<T>() -> anyhow::Result<T> {
    Err(anyhow!("Server selection timeout: No available servers"))
}

#[async_trait::async_trait]
impl IReminderRepo for UnavailableReminderRepo {
    async fn insert(&self, _reminder: &Reminder) -> anyhow::Result<()> {
        unavailable()
    }

    async fn find(&self, _reminder_id: &ID) -> anyhow::Result<Option<Reminder>> {
        unavailable()
    }

    async fn find_page(&self, _query: &ReminderQuery) -> anyhow::Result<(Vec<Reminder>, u64)> {
        unavailable()
    }

    async fn find_all_by_user(&self, _user_id: &str) -> anyhow::Result<Vec<Reminder>> {
        unavailable()
    }

    async fn find_pending_due_before(&self, _before: i64) -> anyhow::Result<Vec<Reminder>> {
        unavailable()
    }

    async fn count_with_status(
        &self,
        _reminder_ids: &[ID],
        _statuses: &[ReminderStatus],
    ) -> anyhow::Result<u64> {
        unavailable()
    }

    async fn update(
        &self,
        _reminder_id: &ID,
        _update: &ReminderUpdate,
        _now: i64,
    ) -> anyhow::Result<UpdateResult> {
        unavailable()
    }

    async fn transition_status(
        &self,
        _reminder_id: &ID,
        _status: ReminderStatus,
        _allowed_from: &[ReminderStatus],
        _now: i64,
    ) -> anyhow::Result<bool> {
        unavailable()
    }

    async fn claim_for_trigger(&self, _reminder_id: &ID, _now: i64) -> anyhow::Result<bool> {
        unavailable()
    }

    async fn snooze(&self, _reminder_id: &ID, _remind_at: i64, _now: i64) -> anyhow::Result<bool> {
        unavailable()
    }

    async fn bulk_update_status(
        &self,
        _reminder_ids: &[ID],
        _status: ReminderStatus,
        _allowed_from: &[ReminderStatus],
        _now: i64,
    ) -> anyhow::Result<u64> {
        unavailable()
    }

    async fn delete(&self, _reminder_id: &ID) -> anyhow::Result<Option<Reminder>> {
        unavailable()
    }

    async fn bulk_delete(&self, _reminder_ids: &[ID]) -> anyhow::Result<DeleteResult> {
        unavailable()
    }
}

/// Like `setup` but every reminder store call fails
pub fn setup_unavailable_store() -> TestContext {
    let mut test_ctx = setup();
    test_ctx.ctx.repos.reminders = Arc::new(UnavailableReminderRepo);
    test_ctx
}

/// Serves `stale` on the first `find`, as if another writer changed the
/// reminder right after it was read. Every other call reaches `inner`
pub struct StaleReadReminderRepo {
    inner: Arc<dyn IReminderRepo>,
    stale: Mutex<Option<Reminder>>,
}

/// Replaces the reminder store of `ctx` with a `StaleReadReminderRepo`
pub fn with_stale_read(mut ctx: ReminderContext, stale: &Reminder) -> ReminderContext {
    ctx.repos.reminders = Arc::new(StaleReadReminderRepo {
        inner: ctx.repos.reminders.clone(),
        stale: Mutex::new(Some(stale.clone())),
    });
    ctx
}

#[async_trait::async_trait]
impl IReminderRepo for StaleReadReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        self.inner.insert(reminder).await
    }

    async fn find(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>> {
        let stale = self.stale.lock().unwrap().take();
        match stale {
            Some(reminder) if &reminder.id == reminder_id => Ok(Some(reminder)),
            _ => self.inner.find(reminder_id).await,
        }
    }

    async fn find_page(&self, query: &ReminderQuery) -> anyhow::Result<(Vec<Reminder>, u64)> {
        self.inner.find_page(query).await
    }

    async fn find_all_by_user(&self, user_id: &str) -> anyhow::Result<Vec<Reminder>> {
        self.inner.find_all_by_user(user_id).await
    }

    async fn find_pending_due_before(&self, before: i64) -> anyhow::Result<Vec<Reminder>> {
        self.inner.find_pending_due_before(before).await
    }

    async fn count_with_status(
        &self,
        reminder_ids: &[ID],
        statuses: &[ReminderStatus],
    ) -> anyhow::Result<u64> {
        self.inner.count_with_status(reminder_ids, statuses).await
    }

    async fn update(
        &self,
        reminder_id: &ID,
        update: &ReminderUpdate,
        now: i64,
    ) -> anyhow::Result<UpdateResult> {
        self.inner.update(reminder_id, update, now).await
    }

    async fn transition_status(
        &self,
        reminder_id: &ID,
        status: ReminderStatus,
        allowed_from: &[ReminderStatus],
        now: i64,
    ) -> anyhow::Result<bool> {
        self.inner
            .transition_status(reminder_id, status, allowed_from, now)
            .await
    }

    async fn claim_for_trigger(&self, reminder_id: &ID, now: i64) -> anyhow::Result<bool> {
        self.inner.claim_for_trigger(reminder_id, now).await
    }

    async fn snooze(&self, reminder_id: &ID, remind_at: i64, now: i64) -> anyhow::Result<bool> {
        self.inner.snooze(reminder_id, remind_at, now).await
    }

    async fn bulk_update_status(
        &self,
        reminder_ids: &[ID],
        status: ReminderStatus,
        allowed_from: &[ReminderStatus],
        now: i64,
    ) -> anyhow::Result<u64> {
        self.inner
            .bulk_update_status(reminder_ids, status, allowed_from, now)
            .await
    }

    async fn delete(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>> {
        self.inner.delete(reminder_id).await
    }

    async fn bulk_delete(&self, reminder_ids: &[ID]) -> anyhow::Result<DeleteResult> {
        self.inner.bulk_delete(reminder_ids).await
    }
}
