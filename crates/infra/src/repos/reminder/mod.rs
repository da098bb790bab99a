mod inmemory;
mod mongo;

pub use inmemory::InMemoryReminderRepo;
pub use mongo::MongoReminderRepo;

use crate::repos::shared::repo::{DeleteResult, UpdateResult};
use reminder_scheduler_domain::{Reminder, ReminderStatus, ReminderUpdate, ID};

/// Who the listed reminders belong to
#[derive(Debug, Clone, PartialEq)]
pub enum ReminderOwner {
    User(String),
    Workspace(String),
    Channel(String),
}

impl ReminderOwner {
    pub fn owns(&self, reminder: &Reminder) -> bool {
        match self {
            Self::User(user_id) => &reminder.user_id == user_id,
            Self::Workspace(workspace_id) => &reminder.workspace_id == workspace_id,
            Self::Channel(channel_id) => reminder.channel_id.as_ref() == Some(channel_id),
        }
    }
}

/// Query for one page of reminders of a single owner, ordered by `remind_at`
#[derive(Debug, Clone)]
pub struct ReminderQuery {
    pub owner: ReminderOwner,
    pub status: Option<ReminderStatus>,
    pub skip: u64,
    pub limit: u64,
}

#[async_trait::async_trait]
pub trait IReminderRepo: Send + Sync {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()>;
    async fn find(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>>;
    /// Returns the requested page together with the total number of matches
    async fn find_page(&self, query: &ReminderQuery) -> anyhow::Result<(Vec<Reminder>, u64)>;
    async fn find_all_by_user(&self, user_id: &str) -> anyhow::Result<Vec<Reminder>>;
    /// Pending reminders with `remind_at <= before`
    async fn find_pending_due_before(&self, before: i64) -> anyhow::Result<Vec<Reminder>>;
    /// Number of reminders in `reminder_ids` whose status is one of `statuses`
    async fn count_with_status(
        &self,
        reminder_ids: &[ID],
        statuses: &[ReminderStatus],
    ) -> anyhow::Result<u64>;
    async fn update(
        &self,
        reminder_id: &ID,
        update: &ReminderUpdate,
        now: i64,
    ) -> anyhow::Result<UpdateResult>;
    /// Sets `status` only if the current status is one of `allowed_from`.
    /// `triggered_at` is stamped when the new status is `Triggered`.
    /// Returns `false` when the reminder is missing or in another status
    async fn transition_status(
        &self,
        reminder_id: &ID,
        status: ReminderStatus,
        allowed_from: &[ReminderStatus],
        now: i64,
    ) -> anyhow::Result<bool>;
    /// Moves the reminder from `Pending` to `Triggered` only if it is still pending.
    /// Returns `false` when someone else already moved it
    async fn claim_for_trigger(&self, reminder_id: &ID, now: i64) -> anyhow::Result<bool>;
    /// Sets `remind_at` and puts a reminder that is not completed or cancelled
    /// back to `Pending` in a single write. Returns `false` when the reminder
    /// is missing or terminal
    async fn snooze(&self, reminder_id: &ID, remind_at: i64, now: i64) -> anyhow::Result<bool>;
    /// Sets `status` on every reminder in `reminder_ids` whose current status is one
    /// of `allowed_from` and returns the number of matched reminders
    async fn bulk_update_status(
        &self,
        reminder_ids: &[ID],
        status: ReminderStatus,
        allowed_from: &[ReminderStatus],
        now: i64,
    ) -> anyhow::Result<u64>;
    async fn delete(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>>;
    async fn bulk_delete(&self, reminder_ids: &[ID]) -> anyhow::Result<DeleteResult>;
}
