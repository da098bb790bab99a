use super::{IReminderRepo, ReminderQuery};
use crate::repos::shared::inmemory_repo::*;
use crate::repos::shared::repo::{DeleteResult, UpdateResult};
use reminder_scheduler_domain::{Reminder, ReminderStatus, ReminderUpdate, ID};

pub struct InMemoryReminderRepo {
    reminders: std::sync::Mutex<Vec<Reminder>>,
}

impl InMemoryReminderRepo {
    pub fn new() -> Self {
        Self {
            reminders: std::sync::Mutex::new(Vec::new()),
        }
    }
}

fn set_status(reminder: &mut Reminder, status: ReminderStatus, now: i64) {
    reminder.status = status;
    reminder.updated = now;
    if status == ReminderStatus::Triggered {
        reminder.triggered_at = Some(now);
    }
}

#[async_trait::async_trait]
impl IReminderRepo for InMemoryReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        insert(reminder, &self.reminders);
        Ok(())
    }

    async fn find(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>> {
        Ok(find(reminder_id, &self.reminders))
    }

    async fn find_page(&self, query: &ReminderQuery) -> anyhow::Result<(Vec<Reminder>, u64)> {
        let mut reminders = find_by(&self.reminders, |r| {
            query.owner.owns(r) && query.status.map(|s| s == r.status).unwrap_or(true)
        });
        reminders.sort_by_key(|r| r.remind_at);
        let total = reminders.len() as u64;
        let page = reminders
            .into_iter()
            .skip(query.skip as usize)
            .take(query.limit as usize)
            .collect();
        Ok((page, total))
    }

    async fn find_all_by_user(&self, user_id: &str) -> anyhow::Result<Vec<Reminder>> {
        Ok(find_by(&self.reminders, |r| r.user_id == user_id))
    }

    async fn find_pending_due_before(&self, before: i64) -> anyhow::Result<Vec<Reminder>> {
        Ok(find_by(&self.reminders, |r| r.is_due(before)))
    }

    async fn count_with_status(
        &self,
        reminder_ids: &[ID],
        statuses: &[ReminderStatus],
    ) -> anyhow::Result<u64> {
        let matches = find_by(&self.reminders, |r| {
            reminder_ids.contains(&r.id) && statuses.contains(&r.status)
        });
        Ok(matches.len() as u64)
    }

    async fn update(
        &self,
        reminder_id: &ID,
        update: &ReminderUpdate,
        now: i64,
    ) -> anyhow::Result<UpdateResult> {
        let matched_count = update_many(
            &self.reminders,
            |r| &r.id == reminder_id,
            |r| update.apply(r, now),
        );
        Ok(UpdateResult { matched_count })
    }

    async fn transition_status(
        &self,
        reminder_id: &ID,
        status: ReminderStatus,
        allowed_from: &[ReminderStatus],
        now: i64,
    ) -> anyhow::Result<bool> {
        let matched = update_many(
            &self.reminders,
            |r| &r.id == reminder_id && allowed_from.contains(&r.status),
            |r| set_status(r, status, now),
        );
        Ok(matched > 0)
    }

    async fn claim_for_trigger(&self, reminder_id: &ID, now: i64) -> anyhow::Result<bool> {
        let matched = update_many(
            &self.reminders,
            |r| &r.id == reminder_id && r.status == ReminderStatus::Pending,
            |r| set_status(r, ReminderStatus::Triggered, now),
        );
        Ok(matched > 0)
    }

    async fn snooze(&self, reminder_id: &ID, remind_at: i64, now: i64) -> anyhow::Result<bool> {
        let matched = update_many(
            &self.reminders,
            |r| &r.id == reminder_id && !r.status.is_terminal(),
            |r| {
                r.remind_at = remind_at;
                set_status(r, ReminderStatus::Pending, now);
            },
        );
        Ok(matched > 0)
    }

    async fn bulk_update_status(
        &self,
        reminder_ids: &[ID],
        status: ReminderStatus,
        allowed_from: &[ReminderStatus],
        now: i64,
    ) -> anyhow::Result<u64> {
        Ok(update_many(
            &self.reminders,
            |r| reminder_ids.contains(&r.id) && allowed_from.contains(&r.status),
            |r| set_status(r, status, now),
        ))
    }

    async fn delete(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>> {
        Ok(delete(reminder_id, &self.reminders))
    }

    async fn bulk_delete(&self, reminder_ids: &[ID]) -> anyhow::Result<DeleteResult> {
        Ok(delete_by(&self.reminders, |r| reminder_ids.contains(&r.id)))
    }
}
