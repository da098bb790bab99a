use super::ISnoozeHistoryRepo;
use crate::repos::shared::inmemory_repo::*;
use reminder_scheduler_domain::{SnoozeEntry, ID};

pub struct InMemorySnoozeHistoryRepo {
    entries: std::sync::Mutex<Vec<SnoozeEntry>>,
}

impl InMemorySnoozeHistoryRepo {
    pub fn new() -> Self {
        Self {
            entries: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl ISnoozeHistoryRepo for InMemorySnoozeHistoryRepo {
    async fn insert(&self, entry: &SnoozeEntry) -> anyhow::Result<()> {
        insert(entry, &self.entries);
        Ok(())
    }

    async fn find_by_reminder(&self, reminder_id: &ID) -> anyhow::Result<Vec<SnoozeEntry>> {
        let mut entries = find_by(&self.entries, |e| &e.reminder_id == reminder_id);
        entries.sort_by(|a, b| b.snoozed_at.cmp(&a.snoozed_at));
        Ok(entries)
    }
}
