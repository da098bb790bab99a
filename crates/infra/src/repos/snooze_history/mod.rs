mod inmemory;
mod mongo;

pub use inmemory::InMemorySnoozeHistoryRepo;
pub use mongo::MongoSnoozeHistoryRepo;
use reminder_scheduler_domain::{SnoozeEntry, ID};

#[async_trait::async_trait]
pub trait ISnoozeHistoryRepo: Send + Sync {
    async fn insert(&self, entry: &SnoozeEntry) -> anyhow::Result<()>;
    /// Entries of a reminder, newest first
    async fn find_by_reminder(&self, reminder_id: &ID) -> anyhow::Result<Vec<SnoozeEntry>>;
}
