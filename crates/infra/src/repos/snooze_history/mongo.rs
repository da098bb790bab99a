use super::ISnoozeHistoryRepo;
use crate::repos::shared::mongo_repo;
use mongo_repo::MongoDocument;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    options::FindOptions,
    Collection, Database,
};
use reminder_scheduler_domain::{SnoozeEntry, ID};
use serde::{Deserialize, Serialize};

pub struct MongoSnoozeHistoryRepo {
    collection: Collection<Document>,
}

impl MongoSnoozeHistoryRepo {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("reminder_snooze_history"),
        }
    }
}

#[async_trait::async_trait]
impl ISnoozeHistoryRepo for MongoSnoozeHistoryRepo {
    async fn insert(&self, entry: &SnoozeEntry) -> anyhow::Result<()> {
        mongo_repo::insert::<_, SnoozeEntryMongo>(&self.collection, entry).await
    }

    async fn find_by_reminder(&self, reminder_id: &ID) -> anyhow::Result<Vec<SnoozeEntry>> {
        let filter = doc! {
            "reminder_id": reminder_id.inner_ref(),
        };
        let options = FindOptions::builder().sort(doc! { "snoozed_at": -1 }).build();
        mongo_repo::find_many_by::<_, SnoozeEntryMongo>(&self.collection, filter, Some(options))
            .await
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct SnoozeEntryMongo {
    _id: ObjectId,
    reminder_id: ObjectId,
    user_id: String,
    snoozed_at: i64,
    duration: String,
    new_remind_at: i64,
}

impl MongoDocument<SnoozeEntry> for SnoozeEntryMongo {
    fn into_domain(self) -> SnoozeEntry {
        SnoozeEntry {
            id: ID::from(self._id),
            reminder_id: ID::from(self.reminder_id),
            user_id: self.user_id,
            snoozed_at: self.snoozed_at,
            duration: self.duration,
            new_remind_at: self.new_remind_at,
        }
    }

    fn from_domain(entry: &SnoozeEntry) -> Self {
        Self {
            _id: *entry.id.inner_ref(),
            reminder_id: *entry.reminder_id.inner_ref(),
            user_id: entry.user_id.clone(),
            snoozed_at: entry.snoozed_at,
            duration: entry.duration.clone(),
            new_remind_at: entry.new_remind_at,
        }
    }
}
