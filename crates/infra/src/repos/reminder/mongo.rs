use super::{IReminderRepo, ReminderOwner, ReminderQuery};
use crate::repos::shared::mongo_repo;
use crate::repos::shared::repo::{DeleteResult, UpdateResult};
use mongo_repo::MongoDocument;
use mongodb::{
    bson::{self, doc, oid::ObjectId, Document},
    options::{FindOptions, IndexOptions},
    Collection, Database, IndexModel,
};
use reminder_scheduler_domain::{
    Metadata, Recurrence, Reminder, ReminderPriority, ReminderStatus, ReminderType,
    ReminderUpdate, ID,
};
use serde::{Deserialize, Serialize};

pub struct MongoReminderRepo {
    collection: Collection<Document>,
}

impl MongoReminderRepo {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("reminders"),
        }
    }

    /// Indexes backing the scheduler poll and the per owner listings
    pub async fn create_indexes(&self) -> anyhow::Result<()> {
        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "status": 1, "remind_at": 1 })
                .options(
                    IndexOptions::builder()
                        .name("status_remind_at".to_string())
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! { "user_id": 1, "remind_at": 1 })
                .options(
                    IndexOptions::builder()
                        .name("user_id_remind_at".to_string())
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! { "workspace_id": 1, "remind_at": 1 })
                .options(
                    IndexOptions::builder()
                        .name("workspace_id_remind_at".to_string())
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! { "channel_id": 1, "remind_at": 1 })
                .options(
                    IndexOptions::builder()
                        .name("channel_id_remind_at".to_string())
                        .build(),
                )
                .build(),
        ];
        self.collection.create_indexes(indexes, None).await?;
        Ok(())
    }
}

fn ids_filter(reminder_ids: &[ID]) -> Document {
    doc! {
        "_id": {
            "$in": reminder_ids.iter().map(|id| id.inner_ref()).collect::<Vec<_>>()
        }
    }
}

fn statuses_in(statuses: &[ReminderStatus]) -> Document {
    doc! {
        "$in": statuses.iter().map(|s| s.as_str()).collect::<Vec<_>>()
    }
}

fn owner_filter(owner: &ReminderOwner) -> Document {
    match owner {
        ReminderOwner::User(user_id) => doc! { "user_id": user_id },
        ReminderOwner::Workspace(workspace_id) => doc! { "workspace_id": workspace_id },
        ReminderOwner::Channel(channel_id) => doc! { "channel_id": channel_id },
    }
}

fn status_set(status: ReminderStatus, now: i64) -> Document {
    let mut set = doc! {
        "status": status.as_str(),
        "updated": now,
    };
    if status == ReminderStatus::Triggered {
        set.insert("triggered_at", now);
    }
    doc! { "$set": set }
}

fn update_set(update: &ReminderUpdate, now: i64) -> anyhow::Result<Document> {
    let mut set = doc! { "updated": now };
    if let Some(title) = &update.title {
        set.insert("title", title);
    }
    if let Some(description) = &update.description {
        set.insert("description", description);
    }
    if let Some(remind_at) = update.remind_at {
        set.insert("remind_at", remind_at);
    }
    if let Some(priority) = update.priority {
        set.insert("priority", priority.as_str());
    }
    if let Some(recurrence) = &update.recurrence {
        set.insert("recurrence", bson::to_bson(recurrence)?);
    }
    if let Some(metadata) = &update.metadata {
        set.insert("metadata", bson::to_bson(metadata)?);
    }
    Ok(doc! { "$set": set })
}

#[async_trait::async_trait]
impl IReminderRepo for MongoReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        mongo_repo::insert::<_, ReminderMongo>(&self.collection, reminder).await
    }

    async fn find(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>> {
        let oid = reminder_id.inner_ref();
        mongo_repo::find::<_, ReminderMongo>(&self.collection, oid).await
    }

    async fn find_page(&self, query: &ReminderQuery) -> anyhow::Result<(Vec<Reminder>, u64)> {
        let mut filter = owner_filter(&query.owner);
        if let Some(status) = query.status {
            filter.insert("status", status.as_str());
        }

        let total = mongo_repo::count(&self.collection, filter.clone()).await?;
        let options = FindOptions::builder()
            .sort(doc! { "remind_at": 1 })
            .skip(query.skip)
            .limit(i64::try_from(query.limit)?)
            .build();
        let reminders =
            mongo_repo::find_many_by::<_, ReminderMongo>(&self.collection, filter, Some(options))
                .await?;

        Ok((reminders, total))
    }

    async fn find_all_by_user(&self, user_id: &str) -> anyhow::Result<Vec<Reminder>> {
        let filter = doc! {
            "user_id": user_id,
        };
        mongo_repo::find_many_by::<_, ReminderMongo>(&self.collection, filter, None).await
    }

    async fn find_pending_due_before(&self, before: i64) -> anyhow::Result<Vec<Reminder>> {
        let filter = doc! {
            "status": ReminderStatus::Pending.as_str(),
            "remind_at": {
                "$lte": before
            }
        };
        let options = FindOptions::builder().sort(doc! { "remind_at": 1 }).build();
        mongo_repo::find_many_by::<_, ReminderMongo>(&self.collection, filter, Some(options))
            .await
    }

    async fn count_with_status(
        &self,
        reminder_ids: &[ID],
        statuses: &[ReminderStatus],
    ) -> anyhow::Result<u64> {
        let mut filter = ids_filter(reminder_ids);
        filter.insert("status", statuses_in(statuses));
        mongo_repo::count(&self.collection, filter).await
    }

    async fn update(
        &self,
        reminder_id: &ID,
        update: &ReminderUpdate,
        now: i64,
    ) -> anyhow::Result<UpdateResult> {
        let filter = doc! {
            "_id": reminder_id.inner_ref(),
        };
        mongo_repo::update_one(&self.collection, filter, update_set(update, now)?).await
    }

    async fn transition_status(
        &self,
        reminder_id: &ID,
        status: ReminderStatus,
        allowed_from: &[ReminderStatus],
        now: i64,
    ) -> anyhow::Result<bool> {
        let filter = doc! {
            "_id": reminder_id.inner_ref(),
            "status": statuses_in(allowed_from),
        };
        let res = mongo_repo::update_one(&self.collection, filter, status_set(status, now)).await?;
        Ok(res.matched())
    }

    async fn claim_for_trigger(&self, reminder_id: &ID, now: i64) -> anyhow::Result<bool> {
        let filter = doc! {
            "_id": reminder_id.inner_ref(),
            "status": ReminderStatus::Pending.as_str(),
        };
        let res = mongo_repo::update_one(
            &self.collection,
            filter,
            status_set(ReminderStatus::Triggered, now),
        )
        .await?;
        Ok(res.matched())
    }

    async fn snooze(&self, reminder_id: &ID, remind_at: i64, now: i64) -> anyhow::Result<bool> {
        let filter = doc! {
            "_id": reminder_id.inner_ref(),
            "status": {
                "$nin": [
                    ReminderStatus::Completed.as_str(),
                    ReminderStatus::Cancelled.as_str(),
                ]
            },
        };
        let update = doc! {
            "$set": {
                "remind_at": remind_at,
                "status": ReminderStatus::Pending.as_str(),
                "updated": now,
            }
        };
        let res = mongo_repo::update_one(&self.collection, filter, update).await?;
        Ok(res.matched())
    }

    async fn bulk_update_status(
        &self,
        reminder_ids: &[ID],
        status: ReminderStatus,
        allowed_from: &[ReminderStatus],
        now: i64,
    ) -> anyhow::Result<u64> {
        let mut filter = ids_filter(reminder_ids);
        filter.insert("status", statuses_in(allowed_from));
        let res = mongo_repo::update_many(&self.collection, filter, status_set(status, now)).await?;
        Ok(res.matched_count)
    }

    async fn delete(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>> {
        let oid = reminder_id.inner_ref();
        mongo_repo::delete::<_, ReminderMongo>(&self.collection, oid).await
    }

    async fn bulk_delete(&self, reminder_ids: &[ID]) -> anyhow::Result<DeleteResult> {
        mongo_repo::delete_many_by(&self.collection, ids_filter(reminder_ids)).await
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ReminderMongo {
    _id: ObjectId,
    user_id: String,
    workspace_id: String,
    channel_id: Option<String>,
    message_id: Option<String>,
    #[serde(rename = "type")]
    reminder_type: ReminderType,
    title: String,
    description: Option<String>,
    #[serde(default)]
    metadata: Metadata,
    remind_at: i64,
    status: ReminderStatus,
    #[serde(default)]
    priority: ReminderPriority,
    recurrence: Option<Recurrence>,
    created: i64,
    updated: i64,
    triggered_at: Option<i64>,
}

impl MongoDocument<Reminder> for ReminderMongo {
    fn into_domain(self) -> Reminder {
        Reminder {
            id: ID::from(self._id),
            user_id: self.user_id,
            workspace_id: self.workspace_id,
            channel_id: self.channel_id,
            message_id: self.message_id,
            reminder_type: self.reminder_type,
            title: self.title,
            description: self.description,
            metadata: self.metadata,
            remind_at: self.remind_at,
            status: self.status,
            priority: self.priority,
            recurrence: self.recurrence,
            created: self.created,
            updated: self.updated,
            triggered_at: self.triggered_at,
        }
    }

    fn from_domain(reminder: &Reminder) -> Self {
        Self {
            _id: *reminder.id.inner_ref(),
            user_id: reminder.user_id.clone(),
            workspace_id: reminder.workspace_id.clone(),
            channel_id: reminder.channel_id.clone(),
            message_id: reminder.message_id.clone(),
            reminder_type: reminder.reminder_type,
            title: reminder.title.clone(),
            description: reminder.description.clone(),
            metadata: reminder.metadata.clone(),
            remind_at: reminder.remind_at,
            status: reminder.status,
            priority: reminder.priority,
            recurrence: reminder.recurrence.clone(),
            created: reminder.created,
            updated: reminder.updated,
            triggered_at: reminder.triggered_at,
        }
    }
}
