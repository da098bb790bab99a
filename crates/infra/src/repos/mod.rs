mod reminder;
mod shared;
mod snooze_history;

use mongodb::{options::ClientOptions, Client};
use reminder::{InMemoryReminderRepo, MongoReminderRepo};
use snooze_history::{InMemorySnoozeHistoryRepo, MongoSnoozeHistoryRepo};
use std::{sync::Arc, time::Duration};
use tracing::info;

pub use reminder::{IReminderRepo, ReminderOwner, ReminderQuery};
pub use shared::repo::{DeleteResult, UpdateResult};
pub use snooze_history::ISnoozeHistoryRepo;

#[derive(Clone)]
pub struct Repos {
    pub reminders: Arc<dyn IReminderRepo>,
    pub snooze_history: Arc<dyn ISnoozeHistoryRepo>,
}

impl Repos {
    pub async fn create_mongodb(
        connection_string: &str,
        db_name: &str,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let mut client_options = ClientOptions::parse(connection_string).await?;
        client_options.server_selection_timeout = Some(timeout);
        client_options.connect_timeout = Some(timeout);
        let client = Client::with_options(client_options)?;
        let db = client.database(db_name);

        // This is needed to make sure that db is ready before the scheduler starts polling
        info!("DB CHECKING CONNECTION ...");
        db.run_command(mongodb::bson::doc! { "ping": 1 }, None)
            .await?;
        info!("DB CHECKING CONNECTION ... [done]");

        let reminders = MongoReminderRepo::new(&db);
        reminders.create_indexes().await?;

        Ok(Self {
            reminders: Arc::new(reminders),
            snooze_history: Arc::new(MongoSnoozeHistoryRepo::new(&db)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            reminders: Arc::new(InMemoryReminderRepo::new()),
            snooze_history: Arc::new(InMemorySnoozeHistoryRepo::new()),
        }
    }
}
