use crate::{shared::entity::Entity, ID};
use serde::{Deserialize, Serialize};

/// History record written every time a `Reminder` is snoozed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnoozeEntry {
    pub id: ID,
    pub reminder_id: ID,
    pub user_id: String,
    pub snoozed_at: i64,
    /// The duration as it was requested, e.g. `15m`
    pub duration: String,
    pub new_remind_at: i64,
}

impl Entity for SnoozeEntry {
    fn id(&self) -> &ID {
        &self.id
    }
}
