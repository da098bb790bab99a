use crate::{Metadata, Reminder, ID};
use serde::Serialize;

pub const TOPIC_REMINDER_CREATED: &str = "reminders.created";
pub const TOPIC_REMINDER_UPDATED: &str = "reminders.updated";
pub const TOPIC_REMINDER_SNOOZED: &str = "reminders.snoozed";
pub const TOPIC_REMINDER_CANCELLED: &str = "reminders.cancelled";
pub const TOPIC_REMINDER_COMPLETED: &str = "reminders.completed";
pub const TOPIC_REMINDER_DELETED: &str = "reminders.deleted";
pub const TOPIC_REMINDERS_BULK_CANCELLED: &str = "reminders.bulk_cancelled";
pub const TOPIC_REMINDERS_BULK_DELETED: &str = "reminders.bulk_deleted";
pub const TOPIC_NOTIFICATION_SEND: &str = "notifications.send";

/// Payload of the `notifications.send` topic. Everything the notification
/// consumer needs is denormalized so it never has to read the `Reminder`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotificationPayload {
    #[serde(rename = "type")]
    pub kind: String,
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub reminder_id: ID,
    pub channel_id: Option<String>,
    pub message_id: Option<String>,
    pub metadata: Metadata,
}

/// Events published for every state transition of a `Reminder`.
///
/// Serializes to the bare payload, the topic is given by `ReminderEvent::topic`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReminderEvent {
    Created {
        reminder_id: ID,
        user_id: String,
        workspace_id: String,
        remind_at: i64,
    },
    Updated {
        reminder_id: ID,
        user_id: String,
    },
    Snoozed {
        reminder_id: ID,
        user_id: String,
        new_time: i64,
    },
    Cancelled {
        reminder_id: ID,
        user_id: String,
    },
    Completed {
        reminder_id: ID,
        user_id: String,
    },
    Deleted {
        reminder_id: ID,
        user_id: String,
    },
    NotificationSend(NotificationPayload),
    BulkCancelled {
        ids: Vec<String>,
        cancelled: u64,
    },
    BulkDeleted {
        ids: Vec<String>,
        deleted: u64,
    },
}

impl ReminderEvent {
    pub fn topic(&self) -> &'static str {
        match self {
            Self::Created { .. } => TOPIC_REMINDER_CREATED,
            Self::Updated { .. } => TOPIC_REMINDER_UPDATED,
            Self::Snoozed { .. } => TOPIC_REMINDER_SNOOZED,
            Self::Cancelled { .. } => TOPIC_REMINDER_CANCELLED,
            Self::Completed { .. } => TOPIC_REMINDER_COMPLETED,
            Self::Deleted { .. } => TOPIC_REMINDER_DELETED,
            Self::NotificationSend(_) => TOPIC_NOTIFICATION_SEND,
            Self::BulkCancelled { .. } => TOPIC_REMINDERS_BULK_CANCELLED,
            Self::BulkDeleted { .. } => TOPIC_REMINDERS_BULK_DELETED,
        }
    }

    pub fn created(reminder: &Reminder) -> Self {
        Self::Created {
            reminder_id: reminder.id.clone(),
            user_id: reminder.user_id.clone(),
            workspace_id: reminder.workspace_id.clone(),
            remind_at: reminder.remind_at,
        }
    }

    pub fn updated(reminder: &Reminder) -> Self {
        Self::Updated {
            reminder_id: reminder.id.clone(),
            user_id: reminder.user_id.clone(),
        }
    }

    pub fn snoozed(reminder: &Reminder) -> Self {
        Self::Snoozed {
            reminder_id: reminder.id.clone(),
            user_id: reminder.user_id.clone(),
            new_time: reminder.remind_at,
        }
    }

    pub fn cancelled(reminder: &Reminder) -> Self {
        Self::Cancelled {
            reminder_id: reminder.id.clone(),
            user_id: reminder.user_id.clone(),
        }
    }

    pub fn completed(reminder: &Reminder) -> Self {
        Self::Completed {
            reminder_id: reminder.id.clone(),
            user_id: reminder.user_id.clone(),
        }
    }

    pub fn deleted(reminder: &Reminder) -> Self {
        Self::Deleted {
            reminder_id: reminder.id.clone(),
            user_id: reminder.user_id.clone(),
        }
    }

    pub fn notification(reminder: &Reminder) -> Self {
        Self::NotificationSend(NotificationPayload {
            kind: "reminder".into(),
            user_id: reminder.user_id.clone(),
            title: reminder.title.clone(),
            description: reminder.description.clone(),
            reminder_id: reminder.id.clone(),
            channel_id: reminder.channel_id.clone(),
            message_id: reminder.message_id.clone(),
            metadata: reminder.metadata.clone(),
        })
    }
}
