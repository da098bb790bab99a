use crate::{
    recurrence::Recurrence,
    shared::{entity::Entity, metadata::Metadata},
    ID,
};
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt::Display, str::FromStr};
use thiserror::Error;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ReminderType {
    Message,
    Task,
    Custom,
}

impl ReminderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Message => "message",
            Self::Task => "task",
            Self::Custom => "custom",
        }
    }

    pub fn all() -> [Self; 3] {
        [Self::Message, Self::Task, Self::Custom]
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum ReminderPriority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Default for ReminderPriority {
    fn default() -> Self {
        Self::Low
    }
}

impl ReminderPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }
}

/// Lifecycle of a `Reminder`:
///
/// ```text
/// pending -> triggered -> completed
/// pending <-> snoozed
/// pending | snoozed | triggered -> cancelled
/// pending | snoozed -> completed
/// ```
///
/// `Cancelled` and `Completed` are terminal.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ReminderStatus {
    Pending,
    Triggered,
    Snoozed,
    Completed,
    Cancelled,
}

impl ReminderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Triggered => "triggered",
            Self::Snoozed => "snoozed",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn all() -> [Self; 5] {
        [
            Self::Pending,
            Self::Triggered,
            Self::Snoozed,
            Self::Completed,
            Self::Cancelled,
        ]
    }

    /// Every status that is not terminal
    pub fn active() -> [Self; 3] {
        [Self::Pending, Self::Triggered, Self::Snoozed]
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    pub fn can_transition_to(&self, next: ReminderStatus) -> bool {
        use ReminderStatus::*;

        match (self, next) {
            (Pending, Triggered) => true,
            (Pending, Snoozed) | (Snoozed, Pending) => true,
            // A fired reminder may be postponed, which puts it back in the queue
            (Triggered, Pending) => true,
            (Pending | Snoozed | Triggered, Cancelled) => true,
            (Pending | Snoozed | Triggered, Completed) => true,
            _ => false,
        }
    }
}

impl Display for ReminderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid reminder status: {0}")]
pub struct InvalidStatusError(String);

impl FromStr for ReminderStatus {
    type Err = InvalidStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| InvalidStatusError(s.to_string()))
    }
}

/// A `Reminder` is the schedulable unit: it fires a notification to its
/// owner at `remind_at`. One `Reminder` exists per pending or historical
/// occurrence, recurring reminders spawn a new `Reminder` each time they fire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: ID,
    pub user_id: String,
    pub workspace_id: String,
    /// Conversation context the reminder originated from
    pub channel_id: Option<String>,
    pub message_id: Option<String>,
    #[serde(rename = "type")]
    pub reminder_type: ReminderType,
    pub title: String,
    pub description: Option<String>,
    pub metadata: Metadata,
    /// The timestamp in millis at which the reminder is due.
    /// This is the only key used for scheduling
    pub remind_at: i64,
    pub status: ReminderStatus,
    pub priority: ReminderPriority,
    pub recurrence: Option<Recurrence>,
    pub created: i64,
    pub updated: i64,
    /// Set once, when the reminder transitions into `Triggered`
    pub triggered_at: Option<i64>,
}

impl Entity for Reminder {
    fn id(&self) -> &ID {
        &self.id
    }
}

impl Reminder {
    /// A reminder is due when it is pending and its time has arrived
    pub fn is_due(&self, now: i64) -> bool {
        self.status == ReminderStatus::Pending && self.remind_at <= now
    }

    /// Builds the next `Reminder` in a recurring series, if the series has not ended.
    ///
    /// The next occurrence is measured from the nominal `remind_at` and not
    /// from the time the reminder was actually processed.
    pub fn next_in_series(&self) -> Option<(i64, &Recurrence)> {
        let recurrence = self.recurrence.as_ref()?;
        recurrence
            .next_occurrence(self.remind_at)
            .map(|next| (next, recurrence))
    }
}

/// Partial update of a `Reminder`. Fields that are `None` or empty are
/// left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReminderUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub remind_at: Option<i64>,
    pub priority: Option<ReminderPriority>,
    pub recurrence: Option<Recurrence>,
    pub metadata: Option<Metadata>,
}

impl ReminderUpdate {
    /// Drops empty strings so that they never overwrite stored values
    pub fn normalized(self) -> Self {
        Self {
            title: self.title.filter(|t| !t.trim().is_empty()),
            description: self.description.filter(|d| !d.is_empty()),
            ..self
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.remind_at.is_none()
            && self.priority.is_none()
            && self.recurrence.is_none()
            && self.metadata.is_none()
    }

    pub fn apply(&self, reminder: &mut Reminder, updated: i64) {
        if let Some(title) = &self.title {
            reminder.title = title.clone();
        }
        if let Some(description) = &self.description {
            reminder.description = Some(description.clone());
        }
        if let Some(remind_at) = self.remind_at {
            reminder.remind_at = remind_at;
        }
        if let Some(priority) = self.priority {
            reminder.priority = priority;
        }
        if let Some(recurrence) = &self.recurrence {
            reminder.recurrence = Some(recurrence.clone());
        }
        if let Some(metadata) = &self.metadata {
            reminder.metadata = metadata.clone();
        }
        reminder.updated = updated;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReminderStats {
    pub total: u64,
    pub by_status: HashMap<String, u64>,
    pub by_type: HashMap<String, u64>,
    /// Pending reminders that are due in the future
    pub upcoming: u64,
    /// Pending reminders whose time has already passed
    pub overdue: u64,
}

impl ReminderStats {
    pub fn compute(reminders: &[Reminder], now: i64) -> Self {
        let mut stats = Self {
            total: reminders.len() as u64,
            by_status: ReminderStatus::all()
                .iter()
                .map(|s| (s.as_str().to_string(), 0))
                .collect(),
            by_type: ReminderType::all()
                .iter()
                .map(|t| (t.as_str().to_string(), 0))
                .collect(),
            upcoming: 0,
            overdue: 0,
        };

        for reminder in reminders {
            *stats
                .by_status
                .entry(reminder.status.as_str().to_string())
                .or_default() += 1;
            *stats
                .by_type
                .entry(reminder.reminder_type.as_str().to_string())
                .or_default() += 1;
            if reminder.status == ReminderStatus::Pending {
                if reminder.remind_at > now {
                    stats.upcoming += 1;
                } else if reminder.remind_at < now {
                    stats.overdue += 1;
                }
            }
        }

        stats
    }
}
