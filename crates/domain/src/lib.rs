mod bulk;
mod duration;
mod events;
mod recurrence;
mod reminder;
mod shared;
mod snooze;

pub use bulk::BulkResult;
pub use duration::{InvalidDurationError, SnoozeDuration};
pub use events::*;
pub use recurrence::{InvalidRecurrenceError, Recurrence, RecurrencePattern};
pub use reminder::{
    InvalidStatusError, Reminder, ReminderPriority, ReminderStats, ReminderStatus, ReminderType,
    ReminderUpdate,
};
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use shared::metadata::{Metadata, MetadataValue};
pub use snooze::SnoozeEntry;
