pub mod cancel_reminder;
pub mod complete_reminder;
pub mod create_reminder;
pub mod delete_reminder;
pub mod get_reminder;
pub mod get_reminder_stats;
pub mod get_reminders_by_channel;
pub mod get_reminders_by_user;
pub mod get_reminders_by_workspace;
pub mod get_snooze_history;
pub mod pagination;
pub mod snooze_reminder;
mod subscribers;
pub mod trigger_due_reminders;
pub mod trigger_reminder;
pub mod update_reminder;
