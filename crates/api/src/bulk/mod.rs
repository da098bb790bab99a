//! Applies a lifecycle operation to a set of reminders. A failing item never
//! aborts the rest of the batch, it is reported in the `BulkResult` instead.

pub mod bulk_cancel;
pub mod bulk_complete;
pub mod bulk_create;
pub mod bulk_delete;
pub mod bulk_snooze;

use reminder_scheduler_domain::ID;

/// Splits the submitted ids into the ones that could be parsed. Malformed ids
/// can never match a reminder and end up counted as failed.
fn parse_ids(reminder_ids: &[String]) -> Vec<ID> {
    reminder_ids
        .iter()
        .filter_map(|id| id.parse::<ID>().ok())
        .collect()
}
