use reminder_scheduler_domain::{Reminder, ReminderStatus};
use reminder_scheduler_infra::{ReminderContext, ReminderOwner, ReminderQuery};
use serde::Serialize;

pub const DEFAULT_PER_PAGE: u64 = 20;
pub const MAX_PER_PAGE: u64 = 100;

/// One page of a reminder listing, ordered by `remind_at`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReminderPage {
    pub data: Vec<Reminder>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

/// Requested page. Out of range values are clamped instead of rejected:
/// `page` is at least 1, a missing or zero `per_page` becomes
/// `DEFAULT_PER_PAGE` and anything above `MAX_PER_PAGE` is capped
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PageRequest {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

impl PageRequest {
    pub fn new(page: Option<u64>, per_page: Option<u64>) -> Self {
        Self { page, per_page }
    }

    fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }

    fn per_page(&self) -> u64 {
        match self.per_page {
            None | Some(0) => DEFAULT_PER_PAGE,
            Some(per_page) => per_page.min(MAX_PER_PAGE),
        }
    }
}

pub(crate) async fn find_page(
    ctx: &ReminderContext,
    owner: ReminderOwner,
    status: Option<ReminderStatus>,
    request: PageRequest,
) -> anyhow::Result<ReminderPage> {
    let page = request.page();
    let per_page = request.per_page();
    let query = ReminderQuery {
        owner,
        status,
        skip: (page - 1).saturating_mul(per_page),
        limit: per_page,
    };
    let (data, total) = ctx.repos.reminders.find_page(&query).await?;

    Ok(ReminderPage {
        data,
        total,
        page,
        per_page,
        total_pages: (total + per_page - 1) / per_page,
    })
}
