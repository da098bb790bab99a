use crate::{
    bulk::{
        bulk_cancel::BulkCancelRemindersUseCase, bulk_complete::BulkCompleteRemindersUseCase,
        bulk_create::BulkCreateRemindersUseCase, bulk_delete::BulkDeleteRemindersUseCase,
        bulk_snooze::BulkSnoozeRemindersUseCase,
    },
    error::ReminderError,
    reminder::{
        cancel_reminder::CancelReminderUseCase,
        complete_reminder::CompleteReminderUseCase,
        create_reminder::CreateReminderUseCase,
        delete_reminder::DeleteReminderUseCase,
        get_reminder::GetReminderUseCase,
        get_reminder_stats::GetReminderStatsUseCase,
        get_reminders_by_channel::GetRemindersByChannelUseCase,
        get_reminders_by_user::GetRemindersByUserUseCase,
        get_reminders_by_workspace::GetRemindersByWorkspaceUseCase,
        pagination::{PageRequest, ReminderPage},
        get_snooze_history::GetSnoozeHistoryUseCase,
        snooze_reminder::SnoozeReminderUseCase,
        trigger_reminder::{TriggerOutcome, TriggerReminderUseCase},
        update_reminder::UpdateReminderUseCase,
    },
    shared::usecase::execute,
};
use reminder_scheduler_domain::{
    BulkResult, Reminder, ReminderStats, ReminderStatus, ReminderUpdate, SnoozeEntry, ID,
};
use reminder_scheduler_infra::ReminderContext;

/// Entry point to every reminder lifecycle operation
#[derive(Clone)]
pub struct ReminderService {
    ctx: ReminderContext,
}

impl ReminderService {
    pub fn new(ctx: ReminderContext) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &ReminderContext {
        &self.ctx
    }

    pub async fn create(&self, request: CreateReminderUseCase) -> Result<Reminder, ReminderError> {
        execute(request, &self.ctx)
            .await
            .map_err(ReminderError::from)
    }

    pub async fn get(&self, reminder_id: &ID) -> Result<Reminder, ReminderError> {
        let usecase = GetReminderUseCase {
            reminder_id: reminder_id.clone(),
        };
        execute(usecase, &self.ctx)
            .await
            .map_err(ReminderError::from)
    }

    pub async fn list_by_user(
        &self,
        user_id: &str,
        status: Option<ReminderStatus>,
        page: Option<u64>,
        per_page: Option<u64>,
    ) -> Result<ReminderPage, ReminderError> {
        let usecase = GetRemindersByUserUseCase {
            user_id: user_id.to_string(),
            status,
            page: PageRequest::new(page, per_page),
        };
        execute(usecase, &self.ctx)
            .await
            .map_err(ReminderError::from)
    }

    pub async fn list_by_workspace(
        &self,
        workspace_id: &str,
        status: Option<ReminderStatus>,
        page: Option<u64>,
        per_page: Option<u64>,
    ) -> Result<ReminderPage, ReminderError> {
        let usecase = GetRemindersByWorkspaceUseCase {
            workspace_id: workspace_id.to_string(),
            status,
            page: PageRequest::new(page, per_page),
        };
        execute(usecase, &self.ctx)
            .await
            .map_err(ReminderError::from)
    }

    pub async fn list_by_channel(
        &self,
        channel_id: &str,
        page: Option<u64>,
        per_page: Option<u64>,
    ) -> Result<ReminderPage, ReminderError> {
        let usecase = GetRemindersByChannelUseCase {
            channel_id: channel_id.to_string(),
            page: PageRequest::new(page, per_page),
        };
        execute(usecase, &self.ctx)
            .await
            .map_err(ReminderError::from)
    }

    pub async fn update(
        &self,
        reminder_id: &ID,
        update: ReminderUpdate,
    ) -> Result<Reminder, ReminderError> {
        let usecase = UpdateReminderUseCase {
            reminder_id: reminder_id.clone(),
            update,
        };
        execute(usecase, &self.ctx)
            .await
            .map_err(ReminderError::from)
    }

    pub async fn snooze(&self, reminder_id: &ID, duration: &str) -> Result<Reminder, ReminderError> {
        let usecase = SnoozeReminderUseCase {
            reminder_id: reminder_id.clone(),
            duration: duration.to_string(),
        };
        execute(usecase, &self.ctx)
            .await
            .map_err(ReminderError::from)
    }

    pub async fn cancel(&self, reminder_id: &ID) -> Result<Reminder, ReminderError> {
        let usecase = CancelReminderUseCase {
            reminder_id: reminder_id.clone(),
        };
        execute(usecase, &self.ctx)
            .await
            .map_err(ReminderError::from)
    }

    pub async fn complete(&self, reminder_id: &ID) -> Result<Reminder, ReminderError> {
        let usecase = CompleteReminderUseCase {
            reminder_id: reminder_id.clone(),
        };
        execute(usecase, &self.ctx)
            .await
            .map_err(ReminderError::from)
    }

    pub async fn delete(&self, reminder_id: &ID) -> Result<Reminder, ReminderError> {
        let usecase = DeleteReminderUseCase {
            reminder_id: reminder_id.clone(),
        };
        execute(usecase, &self.ctx)
            .await
            .map_err(ReminderError::from)
    }

    pub async fn trigger(&self, reminder: Reminder) -> Result<TriggerOutcome, ReminderError> {
        execute(TriggerReminderUseCase { reminder }, &self.ctx)
            .await
            .map_err(ReminderError::from)
    }

    pub async fn stats(&self, user_id: &str) -> Result<ReminderStats, ReminderError> {
        let usecase = GetReminderStatsUseCase {
            user_id: user_id.to_string(),
        };
        execute(usecase, &self.ctx)
            .await
            .map_err(ReminderError::from)
    }

    pub async fn snooze_history(&self, reminder_id: &ID) -> Result<Vec<SnoozeEntry>, ReminderError> {
        let usecase = GetSnoozeHistoryUseCase {
            reminder_id: reminder_id.clone(),
        };
        execute(usecase, &self.ctx)
            .await
            .map_err(ReminderError::from)
    }

    pub async fn bulk_create(
        &self,
        reminders: Vec<CreateReminderUseCase>,
    ) -> Result<BulkResult, ReminderError> {
        execute(BulkCreateRemindersUseCase { reminders }, &self.ctx)
            .await
            .map_err(ReminderError::from)
    }

    pub async fn bulk_cancel(&self, reminder_ids: Vec<String>) -> Result<BulkResult, ReminderError> {
        execute(BulkCancelRemindersUseCase { reminder_ids }, &self.ctx)
            .await
            .map_err(ReminderError::from)
    }

    pub async fn bulk_delete(&self, reminder_ids: Vec<String>) -> Result<BulkResult, ReminderError> {
        execute(BulkDeleteRemindersUseCase { reminder_ids }, &self.ctx)
            .await
            .map_err(ReminderError::from)
    }

    pub async fn bulk_snooze(
        &self,
        reminder_ids: Vec<String>,
        duration: &str,
    ) -> Result<BulkResult, ReminderError> {
        let usecase = BulkSnoozeRemindersUseCase {
            reminder_ids,
            duration: duration.to_string(),
        };
        execute(usecase, &self.ctx)
            .await
            .map_err(ReminderError::from)
    }

    pub async fn bulk_complete(
        &self,
        reminder_ids: Vec<String>,
    ) -> Result<BulkResult, ReminderError> {
        execute(BulkCompleteRemindersUseCase { reminder_ids }, &self.ctx)
            .await
            .map_err(ReminderError::from)
    }
}
