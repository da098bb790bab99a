mod bulk;
mod error;
mod reminder;
mod scheduler;
mod service;
mod shared;

pub use error::ReminderError;
pub use reminder::create_reminder::CreateReminderUseCase;
pub use reminder::pagination::{PageRequest, ReminderPage};
pub use reminder::trigger_due_reminders::TickSummary;
pub use reminder::trigger_reminder::TriggerOutcome;
pub use scheduler::{ReminderScheduler, SchedulerHandle};
pub use service::ReminderService;

use reminder_scheduler_infra::ReminderContext;
use tracing::info;

pub struct Application {
    service: ReminderService,
    scheduler: SchedulerHandle,
}

impl Application {
    pub fn new(context: ReminderContext) -> Self {
        let scheduler = ReminderScheduler::new(context.clone(), &context.config.scheduler).start();
        Self {
            service: ReminderService::new(context),
            scheduler,
        }
    }

    pub fn service(&self) -> &ReminderService {
        &self.service
    }

    /// Runs until ctrl-c is received, then stops the scheduler gracefully
    pub async fn start(self) -> anyhow::Result<()> {
        tokio::signal::ctrl_c().await?;
        info!("Shutdown signal received");
        self.stop().await;
        Ok(())
    }

    pub async fn stop(self) {
        self.scheduler.stop().await;
    }
}
