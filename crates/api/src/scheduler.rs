use crate::{
    reminder::trigger_due_reminders::{TickSummary, TriggerDueRemindersUseCase},
    shared::usecase::execute,
};
use reminder_scheduler_infra::{ReminderContext, SchedulerConfig};
use std::time::Duration;
use tokio::{
    task::JoinHandle,
    time::{Instant, MissedTickBehavior},
};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// Background task that periodically triggers due reminders.
///
/// Stopping never interrupts a poll in progress, the loop only checks for
/// cancellation between polls.
pub struct ReminderScheduler {
    ctx: ReminderContext,
    poll_interval: Duration,
    tick_timeout: Duration,
    shutdown: CancellationToken,
}

/// Handle to a running `ReminderScheduler`
pub struct SchedulerHandle {
    shutdown: CancellationToken,
    task: JoinHandle<()>,
}

impl ReminderScheduler {
    pub fn new(ctx: ReminderContext, config: &SchedulerConfig) -> Self {
        Self {
            ctx,
            poll_interval: config.poll_interval,
            tick_timeout: config.tick_timeout,
            shutdown: CancellationToken::new(),
        }
    }

    /// Runs a single poll. Once the tick timeout has passed no further
    /// reminder is claimed, the rest is left for the next poll
    pub async fn tick(&self) -> Option<TickSummary> {
        let usecase = TriggerDueRemindersUseCase {
            deadline: Some(Instant::now() + self.tick_timeout),
        };
        match execute(usecase, &self.ctx).await {
            Ok(summary) => {
                if summary.deferred > 0 {
                    warn!(
                        deferred = summary.deferred,
                        "Poll ran longer than {:?}, deferring the remaining reminders",
                        self.tick_timeout
                    );
                }
                Some(summary)
            }
            Err(e) => {
                error!("Unable to load due reminders: {:?}", e);
                None
            }
        }
    }

    pub fn start(self) -> SchedulerHandle {
        let shutdown = self.shutdown.clone();
        let task = tokio::spawn(self.run());
        SchedulerHandle { shutdown, task }
    }

    async fn run(self) {
        info!(
            "Reminder scheduler started, polling every {:?}",
            self.poll_interval
        );
        let mut interval = tokio::time::interval(self.poll_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    break;
                }
                _ = interval.tick() => {
                    self.tick().await;
                }
            }
        }

        info!("Reminder scheduler stopped");
    }
}

impl SchedulerHandle {
    /// Halts future polls and waits for the poll in progress, if any, to finish
    pub async fn stop(self) {
        self.shutdown.cancel();
        if let Err(e) = self.task.await {
            error!("Reminder scheduler task failed: {:?}", e);
        }
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}
