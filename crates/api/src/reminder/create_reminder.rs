use crate::error::ReminderError;
use crate::shared::{events::publish, usecase::UseCase};
use reminder_scheduler_domain::{
    Metadata, Recurrence, Reminder, ReminderEvent, ReminderPriority, ReminderStatus,
    ReminderType, ID,
};
use reminder_scheduler_infra::ReminderContext;
use serde::Deserialize;

/// Creates a new pending `Reminder`.
///
/// Fields a caller might send that are not part of this request, such as a
/// `status`, are ignored: every reminder starts out pending.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateReminderUseCase {
    pub user_id: String,
    pub workspace_id: String,
    pub channel_id: Option<String>,
    pub message_id: Option<String>,
    #[serde(rename = "type")]
    pub reminder_type: Option<ReminderType>,
    pub title: String,
    pub description: Option<String>,
    pub metadata: Metadata,
    pub remind_at: Option<i64>,
    pub priority: Option<ReminderPriority>,
    pub recurrence: Option<Recurrence>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    MissingField(&'static str),
    InvalidRecurrence(String),
    StorageError(String),
}

impl From<UseCaseError> for ReminderError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::MissingField(field) => Self::Validation(format!("{} is required", field)),
            UseCaseError::InvalidRecurrence(msg) => Self::Validation(msg),
            UseCaseError::StorageError(msg) => Self::Persistence(msg),
        }
    }
}

impl CreateReminderUseCase {
    /// Request for the occurrence following `reminder` in its recurring series
    pub fn next_in_series(reminder: &Reminder, remind_at: i64, recurrence: &Recurrence) -> Self {
        Self {
            user_id: reminder.user_id.clone(),
            workspace_id: reminder.workspace_id.clone(),
            channel_id: reminder.channel_id.clone(),
            message_id: reminder.message_id.clone(),
            reminder_type: Some(reminder.reminder_type),
            title: reminder.title.clone(),
            description: reminder.description.clone(),
            metadata: reminder.metadata.clone(),
            remind_at: Some(remind_at),
            priority: Some(reminder.priority),
            recurrence: Some(recurrence.clone()),
        }
    }

    fn validate(&self) -> Result<(ReminderType, i64), UseCaseError> {
        if self.user_id.trim().is_empty() {
            return Err(UseCaseError::MissingField("user_id"));
        }
        if self.workspace_id.trim().is_empty() {
            return Err(UseCaseError::MissingField("workspace_id"));
        }
        let reminder_type = self
            .reminder_type
            .ok_or(UseCaseError::MissingField("type"))?;
        if self.title.trim().is_empty() {
            return Err(UseCaseError::MissingField("title"));
        }
        let remind_at = self.remind_at.ok_or(UseCaseError::MissingField("remind_at"))?;
        if let Some(recurrence) = &self.recurrence {
            recurrence
                .validate()
                .map_err(|e| UseCaseError::InvalidRecurrence(e.to_string()))?;
        }

        Ok((reminder_type, remind_at))
    }
}

#[async_trait::async_trait]
impl UseCase for CreateReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateReminder";

    async fn execute(&mut self, ctx: &ReminderContext) -> Result<Self::Response, Self::Error> {
        let (reminder_type, remind_at) = self.validate()?;
        let now = ctx.sys.get_timestamp_millis();

        let reminder = Reminder {
            id: ID::new(),
            user_id: self.user_id.clone(),
            workspace_id: self.workspace_id.clone(),
            channel_id: self.channel_id.clone(),
            message_id: self.message_id.clone(),
            reminder_type,
            title: self.title.clone(),
            description: self.description.clone().filter(|d| !d.is_empty()),
            metadata: self.metadata.clone(),
            remind_at,
            status: ReminderStatus::Pending,
            priority: self.priority.unwrap_or_default(),
            recurrence: self.recurrence.clone(),
            created: now,
            updated: now,
            triggered_at: None,
        };

        ctx.repos
            .reminders
            .insert(&reminder)
            .await
            .map_err(|e| UseCaseError::StorageError(e.to_string()))?;

        publish(ctx, ReminderEvent::created(&reminder)).await;

        Ok(reminder)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::testing::*;
    use reminder_scheduler_domain::RecurrencePattern;

    fn usecase_factory() -> CreateReminderUseCase {
        CreateReminderUseCase {
            user_id: "user".into(),
            workspace_id: "workspace".into(),
            reminder_type: Some(ReminderType::Task),
            title: "Submit expenses".into(),
            remind_at: Some(NOW + DAY),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn creates_pending_reminder_and_publishes_event() {
        let TestContext { ctx, events } = setup();

        let reminder = usecase_factory().execute(&ctx).await.unwrap();
        assert_eq!(reminder.status, ReminderStatus::Pending);
        assert_eq!(reminder.priority, ReminderPriority::Low);
        assert_eq!(reminder.created, NOW);
        assert!(reminder.triggered_at.is_none());

        let stored = ctx.repos.reminders.find(&reminder.id).await.unwrap().unwrap();
        assert_eq!(stored, reminder);

        assert_eq!(
            events.events_on("reminders.created"),
            vec![ReminderEvent::Created {
                reminder_id: reminder.id.clone(),
                user_id: "user".into(),
                workspace_id: "workspace".into(),
                remind_at: NOW + DAY,
            }]
        );
    }

    #[tokio::test]
    async fn ignores_supplied_status() {
        let TestContext { ctx, .. } = setup();

        let mut usecase: CreateReminderUseCase = serde_json::from_value(serde_json::json!({
            "user_id": "user",
            "workspace_id": "workspace",
            "type": "message",
            "title": "Ping the team",
            "remind_at": NOW + DAY,
            "status": "triggered",
        }))
        .unwrap();
        let reminder = usecase.execute(&ctx).await.unwrap();
        assert_eq!(reminder.status, ReminderStatus::Pending);
        assert_eq!(reminder.reminder_type, ReminderType::Message);
    }

    #[tokio::test]
    async fn rejects_missing_required_fields() {
        let TestContext { ctx, events } = setup();

        let cases: Vec<(Box<dyn Fn(&mut CreateReminderUseCase)>, &str)> = vec![
            (Box::new(|u| u.user_id = "".into()), "user_id"),
            (Box::new(|u| u.workspace_id = " ".into()), "workspace_id"),
            (Box::new(|u| u.reminder_type = None), "type"),
            (Box::new(|u| u.title = "".into()), "title"),
            (Box::new(|u| u.remind_at = None), "remind_at"),
        ];
        for (modify, field) in cases {
            let mut usecase = usecase_factory();
            modify(&mut usecase);
            assert_eq!(
                usecase.execute(&ctx).await,
                Err(UseCaseError::MissingField(field))
            );
        }
        assert!(events.events().is_empty());
    }

    #[tokio::test]
    async fn rejects_invalid_recurrence() {
        let TestContext { ctx, .. } = setup();

        let mut usecase = usecase_factory();
        usecase.recurrence = Some(Recurrence::new(RecurrencePattern::Daily, 0));
        let res = usecase.execute(&ctx).await;
        assert!(matches!(res, Err(UseCaseError::InvalidRecurrence(_))));
        assert!(matches!(
            ReminderError::from(res.unwrap_err()),
            ReminderError::Validation(_)
        ));
    }
}
