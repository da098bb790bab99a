use super::pagination::{find_page, PageRequest, ReminderPage};
use crate::error::ReminderError;
use crate::shared::usecase::UseCase;
use reminder_scheduler_domain::ReminderStatus;
use reminder_scheduler_infra::{ReminderContext, ReminderOwner};

/// Lists every reminder in a workspace ordered by `remind_at`
#[derive(Debug)]
pub struct GetRemindersByWorkspaceUseCase {
    pub workspace_id: String,
    pub status: Option<ReminderStatus>,
    pub page: PageRequest,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError(String),
}

impl From<UseCaseError> for ReminderError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError(msg) => Self::Persistence(msg),
        }
    }
}

#[async_trait::async_trait]
impl UseCase for GetRemindersByWorkspaceUseCase {
    type Response = ReminderPage;

    type Error = UseCaseError;

    const NAME: &'static str = "GetRemindersByWorkspace";

    async fn execute(&mut self, ctx: &ReminderContext) -> Result<Self::Response, Self::Error> {
        find_page(
            ctx,
            ReminderOwner::Workspace(self.workspace_id.clone()),
            self.status,
            self.page,
        )
        .await
        .map_err(|e| UseCaseError::StorageError(e.to_string()))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::testing::*;

    #[tokio::test]
    async fn lists_reminders_across_users_of_workspace() {
        let TestContext { ctx, .. } = setup();
        let first = insert_reminder(&ctx, ReminderStatus::Pending, NOW + MINUTE).await;
        let mut other_user = reminder_factory(ReminderStatus::Pending, NOW);
        other_user.user_id = "colleague".into();
        ctx.repos.reminders.insert(&other_user).await.unwrap();
        let mut elsewhere = reminder_factory(ReminderStatus::Pending, NOW);
        elsewhere.workspace_id = "elsewhere".into();
        ctx.repos.reminders.insert(&elsewhere).await.unwrap();
        insert_reminder(&ctx, ReminderStatus::Cancelled, NOW + DAY).await;

        let mut usecase = GetRemindersByWorkspaceUseCase {
            workspace_id: "workspace".into(),
            status: Some(ReminderStatus::Pending),
            page: PageRequest::default(),
        };
        let res = usecase.execute(&ctx).await.unwrap();
        assert_eq!(res.total, 2);
        assert_eq!(
            res.data.iter().map(|r| r.id.clone()).collect::<Vec<_>>(),
            vec![other_user.id, first.id]
        );

        let mut usecase = GetRemindersByWorkspaceUseCase {
            workspace_id: "workspace".into(),
            status: None,
            page: PageRequest::new(Some(2), Some(2)),
        };
        let res = usecase.execute(&ctx).await.unwrap();
        assert_eq!(res.total, 3);
        assert_eq!(res.total_pages, 2);
        assert_eq!(res.data.len(), 1);
        assert_eq!(res.data[0].status, ReminderStatus::Cancelled);
    }

    #[tokio::test]
    async fn store_failure_is_reported() {
        let TestContext { ctx, .. } = setup_unavailable_store();

        let mut usecase = GetRemindersByWorkspaceUseCase {
            workspace_id: "workspace".into(),
            status: None,
            page: PageRequest::default(),
        };
        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::StorageError(_))
        ));
    }
}
