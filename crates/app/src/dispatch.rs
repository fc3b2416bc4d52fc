//! Production [`ActionDispatcher`] — pattern-matches the closed action set
//! and delegates each kind to its side-effect port.

use repflow_domain::automation::{Action, ActionKind};
use repflow_domain::error::RepFlowError;

use crate::ports::side_effects::{
    ActionContext, ActivityLogger, EmailSender, FieldMutator, Notifier, TaskCreator,
    UserAssigner, WebhookCaller,
};
use crate::ports::ActionDispatcher;

/// Dispatcher wired with one collaborator service per action kind.
///
/// Each handler re-checks its config slice before touching the collaborator
/// so a misconfigured automation fails with a descriptive message instead of
/// surfacing a missing-field error from deep inside a third-party call.
pub struct ServiceDispatcher<E, T, F, N, A, U, W> {
    email: E,
    tasks: T,
    fields: F,
    notifier: N,
    activities: A,
    assigner: U,
    webhooks: W,
}

impl<E, T, F, N, A, U, W> ServiceDispatcher<E, T, F, N, A, U, W> {
    /// Wire a dispatcher from the seven collaborator services.
    pub fn new(email: E, tasks: T, fields: F, notifier: N, activities: A, assigner: U, webhooks: W) -> Self {
        Self {
            email,
            tasks,
            fields,
            notifier,
            activities,
            assigner,
            webhooks,
        }
    }
}

impl<E, T, F, N, A, U, W> ActionDispatcher for ServiceDispatcher<E, T, F, N, A, U, W>
where
    E: EmailSender + Sync,
    T: TaskCreator + Sync,
    F: FieldMutator + Sync,
    N: Notifier + Sync,
    A: ActivityLogger + Sync,
    U: UserAssigner + Sync,
    W: WebhookCaller + Sync,
{
    async fn dispatch(&self, action: &Action, ctx: ActionContext<'_>) -> Result<(), RepFlowError> {
        action.validate()?;
        tracing::debug!(action = %action, entity_id = ctx.entity_id, "dispatching action");

        match &action.kind {
            ActionKind::SendEmail(config) => self.email.send_email(config, ctx).await,
            ActionKind::CreateTask(config) => self.tasks.create_task(config, ctx).await,
            ActionKind::UpdateField(config) => self.fields.update_field(config, ctx).await,
            ActionKind::SendNotification(config) => {
                self.notifier.send_notification(config, ctx).await
            }
            ActionKind::CreateActivity(config) => self.activities.log_activity(config, ctx).await,
            ActionKind::AssignUser(config) => self.assigner.assign_user(config, ctx).await,
            ActionKind::Webhook(config) => self.webhooks.call_webhook(config, ctx).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use repflow_domain::automation::{
        ActivityConfig, AssignConfig, EmailConfig, NotificationConfig, TaskConfig,
        UpdateFieldConfig, WebhookConfig,
    };
    use repflow_domain::error::{ActionError, ValidationError};
    use serde_json::json;
    use std::sync::Mutex;

    /// Records which side-effect service was hit, in order.
    #[derive(Default)]
    struct SpyServices {
        calls: Mutex<Vec<String>>,
        fail_webhooks: bool,
    }

    impl SpyServices {
        fn record(&self, call: impl Into<String>) {
            self.calls.lock().unwrap().push(call.into());
        }
    }

    impl EmailSender for &SpyServices {
        async fn send_email(
            &self,
            config: &EmailConfig,
            _ctx: ActionContext<'_>,
        ) -> Result<(), RepFlowError> {
            self.record(format!("email:{}", config.subject));
            Ok(())
        }
    }

    impl TaskCreator for &SpyServices {
        async fn create_task(
            &self,
            config: &TaskConfig,
            _ctx: ActionContext<'_>,
        ) -> Result<(), RepFlowError> {
            self.record(format!("task:{}", config.title));
            Ok(())
        }
    }

    impl FieldMutator for &SpyServices {
        async fn update_field(
            &self,
            config: &UpdateFieldConfig,
            ctx: ActionContext<'_>,
        ) -> Result<(), RepFlowError> {
            self.record(format!("field:{}:{}:{}", ctx.entity_id, config.field, config.value));
            Ok(())
        }
    }

    impl Notifier for &SpyServices {
        async fn send_notification(
            &self,
            config: &NotificationConfig,
            _ctx: ActionContext<'_>,
        ) -> Result<(), RepFlowError> {
            self.record(format!("notify:{}", config.message));
            Ok(())
        }
    }

    impl ActivityLogger for &SpyServices {
        async fn log_activity(
            &self,
            config: &ActivityConfig,
            _ctx: ActionContext<'_>,
        ) -> Result<(), RepFlowError> {
            self.record(format!("activity:{}", config.subject));
            Ok(())
        }
    }

    impl UserAssigner for &SpyServices {
        async fn assign_user(
            &self,
            config: &AssignConfig,
            _ctx: ActionContext<'_>,
        ) -> Result<(), RepFlowError> {
            self.record(format!("assign:{}", config.user));
            Ok(())
        }
    }

    impl WebhookCaller for &SpyServices {
        async fn call_webhook(
            &self,
            config: &WebhookConfig,
            _ctx: ActionContext<'_>,
        ) -> Result<(), RepFlowError> {
            if self.fail_webhooks {
                return Err(ActionError::new("webhook", "connection refused").into());
            }
            self.record(format!("webhook:{}", config.url));
            Ok(())
        }
    }

    fn dispatcher(
        services: &SpyServices,
    ) -> ServiceDispatcher<&SpyServices, &SpyServices, &SpyServices, &SpyServices, &SpyServices, &SpyServices, &SpyServices>
    {
        ServiceDispatcher::new(
            services, services, services, services, services, services, services,
        )
    }

    fn ctx<'a>(payload: &'a serde_json::Value) -> ActionContext<'a> {
        ActionContext {
            entity_type: "opportunity",
            entity_id: "opp-123",
            payload,
        }
    }

    #[tokio::test]
    async fn should_route_each_kind_to_its_own_service() {
        let services = SpyServices::default();
        let dispatcher = dispatcher(&services);
        let payload = json!({"stage": "prospecting"});

        let actions = [
            Action::new(ActionKind::UpdateField(UpdateFieldConfig {
                field: "stage".to_string(),
                value: json!("engaging"),
            })),
            Action::new(ActionKind::CreateActivity(ActivityConfig {
                subject: "Schedule discovery meeting".to_string(),
                activity_type: None,
                notes: String::new(),
            })),
            Action::new(ActionKind::AssignUser(AssignConfig {
                user: "alice".to_string(),
            })),
        ];
        for action in &actions {
            dispatcher.dispatch(action, ctx(&payload)).await.unwrap();
        }

        let calls = services.calls.lock().unwrap();
        assert_eq!(
            *calls,
            vec![
                "field:opp-123:stage:\"engaging\"",
                "activity:Schedule discovery meeting",
                "assign:alice",
            ]
        );
    }

    #[tokio::test]
    async fn should_reject_invalid_config_before_touching_services() {
        let services = SpyServices::default();
        let dispatcher = dispatcher(&services);
        let payload = json!({});

        let action = Action::new(ActionKind::SendEmail(EmailConfig {
            to: vec![],
            subject: "no one to send to".to_string(),
            body: String::new(),
        }));
        let err = dispatcher.dispatch(&action, ctx(&payload)).await.unwrap_err();
        assert!(matches!(
            err,
            RepFlowError::Validation(ValidationError::Action {
                kind: "send_email",
                ..
            })
        ));
        assert!(services.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_propagate_service_errors_unchanged() {
        let services = SpyServices {
            fail_webhooks: true,
            ..SpyServices::default()
        };
        let dispatcher = dispatcher(&services);
        let payload = json!({});

        let action = Action::new(ActionKind::Webhook(WebhookConfig {
            url: "https://hooks.example.com/deal".to_string(),
            method: "POST".to_string(),
            headers: std::collections::BTreeMap::new(),
            payload: None,
        }));
        let err = dispatcher.dispatch(&action, ctx(&payload)).await.unwrap_err();
        assert!(err.to_string().contains("connection refused"));
    }
}
