//! Side-effect service ports — one per action kind.
//!
//! The engine never performs IO itself. Each action kind delegates to a
//! collaborator the host supplies: a mail sender, a task store, an entity
//! field mutator, a notification channel, an activity log, an assignment
//! store, and an HTTP webhook caller.

use std::future::Future;

use repflow_domain::automation::{
    ActivityConfig, AssignConfig, EmailConfig, NotificationConfig, TaskConfig,
    UpdateFieldConfig, WebhookConfig,
};
use repflow_domain::error::RepFlowError;
use serde_json::Value;

/// Entity context handed to every side-effect call alongside its config.
#[derive(Debug, Clone, Copy)]
pub struct ActionContext<'a> {
    /// Business object type that triggered the run, e.g. `"opportunity"`.
    pub entity_type: &'a str,
    pub entity_id: &'a str,
    /// The trigger payload snapshot for this run.
    pub payload: &'a Value,
}

/// Delivers `send_email` actions.
pub trait EmailSender {
    fn send_email(
        &self,
        config: &EmailConfig,
        ctx: ActionContext<'_>,
    ) -> impl Future<Output = Result<(), RepFlowError>> + Send;
}

/// Delivers `create_task` actions.
pub trait TaskCreator {
    fn create_task(
        &self,
        config: &TaskConfig,
        ctx: ActionContext<'_>,
    ) -> impl Future<Output = Result<(), RepFlowError>> + Send;
}

/// Delivers `update_field` actions — mutates a field on the triggering
/// entity.
pub trait FieldMutator {
    fn update_field(
        &self,
        config: &UpdateFieldConfig,
        ctx: ActionContext<'_>,
    ) -> impl Future<Output = Result<(), RepFlowError>> + Send;
}

/// Delivers `send_notification` actions.
pub trait Notifier {
    fn send_notification(
        &self,
        config: &NotificationConfig,
        ctx: ActionContext<'_>,
    ) -> impl Future<Output = Result<(), RepFlowError>> + Send;
}

/// Delivers `create_activity` actions.
pub trait ActivityLogger {
    fn log_activity(
        &self,
        config: &ActivityConfig,
        ctx: ActionContext<'_>,
    ) -> impl Future<Output = Result<(), RepFlowError>> + Send;
}

/// Delivers `assign_user` actions.
pub trait UserAssigner {
    fn assign_user(
        &self,
        config: &AssignConfig,
        ctx: ActionContext<'_>,
    ) -> impl Future<Output = Result<(), RepFlowError>> + Send;
}

/// Delivers `webhook` actions.
pub trait WebhookCaller {
    fn call_webhook(
        &self,
        config: &WebhookConfig,
        ctx: ActionContext<'_>,
    ) -> impl Future<Output = Result<(), RepFlowError>> + Send;
}
