//! Recording side-effect services — observe what an execution dispatched.
//!
//! One `RecordingServices` value implements all seven side-effect ports.
//! Every delivered action is appended to an in-memory log that hosts and
//! tests can inspect after a run.

use std::sync::{Arc, Mutex, PoisonError};

use repflow_app::ports::side_effects::{
    ActionContext, ActivityLogger, EmailSender, FieldMutator, Notifier, TaskCreator,
    UserAssigner, WebhookCaller,
};
use repflow_domain::automation::{
    ActivityConfig, AssignConfig, EmailConfig, NotificationConfig, TaskConfig,
    UpdateFieldConfig, WebhookConfig,
};
use repflow_domain::error::RepFlowError;

/// One observed side effect, in dispatch order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedEffect {
    Email {
        to: Vec<String>,
        subject: String,
    },
    Task {
        title: String,
        entity_id: String,
    },
    FieldUpdate {
        entity_type: String,
        entity_id: String,
        field: String,
        value: String,
    },
    Notification {
        message: String,
    },
    Activity {
        subject: String,
        entity_id: String,
    },
    Assignment {
        user: String,
        entity_id: String,
    },
    Webhook {
        method: String,
        url: String,
    },
}

/// In-memory implementation of every side-effect port.
///
/// Clones share the same log, so a host can hand clones to a dispatcher
/// and keep one around to inspect afterwards.
#[derive(Clone, Default)]
pub struct RecordingServices {
    effects: Arc<Mutex<Vec<RecordedEffect>>>,
}

impl RecordingServices {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the effects recorded so far, in dispatch order.
    #[must_use]
    pub fn effects(&self) -> Vec<RecordedEffect> {
        self.locked().clone()
    }

    /// Number of effects recorded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.locked().len()
    }

    /// Whether nothing has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locked().is_empty()
    }

    fn locked(&self) -> std::sync::MutexGuard<'_, Vec<RecordedEffect>> {
        self.effects.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, effect: RecordedEffect) {
        self.locked().push(effect);
    }
}

impl EmailSender for RecordingServices {
    async fn send_email(
        &self,
        config: &EmailConfig,
        _ctx: ActionContext<'_>,
    ) -> Result<(), RepFlowError> {
        self.record(RecordedEffect::Email {
            to: config.to.clone(),
            subject: config.subject.clone(),
        });
        Ok(())
    }
}

impl TaskCreator for RecordingServices {
    async fn create_task(
        &self,
        config: &TaskConfig,
        ctx: ActionContext<'_>,
    ) -> Result<(), RepFlowError> {
        self.record(RecordedEffect::Task {
            title: config.title.clone(),
            entity_id: ctx.entity_id.to_string(),
        });
        Ok(())
    }
}

impl FieldMutator for RecordingServices {
    async fn update_field(
        &self,
        config: &UpdateFieldConfig,
        ctx: ActionContext<'_>,
    ) -> Result<(), RepFlowError> {
        self.record(RecordedEffect::FieldUpdate {
            entity_type: ctx.entity_type.to_string(),
            entity_id: ctx.entity_id.to_string(),
            field: config.field.clone(),
            value: config.value.to_string(),
        });
        Ok(())
    }
}

impl Notifier for RecordingServices {
    async fn send_notification(
        &self,
        config: &NotificationConfig,
        _ctx: ActionContext<'_>,
    ) -> Result<(), RepFlowError> {
        self.record(RecordedEffect::Notification {
            message: config.message.clone(),
        });
        Ok(())
    }
}

impl ActivityLogger for RecordingServices {
    async fn log_activity(
        &self,
        config: &ActivityConfig,
        ctx: ActionContext<'_>,
    ) -> Result<(), RepFlowError> {
        self.record(RecordedEffect::Activity {
            subject: config.subject.clone(),
            entity_id: ctx.entity_id.to_string(),
        });
        Ok(())
    }
}

impl UserAssigner for RecordingServices {
    async fn assign_user(
        &self,
        config: &AssignConfig,
        ctx: ActionContext<'_>,
    ) -> Result<(), RepFlowError> {
        self.record(RecordedEffect::Assignment {
            user: config.user.clone(),
            entity_id: ctx.entity_id.to_string(),
        });
        Ok(())
    }
}

impl WebhookCaller for RecordingServices {
    async fn call_webhook(
        &self,
        config: &WebhookConfig,
        _ctx: ActionContext<'_>,
    ) -> Result<(), RepFlowError> {
        self.record(RecordedEffect::Webhook {
            method: config.method.clone(),
            url: config.url.clone(),
        });
        Ok(())
    }
}
