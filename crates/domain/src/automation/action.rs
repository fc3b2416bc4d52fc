//! Action — one step of an automation's effect chain.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ValidationError;

/// The closed set of side-effect kinds an automation can chain, each with
/// its own strongly-typed configuration.
///
/// Serialized adjacently as `{"type": …, "config": {…}}` so stored
/// definitions keep the `type`/`config` shape automation authors see.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "config", rename_all = "snake_case")]
pub enum ActionKind {
    SendEmail(EmailConfig),
    CreateTask(TaskConfig),
    UpdateField(UpdateFieldConfig),
    SendNotification(NotificationConfig),
    CreateActivity(ActivityConfig),
    AssignUser(AssignConfig),
    Webhook(WebhookConfig),
}

/// Config for `send_email`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailConfig {
    /// Recipient addresses.
    pub to: Vec<String>,
    pub subject: String,
    #[serde(default)]
    pub body: String,
}

/// Config for `create_task`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskConfig {
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Days from now until the task is due.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_in_days: Option<u32>,
    /// Assignee username; defaults to the entity owner when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
}

/// Config for `update_field`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateFieldConfig {
    /// Field on the triggering entity to overwrite.
    pub field: String,
    pub value: Value,
}

/// Config for `send_notification`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationConfig {
    pub message: String,
    /// Usernames to notify; an empty list means the entity owner.
    #[serde(default)]
    pub recipients: Vec<String>,
}

/// Config for `create_activity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityConfig {
    pub subject: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_type: Option<String>,
    #[serde(default)]
    pub notes: String,
}

/// Config for `assign_user`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignConfig {
    /// Username the entity is reassigned to.
    pub user: String,
}

/// Config for `webhook`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookConfig {
    pub url: String,
    #[serde(default = "WebhookConfig::default_method")]
    pub method: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
    /// Body override; the trigger payload is sent when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

impl WebhookConfig {
    fn default_method() -> String {
        "POST".to_string()
    }
}

impl ActionKind {
    /// The wire names of every kind in the closed set, in declaration order.
    pub const TYPE_NAMES: [&'static str; 7] = [
        "send_email",
        "create_task",
        "update_field",
        "send_notification",
        "create_activity",
        "assign_user",
        "webhook",
    ];

    /// The wire name of this kind, e.g. `"send_email"`.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::SendEmail(_) => "send_email",
            Self::CreateTask(_) => "create_task",
            Self::UpdateField(_) => "update_field",
            Self::SendNotification(_) => "send_notification",
            Self::CreateActivity(_) => "create_activity",
            Self::AssignUser(_) => "assign_user",
            Self::Webhook(_) => "webhook",
        }
    }
}

/// One step in an automation's ordered effect chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    #[serde(flatten)]
    pub kind: ActionKind,
    /// Minutes to wait after this action completes before the next one
    /// in the chain dispatches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay: Option<u32>,
}

impl Action {
    /// Build an action with no delay.
    #[must_use]
    pub fn new(kind: ActionKind) -> Self {
        Self { kind, delay: None }
    }

    /// Attach a post-completion delay, in minutes.
    #[must_use]
    pub fn with_delay(mut self, minutes: u32) -> Self {
        self.delay = Some(minutes);
        self
    }

    /// Check that this action's config makes sense for its kind.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Action`] naming the kind and reason.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let fail = |reason: &'static str| {
            Err(ValidationError::Action {
                kind: self.kind.type_name(),
                reason,
            })
        };
        match &self.kind {
            ActionKind::SendEmail(config) => {
                if config.to.is_empty() || config.to.iter().any(String::is_empty) {
                    return fail("recipient list is empty");
                }
                if config.subject.is_empty() {
                    return fail("subject is empty");
                }
            }
            ActionKind::CreateTask(config) => {
                if config.title.is_empty() {
                    return fail("title is empty");
                }
            }
            ActionKind::UpdateField(config) => {
                if config.field.is_empty() {
                    return fail("field name is empty");
                }
            }
            ActionKind::SendNotification(config) => {
                if config.message.is_empty() {
                    return fail("message is empty");
                }
            }
            ActionKind::CreateActivity(config) => {
                if config.subject.is_empty() {
                    return fail("subject is empty");
                }
            }
            ActionKind::AssignUser(config) => {
                if config.user.is_empty() {
                    return fail("user is empty");
                }
            }
            ActionKind::Webhook(config) => {
                if config.url.is_empty() {
                    return fail("url is empty");
                }
            }
        }
        Ok(())
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.delay {
            Some(minutes) => write!(f, "{} (+{minutes}m)", self.kind.type_name()),
            None => f.write_str(self.kind.type_name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn update_stage() -> Action {
        Action::new(ActionKind::UpdateField(UpdateFieldConfig {
            field: "stage".to_string(),
            value: json!("engaging"),
        }))
    }

    #[test]
    fn should_serialize_with_type_and_config_shape() {
        let json = serde_json::to_value(update_stage()).unwrap();
        assert_eq!(json["type"], json!("update_field"));
        assert_eq!(json["config"]["field"], json!("stage"));
        assert_eq!(json["config"]["value"], json!("engaging"));
        assert!(json.get("delay").is_none());
    }

    #[test]
    fn should_deserialize_from_type_and_config_shape() {
        let action: Action = serde_json::from_value(json!({
            "type": "create_activity",
            "config": {"subject": "Schedule discovery meeting"},
            "delay": 30
        }))
        .unwrap();
        assert_eq!(action.delay, Some(30));
        assert!(
            matches!(action.kind, ActionKind::CreateActivity(config) if config.subject == "Schedule discovery meeting")
        );
    }

    #[test]
    fn should_reject_unknown_type_when_deserializing() {
        let result: Result<Action, _> = serde_json::from_value(json!({
            "type": "launch_rocket",
            "config": {}
        }));
        assert!(result.is_err());
    }

    #[test]
    fn should_roundtrip_every_kind_through_serde_json() {
        let actions = vec![
            Action::new(ActionKind::SendEmail(EmailConfig {
                to: vec!["rep@example.com".to_string()],
                subject: "Deal at risk".to_string(),
                body: "Please review.".to_string(),
            })),
            Action::new(ActionKind::CreateTask(TaskConfig {
                title: "Follow up".to_string(),
                description: String::new(),
                due_in_days: Some(2),
                assignee: None,
            }))
            .with_delay(15),
            update_stage(),
            Action::new(ActionKind::SendNotification(NotificationConfig {
                message: "High-value deal needs review".to_string(),
                recipients: vec!["manager".to_string()],
            })),
            Action::new(ActionKind::CreateActivity(ActivityConfig {
                subject: "Discovery call".to_string(),
                activity_type: Some("meeting".to_string()),
                notes: String::new(),
            })),
            Action::new(ActionKind::AssignUser(AssignConfig {
                user: "alice".to_string(),
            })),
            Action::new(ActionKind::Webhook(WebhookConfig {
                url: "https://hooks.example.com/deal".to_string(),
                method: "POST".to_string(),
                headers: BTreeMap::new(),
                payload: None,
            })),
        ];

        for action in &actions {
            let text = serde_json::to_string(action).unwrap();
            let parsed: Action = serde_json::from_str(&text).unwrap();
            assert_eq!(&parsed, action);
        }
    }

    #[test]
    fn should_default_webhook_method_to_post() {
        let action: Action = serde_json::from_value(json!({
            "type": "webhook",
            "config": {"url": "https://hooks.example.com/deal"}
        }))
        .unwrap();
        assert!(matches!(action.kind, ActionKind::Webhook(config) if config.method == "POST"));
    }

    #[test]
    fn should_expose_type_names_in_declaration_order() {
        assert_eq!(update_stage().kind.type_name(), "update_field");
        assert!(ActionKind::TYPE_NAMES.contains(&"webhook"));
        assert_eq!(ActionKind::TYPE_NAMES.len(), 7);
    }

    #[test]
    fn should_validate_config_sanity_per_kind() {
        assert!(update_stage().validate().is_ok());

        let no_recipients = Action::new(ActionKind::SendEmail(EmailConfig {
            to: vec![],
            subject: "Hello".to_string(),
            body: String::new(),
        }));
        assert!(matches!(
            no_recipients.validate(),
            Err(ValidationError::Action {
                kind: "send_email",
                ..
            })
        ));

        let empty_url = Action::new(ActionKind::Webhook(WebhookConfig {
            url: String::new(),
            method: "POST".to_string(),
            headers: BTreeMap::new(),
            payload: None,
        }));
        assert!(matches!(
            empty_url.validate(),
            Err(ValidationError::Action { kind: "webhook", .. })
        ));
    }

    #[test]
    fn should_display_kind_and_delay() {
        assert_eq!(update_stage().to_string(), "update_field");
        assert_eq!(update_stage().with_delay(10).to_string(), "update_field (+10m)");
    }
}
