//! Automation — trigger → condition → action rules.
//!
//! Automations let a tenant react to entity changes (a deal advancing, a
//! field updating, a scheduled tick) without manual intervention. Each
//! automation declares the [`TriggerType`] it listens to, an ordered list of
//! [`Condition`]s that must match the trigger payload, and an ordered chain
//! of [`Action`]s to execute.

mod action;
mod condition;
mod trigger;

pub use action::{
    Action, ActionKind, ActivityConfig, AssignConfig, EmailConfig, NotificationConfig,
    TaskConfig, UpdateFieldConfig, WebhookConfig,
};
pub use condition::{Condition, ConditionOperator, LogicalOperator, evaluate_all};
pub use trigger::TriggerType;

use serde::{Deserialize, Serialize};

use crate::error::{RepFlowError, ValidationError};
use crate::id::{AutomationId, OrganizationId, UserId};
use crate::time::Timestamp;

/// Optional branch/role restriction on where an automation applies.
///
/// Scoping only filters which automations are *candidates* for a context;
/// the condition evaluator never reads it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scope {
    #[serde(default)]
    pub branch_specific: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_name: Option<String>,
    #[serde(default)]
    pub role_specific: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_name: Option<String>,
}

/// A stored rule: conditions + ordered actions + scope + active flag.
///
/// Immutable during a single execution — the engine reads a snapshot
/// fetched once per run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Automation {
    pub id: AutomationId,
    pub organization_id: OrganizationId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub trigger_type: TriggerType,
    /// Evaluated in declaration order; see
    /// [`evaluate_all`](condition::evaluate_all) for the combination rule.
    #[serde(default)]
    pub conditions: Vec<Condition>,
    /// Execution order. Must be preserved.
    pub actions: Vec<Action>,
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<Scope>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<UserId>,
    pub created_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

impl Automation {
    /// Create a builder for constructing an [`Automation`].
    #[must_use]
    pub fn builder() -> AutomationBuilder {
        AutomationBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`RepFlowError::Validation`] when:
    /// - `name` is empty ([`ValidationError::EmptyName`])
    /// - `actions` is empty ([`ValidationError::NoActions`])
    /// - any action's config fails its kind's sanity check
    ///   ([`ValidationError::Action`])
    pub fn validate(&self) -> Result<(), RepFlowError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if self.actions.is_empty() {
            return Err(ValidationError::NoActions.into());
        }
        for action in &self.actions {
            action.validate()?;
        }
        Ok(())
    }

    /// Whether this automation is a candidate for the given branch/role
    /// context.
    ///
    /// Each filter is independently permissive: an omitted filter applies no
    /// restriction for its axis, and a provided one admits automations that
    /// are either not specific on that axis or scoped to the given name.
    #[must_use]
    pub fn in_scope(&self, branch: Option<&str>, role: Option<&str>) -> bool {
        let Some(scope) = &self.scope else {
            return true;
        };
        if let Some(branch) = branch {
            let matches =
                !scope.branch_specific || scope.branch_name.as_deref() == Some(branch);
            if !matches {
                return false;
            }
        }
        if let Some(role) = role {
            let matches = !scope.role_specific || scope.role_name.as_deref() == Some(role);
            if !matches {
                return false;
            }
        }
        true
    }
}

/// Step-by-step builder for [`Automation`].
#[derive(Debug, Default)]
pub struct AutomationBuilder {
    id: Option<AutomationId>,
    organization_id: Option<OrganizationId>,
    name: Option<String>,
    description: Option<String>,
    trigger_type: Option<TriggerType>,
    conditions: Vec<Condition>,
    actions: Vec<Action>,
    is_active: Option<bool>,
    scope: Option<Scope>,
    created_by: Option<UserId>,
}

impl AutomationBuilder {
    #[must_use]
    pub fn id(mut self, id: AutomationId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn organization_id(mut self, organization_id: OrganizationId) -> Self {
        self.organization_id = Some(organization_id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn trigger_type(mut self, trigger_type: TriggerType) -> Self {
        self.trigger_type = Some(trigger_type);
        self
    }

    #[must_use]
    pub fn condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    #[must_use]
    pub fn action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    #[must_use]
    pub fn is_active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    #[must_use]
    pub fn scope(mut self, scope: Scope) -> Self {
        self.scope = Some(scope);
        self
    }

    #[must_use]
    pub fn created_by(mut self, created_by: UserId) -> Self {
        self.created_by = Some(created_by);
        self
    }

    /// Consume the builder, validate, and return an [`Automation`].
    ///
    /// # Errors
    ///
    /// Returns [`RepFlowError::Validation`] if required fields are missing
    /// or an action config is invalid.
    pub fn build(self) -> Result<Automation, RepFlowError> {
        let automation = Automation {
            id: self.id.unwrap_or_default(),
            organization_id: self.organization_id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            description: self.description,
            trigger_type: self.trigger_type.unwrap_or_default(),
            conditions: self.conditions,
            actions: self.actions,
            is_active: self.is_active.unwrap_or(true),
            scope: self.scope,
            created_by: self.created_by,
            created_at: crate::time::now(),
            updated_at: None,
        };
        automation.validate()?;
        Ok(automation)
    }
}
