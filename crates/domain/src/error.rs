//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`RepFlowError`] via `#[from]`. No `String`-only variants: every error
//! carries enough structure for the caller to branch on.

use crate::id::AutomationId;

/// Top-level error type shared by the domain, application, and adapters.
#[derive(Debug, thiserror::Error)]
pub enum RepFlowError {
    /// A domain invariant failed during construction or save.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A referenced record does not exist.
    #[error("{0}")]
    NotFound(#[from] NotFoundError),

    /// The automation exists but is switched off. Nothing to do.
    #[error("automation {id} is inactive")]
    Inactive { id: AutomationId },

    /// The trigger payload did not satisfy the automation's conditions.
    /// Nothing to do.
    #[error("conditions not met for automation {id}")]
    ConditionsNotMet { id: AutomationId },

    /// A raw definition referenced an action type outside the closed set.
    #[error("unknown action type `{value}`")]
    UnknownActionType { value: String },

    /// An action handler failed while executing.
    #[error("action failed: {0}")]
    Action(#[from] ActionError),

    /// The persistence adapter failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl RepFlowError {
    /// Whether this error means "nothing to do" rather than a fault.
    ///
    /// Inactive automations and unmatched conditions are expected outcomes
    /// of a trigger sweep, not system failures.
    #[must_use]
    pub fn is_no_op(&self) -> bool {
        matches!(self, Self::Inactive { .. } | Self::ConditionsNotMet { .. })
    }
}

/// A domain invariant violation.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("automation must declare at least one action")]
    NoActions,

    /// An action's typed config failed its own sanity check.
    #[error("invalid `{kind}` config: {reason}")]
    Action {
        kind: &'static str,
        reason: &'static str,
    },

    /// A raw JSON definition could not be deserialized.
    #[error("malformed definition: {0}")]
    Malformed(String),
}

/// A referenced record does not exist.
#[derive(Debug, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    /// Record type, e.g. `"Automation"`.
    pub entity: &'static str,
    /// The identifier that failed to resolve.
    pub id: String,
}

/// An action handler raised while executing its side effect.
#[derive(Debug, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ActionError {
    /// The action kind that failed, e.g. `"send_email"`.
    pub kind: &'static str,
    /// Human-readable description from the handler or collaborator.
    pub message: String,
}

impl ActionError {
    /// Build an action error for the given kind.
    #[must_use]
    pub fn new(kind: &'static str, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// A persistence adapter failure.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct StorageError {
    pub message: String,
}

impl StorageError {
    /// Build a storage error with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_convert_validation_error_via_from() {
        let err: RepFlowError = ValidationError::EmptyName.into();
        assert!(matches!(
            err,
            RepFlowError::Validation(ValidationError::EmptyName)
        ));
    }

    #[test]
    fn should_render_not_found_with_entity_and_id() {
        let id = AutomationId::new();
        let err = NotFoundError {
            entity: "Automation",
            id: id.to_string(),
        };
        let text = err.to_string();
        assert!(text.starts_with("Automation "));
        assert!(text.ends_with("not found"));
    }

    #[test]
    fn should_classify_guard_errors_as_no_op() {
        let id = AutomationId::new();
        assert!(RepFlowError::Inactive { id }.is_no_op());
        assert!(RepFlowError::ConditionsNotMet { id }.is_no_op());
        assert!(
            !RepFlowError::Action(ActionError::new("webhook", "connection refused")).is_no_op()
        );
    }

    #[test]
    fn should_name_offending_value_in_unknown_action_type() {
        let err = RepFlowError::UnknownActionType {
            value: "launch_rocket".to_string(),
        };
        assert!(err.to_string().contains("launch_rocket"));
    }
}
