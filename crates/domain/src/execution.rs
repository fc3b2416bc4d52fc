//! Execution — the immutable record of one automation run.
//!
//! The record is the durable, inspectable trace of what happened during a
//! run, including failures. Its status moves one way only:
//! `pending → running → {completed | failed}`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::id::{AutomationId, ExecutionId};
use crate::time::{Timestamp, now};

/// Lifecycle state of an [`Execution`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStatus {
    /// Constructed, no action has begun.
    Pending,
    /// Entered immediately before the first action dispatches.
    Running,
    /// Every action in the chain completed without error.
    Completed,
    /// An action raised, or the run was cancelled. No subsequent actions
    /// were attempted.
    Failed,
}

impl ExecutionStatus {
    /// Whether this status ends the run.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

/// The audited record of one automation run against one trigger event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Execution {
    pub id: ExecutionId,
    /// The automation that was run.
    pub workflow_id: AutomationId,
    /// Business object type that triggered the run, e.g. `"opportunity"`.
    pub entity_type: String,
    pub entity_id: String,
    pub status: ExecutionStatus,
    pub started_at: Timestamp,
    /// Set if and only if `status` is terminal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<Timestamp>,
    /// Set only on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    /// The trigger payload snapshot this run evaluated.
    pub execution_data: Value,
}

impl Execution {
    /// Construct a fresh record in `pending` for the given run.
    #[must_use]
    pub fn begin(
        workflow_id: AutomationId,
        entity_type: impl Into<String>,
        entity_id: impl Into<String>,
        execution_data: Value,
    ) -> Self {
        Self {
            id: ExecutionId::new(),
            workflow_id,
            entity_type: entity_type.into(),
            entity_id: entity_id.into(),
            status: ExecutionStatus::Pending,
            started_at: now(),
            completed_at: None,
            error_message: None,
            execution_data,
        }
    }

    /// Transition `pending → running`. A no-op from any other state.
    pub fn mark_running(&mut self) {
        if self.status == ExecutionStatus::Pending {
            self.status = ExecutionStatus::Running;
        }
    }

    /// Transition `running → completed` and stamp `completed_at`.
    ///
    /// Terminal states never reopen; calling this on a terminal record is a
    /// no-op.
    pub fn mark_completed(&mut self) {
        if self.status == ExecutionStatus::Running {
            self.status = ExecutionStatus::Completed;
            self.completed_at = Some(now());
        }
    }

    /// Transition into `failed`, capture the error, stamp `completed_at`.
    ///
    /// Terminal states never reopen; calling this on a terminal record is a
    /// no-op.
    pub fn mark_failed(&mut self, error_message: impl Into<String>) {
        if !self.status.is_terminal() {
            self.status = ExecutionStatus::Failed;
            self.error_message = Some(error_message.into());
            self.completed_at = Some(now());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fresh() -> Execution {
        Execution::begin(
            AutomationId::new(),
            "opportunity",
            "opp-123",
            json!({"stage": "prospecting"}),
        )
    }

    #[test]
    fn should_begin_in_pending_without_completion_data() {
        let execution = fresh();
        assert_eq!(execution.status, ExecutionStatus::Pending);
        assert!(execution.completed_at.is_none());
        assert!(execution.error_message.is_none());
        assert_eq!(execution.entity_type, "opportunity");
        assert_eq!(execution.execution_data["stage"], json!("prospecting"));
    }

    #[test]
    fn should_generate_unique_ids_per_run() {
        assert_ne!(fresh().id, fresh().id);
    }

    #[test]
    fn should_walk_the_happy_path_state_machine() {
        let mut execution = fresh();
        execution.mark_running();
        assert_eq!(execution.status, ExecutionStatus::Running);
        assert!(execution.completed_at.is_none());

        execution.mark_completed();
        assert_eq!(execution.status, ExecutionStatus::Completed);
        assert!(execution.completed_at.is_some());
        assert!(execution.error_message.is_none());
    }

    #[test]
    fn should_capture_error_and_completion_time_on_failure() {
        let mut execution = fresh();
        execution.mark_running();
        execution.mark_failed("webhook: connection refused");
        assert_eq!(execution.status, ExecutionStatus::Failed);
        assert_eq!(
            execution.error_message.as_deref(),
            Some("webhook: connection refused")
        );
        assert!(execution.completed_at.is_some());
    }

    #[test]
    fn should_not_reopen_terminal_states() {
        let mut execution = fresh();
        execution.mark_running();
        execution.mark_completed();

        execution.mark_failed("too late");
        assert_eq!(execution.status, ExecutionStatus::Completed);
        assert!(execution.error_message.is_none());

        let mut failed = fresh();
        failed.mark_running();
        failed.mark_failed("first");
        failed.mark_completed();
        failed.mark_failed("second");
        assert_eq!(failed.status, ExecutionStatus::Failed);
        assert_eq!(failed.error_message.as_deref(), Some("first"));
    }

    #[test]
    fn should_not_complete_straight_from_pending() {
        let mut execution = fresh();
        execution.mark_completed();
        assert_eq!(execution.status, ExecutionStatus::Pending);
        assert!(execution.completed_at.is_none());
    }

    #[test]
    fn should_allow_failing_from_pending() {
        // Cancellation can land before the first action dispatches.
        let mut execution = fresh();
        execution.mark_failed("execution cancelled");
        assert_eq!(execution.status, ExecutionStatus::Failed);
        assert!(execution.completed_at.is_some());
    }

    #[test]
    fn should_roundtrip_through_serde_json() {
        let mut execution = fresh();
        execution.mark_running();
        execution.mark_failed("boom");

        let text = serde_json::to_string(&execution).unwrap();
        let parsed: Execution = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed.id, execution.id);
        assert_eq!(parsed.status, ExecutionStatus::Failed);
        assert_eq!(parsed.error_message, execution.error_message);
    }
}
