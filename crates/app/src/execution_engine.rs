//! Execution engine — runs one automation against one trigger event and
//! produces exactly one [`Execution`] record.
//!
//! Guard failures (automation missing, inactive, conditions not met) are
//! returned to the caller before any execution record exists. Once a run
//! starts, action failures are captured *into* the record instead of being
//! raised: the record is the audit trail, including failures. Nothing is
//! retried; resilience belongs to the trigger source re-invoking `execute`.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use repflow_domain::automation::{Automation, evaluate_all};
use repflow_domain::error::{NotFoundError, RepFlowError};
use repflow_domain::execution::Execution;
use repflow_domain::id::{AutomationId, OrganizationId};
use serde_json::Value;

use crate::ports::side_effects::ActionContext;
use crate::ports::{ActionDispatcher, AutomationRepository};

/// Reason recorded when a run is aborted through its cancellation token.
const CANCELLED_MESSAGE: &str = "execution cancelled";

/// Orchestrates one run: guard checks, condition evaluation, sequential
/// action dispatch with per-action delays, and the status state machine.
pub struct ExecutionEngine<R, D> {
    repo: R,
    dispatcher: D,
}

impl<R, D> ExecutionEngine<R, D>
where
    R: AutomationRepository,
    D: ActionDispatcher,
{
    /// Create a new engine.
    pub fn new(repo: R, dispatcher: D) -> Self {
        Self { repo, dispatcher }
    }

    /// Run one automation against one trigger event.
    ///
    /// Returns the execution record — `completed` or `failed` — once the
    /// chain stops. Action failures do **not** surface as `Err`; they are
    /// captured in the record's `status` and `error_message`.
    ///
    /// # Errors
    ///
    /// - [`RepFlowError::NotFound`] — no automation with `automation_id`
    /// - [`RepFlowError::Inactive`] — the automation is switched off
    /// - [`RepFlowError::ConditionsNotMet`] — the payload did not match
    /// - [`RepFlowError::Storage`] — the repository failed
    ///
    /// The first three are "nothing to do" guards; no execution record is
    /// produced for them.
    pub async fn execute(
        &self,
        automation_id: AutomationId,
        entity_type: &str,
        entity_id: &str,
        payload: Value,
    ) -> Result<Execution, RepFlowError> {
        self.execute_with_cancellation(
            automation_id,
            entity_type,
            entity_id,
            payload,
            CancellationToken::new(),
        )
        .await
    }

    /// Like [`execute`](Self::execute), but abortable.
    ///
    /// Cancelling the token while the chain is between actions (or waiting
    /// out a delay) finalizes the record as `failed` with a cancellation
    /// reason; an action already in flight completes first.
    #[tracing::instrument(skip(self, payload, cancel), fields(%automation_id, entity_id))]
    pub async fn execute_with_cancellation(
        &self,
        automation_id: AutomationId,
        entity_type: &str,
        entity_id: &str,
        payload: Value,
        cancel: CancellationToken,
    ) -> Result<Execution, RepFlowError> {
        let automation = self.repo.get(automation_id).await?.ok_or_else(|| {
            RepFlowError::from(NotFoundError {
                entity: "Automation",
                id: automation_id.to_string(),
            })
        })?;

        if !automation.is_active {
            return Err(RepFlowError::Inactive { id: automation_id });
        }
        if !evaluate_all(&automation.conditions, &payload) {
            return Err(RepFlowError::ConditionsNotMet { id: automation_id });
        }

        Ok(self
            .run(&automation, entity_type, entity_id, &payload, &cancel)
            .await)
    }

    /// Evaluate every active, in-scope automation of an organization against
    /// one trigger event and execute the matches, in repository order.
    ///
    /// Condition misses are skipped silently; a matched automation whose
    /// actions fail contributes a `failed` execution to the result rather
    /// than aborting the sweep.
    ///
    /// # Errors
    ///
    /// Returns a storage error if listing candidates fails.
    #[tracing::instrument(skip(self, payload), fields(%organization_id, entity_id))]
    pub async fn run_matching(
        &self,
        organization_id: OrganizationId,
        entity_type: &str,
        entity_id: &str,
        payload: &Value,
        branch: Option<&str>,
        role: Option<&str>,
    ) -> Result<Vec<Execution>, RepFlowError> {
        let candidates = self.repo.list_active(organization_id, branch, role).await?;
        let mut executions = Vec::new();

        for automation in &candidates {
            if !evaluate_all(&automation.conditions, payload) {
                continue;
            }
            let execution = self
                .run(
                    automation,
                    entity_type,
                    entity_id,
                    payload,
                    &CancellationToken::new(),
                )
                .await;
            executions.push(execution);
        }

        Ok(executions)
    }

    /// Run the action chain for an automation whose guards already passed.
    ///
    /// Always finalizes the record: `completed` after the last action, or
    /// `failed` the moment a dispatch errors or the token cancels.
    async fn run(
        &self,
        automation: &Automation,
        entity_type: &str,
        entity_id: &str,
        payload: &Value,
        cancel: &CancellationToken,
    ) -> Execution {
        let mut execution =
            Execution::begin(automation.id, entity_type, entity_id, payload.clone());
        execution.mark_running();
        tracing::info!(
            execution_id = %execution.id,
            automation = %automation.name,
            actions = automation.actions.len(),
            "execution started"
        );

        let ctx = ActionContext {
            entity_type,
            entity_id,
            payload,
        };
        let last = automation.actions.len().saturating_sub(1);

        for (index, action) in automation.actions.iter().enumerate() {
            if cancel.is_cancelled() {
                execution.mark_failed(CANCELLED_MESSAGE);
                return execution;
            }

            if let Err(err) = self.dispatcher.dispatch(action, ctx).await {
                tracing::warn!(
                    execution_id = %execution.id,
                    action = %action,
                    error = %err,
                    "action failed, stopping chain"
                );
                execution.mark_failed(err.to_string());
                return execution;
            }

            // The delay applies after this action completes and before the
            // next one dispatches; a delay on the last action is moot.
            if let Some(minutes) = action.delay {
                if index < last && minutes > 0 {
                    let wait = Duration::from_secs(u64::from(minutes) * 60);
                    tokio::select! {
                        () = cancel.cancelled() => {
                            execution.mark_failed(CANCELLED_MESSAGE);
                            return execution;
                        }
                        () = tokio::time::sleep(wait) => {}
                    }
                }
            }
        }

        execution.mark_completed();
        tracing::info!(execution_id = %execution.id, "execution completed");
        execution
    }
}
