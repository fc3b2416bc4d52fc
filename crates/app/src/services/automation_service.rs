//! Automation service — use-cases for managing automation definitions.

use repflow_domain::automation::{ActionKind, Automation};
use repflow_domain::error::{NotFoundError, RepFlowError, ValidationError};
use repflow_domain::id::{AutomationId, OrganizationId};
use serde_json::Value;

use crate::ports::AutomationRepository;

/// Application service for automation CRUD operations.
///
/// Definitions are validated on every save so configuration-authoring bugs
/// (unknown action types, empty configs) surface here, loudly, instead of
/// at execution time.
pub struct AutomationService<R> {
    repo: R,
}

impl<R: AutomationRepository> AutomationService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Parse a raw JSON definition into an [`Automation`].
    ///
    /// The action enum is closed, so an unknown `type` string can only show
    /// up at this boundary; it is reported as
    /// [`RepFlowError::UnknownActionType`] naming the offending value rather
    /// than as a generic deserialization failure.
    ///
    /// # Errors
    ///
    /// Returns [`RepFlowError::UnknownActionType`] for an out-of-set action
    /// type, or [`RepFlowError::Validation`] when the definition is
    /// malformed or breaks domain invariants.
    pub fn parse_definition(&self, definition: &Value) -> Result<Automation, RepFlowError> {
        let raw_actions = definition
            .get("actions")
            .and_then(Value::as_array)
            .into_iter()
            .flatten();
        for raw_action in raw_actions {
            if let Some(type_name) = raw_action.get("type").and_then(Value::as_str) {
                if !ActionKind::TYPE_NAMES.contains(&type_name) {
                    return Err(RepFlowError::UnknownActionType {
                        value: type_name.to_string(),
                    });
                }
            }
        }

        let automation: Automation = serde_json::from_value(definition.clone())
            .map_err(|err| ValidationError::Malformed(err.to_string()))?;
        automation.validate()?;
        Ok(automation)
    }

    /// Create a new automation after validating domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`RepFlowError::Validation`] if invariants fail, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self, automation), fields(automation_name = %automation.name))]
    pub async fn create_automation(
        &self,
        automation: Automation,
    ) -> Result<Automation, RepFlowError> {
        automation.validate()?;
        self.repo.create(automation).await
    }

    /// Look up an automation by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`RepFlowError::NotFound`] when no automation with `id`
    /// exists, or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_automation(&self, id: AutomationId) -> Result<Automation, RepFlowError> {
        self.repo.get(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Automation",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// List all automations of an organization.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_automations(
        &self,
        organization_id: OrganizationId,
    ) -> Result<Vec<Automation>, RepFlowError> {
        self.repo.list(organization_id).await
    }

    /// List active automations in scope for a branch/role context.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_active(
        &self,
        organization_id: OrganizationId,
        branch: Option<&str>,
        role: Option<&str>,
    ) -> Result<Vec<Automation>, RepFlowError> {
        self.repo.list_active(organization_id, branch, role).await
    }

    /// Replace an existing automation wholesale.
    ///
    /// # Errors
    ///
    /// Returns [`RepFlowError::Validation`] if invariants fail,
    /// [`RepFlowError::NotFound`] when `id` does not exist, or a storage
    /// error from the repository.
    #[tracing::instrument(skip(self, automation))]
    pub async fn update_automation(
        &self,
        id: AutomationId,
        automation: Automation,
    ) -> Result<Automation, RepFlowError> {
        automation.validate()?;
        self.repo.update(id, automation).await
    }

    /// Delete an automation by id.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_automation(&self, id: AutomationId) -> Result<(), RepFlowError> {
        self.repo.delete(id).await
    }
}
