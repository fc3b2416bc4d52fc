//! Automation repository port — persistence for automation definitions.

use std::future::Future;

use repflow_domain::automation::Automation;
use repflow_domain::error::RepFlowError;
use repflow_domain::id::{AutomationId, OrganizationId};

/// Repository for persisting and querying [`Automation`]s.
///
/// Implementations must support concurrent reads and writes; the engine
/// holds no shared mutable state across runs beyond this port.
pub trait AutomationRepository {
    /// List every automation belonging to an organization.
    fn list(
        &self,
        organization_id: OrganizationId,
    ) -> impl Future<Output = Result<Vec<Automation>, RepFlowError>> + Send;

    /// List active automations in scope for the given branch/role context.
    ///
    /// Filters to `is_active` and, independently per provided filter,
    /// admits automations that are either not specific on that axis or
    /// scoped to the given name. An omitted filter applies no restriction.
    fn list_active(
        &self,
        organization_id: OrganizationId,
        branch: Option<&str>,
        role: Option<&str>,
    ) -> impl Future<Output = Result<Vec<Automation>, RepFlowError>> + Send;

    /// Get an automation by its unique identifier.
    fn get(
        &self,
        id: AutomationId,
    ) -> impl Future<Output = Result<Option<Automation>, RepFlowError>> + Send;

    /// Create a new automation in storage, assigning timestamps.
    fn create(
        &self,
        automation: Automation,
    ) -> impl Future<Output = Result<Automation, RepFlowError>> + Send;

    /// Replace an existing automation wholesale and bump `updated_at`.
    ///
    /// Fails with [`RepFlowError::NotFound`] when `id` does not exist.
    fn update(
        &self,
        id: AutomationId,
        automation: Automation,
    ) -> impl Future<Output = Result<Automation, RepFlowError>> + Send;

    /// Delete an automation by its unique identifier.
    fn delete(&self, id: AutomationId) -> impl Future<Output = Result<(), RepFlowError>> + Send;
}
