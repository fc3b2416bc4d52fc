//! In-memory [`AutomationRepository`] backed by a mutex-guarded map.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use repflow_app::ports::AutomationRepository;
use repflow_domain::automation::Automation;
use repflow_domain::error::{NotFoundError, RepFlowError};
use repflow_domain::id::{AutomationId, OrganizationId};
use repflow_domain::time;

/// Process-memory automation store.
///
/// Cloning is cheap and clones share the same underlying map, the same way
/// pool-backed repositories share a connection pool. Safe for concurrent
/// use; the lock is held only for the map operation, never across an await
/// point. Listings come back ordered by creation time so sweeps are
/// deterministic.
#[derive(Clone, Default)]
pub struct InMemoryAutomationRepository {
    store: Arc<Mutex<HashMap<AutomationId, Automation>>>,
}

impl InMemoryAutomationRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-populated with the given automations.
    #[must_use]
    pub fn with(automations: Vec<Automation>) -> Self {
        let map: HashMap<_, _> = automations.into_iter().map(|a| (a.id, a)).collect();
        Self {
            store: Arc::new(Mutex::new(map)),
        }
    }

    fn locked(&self) -> std::sync::MutexGuard<'_, HashMap<AutomationId, Automation>> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn sorted(mut items: Vec<Automation>) -> Vec<Automation> {
        items.sort_by_key(|a| a.created_at);
        items
    }
}

impl AutomationRepository for InMemoryAutomationRepository {
    fn list(
        &self,
        organization_id: OrganizationId,
    ) -> impl Future<Output = Result<Vec<Automation>, RepFlowError>> + Send {
        let store = self.locked();
        let items: Vec<_> = store
            .values()
            .filter(|a| a.organization_id == organization_id)
            .cloned()
            .collect();
        drop(store);
        async { Ok(Self::sorted(items)) }
    }

    fn list_active(
        &self,
        organization_id: OrganizationId,
        branch: Option<&str>,
        role: Option<&str>,
    ) -> impl Future<Output = Result<Vec<Automation>, RepFlowError>> + Send {
        let store = self.locked();
        let items: Vec<_> = store
            .values()
            .filter(|a| {
                a.organization_id == organization_id && a.is_active && a.in_scope(branch, role)
            })
            .cloned()
            .collect();
        drop(store);
        async { Ok(Self::sorted(items)) }
    }

    fn get(
        &self,
        id: AutomationId,
    ) -> impl Future<Output = Result<Option<Automation>, RepFlowError>> + Send {
        let found = self.locked().get(&id).cloned();
        async { Ok(found) }
    }

    fn create(
        &self,
        mut automation: Automation,
    ) -> impl Future<Output = Result<Automation, RepFlowError>> + Send {
        automation.created_at = time::now();
        automation.updated_at = None;
        self.locked().insert(automation.id, automation.clone());
        async { Ok(automation) }
    }

    fn update(
        &self,
        id: AutomationId,
        mut automation: Automation,
    ) -> impl Future<Output = Result<Automation, RepFlowError>> + Send {
        let mut store = self.locked();
        let result = match store.get(&id) {
            Some(existing) => {
                // Identity and provenance survive a whole-object replace.
                automation.id = id;
                automation.created_at = existing.created_at;
                automation.updated_at = Some(time::now());
                store.insert(id, automation.clone());
                Ok(automation)
            }
            None => Err(NotFoundError {
                entity: "Automation",
                id: id.to_string(),
            }
            .into()),
        };
        drop(store);
        async { result }
    }

    fn delete(&self, id: AutomationId) -> impl Future<Output = Result<(), RepFlowError>> + Send {
        self.locked().remove(&id);
        async { Ok(()) }
    }
}
