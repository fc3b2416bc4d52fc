//! Action dispatch port — the seam between the engine and side effects.

use std::future::Future;

use repflow_domain::automation::Action;
use repflow_domain::error::RepFlowError;

use super::side_effects::ActionContext;

/// Resolves one [`Action`] to exactly one handler and performs its side
/// effect.
///
/// Errors propagate unchanged to the engine, which captures them into the
/// execution record.
pub trait ActionDispatcher {
    fn dispatch(
        &self,
        action: &Action,
        ctx: ActionContext<'_>,
    ) -> impl Future<Output = Result<(), RepFlowError>> + Send;
}
