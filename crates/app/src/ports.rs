//! Port definitions — traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside
//! world. They are defined here (in `app`) so that both the use-case layer
//! and the adapter layer can depend on them without creating circular
//! dependencies.

pub mod automation_repo;
pub mod dispatch;
pub mod side_effects;

pub use automation_repo::AutomationRepository;
pub use dispatch::ActionDispatcher;
pub use side_effects::{
    ActionContext, ActivityLogger, EmailSender, FieldMutator, Notifier, TaskCreator,
    UserAssigner, WebhookCaller,
};
