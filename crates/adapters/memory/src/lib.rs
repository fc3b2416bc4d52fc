//! # repflow-adapter-memory
//!
//! In-memory adapter — implements the `repflow-app` ports against process
//! memory. Suitable for hosts that keep automation definitions elsewhere
//! and hydrate them at startup, and for exercising the engine in tests
//! without any durable storage.

mod automation_repo;
mod side_effects;

pub use automation_repo::InMemoryAutomationRepository;
pub use side_effects::{RecordedEffect, RecordingServices};
