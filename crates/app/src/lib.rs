//! # repflow-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters implement (driven/outbound ports):
//!   - `AutomationRepository` — CRUD and scope-filtered listing of automations
//!   - one side-effect port per action kind (`EmailSender`, `TaskCreator`,
//!     `FieldMutator`, `Notifier`, `ActivityLogger`, `UserAssigner`,
//!     `WebhookCaller`)
//!   - `ActionDispatcher` — the seam between the engine and the side-effect
//!     services
//! - Define **driving/inbound ports** as use-case structs:
//!   - `ExecutionEngine` — run one automation against one trigger event and
//!     produce an `Execution` record
//!   - `AutomationService` — validate and persist automation definitions
//!   - `DefaultTemplateLoader` — seed baseline automations for a new tenant
//! - Orchestrate domain objects without knowing *how* persistence or
//!   side-effect delivery works
//!
//! ## Dependency rule
//! Depends on `repflow-domain` only (plus `tokio` for timers/cancellation).
//! Never imports adapter crates. Adapters depend on *this* crate, not the
//! reverse.

pub mod dispatch;
pub mod execution_engine;
pub mod ports;
pub mod services;
