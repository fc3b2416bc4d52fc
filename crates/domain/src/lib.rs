//! # repflow-domain
//!
//! Pure domain model for the repflow workflow automation engine.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Automations** (trigger → condition → action rules with
//!   tenant and branch/role scoping)
//! - Define **Conditions** (field tests against a trigger payload) and
//!   their evaluation, including the short-circuit combination rule
//! - Define **Actions** (the closed set of side-effect kinds and their
//!   typed configurations)
//! - Define **Executions** (the audited record of one automation run and
//!   its status state machine)
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod automation;
pub mod execution;
pub mod payload;
