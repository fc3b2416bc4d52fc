//! Trigger classification — what kind of event should attempt evaluation.

use serde::{Deserialize, Serialize};

/// Classifies the event source an automation listens to.
///
/// Purely descriptive: the evaluator treats every trigger payload the same
/// way. Hosts use this to decide which automations to offer a given event
/// stream (entity-change hooks, scheduler ticks, or manual runs).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerType {
    /// An entity moved from one pipeline stage to another.
    StageChange,
    /// A watched field on an entity changed.
    FieldUpdate,
    /// A scheduled tick (idle checks, reminders).
    TimeBased,
    /// Run on explicit user request.
    #[default]
    Manual,
}

impl std::fmt::Display for TriggerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::StageChange => "stage_change",
            Self::FieldUpdate => "field_update",
            Self::TimeBased => "time_based",
            Self::Manual => "manual",
        };
        f.write_str(name)
    }
}
