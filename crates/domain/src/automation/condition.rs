//! Condition — a field test evaluated against the trigger payload.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::payload;

/// Comparison operator for a single condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionOperator {
    Equals,
    NotEquals,
    Contains,
    NotContains,
    GreaterThan,
    LessThan,
    IsEmpty,
    IsNotEmpty,
}

/// How one condition's result combines with the running decision.
///
/// See [`evaluate_all`] for the exact combination rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogicalOperator {
    #[default]
    And,
    Or,
}

/// One leaf test against the trigger payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// Dot-notated path into the trigger payload, e.g. `deal.value`.
    pub field: String,
    pub operator: ConditionOperator,
    /// Comparison operand. Ignored by `is_empty` / `is_not_empty`.
    #[serde(default)]
    pub value: Value,
    #[serde(default)]
    pub logical_operator: LogicalOperator,
}

impl Condition {
    /// Build a condition with the default `AND` logical operator.
    #[must_use]
    pub fn new(field: impl Into<String>, operator: ConditionOperator, value: Value) -> Self {
        Self {
            field: field.into(),
            operator,
            value,
            logical_operator: LogicalOperator::And,
        }
    }

    /// Switch this condition to `OR` combination.
    #[must_use]
    pub fn or(mut self) -> Self {
        self.logical_operator = LogicalOperator::Or;
        self
    }

    /// Evaluate this single condition against a payload.
    #[must_use]
    pub fn is_met(&self, trigger_payload: &Value) -> bool {
        let field_value = payload::lookup(trigger_payload, &self.field);

        match self.operator {
            ConditionOperator::Equals => {
                field_value.map(|v| v == &self.value).unwrap_or(false)
            }
            ConditionOperator::NotEquals => {
                field_value.map(|v| v != &self.value).unwrap_or(true)
            }
            ConditionOperator::Contains => {
                match (field_value.and_then(Value::as_str), self.value.as_str()) {
                    (Some(s), Some(pattern)) => {
                        s.to_lowercase().contains(&pattern.to_lowercase())
                    }
                    _ => false,
                }
            }
            ConditionOperator::NotContains => {
                match (field_value.and_then(Value::as_str), self.value.as_str()) {
                    (Some(s), Some(pattern)) => {
                        !s.to_lowercase().contains(&pattern.to_lowercase())
                    }
                    _ => true,
                }
            }
            ConditionOperator::GreaterThan => {
                match (
                    field_value.and_then(payload::as_number),
                    payload::as_number(&self.value),
                ) {
                    (Some(v), Some(operand)) => v > operand,
                    _ => false,
                }
            }
            ConditionOperator::LessThan => {
                match (
                    field_value.and_then(payload::as_number),
                    payload::as_number(&self.value),
                ) {
                    (Some(v), Some(operand)) => v < operand,
                    _ => false,
                }
            }
            ConditionOperator::IsEmpty => payload::is_empty(field_value),
            ConditionOperator::IsNotEmpty => !payload::is_empty(field_value),
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {:?} {}", self.field, self.operator, self.value)
    }
}

/// Evaluate a condition list against a trigger payload.
///
/// Conditions are visited in declaration order. For each entry the leaf
/// test runs first, then the entry's own `logical_operator` decides whether
/// the overall evaluation short-circuits:
///
/// - entry **false** and `AND` → the whole result is `false`, immediately;
/// - entry **true** and `OR` → the whole result is `true`, immediately;
/// - anything else → continue to the next entry.
///
/// If the loop finishes without short-circuiting the result is `true`.
/// An empty list always evaluates to `true`.
///
/// Note the asymmetry: a failing `OR` entry does not sink the result on its
/// own, and a passing `AND` entry does not confirm it. This is the combining
/// rule automations in the field were authored against, so it is kept as-is
/// rather than replaced with a grouped boolean-expression tree.
#[must_use]
pub fn evaluate_all(conditions: &[Condition], trigger_payload: &Value) -> bool {
    for condition in conditions {
        let condition_met = condition.is_met(trigger_payload);

        match condition.logical_operator {
            LogicalOperator::And if !condition_met => return false,
            LogicalOperator::Or if condition_met => return true,
            _ => {}
        }
    }
    true
}
