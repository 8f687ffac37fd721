//! Transformation resolver: computes one field's emitted value from a
//! sample input row.
//!
//! Resolution never raises on missing or malformed input. Every gap
//! degrades to the rule's configured default (or the empty string) and the
//! outcome records that it did, so callers and tests can tell "resolved
//! normally" from "fell back" without parsing log text.

use recmap_expr::{eval_bool, eval_value};
use recmap_model::{Condition, FieldRule, SampleRow, Transform};
use tracing::trace;

/// Why a resolution fell back instead of resolving normally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Degradation {
    /// A `source` or `composite` lookup found no value for a field.
    MissingSource { field: String },
    /// No conditional branch matched the row.
    NoBranchMatched,
    /// An expression or condition guard failed to parse or evaluate.
    ExpressionError { message: String },
    /// The rule's parameters do not match its declared transformation type
    /// (or the type is absent); only reachable when validation was skipped.
    InvalidRule,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Resolved,
    Degraded(Degradation),
}

/// Result of resolving one field against one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub value: String,
    pub outcome: Outcome,
}

impl Resolution {
    fn resolved(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            outcome: Outcome::Resolved,
        }
    }

    fn degraded(value: impl Into<String>, degradation: Degradation) -> Self {
        Self {
            value: value.into(),
            outcome: Outcome::Degraded(degradation),
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self.outcome, Outcome::Degraded(_))
    }
}

/// Resolve a field rule against a sample row.
pub fn resolve_field(rule: &FieldRule, row: &SampleRow) -> Resolution {
    let default = rule.default_value.as_deref().unwrap_or("");
    let Some(transform) = rule.transform() else {
        // Unknown or mismatched transform: emit an empty field, never abort.
        return Resolution::degraded("", Degradation::InvalidRule);
    };

    match transform {
        Transform::Constant(value) => Resolution::resolved(value),
        Transform::Source(field) => match row.get(field) {
            Some(value) => Resolution::resolved(value),
            None => {
                trace!(field, "source field missing, using default");
                Resolution::degraded(
                    default,
                    Degradation::MissingSource {
                        field: field.to_string(),
                    },
                )
            }
        },
        Transform::Composite { fields, delimiter } => {
            let mut missing: Option<String> = None;
            let parts: Vec<&str> = fields
                .iter()
                .map(|field| match row.get(field) {
                    Some(value) => value,
                    None => {
                        if missing.is_none() {
                            missing = Some(field.clone());
                        }
                        ""
                    }
                })
                .collect();
            let value = parts.join(delimiter);
            match missing {
                None => Resolution::resolved(value),
                Some(field) => {
                    Resolution::degraded(value, Degradation::MissingSource { field })
                }
            }
        }
        Transform::Conditional { branches, default: rule_default } => {
            let mut guard_error: Option<String> = None;
            match evaluate_branches(branches, row, &mut guard_error) {
                Some(value) => Resolution::resolved(value),
                None => {
                    let fallback = rule_default.unwrap_or("");
                    match guard_error {
                        Some(message) => Resolution::degraded(
                            fallback,
                            Degradation::ExpressionError { message },
                        ),
                        None => {
                            Resolution::degraded(fallback, Degradation::NoBranchMatched)
                        }
                    }
                }
            }
        }
        Transform::Expression(expression) => match eval_value(expression, row) {
            Ok(value) => Resolution::resolved(value),
            Err(error) => {
                trace!(%error, "expression evaluation failed, using default");
                Resolution::degraded(
                    default,
                    Degradation::ExpressionError {
                        message: error.to_string(),
                    },
                )
            }
        },
    }
}

/// First-match-wins over a branch list. A branch whose guard is false has
/// its nested alternatives tried (recursively) before evaluation falls
/// through to the next sibling. A guard that fails to evaluate counts as
/// not matching; the first such failure is reported to the caller.
fn evaluate_branches(
    branches: &[Condition],
    row: &SampleRow,
    guard_error: &mut Option<String>,
) -> Option<String> {
    for branch in branches {
        match eval_bool(&branch.when, row) {
            Ok(true) => return Some(branch.then.clone()),
            Ok(false) => {}
            Err(error) => {
                if guard_error.is_none() {
                    *guard_error = Some(error.to_string());
                }
            }
        }
        if let Some(value) = evaluate_branches(&branch.else_if, row, guard_error) {
            return Some(value);
        }
    }
    None
}
