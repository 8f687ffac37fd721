use serde::{Deserialize, Serialize};

/// One branch of a conditional field rule.
///
/// Branches are evaluated first-match-wins; when the `if` guard of a branch
/// is false, its `else_if` alternatives are tried (recursively) before
/// falling through to the next sibling branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// Boolean guard expression evaluated against the input row.
    #[serde(rename = "if", default)]
    pub when: String,
    /// Value emitted when the guard evaluates true.
    #[serde(default)]
    pub then: String,
    /// Nested else-if alternatives, tried when the guard is false.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub else_if: Vec<Condition>,
}

impl Condition {
    pub fn new(when: impl Into<String>, then: impl Into<String>) -> Self {
        Self {
            when: when.into(),
            then: then.into(),
            else_if: Vec::new(),
        }
    }

    /// Attach else-if alternatives, consuming the builder.
    #[must_use]
    pub fn with_alternatives(mut self, alternatives: Vec<Condition>) -> Self {
        self.else_if = alternatives;
        self
    }
}
