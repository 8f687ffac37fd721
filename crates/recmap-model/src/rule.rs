use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::condition::Condition;

/// Strategy used to derive one output field's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransformType {
    /// Emit a literal value.
    Constant,
    /// Copy a single source field from the input row.
    Source,
    /// Join several source fields with a delimiter.
    Composite,
    /// First-match-wins evaluation of guarded branches.
    Conditional,
    /// Evaluate an expression against the input row.
    Expression,
}

impl TransformType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransformType::Constant => "constant",
            TransformType::Source => "source",
            TransformType::Composite => "composite",
            TransformType::Conditional => "conditional",
            TransformType::Expression => "expression",
        }
    }
}

impl fmt::Display for TransformType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TransformType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "constant" => Ok(TransformType::Constant),
            "source" => Ok(TransformType::Source),
            "composite" => Ok(TransformType::Composite),
            "conditional" => Ok(TransformType::Conditional),
            "expression" => Ok(TransformType::Expression),
            _ => Err(format!("Unknown transformation type: {}", s)),
        }
    }
}

/// Which side of the value receives pad characters.
///
/// `Left` padding right-aligns the value; `Right` padding left-aligns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PadSide {
    Left,
    Right,
}

impl PadSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            PadSide::Left => "left",
            PadSide::Right => "right",
        }
    }
}

impl FromStr for PadSide {
    type Err = String;

    /// Strict parse: only the exact strings `left` and `right` are valid.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(PadSide::Left),
            "right" => Ok(PadSide::Right),
            _ => Err(format!("Unknown padding side: {}", s)),
        }
    }
}

/// One output field's declarative transformation rule.
///
/// Parameters are deliberately loose (everything optional) so that an
/// operator-authored document always deserializes; the validation engine
/// reports missing or mismatched parameters as findings instead of the
/// deserializer rejecting the whole configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldRule {
    /// Canonical field identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_name: Option<String>,
    /// Legacy alias for the field identifier; used when `field_name` is absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_field: Option<String>,
    /// 1-based byte position in the fixed-width record.
    #[serde(default)]
    pub target_position: i64,
    /// Number of output characters this field occupies.
    #[serde(default)]
    pub length: i64,
    /// Declared data type; checked against a fixed allow-list, advisory only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform_type: Option<TransformType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constant_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_field: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub source_fields: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delimiter: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expression: Option<String>,
    /// Fallback value when resolution degrades (missing source, no branch
    /// matched, expression failure).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    /// Operator flag marking the field as a composite; a composite transform
    /// without this flag is a validation warning.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub composite: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pad_side: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pad_char: Option<String>,
}

/// Strongly-typed view over a rule whose parameters match its declared
/// transformation type. `FieldRule::transform` returns `None` when they do
/// not, and the renderer degrades to an empty field.
#[derive(Debug, Clone, PartialEq)]
pub enum Transform<'a> {
    Constant(&'a str),
    Source(&'a str),
    Composite {
        fields: &'a [String],
        delimiter: &'a str,
    },
    Conditional {
        branches: &'a [Condition],
        default: Option<&'a str>,
    },
    Expression(&'a str),
}

impl FieldRule {
    fn named(name: &str, position: i64, length: i64) -> Self {
        Self {
            field_name: Some(name.to_string()),
            target_position: position,
            length,
            ..Self::default()
        }
    }

    pub fn constant(name: &str, position: i64, length: i64, value: &str) -> Self {
        Self {
            transform_type: Some(TransformType::Constant),
            constant_value: Some(value.to_string()),
            ..Self::named(name, position, length)
        }
    }

    pub fn source(name: &str, position: i64, length: i64, source_field: &str) -> Self {
        Self {
            transform_type: Some(TransformType::Source),
            source_field: Some(source_field.to_string()),
            ..Self::named(name, position, length)
        }
    }

    pub fn composite(
        name: &str,
        position: i64,
        length: i64,
        source_fields: Vec<String>,
        delimiter: &str,
    ) -> Self {
        Self {
            transform_type: Some(TransformType::Composite),
            source_fields,
            delimiter: Some(delimiter.to_string()),
            composite: true,
            ..Self::named(name, position, length)
        }
    }

    pub fn conditional(
        name: &str,
        position: i64,
        length: i64,
        conditions: Vec<Condition>,
    ) -> Self {
        Self {
            transform_type: Some(TransformType::Conditional),
            conditions,
            ..Self::named(name, position, length)
        }
    }

    pub fn expression(name: &str, position: i64, length: i64, expression: &str) -> Self {
        Self {
            transform_type: Some(TransformType::Expression),
            expression: Some(expression.to_string()),
            ..Self::named(name, position, length)
        }
    }

    /// Effective field identifier: `field_name` when present and non-blank,
    /// otherwise the `target_field` alias.
    pub fn effective_name(&self) -> Option<&str> {
        for candidate in [self.field_name.as_deref(), self.target_field.as_deref()] {
            if let Some(name) = candidate {
                let trimmed = name.trim();
                if !trimmed.is_empty() {
                    return Some(trimmed);
                }
            }
        }
        None
    }

    /// Strict padding side, `None` when absent or malformed.
    pub fn padding_side(&self) -> Option<PadSide> {
        self.pad_side.as_deref().and_then(|s| s.parse().ok())
    }

    /// Pad character, defaulting to space when unset or malformed.
    pub fn padding_char(&self) -> char {
        match self.pad_char.as_deref() {
            Some(s) => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => c,
                    _ => ' ',
                }
            }
            None => ' ',
        }
    }

    /// Typed view of the transformation, provided the declared type and its
    /// parameters agree. Validation guarantees `Some` for valid configs.
    pub fn transform(&self) -> Option<Transform<'_>> {
        match self.transform_type? {
            TransformType::Constant => self.constant_value.as_deref().map(Transform::Constant),
            TransformType::Source => self
                .source_field
                .as_deref()
                .filter(|field| !field.trim().is_empty())
                .map(Transform::Source),
            TransformType::Composite => {
                if self.source_fields.is_empty() {
                    None
                } else {
                    Some(Transform::Composite {
                        fields: &self.source_fields,
                        delimiter: self.delimiter.as_deref().unwrap_or(""),
                    })
                }
            }
            TransformType::Conditional => {
                if self.conditions.is_empty() {
                    None
                } else {
                    Some(Transform::Conditional {
                        branches: &self.conditions,
                        default: self.default_value.as_deref(),
                    })
                }
            }
            TransformType::Expression => self
                .expression
                .as_deref()
                .filter(|expr| !expr.trim().is_empty())
                .map(Transform::Expression),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effective_name_prefers_field_name() {
        let rule = FieldRule {
            field_name: Some("account-id".to_string()),
            target_field: Some("legacy".to_string()),
            ..FieldRule::default()
        };
        assert_eq!(rule.effective_name(), Some("account-id"));
    }

    #[test]
    fn effective_name_falls_back_to_target_field() {
        let rule = FieldRule {
            field_name: Some("   ".to_string()),
            target_field: Some("acct".to_string()),
            ..FieldRule::default()
        };
        assert_eq!(rule.effective_name(), Some("acct"));
    }

    #[test]
    fn transform_view_rejects_mismatched_parameters() {
        let rule = FieldRule {
            field_name: Some("amount".to_string()),
            transform_type: Some(TransformType::Source),
            constant_value: Some("100".to_string()),
            ..FieldRule::default()
        };
        assert_eq!(rule.transform(), None);
    }

    #[test]
    fn transform_view_matches_declared_type() {
        let rule = FieldRule::composite(
            "branch-key",
            4,
            10,
            vec!["acct".to_string(), "loc".to_string()],
            "-",
        );
        match rule.transform() {
            Some(Transform::Composite { fields, delimiter }) => {
                assert_eq!(fields.len(), 2);
                assert_eq!(delimiter, "-");
            }
            other => panic!("unexpected transform view: {other:?}"),
        }
    }

    #[test]
    fn padding_defaults_are_lenient() {
        let rule = FieldRule {
            pad_side: Some("center".to_string()),
            pad_char: Some("xy".to_string()),
            ..FieldRule::default()
        };
        assert_eq!(rule.padding_side(), None);
        assert_eq!(rule.padding_char(), ' ');
    }

    #[test]
    fn transform_type_parses_case_insensitively() {
        assert_eq!(
            "Conditional".parse::<TransformType>(),
            Ok(TransformType::Conditional)
        );
        assert!("lookup".parse::<TransformType>().is_err());
    }
}
