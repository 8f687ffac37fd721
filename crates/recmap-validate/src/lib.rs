//! Validation engine for field-mapping configurations.
//!
//! Pure and deterministic: the same configuration always yields the same
//! ordered error and warning lists, and callers receive every finding in
//! one pass. Errors block compilation; warnings are advisory.

use std::collections::BTreeMap;

use recmap_model::{
    Condition, DataType, FieldMappingConfig, FieldRule, PadSide, TransformType,
    ValidationReport, canonical_key,
};

/// Expressions longer than this are flagged as a complexity smell.
const EXPRESSION_LENGTH_WARNING: usize = 1000;

#[derive(Debug, Default)]
struct Findings {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl Findings {
    fn error(&mut self, message: String) {
        self.errors.push(message);
    }

    fn warning(&mut self, message: String) {
        self.warnings.push(message);
    }
}

/// Validate a full mapping configuration.
///
/// Checks run in a fixed order: root-level checks, per-field checks in
/// field order, then the cross-field duplicate-position and duplicate-name
/// checks. Findings accumulate; nothing short-circuits except the per-field
/// checks of a field whose name cannot be resolved.
pub fn validate_config(config: &FieldMappingConfig) -> ValidationReport {
    let mut findings = Findings::default();

    if config.fields.is_empty() {
        findings.error("at least one field mapping is required".to_string());
    }
    if config.source_system.trim().is_empty() {
        findings.error("source system is required".to_string());
    }
    if config.job_name.trim().is_empty() {
        findings.error("job name is required".to_string());
    }

    for (index, rule) in config.fields.iter().enumerate() {
        validate_rule(index, rule, &mut findings);
    }

    check_duplicate_positions(&config.fields, &mut findings);
    check_duplicate_names(&config.fields, &mut findings);

    ValidationReport::from_findings(findings.errors, findings.warnings)
}

/// Validate a single rule. Field indices in messages are 1-based, matching
/// how operators count mappings in the editor.
fn validate_rule(index: usize, rule: &FieldRule, findings: &mut Findings) {
    let Some(name) = rule.effective_name() else {
        findings.error(format!(
            "field name is required for field mapping {}",
            index + 1
        ));
        return;
    };
    let name = name.to_string();

    if rule.target_position <= 0 {
        findings.error(format!(
            "field '{name}': target position must be a positive integer"
        ));
    }
    if rule.length <= 0 {
        findings.error(format!("field '{name}': length must be a positive integer"));
    }

    match rule.transform_type {
        None => findings.error(format!("field '{name}': transformation type is required")),
        Some(transform_type) => {
            validate_transform(&name, transform_type, rule, findings);
        }
    }

    if let Some(declared) = rule.data_type.as_deref()
        && !declared.trim().is_empty()
        && declared.parse::<DataType>().is_err()
    {
        findings.warning(format!("field '{name}': unrecognized data type '{declared}'"));
    }

    if let Some(side) = rule.pad_side.as_deref()
        && side.parse::<PadSide>().is_err()
    {
        findings.error(format!("field '{name}': padding side must be 'left' or 'right'"));
    }
    if let Some(pad) = rule.pad_char.as_deref()
        && pad.chars().count() != 1
    {
        findings.error(format!(
            "field '{name}': pad character must be exactly one character"
        ));
    }
}

fn validate_transform(
    name: &str,
    transform_type: TransformType,
    rule: &FieldRule,
    findings: &mut Findings,
) {
    match transform_type {
        TransformType::Constant => {
            if rule
                .constant_value
                .as_deref()
                .is_none_or(|value| value.trim().is_empty())
            {
                findings.error(format!("field '{name}': constant transformation requires a value"));
            }
        }
        TransformType::Source => {
            if rule
                .source_field
                .as_deref()
                .is_none_or(|field| field.trim().is_empty())
            {
                findings.error(format!(
                    "field '{name}': source transformation requires a source field"
                ));
            }
        }
        TransformType::Composite => {
            if rule.source_fields.is_empty() {
                findings.error(format!(
                    "field '{name}': composite transformation requires at least one source field"
                ));
            }
            if !rule.composite {
                findings.warning(format!(
                    "field '{name}': uses composite transformation but is not flagged as composite"
                ));
            }
        }
        TransformType::Conditional => {
            if rule.conditions.is_empty() {
                findings.error(format!(
                    "field '{name}': conditional transformation requires at least one condition"
                ));
            } else {
                check_conditions(name, &rule.conditions, "", findings);
            }
        }
        TransformType::Expression => match rule.expression.as_deref() {
            None => findings.error(format!(
                "field '{name}': expression transformation requires an expression"
            )),
            Some(expression) if expression.trim().is_empty() => findings.error(format!(
                "field '{name}': expression transformation requires an expression"
            )),
            Some(expression) => {
                if expression.chars().count() > EXPRESSION_LENGTH_WARNING {
                    findings.warning(format!(
                        "field '{name}': expression exceeds {EXPRESSION_LENGTH_WARNING} characters"
                    ));
                }
            }
        },
    }
}

/// Recursively check a condition tree. Positions are 1-based within each
/// list; nested alternatives get dotted paths ("2.1" is the first else-if
/// of the second branch).
fn check_conditions(name: &str, conditions: &[Condition], prefix: &str, findings: &mut Findings) {
    for (position, condition) in conditions.iter().enumerate() {
        let path = if prefix.is_empty() {
            (position + 1).to_string()
        } else {
            format!("{prefix}.{}", position + 1)
        };
        if condition.when.trim().is_empty() {
            findings.error(format!(
                "field '{name}': condition {path} is missing an 'if' expression"
            ));
        }
        if condition.then.trim().is_empty() {
            findings.error(format!(
                "field '{name}': condition {path} is missing a 'then' value"
            ));
        }
        check_conditions(name, &condition.else_if, &path, findings);
    }
}

/// One error per duplicate occurrence beyond the first sighting of a
/// position, naming the offending field mapping.
fn check_duplicate_positions(fields: &[FieldRule], findings: &mut Findings) {
    let mut seen: BTreeMap<i64, usize> = BTreeMap::new();
    for (index, rule) in fields.iter().enumerate() {
        let position = rule.target_position;
        if position == 0 {
            continue;
        }
        if seen.contains_key(&position) {
            findings.error(format!(
                "field mapping {}: duplicate target position {position}",
                index + 1
            ));
        } else {
            seen.insert(position, index);
        }
    }
}

/// Field names must stay unique after canonicalization (lowercase,
/// hyphens folded to underscores); the layout compiler keys its entries
/// by that form and treats a collision as fatal. One error per duplicate
/// occurrence beyond the first sighting of a key. Nameless rules are
/// skipped; they already carry a missing-name error.
fn check_duplicate_names(fields: &[FieldRule], findings: &mut Findings) {
    let mut seen: BTreeMap<String, usize> = BTreeMap::new();
    for (index, rule) in fields.iter().enumerate() {
        let Some(name) = rule.effective_name() else {
            continue;
        };
        let key = canonical_key(name);
        if seen.contains_key(&key) {
            findings.error(format!(
                "field mapping {}: duplicate field name '{key}'",
                index + 1
            ));
        } else {
            seen.insert(key, index);
        }
    }
}
