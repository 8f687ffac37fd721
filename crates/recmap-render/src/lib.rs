//! Record renderer: packs resolved field values into fixed-width lines.
//!
//! One line per input row, fields concatenated in target-position order
//! with no separators. Values are truncated or padded to each field's exact
//! length. A malformed field never aborts the batch; it degrades to an
//! empty or defaulted value and is reported in the batch warnings, so an
//! operator previewing sample output always gets a full set of lines.

use recmap_model::{CompiledLayout, FieldMappingConfig, FieldRule, PadSide, SampleRow};
use recmap_transform::{Degradation, Outcome, resolve_field};
use tracing::debug;

/// A degradation observed while rendering: row and field locate it, the
/// message says what fell back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderWarning {
    /// 1-based row number within the batch.
    pub row: usize,
    pub field: String,
    pub message: String,
}

/// Preview output for a batch of sample rows, lines in input-row order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedBatch {
    pub lines: Vec<String>,
    pub warnings: Vec<RenderWarning>,
}

/// Truncate or pad `value` to exactly `length` characters.
///
/// Truncation is silent by design, matching downstream fixed-width
/// constraints. `PadSide::Left` right-aligns the value, `PadSide::Right`
/// left-aligns it.
pub fn pad_value(value: &str, length: usize, side: PadSide, pad_char: char) -> String {
    let width = value.chars().count();
    if width >= length {
        return value.chars().take(length).collect();
    }
    let padding: String = std::iter::repeat(pad_char).take(length - width).collect();
    match side {
        PadSide::Left => format!("{padding}{value}"),
        PadSide::Right => format!("{value}{padding}"),
    }
}

/// Render a batch from the originating configuration.
pub fn render_batch(config: &FieldMappingConfig, rows: &[SampleRow]) -> RenderedBatch {
    let mut rules: Vec<&FieldRule> = config.fields.iter().collect();
    rules.sort_by_key(|rule| rule.target_position);
    render_rules(&rules, rows)
}

/// Render a batch from a compiled layout.
pub fn render_layout_batch(layout: &CompiledLayout, rows: &[SampleRow]) -> RenderedBatch {
    let rules: Vec<&FieldRule> = layout.ordered().into_iter().map(|(_, rule)| rule).collect();
    render_rules(&rules, rows)
}

fn render_rules(rules: &[&FieldRule], rows: &[SampleRow]) -> RenderedBatch {
    let mut batch = RenderedBatch::default();
    for (row_index, row) in rows.iter().enumerate() {
        let row_number = row_index + 1;
        let mut line = String::new();
        for (field_index, rule) in rules.iter().enumerate() {
            let field_label = rule
                .effective_name()
                .map_or_else(|| format!("field {}", field_index + 1), str::to_string);

            // A non-positive length clamps to zero width: the field emits no
            // characters and later fields shift left, so line offsets only
            // match the declared layout for configurations that validate.
            let length = match usize::try_from(rule.length) {
                Ok(length) if length > 0 => length,
                _ => {
                    batch.warnings.push(RenderWarning {
                        row: row_number,
                        field: field_label,
                        message: "field length is not positive; emitted zero characters"
                            .to_string(),
                    });
                    continue;
                }
            };

            let resolution = resolve_field(rule, row);
            if let Outcome::Degraded(degradation) = &resolution.outcome {
                batch.warnings.push(RenderWarning {
                    row: row_number,
                    field: field_label,
                    message: degradation_message(degradation),
                });
            }

            let side = rule.padding_side().unwrap_or(PadSide::Right);
            line.push_str(&pad_value(
                &resolution.value,
                length,
                side,
                rule.padding_char(),
            ));
        }
        batch.lines.push(line);
    }
    debug!(
        rows = batch.lines.len(),
        warnings = batch.warnings.len(),
        "rendered preview batch"
    );
    batch
}

fn degradation_message(degradation: &Degradation) -> String {
    match degradation {
        Degradation::MissingSource { field } => {
            format!("source field '{field}' missing; used default")
        }
        Degradation::NoBranchMatched => "no condition matched; used default".to_string(),
        Degradation::ExpressionError { message } => {
            format!("expression failed ({message}); used default")
        }
        Degradation::InvalidRule => {
            "transformation type unknown or parameters mismatched; emitted empty field"
                .to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recmap_model::{Condition, TransformType};

    fn sample_config() -> FieldMappingConfig {
        let mut config =
            FieldMappingConfig::new("CORE-BANKING", "eod-settlement", "TXN-900");
        let mut balance = FieldRule::source("balance", 4, 5, "balance");
        balance.default_value = Some("0".to_string());
        balance.pad_side = Some("left".to_string());
        balance.pad_char = Some("0".to_string());
        let mut branch_key = FieldRule::composite(
            "branch-key",
            9,
            10,
            vec!["acct".to_string(), "loc".to_string()],
            "-",
        );
        branch_key.pad_side = Some("right".to_string());
        config.fields = vec![
            // Declared out of order; the renderer sorts by position.
            branch_key,
            FieldRule::constant("record-type", 1, 3, "200"),
            balance,
        ];
        config
    }

    #[test]
    fn fields_are_packed_in_position_order() {
        let rows = vec![SampleRow::new().with("acct", "123").with("loc", "45")];
        let batch = render_batch(&sample_config(), &rows);
        assert_eq!(batch.lines, vec!["20000000123-45    ".to_string()]);
        assert_eq!(batch.lines[0].len(), 3 + 5 + 10);
    }

    #[test]
    fn constant_of_exact_length_needs_no_padding() {
        let mut config = FieldMappingConfig::new("CORE", "job", "T1");
        config.fields = vec![FieldRule::constant("record-type", 1, 3, "200")];
        let batch = render_batch(&config, &[SampleRow::new()]);
        assert_eq!(batch.lines, vec!["200".to_string()]);
        assert!(batch.warnings.is_empty());
    }

    #[test]
    fn missing_source_left_zero_pads_its_default() {
        let mut config = FieldMappingConfig::new("CORE", "job", "T1");
        let mut balance = FieldRule::source("balance", 1, 5, "balance");
        balance.default_value = Some("0".to_string());
        balance.pad_side = Some("left".to_string());
        balance.pad_char = Some("0".to_string());
        config.fields = vec![balance];
        let batch = render_batch(&config, &[SampleRow::new()]);
        assert_eq!(batch.lines, vec!["00000".to_string()]);
        assert_eq!(batch.warnings.len(), 1);
        assert_eq!(batch.warnings[0].field, "balance");
        assert_eq!(batch.warnings[0].row, 1);
    }

    #[test]
    fn composite_right_pads_with_spaces() {
        let mut config = FieldMappingConfig::new("CORE", "job", "T1");
        let mut rule = FieldRule::composite(
            "branch-key",
            1,
            10,
            vec!["acct".to_string(), "loc".to_string()],
            "-",
        );
        rule.pad_side = Some("right".to_string());
        config.fields = vec![rule];
        let rows = vec![SampleRow::new().with("acct", "123").with("loc", "45")];
        let batch = render_batch(&config, &rows);
        assert_eq!(batch.lines, vec!["123-45    ".to_string()]);
    }

    #[test]
    fn unmatched_conditional_emits_padded_default() {
        let mut config = FieldMappingConfig::new("CORE", "job", "T1");
        let mut rule = FieldRule::conditional(
            "status-text",
            1,
            8,
            vec![Condition::new("status == 'A'", "ACTIVE")],
        );
        rule.default_value = Some("UNKNOWN".to_string());
        config.fields = vec![rule];
        let batch = render_batch(&config, &[SampleRow::new()]);
        assert_eq!(batch.lines, vec!["UNKNOWN ".to_string()]);
        assert_eq!(batch.warnings.len(), 1);
    }

    #[test]
    fn bad_field_never_blanks_the_batch() {
        let mut config = FieldMappingConfig::new("CORE", "job", "T1");
        let broken = FieldRule {
            field_name: Some("broken".to_string()),
            target_position: 1,
            length: 4,
            transform_type: Some(TransformType::Expression),
            ..FieldRule::default()
        };
        config.fields = vec![broken, FieldRule::constant("record-type", 5, 3, "200")];
        let rows = vec![SampleRow::new(), SampleRow::new()];
        let batch = render_batch(&config, &rows);
        assert_eq!(
            batch.lines,
            vec!["    200".to_string(), "    200".to_string()]
        );
        assert_eq!(batch.warnings.len(), 2);
        assert_eq!(batch.warnings[0].row, 1);
        assert_eq!(batch.warnings[1].row, 2);
    }

    #[test]
    fn nonpositive_length_clamps_to_zero_width_with_a_warning() {
        let mut config = FieldMappingConfig::new("CORE", "job", "T1");
        config.fields = vec![
            FieldRule::constant("record-type", 1, 3, "200"),
            FieldRule::constant("filler", 4, -2, "XX"),
            FieldRule::constant("tail", 5, 2, "ZZ"),
        ];
        let batch = render_batch(&config, &[SampleRow::new()]);
        // The clamped field contributes nothing; "tail" shifts left.
        assert_eq!(batch.lines, vec!["200ZZ".to_string()]);
        assert_eq!(batch.warnings.len(), 1);
        assert_eq!(batch.warnings[0].field, "filler");
        assert_eq!(
            batch.warnings[0].message,
            "field length is not positive; emitted zero characters"
        );

        config.fields[1].length = 0;
        let batch = render_batch(&config, &[SampleRow::new()]);
        assert_eq!(batch.lines, vec!["200ZZ".to_string()]);
        assert_eq!(batch.warnings.len(), 1);
    }

    #[test]
    fn layout_and_config_render_identically() {
        let config = sample_config();
        let rows = vec![
            SampleRow::new()
                .with("acct", "123")
                .with("loc", "45")
                .with("balance", "77"),
        ];
        let from_config = render_batch(&config, &rows);
        let layout = {
            let mut layout = CompiledLayout::new(
                config.source_system.clone(),
                config.job_name.clone(),
                config.transaction_type.clone(),
            );
            for rule in &config.fields {
                let name = rule.effective_name().expect("named rule");
                layout.insert(recmap_model::canonical_key(name), rule.clone());
            }
            layout
        };
        let from_layout = render_layout_batch(&layout, &rows);
        assert_eq!(from_config, from_layout);
    }

    #[test]
    fn truncation_is_silent_and_exact() {
        let mut config = FieldMappingConfig::new("CORE", "job", "T1");
        config.fields = vec![FieldRule::constant("narrow", 1, 4, "ABCDEFG")];
        let batch = render_batch(&config, &[SampleRow::new()]);
        assert_eq!(batch.lines, vec!["ABCD".to_string()]);
        assert!(batch.warnings.is_empty());
    }
}
