//! Human-readable command output: validation findings, layout tables, and
//! rendered preview lines.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use recmap_model::{CompiledLayout, FieldMappingConfig, ValidationReport};
use recmap_render::RenderedBatch;

pub fn print_validation(config: &FieldMappingConfig, report: &ValidationReport) {
    println!(
        "Configuration: {} (version {})",
        config.identity(),
        config.version
    );
    if report.valid {
        println!("Valid: {} field mapping(s)", config.fields.len());
    } else {
        println!("Invalid: {} error(s)", report.error_count());
    }
    for error in &report.errors {
        println!("  error: {error}");
    }
    for warning in &report.warnings {
        println!("  warning: {warning}");
    }
}

pub fn print_layout(layout: &CompiledLayout) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        header_cell("Key"),
        header_cell("Field"),
        header_cell("Position"),
        header_cell("Length"),
        header_cell("Transform"),
    ]);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for (key, rule) in layout.ordered() {
        table.add_row(vec![
            Cell::new(key),
            Cell::new(rule.effective_name().unwrap_or("-")),
            Cell::new(rule.target_position),
            Cell::new(rule.length),
            Cell::new(
                rule.transform_type
                    .map_or("-", |transform_type| transform_type.as_str()),
            ),
        ]);
    }
    println!("{table}");
}

pub fn print_lines(batch: &RenderedBatch) {
    for (index, line) in batch.lines.iter().enumerate() {
        println!("{:>4} |{line}|", index + 1);
    }
}

pub fn print_warnings(batch: &RenderedBatch) {
    if batch.warnings.is_empty() {
        return;
    }
    println!("Degraded fields: {}", batch.warnings.len());
    for warning in &batch.warnings {
        println!(
            "  row {}, field '{}': {}",
            warning.row, warning.field, warning.message
        );
    }
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
