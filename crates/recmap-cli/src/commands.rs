//! Subcommand implementations.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use recmap_cli::rows::load_rows;
use recmap_layout::{compile, write_layout_json};
use recmap_model::{FieldMappingConfig, ValidationReport};
use recmap_render::render_batch;
use recmap_validate::validate_config;

use crate::cli::{CompileArgs, PreviewArgs, ValidateArgs};
use crate::summary::{print_layout, print_lines, print_validation, print_warnings};

fn load_config(path: &Path) -> Result<FieldMappingConfig> {
    FieldMappingConfig::read_json(path)
        .with_context(|| format!("{} is not a valid mapping configuration", path.display()))
}

fn validated(config: &FieldMappingConfig) -> ValidationReport {
    let report = validate_config(config);
    info!(
        config = %config.identity(),
        errors = report.error_count(),
        warnings = report.warning_count(),
        "validated configuration"
    );
    report
}

/// `recmap validate`: full findings in one pass; exit 1 when invalid.
pub fn run_validate(args: &ValidateArgs) -> Result<i32> {
    let config = load_config(&args.config)?;
    let report = validated(&config);
    print_validation(&config, &report);
    Ok(if report.valid { 0 } else { 1 })
}

/// `recmap compile`: refuse invalid configs, then write the canonical
/// layout document.
pub fn run_compile(args: &CompileArgs) -> Result<i32> {
    let config = load_config(&args.config)?;
    let report = validated(&config);
    print_validation(&config, &report);
    if !report.valid {
        return Ok(1);
    }

    let layout = compile(&config).context("layout compilation failed")?;
    print_layout(&layout);
    if args.dry_run {
        println!("Dry run: layout document not written.");
        return Ok(0);
    }
    let path = write_layout_json(&args.output_dir, &layout)
        .context("failed to write layout document")?;
    println!("Layout written to {}", path.display());
    Ok(0)
}

/// `recmap preview`: render every sample row; degradations are warnings,
/// never missing rows.
pub fn run_preview(args: &PreviewArgs) -> Result<i32> {
    let config = load_config(&args.config)?;
    let report = validated(&config);
    if !report.valid {
        print_validation(&config, &report);
        return Ok(1);
    }

    let rows = load_rows(&args.rows)?;
    let batch = render_batch(&config, &rows);
    if !args.lines_only {
        let layout = compile(&config).context("layout compilation failed")?;
        print_layout(&layout);
    }
    print_lines(&batch);
    print_warnings(&batch);
    Ok(0)
}
