//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "recmap",
    version,
    about = "Record Layout Studio - validate and compile field-mapping configurations",
    long_about = "Validate field-mapping configurations for fixed-width batch output,\n\
                  compile them into canonical record layouts for the job-processing\n\
                  engine, and preview rendered sample records."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate a mapping configuration and report errors and warnings.
    Validate(ValidateArgs),

    /// Compile a validated configuration into a canonical layout document.
    Compile(CompileArgs),

    /// Render fixed-width preview lines from sample rows.
    Preview(PreviewArgs),
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// Path to the mapping configuration (JSON).
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,
}

#[derive(Parser)]
pub struct CompileArgs {
    /// Path to the mapping configuration (JSON).
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Output directory for the layout document (default: ./output).
    #[arg(long = "output-dir", value_name = "DIR", default_value = "output")]
    pub output_dir: PathBuf,

    /// Validate and report without writing the layout document.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct PreviewArgs {
    /// Path to the mapping configuration (JSON).
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Sample rows to render (.csv with header, or .json array of objects).
    #[arg(long = "rows", value_name = "PATH")]
    pub rows: PathBuf,

    /// Suppress the field-layout table and print only rendered lines.
    #[arg(long = "lines-only")]
    pub lines_only: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
