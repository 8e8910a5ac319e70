//! Diff command
//!
//! Usage: pfif diff <FILE_A> <FILE_B> [--text-is-case-insensitive] [--no-grouping]
//!        [--ignore-field <FIELD>]... [--omit-blank-fields] [--format text|json]

use clap::{Args, ValueEnum};
use pfif_core::diff::{
    diff_files, render_flat, render_grouped, render_summary, ChangeMessage, DiffSummary,
};
use pfif_core::{PipelineOptions, StructuralDefect};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// The two PFIF files to compare, A then B
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// <pfif:full_name>Jane</pfif:full_name> is the same as <pfif:full_name>JANE</pfif:full_name>
    #[arg(long)]
    pub text_is_case_insensitive: bool,

    /// List every difference on its own line instead of grouping by record
    #[arg(long)]
    pub no_grouping: bool,

    /// Never report this field as added, removed, or changed (repeatable)
    #[arg(long = "ignore-field", value_name = "FIELD")]
    pub ignore_fields: Vec<String>,

    /// Treat a blank field (<foo></foo>) as if it were omitted
    #[arg(long)]
    pub omit_blank_fields: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    summary: DiffSummary,
    messages: &'a [ChangeMessage],
    defects_a: &'a [StructuralDefect],
    defects_b: &'a [StructuralDefect],
}

impl DiffArgs {
    fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            ignore_fields: self.ignore_fields.iter().cloned().collect(),
            omit_blank_fields: self.omit_blank_fields,
            case_sensitive: !self.text_is_case_insensitive,
        }
    }
}

/// Execute diff command
pub fn execute(args: DiffArgs) -> Result<(), Box<dyn std::error::Error>> {
    let diff = diff_files(args.files.as_slice(), &args.pipeline_options())?;

    super::warn_defects("A", &diff.defects_a);
    super::warn_defects("B", &diff.defects_b);

    match args.format {
        OutputFormat::Json => {
            let report = JsonReport {
                summary: diff.summary(),
                messages: &diff.messages,
                defects_a: &diff.defects_a,
                defects_b: &diff.defects_b,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            println!("{}", render_summary(&diff.messages));
            if args.no_grouping {
                print!("{}", render_flat(&diff.messages));
            } else {
                print!("{}", render_grouped(&diff.messages));
            }
        }
    }

    Ok(())
}
