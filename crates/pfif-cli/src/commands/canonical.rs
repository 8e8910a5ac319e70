//! Canonical command
//!
//! Usage: pfif canonical <FILE> [--ignore-field <FIELD>]... [--omit-blank-fields]

use clap::Args;
use pfif_core::{canonicalize, CanonicalizeOptions, PfifXmlTree};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct CanonicalArgs {
    /// PFIF file to canonicalize
    pub file: PathBuf,

    /// Drop this field from every record (repeatable)
    #[arg(long = "ignore-field", value_name = "FIELD")]
    pub ignore_fields: Vec<String>,

    /// Drop fields whose text is empty
    #[arg(long)]
    pub omit_blank_fields: bool,
}

/// Execute canonical command
pub fn execute(args: CanonicalArgs) -> Result<(), Box<dyn std::error::Error>> {
    let tree = PfifXmlTree::from_path(&args.file)?;
    let options = CanonicalizeOptions::default()
        .ignoring(args.ignore_fields)
        .with_omit_blank_fields(args.omit_blank_fields);

    let canonical = canonicalize(&tree, &options);
    super::warn_defects(&args.file.display().to_string(), &canonical.defects);

    println!("{}", serde_json::to_string_pretty(&canonical.records)?);
    Ok(())
}
