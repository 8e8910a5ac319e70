//! Record map diff computation engine.
//!
//! The core entry point is [`diff_records`], which compares two canonical
//! record maps. [`diff_documents`] and [`diff_files`] run the whole pipeline
//! from parsed trees or from paths.

use crate::canonical::{canonicalize, CanonicalizeOptions};
use crate::diff::model::{Category, ChangeMessage, DocumentDiff};
use crate::errors::{PfifDiffError, Result};
use crate::record::RecordMap;
use crate::tree::PfifXmlTree;
use crate::{log_op_end, log_op_error, log_op_start};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;
use std::time::Instant;

/// Options for comparing field values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffOptions {
    /// When false, `Jane` and `JANE` compare equal.
    pub case_sensitive: bool,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            case_sensitive: true,
        }
    }
}

/// Every knob of the document-to-messages pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineOptions {
    pub ignore_fields: BTreeSet<String>,
    pub omit_blank_fields: bool,
    pub case_sensitive: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            ignore_fields: BTreeSet::new(),
            omit_blank_fields: false,
            case_sensitive: true,
        }
    }
}

impl PipelineOptions {
    pub fn canonicalize_options(&self) -> CanonicalizeOptions {
        CanonicalizeOptions {
            ignore_fields: self.ignore_fields.clone(),
            omit_blank_fields: self.omit_blank_fields,
        }
    }

    pub fn diff_options(&self) -> DiffOptions {
        DiffOptions {
            case_sensitive: self.case_sensitive,
        }
    }
}

/// Compare two record maps.
///
/// Messages are emitted in this order:
///
/// 1. walking A's records: `DeletedRecord` for a record missing from B;
///    otherwise `DeletedField`/`ChangedField` for A's fields, then
///    `AddedField` for fields only B has;
/// 2. walking B's records: `AddedRecord` for a record missing from A.
///
/// A removed or added record gets no field-level messages. `ChangedField`
/// payloads always quote the original values, even when the comparison was
/// case-insensitive.
pub fn diff_records(a: &RecordMap, b: &RecordMap, options: &DiffOptions) -> Vec<ChangeMessage> {
    let start = Instant::now();
    log_op_start!("diff_records", records_a = a.len(), records_b = b.len());

    let mut messages = Vec::new();

    for (key, fields_a) in a {
        let Some(fields_b) = b.get(key) else {
            messages.push(ChangeMessage::new(Category::DeletedRecord, key));
            continue;
        };

        for (field, value_a) in fields_a {
            match fields_b.get(field) {
                None => messages
                    .push(ChangeMessage::new(Category::DeletedField, key).with_field(field)),
                Some(value_b) => {
                    if !values_equal(value_a, value_b, options.case_sensitive) {
                        messages.push(
                            ChangeMessage::new(Category::ChangedField, key)
                                .with_field(field)
                                .with_extra_data(format!(
                                    "A:\"{}\" is now B:\"{}\"",
                                    value_a, value_b
                                )),
                        );
                    }
                }
            }
        }

        for field in fields_b.keys() {
            if !fields_a.contains_key(field) {
                messages.push(ChangeMessage::new(Category::AddedField, key).with_field(field));
            }
        }
    }

    for key in b.keys() {
        if !a.contains_key(key) {
            messages.push(ChangeMessage::new(Category::AddedRecord, key));
        }
    }

    log_op_end!(
        "diff_records",
        duration_ms = start.elapsed().as_millis() as u64,
        message_count = messages.len(),
    );
    messages
}

fn values_equal(a: &str, b: &str, case_sensitive: bool) -> bool {
    if case_sensitive {
        a == b
    } else {
        a.to_lowercase() == b.to_lowercase()
    }
}

/// Canonicalize two parsed documents with the same options and diff them.
pub fn diff_documents(a: &PfifXmlTree, b: &PfifXmlTree, options: &PipelineOptions) -> DocumentDiff {
    let start = Instant::now();
    log_op_start!("diff_documents");

    let canonicalize_options = options.canonicalize_options();
    let canonical_a = canonicalize(a, &canonicalize_options);
    let canonical_b = canonicalize(b, &canonicalize_options);
    let messages = diff_records(
        &canonical_a.records,
        &canonical_b.records,
        &options.diff_options(),
    );

    log_op_end!(
        "diff_documents",
        duration_ms = start.elapsed().as_millis() as u64,
        message_count = messages.len(),
    );
    DocumentDiff {
        messages,
        defects_a: canonical_a.defects,
        defects_b: canonical_b.defects,
    }
}

/// Read, canonicalize and diff two PFIF files.
///
/// # Errors
///
/// - `NotEnoughDocuments` / `TooManyDocuments` — `paths` does not hold
///   exactly two entries; checked before any file is read
/// - `Io`, `XmlParse`, `EmptyDocument` — a document cannot be loaded
pub fn diff_files<P: AsRef<Path>>(paths: &[P], options: &PipelineOptions) -> Result<DocumentDiff> {
    let start = Instant::now();
    let result = check_document_count(paths.len()).and_then(|()| {
        let a = PfifXmlTree::from_path(paths[0].as_ref())?;
        let b = PfifXmlTree::from_path(paths[1].as_ref())?;
        Ok(diff_documents(&a, &b, options))
    });
    if let Err(err) = &result {
        log_op_error!(
            "diff_files",
            err.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
    }
    result
}

fn check_document_count(supplied: usize) -> Result<()> {
    match supplied {
        0 | 1 => Err(PfifDiffError::NotEnoughDocuments { supplied }),
        2 => Ok(()),
        _ => Err(PfifDiffError::TooManyDocuments { supplied }),
    }
}
