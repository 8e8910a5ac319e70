//! PFIF Diff Core - semantic comparison of PFIF documents
//!
//! This crate provides:
//! - A PFIF XML reader exposing persons, top-level notes and nested notes
//! - Canonicalization of a document into a flat record map, folding nested
//!   notes into top-level form
//! - A record map differ producing categorized change messages
//! - Text rendering of messages (summary, grouped, flat)
//! - The error and logging facilities shared by the CLI

pub mod canonical;
pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod record;
pub mod tree;

// Re-export commonly used types
pub use canonical::{canonicalize, CanonicalizeOptions, Canonicalized, StructuralDefect};
pub use diff::{diff_documents, diff_files, diff_records, ChangeMessage, DiffOptions, PipelineOptions};
pub use errors::{ExError, ExErrorKind, PfifDiffError, Result};
pub use record::{change_record_ids, FieldMap, RecordKey, RecordKind, RecordMap};
pub use tree::PfifXmlTree;
