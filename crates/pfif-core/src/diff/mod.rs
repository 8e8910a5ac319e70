//! Record map diff engine.
//!
//! Compares two canonical record maps and produces an ordered sequence of
//! categorized change messages.
//!
//! ## Entry point
//!
//! ```ignore
//! use pfif_core::diff::{diff_files, render_grouped, render_summary, PipelineOptions};
//!
//! let diff = diff_files(&["a.xml", "b.xml"], &PipelineOptions::default())?;
//! println!("{}", render_summary(&diff.messages));
//! print!("{}", render_grouped(&diff.messages));
//! ```
//!
//! ## Guarantees
//!
//! - **Determinism**: record and field maps are ordered, so the same pair of
//!   maps always yields the same message sequence.
//! - **Reflexivity**: diffing a map against itself yields no messages.
//! - **Record locality**: every field-level message names the record it
//!   belongs to; removed or added records get no field-level messages.

pub mod engine;
pub mod human_summary;
pub mod model;

pub use engine::{diff_documents, diff_files, diff_records, DiffOptions, PipelineOptions};
pub use human_summary::{render_flat, render_grouped, render_summary};
pub use model::{Category, ChangeMessage, DiffSummary, DocumentDiff};
