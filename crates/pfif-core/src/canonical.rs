//! Canonicalization of a PFIF document into a flat record map.
//!
//! Every person directly under the root and every note (top-level or nested
//! in a person) becomes one entry of the [`RecordMap`]. A note nested in a
//! person gets that person's id injected as its `person_record_id`, so the
//! canonical form does not depend on where the note was written.
//!
//! ## Structural defects
//!
//! Input is assumed to be valid PFIF. The two problems that can still be
//! observed cheaply are reported as [`StructuralDefect`]s next to the
//! (partial) map instead of failing the whole document:
//!
//! - a person or note without its record id is skipped;
//! - a second record with an already-seen key is merged into the first, its
//!   values winning for fields both define.

use crate::errors::{ExError, ExErrorKind};
use crate::record::key::{NOTE_TAG, PERSON_RECORD_ID};
use crate::record::{FieldMap, RecordKey, RecordKind, RecordMap};
use crate::tree::{Element, PfifXmlTree};
use crate::{log_op_end, log_op_start};
use pfif_core_types::schema::EVENT_DEFECT;
use serde::{Deserialize, Serialize};
use std::collections::btree_map::Entry;
use std::collections::BTreeSet;
use std::fmt;
use std::time::Instant;

/// Options controlling which fields reach the canonical map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanonicalizeOptions {
    /// Fields dropped from every record (including an injected `person_record_id`).
    pub ignore_fields: BTreeSet<String>,
    /// Treat a field with empty text as absent instead of as `""`.
    pub omit_blank_fields: bool,
}

impl CanonicalizeOptions {
    pub fn ignoring<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore_fields.extend(fields.into_iter().map(Into::into));
        self
    }

    pub fn with_omit_blank_fields(mut self, omit: bool) -> Self {
        self.omit_blank_fields = omit;
        self
    }

    fn keeps(&self, field: &str) -> bool {
        !self.ignore_fields.contains(field)
    }
}

/// A non-fatal problem found while canonicalizing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StructuralDefect {
    /// A record element has no (or an empty) id field and was skipped.
    MissingRecordId {
        record_kind: RecordKind,
        /// Position among the sibling elements of the same kind.
        index: usize,
        /// Id of the enclosing person for a nested note.
        parent_person_id: Option<String>,
    },
    /// Two records share a key; the later one was merged into the earlier.
    DuplicateRecord { key: RecordKey },
}

impl StructuralDefect {
    pub fn kind(&self) -> ExErrorKind {
        match self {
            StructuralDefect::MissingRecordId { .. } => ExErrorKind::MissingRecordId,
            StructuralDefect::DuplicateRecord { .. } => ExErrorKind::DuplicateRecord,
        }
    }

    /// Kind of the record the defect was found on.
    pub fn record_kind(&self) -> RecordKind {
        match self {
            StructuralDefect::MissingRecordId { record_kind, .. } => *record_kind,
            StructuralDefect::DuplicateRecord { key } => key.kind(),
        }
    }

    /// Id of the affected record; `None` when the id itself is missing.
    pub fn record_id(&self) -> Option<&str> {
        match self {
            StructuralDefect::MissingRecordId { .. } => None,
            StructuralDefect::DuplicateRecord { key } => Some(key.record_id()),
        }
    }
}

impl fmt::Display for StructuralDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructuralDefect::MissingRecordId {
                record_kind,
                index,
                parent_person_id,
            } => {
                write!(
                    f,
                    "Invalid PFIF XML: {} #{} is missing its {}",
                    record_kind,
                    index + 1,
                    record_kind.id_field()
                )?;
                if let Some(parent) = parent_person_id {
                    write!(f, " (nested in person {})", parent)?;
                }
                Ok(())
            }
            StructuralDefect::DuplicateRecord { key } => {
                write!(f, "Invalid PFIF XML: duplicate {}, fields merged", key)
            }
        }
    }
}

impl From<&StructuralDefect> for ExError {
    fn from(defect: &StructuralDefect) -> Self {
        let err = ExError::new(defect.kind())
            .with_op("canonicalize")
            .with_message(defect.to_string());
        match defect {
            StructuralDefect::DuplicateRecord { key } => err.with_entity_id(key.record_id()),
            StructuralDefect::MissingRecordId {
                parent_person_id: Some(parent),
                ..
            } => err.with_entity_id(parent.as_str()),
            StructuralDefect::MissingRecordId { .. } => err,
        }
    }
}

/// Canonical form of one document plus the defects met on the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Canonicalized {
    pub records: RecordMap,
    pub defects: Vec<StructuralDefect>,
}

/// Flatten a parsed document into a [`RecordMap`].
///
/// Persons are processed first (each followed by its nested notes), then
/// top-level notes. Never fails: problems are reported in
/// [`Canonicalized::defects`].
pub fn canonicalize(tree: &PfifXmlTree, options: &CanonicalizeOptions) -> Canonicalized {
    let start = Instant::now();
    log_op_start!("canonicalize");

    let mut builder = Builder {
        tree,
        options,
        out: Canonicalized::default(),
    };
    builder.add_records(tree.persons(), RecordKind::Person, None);
    builder.add_records(tree.top_level_notes(), RecordKind::Note, None);
    let out = builder.out;

    log_op_end!(
        "canonicalize",
        duration_ms = start.elapsed().as_millis() as u64,
        record_count = out.records.len(),
        defect_count = out.defects.len(),
    );
    out
}

struct Builder<'a> {
    tree: &'a PfifXmlTree,
    options: &'a CanonicalizeOptions,
    out: Canonicalized,
}

impl<'a> Builder<'a> {
    fn add_records<I>(&mut self, elements: I, kind: RecordKind, parent_person_id: Option<&str>)
    where
        I: Iterator<Item = &'a Element>,
    {
        for (index, element) in elements.enumerate() {
            let Some(record_id) = element.field_text(kind.id_field()) else {
                self.defect(StructuralDefect::MissingRecordId {
                    record_kind: kind,
                    index,
                    parent_person_id: parent_person_id.map(str::to_string),
                });
                continue;
            };

            let fields = self.fields_of(element, kind, parent_person_id);
            self.insert(RecordKey::new(record_id, kind), fields);

            if kind == RecordKind::Person {
                self.add_records(self.tree.notes_of(element), RecordKind::Note, Some(record_id));
            }
        }
    }

    fn fields_of(
        &self,
        element: &Element,
        kind: RecordKind,
        parent_person_id: Option<&str>,
    ) -> FieldMap {
        let mut fields = FieldMap::new();

        // Written before the note's own fields, so an explicit
        // person_record_id inside the nested note still wins.
        if let Some(parent) = parent_person_id {
            if self.options.keeps(PERSON_RECORD_ID) {
                fields.insert(PERSON_RECORD_ID.to_string(), parent.to_string());
            }
        }

        for child in element.children() {
            let name = child.tag();
            if !self.options.keeps(name) || (kind == RecordKind::Person && name == NOTE_TAG) {
                continue;
            }
            let value = child.text().unwrap_or_default();
            if value.is_empty() && self.options.omit_blank_fields {
                continue;
            }
            fields.insert(name.to_string(), value.to_string());
        }
        fields
    }

    fn insert(&mut self, key: RecordKey, fields: FieldMap) {
        match self.out.records.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(fields);
            }
            Entry::Occupied(mut slot) => {
                slot.get_mut().extend(fields);
                let key = slot.key().clone();
                self.defect(StructuralDefect::DuplicateRecord { key });
            }
        }
    }

    fn defect(&mut self, defect: StructuralDefect) {
        let err = ExError::from(&defect);
        tracing::warn!(
            component = module_path!(),
            op = "canonicalize",
            event = EVENT_DEFECT,
            record_kind = %defect.record_kind(),
            record_id = defect.record_id(),
            err.code = err.code(),
            message = %defect,
        );
        self.out.defects.push(defect);
    }
}
