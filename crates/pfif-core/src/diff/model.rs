//! Diff output types.
//!
//! All types implement `Debug, Clone, Serialize, Deserialize, PartialEq`.
//! Collections use `BTreeMap` and `Vec` in emission order for deterministic
//! serialization.

use crate::canonical::StructuralDefect;
use crate::record::{RecordKey, RecordKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Classification of one reported difference.
///
/// Declaration order is the order used by summaries.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    /// Record present in A, absent from B
    DeletedRecord,
    /// Record absent from A, present in B
    AddedRecord,
    /// Field present in A's record, absent from B's
    DeletedField,
    /// Field absent from A's record, present in B's
    AddedField,
    /// Field present on both sides with different values
    ChangedField,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::DeletedRecord,
        Category::AddedRecord,
        Category::DeletedField,
        Category::AddedField,
        Category::ChangedField,
    ];

    /// Sentence-case label used in listings.
    pub fn label(&self) -> &'static str {
        match self {
            Category::DeletedRecord => "Deleted record",
            Category::AddedRecord => "Added record",
            Category::DeletedField => "Deleted field",
            Category::AddedField => "Added field",
            Category::ChangedField => "Changed field",
        }
    }

    /// Lower-case plural used in the summary line.
    pub fn plural(&self) -> &'static str {
        match self {
            Category::DeletedRecord => "deleted records",
            Category::AddedRecord => "added records",
            Category::DeletedField => "deleted fields",
            Category::AddedField => "added fields",
            Category::ChangedField => "changed fields",
        }
    }

    pub fn is_record_level(&self) -> bool {
        matches!(self, Category::DeletedRecord | Category::AddedRecord)
    }
}

/// One reported difference, attributable to a record and possibly a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeMessage {
    pub category: Category,
    pub record_kind: RecordKind,
    pub record_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Free text payload, e.g. `A:"old" is now B:"new"` for changed fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_data: Option<String>,
}

impl ChangeMessage {
    pub fn new(category: Category, key: &RecordKey) -> Self {
        Self {
            category,
            record_kind: key.kind(),
            record_id: key.record_id().to_string(),
            field: None,
            extra_data: None,
        }
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn with_extra_data(mut self, extra_data: impl Into<String>) -> Self {
        self.extra_data = Some(extra_data.into());
        self
    }

    /// Rebuild the composite key this message is attributed to.
    pub fn record_key(&self) -> RecordKey {
        RecordKey::new(self.record_id.clone(), self.record_kind)
    }
}

/// Per-category message counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSummary {
    pub total: usize,
    pub counts: BTreeMap<Category, usize>,
}

impl DiffSummary {
    pub fn from_messages(messages: &[ChangeMessage]) -> Self {
        let mut counts = BTreeMap::new();
        for message in messages {
            *counts.entry(message.category).or_insert(0) += 1;
        }
        Self {
            total: messages.len(),
            counts,
        }
    }

    pub fn count(&self, category: Category) -> usize {
        self.counts.get(&category).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

/// Result of diffing two documents end to end.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentDiff {
    pub messages: Vec<ChangeMessage>,
    /// Structural defects found in document A
    pub defects_a: Vec<StructuralDefect>,
    /// Structural defects found in document B
    pub defects_b: Vec<StructuralDefect>,
}

impl DocumentDiff {
    pub fn summary(&self) -> DiffSummary {
        DiffSummary::from_messages(&self.messages)
    }
}
