//! Canonical record model
//!
//! A document is reduced to a [`RecordMap`]: one [`FieldMap`] per record,
//! keyed by a [`RecordKey`] that keeps persons and notes in disjoint key
//! spaces. Both maps are ordered so iteration (and therefore diff output)
//! is deterministic.

pub mod key;

use std::collections::BTreeMap;

pub use key::{change_record_ids, RecordKey, RecordKind};

/// Field name to field text for one record.
pub type FieldMap = BTreeMap<String, String>;

/// Canonical form of one document.
pub type RecordMap = BTreeMap<RecordKey, FieldMap>;
