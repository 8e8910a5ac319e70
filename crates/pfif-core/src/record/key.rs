//! Record key space
//!
//! Person and note identifiers come from independent namespaces and may be
//! textually equal, so a key carries its kind alongside the raw identifier.

use crate::record::{FieldMap, RecordMap};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Tag name of a person element.
pub const PERSON_TAG: &str = "person";
/// Tag name of a note element.
pub const NOTE_TAG: &str = "note";
/// Identifier field of a person record.
pub const PERSON_RECORD_ID: &str = "person_record_id";
/// Identifier field of a note record.
pub const NOTE_RECORD_ID: &str = "note_record_id";

/// The two record kinds a PFIF document holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Person,
    Note,
}

impl RecordKind {
    /// Element tag for records of this kind.
    pub fn tag(&self) -> &'static str {
        match self {
            RecordKind::Person => PERSON_TAG,
            RecordKind::Note => NOTE_TAG,
        }
    }

    /// Name of the child field holding the record identifier.
    pub fn id_field(&self) -> &'static str {
        match self {
            RecordKind::Person => PERSON_RECORD_ID,
            RecordKind::Note => NOTE_RECORD_ID,
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Composite key of a record in a [`RecordMap`].
///
/// Ordering puts every person before every note, then orders by identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecordKey {
    Person(String),
    Note(String),
}

impl RecordKey {
    pub fn new(record_id: impl Into<String>, kind: RecordKind) -> Self {
        match kind {
            RecordKind::Person => RecordKey::Person(record_id.into()),
            RecordKind::Note => RecordKey::Note(record_id.into()),
        }
    }

    pub fn person(record_id: impl Into<String>) -> Self {
        RecordKey::Person(record_id.into())
    }

    pub fn note(record_id: impl Into<String>) -> Self {
        RecordKey::Note(record_id.into())
    }

    /// The raw identifier this key was built from.
    pub fn record_id(&self) -> &str {
        match self {
            RecordKey::Person(id) | RecordKey::Note(id) => id,
        }
    }

    pub fn kind(&self) -> RecordKind {
        match self {
            RecordKey::Person(_) => RecordKind::Person,
            RecordKey::Note(_) => RecordKind::Note,
        }
    }

    pub fn is_person(&self) -> bool {
        matches!(self, RecordKey::Person(_))
    }

    /// Split the key back into kind and raw identifier.
    pub fn into_parts(self) -> (RecordKind, String) {
        match self {
            RecordKey::Person(id) => (RecordKind::Person, id),
            RecordKey::Note(id) => (RecordKind::Note, id),
        }
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind(), self.record_id())
    }
}

/// Error returned when a string is not of the form `person:<id>` or `note:<id>`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("record key must start with `person:` or `note:`, got `{0}`")]
pub struct ParseRecordKeyError(pub String);

impl FromStr for RecordKey {
    type Err = ParseRecordKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(id) = s.strip_prefix("person:") {
            Ok(RecordKey::person(id))
        } else if let Some(id) = s.strip_prefix("note:") {
            Ok(RecordKey::note(id))
        } else {
            Err(ParseRecordKeyError(s.to_string()))
        }
    }
}

impl Serialize for RecordKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RecordKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Re-key a reference map written against raw identifiers.
///
/// Reference fixtures name their records by raw id only; a record is taken
/// to be a person when its id contains `"person"`, otherwise a note. The id
/// itself is kept verbatim.
pub fn change_record_ids<I>(reference: I) -> RecordMap
where
    I: IntoIterator<Item = (String, FieldMap)>,
{
    reference
        .into_iter()
        .map(|(record_id, fields)| {
            let kind = if record_id.contains(PERSON_TAG) {
                RecordKind::Person
            } else {
                RecordKind::Note
            };
            (RecordKey::new(record_id, kind), fields)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_same_raw_id_different_kind_do_not_collide() {
        let p = RecordKey::person("example.org/1");
        let n = RecordKey::note("example.org/1");
        assert_ne!(p, n);
        assert_eq!(p.record_id(), n.record_id());
    }

    #[test]
    fn test_persons_order_before_notes() {
        assert!(RecordKey::person("z") < RecordKey::note("a"));
        assert!(RecordKey::note("a") < RecordKey::note("b"));
    }

    #[test]
    fn test_display_and_parse() {
        let key = RecordKey::note("example.org/n:1");
        assert_eq!(key.to_string(), "note:example.org/n:1");
        assert_eq!("note:example.org/n:1".parse::<RecordKey>().unwrap(), key);
        assert!("example.org/1".parse::<RecordKey>().is_err());
    }

    #[test]
    fn test_change_record_ids_infers_kind_from_raw_key() {
        let mut reference: BTreeMap<String, FieldMap> = BTreeMap::new();
        reference.insert("example.org/person.1".to_string(), FieldMap::new());
        reference.insert("example.org/n1".to_string(), FieldMap::new());

        let keyed = change_record_ids(reference);

        assert!(keyed.contains_key(&RecordKey::person("example.org/person.1")));
        assert!(keyed.contains_key(&RecordKey::note("example.org/n1")));
        assert_eq!(keyed.len(), 2);
    }
}
