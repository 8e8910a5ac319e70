use pfif_core::canonical::StructuralDefect;
use pfif_core::errors::{ExError, ExErrorKind, PfifDiffError};
use pfif_core::{RecordKey, RecordKind};

#[test]
fn test_not_enough_documents_is_invalid_input() {
    let ex_err: ExError = PfifDiffError::NotEnoughDocuments { supplied: 1 }.into();

    assert_eq!(ex_err.kind(), ExErrorKind::InvalidInput);
    assert_eq!(ex_err.code(), "ERR_INVALID_INPUT");
    assert_eq!(ex_err.message(), "Must provide two files to diff.");
}

#[test]
fn test_io_error_carries_path() {
    let ex_err: ExError = PfifDiffError::Io {
        path: "missing.xml".to_string(),
        message: "No such file or directory".to_string(),
    }
    .into();

    assert_eq!(ex_err.kind(), ExErrorKind::Io);
    assert_eq!(ex_err.path(), Some("missing.xml"));
    assert_eq!(ex_err.op(), Some("read_document"));
}

#[test]
fn test_xml_parse_error_kind() {
    let ex_err: ExError = PfifDiffError::XmlParse {
        position: 12,
        message: "unexpected end".to_string(),
    }
    .into();

    assert_eq!(ex_err.kind(), ExErrorKind::XmlParse);
    assert!(ex_err.message().contains("byte 12"));
}

#[test]
fn test_structural_defects_map_to_their_own_kinds() {
    let missing = StructuralDefect::MissingRecordId {
        record_kind: RecordKind::Note,
        index: 2,
        parent_person_id: None,
    };
    let duplicate = StructuralDefect::DuplicateRecord {
        key: RecordKey::person("p1"),
    };

    let missing_err = ExError::from(&missing);
    assert_eq!(missing_err.code(), "ERR_MISSING_RECORD_ID");
    assert_eq!(
        missing_err.message(),
        "Invalid PFIF XML: note #3 is missing its note_record_id"
    );

    let duplicate_err = ExError::from(&duplicate);
    assert_eq!(duplicate_err.code(), "ERR_DUPLICATE_RECORD");
    assert_eq!(duplicate_err.entity_id(), Some("p1"));
}

#[test]
fn test_serde_json_error_converts_to_serialization() {
    let err: PfifDiffError = serde_json::from_str::<u32>("not json").unwrap_err().into();
    assert!(matches!(err, PfifDiffError::Serialization { .. }));
    assert_eq!(ExError::from(err).kind(), ExErrorKind::Serialization);
}
