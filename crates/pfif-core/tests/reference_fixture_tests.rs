//! Comparing documents against flat reference fixtures and files on disk.

mod common;

use common::{note, person, pfif_doc, records};
use pfif_core::diff::{diff_files, diff_records, Category, DiffOptions};
use pfif_core::{change_record_ids, CanonicalizeOptions, FieldMap, PfifDiffError, PipelineOptions};
use std::collections::BTreeMap;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_reference_fixture_matches_canonical_document() {
    let xml = pfif_doc(&person(
        "example.org/person.1",
        &[("full_name", "Jane")],
        &[note("example.org/n1", &[("text", "ok")])],
    ));

    let reference: BTreeMap<String, FieldMap> = serde_json::from_str(
        r#"{
            "example.org/person.1": {
                "person_record_id": "example.org/person.1",
                "full_name": "Jane"
            },
            "example.org/n1": {
                "note_record_id": "example.org/n1",
                "person_record_id": "example.org/person.1",
                "text": "ok"
            }
        }"#,
    )
    .unwrap();

    let expected = change_record_ids(reference);
    let actual = records(&xml, &CanonicalizeOptions::default());

    assert!(diff_records(&expected, &actual, &DiffOptions::default()).is_empty());
}

#[test]
fn test_diff_files_reads_both_documents() {
    let dir = TempDir::new().unwrap();
    let a = dir.path().join("a.xml");
    let b = dir.path().join("b.xml");
    fs::write(&a, pfif_doc(&person("p1", &[("age", "30")], &[]))).unwrap();
    fs::write(&b, pfif_doc(&person("p1", &[("age", "31")], &[]))).unwrap();

    let diff = diff_files(&[&a, &b], &PipelineOptions::default()).unwrap();

    assert_eq!(diff.messages.len(), 1);
    assert_eq!(diff.messages[0].category, Category::ChangedField);
    assert_eq!(diff.summary().count(Category::ChangedField), 1);
}

#[test]
fn test_diff_files_reports_unreadable_path() {
    let dir = TempDir::new().unwrap();
    let a = dir.path().join("a.xml");
    let missing = dir.path().join("missing.xml");
    fs::write(&a, pfif_doc("")).unwrap();

    let err = diff_files(&[&a, &missing], &PipelineOptions::default()).unwrap_err();

    match err {
        PfifDiffError::Io { path, .. } => assert!(path.ends_with("missing.xml")),
        other => panic!("expected Io error, got {:?}", other),
    }
}
