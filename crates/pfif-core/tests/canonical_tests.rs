//! Canonicalization scenarios: nesting equivalence, field filtering, determinism.

mod common;

use common::{note, person, pfif_doc, records};
use pfif_core::diff::{diff_records, DiffOptions};
use pfif_core::{canonicalize, CanonicalizeOptions, PfifXmlTree, RecordKey};

#[test]
fn test_canonicalize_twice_is_diff_empty() {
    let xml = pfif_doc(&format!(
        "{}{}",
        person(
            "example.org/p1",
            &[("full_name", "Jane Doe"), ("age", "33")],
            &[note("example.org/n1", &[("text", "Seen downtown")])]
        ),
        note("example.org/n2", &[("person_record_id", "example.org/p1")])
    ));
    let tree = PfifXmlTree::parse(&xml).unwrap();
    let options = CanonicalizeOptions::default();

    let first = canonicalize(&tree, &options);
    let second = canonicalize(&tree, &options);

    assert_eq!(first, second);
    assert!(diff_records(&first.records, &second.records, &DiffOptions::default()).is_empty());
}

#[test]
fn test_nested_and_top_level_note_canonicalize_identically() {
    let nested = pfif_doc(&person(
        "example.org/p1",
        &[("full_name", "Jane")],
        &[note(
            "example.org/n1",
            &[("author_name", "Bob"), ("text", "Found")],
        )],
    ));
    let flat = pfif_doc(&format!(
        "{}{}",
        person("example.org/p1", &[("full_name", "Jane")], &[]),
        note(
            "example.org/n1",
            &[
                ("person_record_id", "example.org/p1"),
                ("author_name", "Bob"),
                ("text", "Found"),
            ],
        )
    ));

    let options = CanonicalizeOptions::default();
    assert_eq!(records(&nested, &options), records(&flat, &options));
}

#[test]
fn test_field_order_is_irrelevant() {
    let a = pfif_doc(&person("p1", &[("full_name", "Jane"), ("age", "3")], &[]));
    let b = pfif_doc(&person("p1", &[("age", "3"), ("full_name", "Jane")], &[]));

    let options = CanonicalizeOptions::default();
    assert_eq!(records(&a, &options), records(&b, &options));
}

#[test]
fn test_person_and_note_with_same_raw_id_are_distinct_records() {
    let xml = pfif_doc(&format!(
        "{}{}",
        person("example.org/1", &[("full_name", "Jane")], &[]),
        note("example.org/1", &[("text", "hi")])
    ));
    let map = records(&xml, &CanonicalizeOptions::default());

    assert_eq!(map.len(), 2);
    assert_eq!(map[&RecordKey::person("example.org/1")]["full_name"], "Jane");
    assert_eq!(map[&RecordKey::note("example.org/1")]["text"], "hi");
}

#[test]
fn test_ignored_fields_never_reach_the_map() {
    let xml = pfif_doc(&person(
        "p1",
        &[("full_name", "Jane"), ("photo_url", "http://x/p.jpg")],
        &[note("n1", &[("photo_url", "http://x/n.jpg")])],
    ));
    let map = records(
        &xml,
        &CanonicalizeOptions::default().ignoring(["photo_url"]),
    );

    assert!(map.values().all(|fields| !fields.contains_key("photo_url")));
    assert_eq!(map[&RecordKey::person("p1")]["full_name"], "Jane");
}

#[test]
fn test_whitespace_only_text_is_not_blank() {
    let xml = pfif_doc(&person("p1", &[("description", "  ")], &[]));
    let map = records(
        &xml,
        &CanonicalizeOptions::default().with_omit_blank_fields(true),
    );
    assert_eq!(map[&RecordKey::person("p1")]["description"], "  ");
}

#[test]
fn test_notes_nested_deeper_than_a_person_child_are_not_records() {
    // Only direct children of a person are nested notes.
    let xml = pfif_doc(
        "<pfif:person><pfif:person_record_id>p1</pfif:person_record_id>\
         <pfif:other><pfif:note><pfif:note_record_id>n1</pfif:note_record_id>\
         </pfif:note></pfif:other></pfif:person>",
    );
    let map = records(&xml, &CanonicalizeOptions::default());

    assert_eq!(map.len(), 1);
    assert!(!map.contains_key(&RecordKey::note("n1")));
    assert_eq!(map[&RecordKey::person("p1")]["other"], "");
}
