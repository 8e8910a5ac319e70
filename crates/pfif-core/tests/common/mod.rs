use pfif_core::{canonicalize, CanonicalizeOptions, PfifXmlTree, RecordMap};

/// Wrap record elements in a PFIF 1.4 root.
#[allow(dead_code)]
pub fn pfif_doc(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<pfif:pfif xmlns:pfif="http://zesty.ca/pfif/1.4">
{}
</pfif:pfif>"#,
        body
    )
}

/// A person element with the given id and extra `(field, value)` children.
#[allow(dead_code)]
pub fn person(id: &str, fields: &[(&str, &str)], notes: &[String]) -> String {
    let mut out = format!(
        "<pfif:person><pfif:person_record_id>{}</pfif:person_record_id>",
        id
    );
    for (name, value) in fields {
        out.push_str(&format!("<pfif:{0}>{1}</pfif:{0}>", name, value));
    }
    for note in notes {
        out.push_str(note);
    }
    out.push_str("</pfif:person>");
    out
}

/// A note element with the given id and extra `(field, value)` children.
#[allow(dead_code)]
pub fn note(id: &str, fields: &[(&str, &str)]) -> String {
    let mut out = format!(
        "<pfif:note><pfif:note_record_id>{}</pfif:note_record_id>",
        id
    );
    for (name, value) in fields {
        out.push_str(&format!("<pfif:{0}>{1}</pfif:{0}>", name, value));
    }
    out.push_str("</pfif:note>");
    out
}

/// Parse and canonicalize, panicking on malformed test input.
#[allow(dead_code)]
pub fn records(xml: &str, options: &CanonicalizeOptions) -> RecordMap {
    let tree = PfifXmlTree::parse(xml).expect("test document should parse");
    canonicalize(&tree, options).records
}
