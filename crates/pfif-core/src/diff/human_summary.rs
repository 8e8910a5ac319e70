//! Human-readable rendering of change messages.
//!
//! Three views over the same message sequence: a one-line summary with the
//! count per category, a listing grouped by record, and a flat listing.

use crate::diff::model::{Category, ChangeMessage, DiffSummary};
use crate::record::RecordKey;
use std::collections::HashMap;

/// Render the one-line summary, e.g.
/// `3 differences: 1 deleted record, 2 changed fields`.
///
/// Categories appear in a fixed order; zero counts are left out.
pub fn render_summary(messages: &[ChangeMessage]) -> String {
    let summary = DiffSummary::from_messages(messages);
    if summary.is_empty() {
        return "No differences".to_string();
    }

    let parts: Vec<String> = Category::ALL
        .iter()
        .filter_map(|category| match summary.count(*category) {
            0 => None,
            1 => Some(format!("1 {}", category.label().to_lowercase())),
            n => Some(format!("{} {}", n, category.plural())),
        })
        .collect();

    format!(
        "{} difference{}: {}",
        summary.total,
        if summary.total == 1 { "" } else { "s" },
        parts.join(", ")
    )
}

/// Render every message on its own line, in emission order.
pub fn render_flat(messages: &[ChangeMessage]) -> String {
    let mut out = String::new();
    for message in messages {
        out.push_str(&format!(
            "{}: {} {}{}\n",
            message.category.label(),
            message.record_kind,
            message.record_id,
            describe_field(message)
        ));
    }
    out
}

/// Render messages grouped under a `<kind> <id>` header per record.
///
/// Groups appear in order of first appearance; messages keep their relative
/// order inside a group.
pub fn render_grouped(messages: &[ChangeMessage]) -> String {
    let mut out = String::new();
    for (key, group) in group_by_record(messages) {
        out.push_str(&format!("{} {}\n", key.kind(), key.record_id()));
        for message in group {
            out.push_str(&format!(
                "  {}{}\n",
                message.category.label(),
                describe_field(message)
            ));
        }
    }
    out
}

/// Group messages by the record they are attributed to.
pub fn group_by_record(messages: &[ChangeMessage]) -> Vec<(RecordKey, Vec<&ChangeMessage>)> {
    let mut index: HashMap<RecordKey, usize> = HashMap::new();
    let mut groups: Vec<(RecordKey, Vec<&ChangeMessage>)> = Vec::new();
    for message in messages {
        let key = message.record_key();
        match index.get(&key) {
            Some(&i) => groups[i].1.push(message),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push((key, vec![message]));
            }
        }
    }
    groups
}

fn describe_field(message: &ChangeMessage) -> String {
    let mut out = String::new();
    if let Some(field) = &message.field {
        out.push_str(&format!(", field {}", field));
    }
    if let Some(extra) = &message.extra_data {
        out.push_str(&format!(": {}", extra));
    }
    out
}
