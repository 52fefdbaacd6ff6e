use std::collections::BTreeMap;

use crate::row::SopRow;

/// One entry of the symptom list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SymptomEntry {
    pub id: String,
    pub label: String,
}

impl SymptomEntry {
    /// Rendered list label. The search filter matches against this text.
    pub fn display(&self) -> String {
        format!("{} — {}", self.id, self.label)
    }
}

/// Distinct symptoms present in `rows`, sorted by id (byte order,
/// locale-agnostic). The label comes from the first row seen with each id;
/// first-seen wins if labels ever diverge, which is not validated.
///
/// A non-empty `filter` retains entries whose rendered label contains it
/// case-insensitively. No state is kept between calls: an empty filter
/// always restores the full sorted list.
pub fn list_symptoms(rows: &[SopRow], filter: &str) -> Vec<SymptomEntry> {
    let mut labels: BTreeMap<&str, &str> = BTreeMap::new();
    for row in rows {
        labels
            .entry(row.symptom_id.as_str())
            .or_insert(row.symptom_label.as_str());
    }
    let needle = filter.to_lowercase();
    labels
        .into_iter()
        .map(|(id, label)| SymptomEntry {
            id: id.to_string(),
            label: label.to_string(),
        })
        .filter(|entry| needle.is_empty() || entry.display().to_lowercase().contains(&needle))
        .collect()
}
