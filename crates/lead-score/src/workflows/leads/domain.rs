use std::collections::BTreeMap;

use serde::Serialize;

/// Canonical form of a column or attribute name: zero-width characters
/// removed and internal whitespace collapsed. Case is preserved.
pub fn normalize_column(name: &str) -> String {
    let cleaned = name.replace(['\u{feff}', '\u{200b}'], "");
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Trimmed form of a field value, or `None` when nothing but whitespace and
/// zero-width characters remain.
pub fn normalize_value(value: &str) -> Option<&str> {
    let trimmed =
        value.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}' || c == '\u{200b}');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// A single lead. Attributes without a value are simply absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LeadRecord {
    fields: BTreeMap<String, String>,
}

impl LeadRecord {
    /// Build a record from nullable fields. Null and blank values are dropped
    /// so that every lookup treats them the same way.
    pub fn from_fields<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, Option<V>)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let fields = fields
            .into_iter()
            .filter_map(|(name, value)| {
                let value = normalize_value(value?.as_ref())?.to_string();
                Some((normalize_column(name.as_ref()), value))
            })
            .collect();

        Self { fields }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Ordered leads together with the column schema of their source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSet {
    columns: Vec<String>,
    outcome_column: String,
    records: Vec<LeadRecord>,
}

impl RecordSet {
    pub fn new<C, S>(columns: C, outcome_column: &str, records: Vec<LeadRecord>) -> Self
    where
        C: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            columns: columns
                .into_iter()
                .map(|column| normalize_column(column.as_ref()))
                .collect(),
            outcome_column: normalize_column(outcome_column),
            records,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|column| column == name)
    }

    pub fn outcome_column(&self) -> &str {
        &self.outcome_column
    }

    pub fn has_outcome_column(&self) -> bool {
        self.has_column(&self.outcome_column)
    }

    pub fn outcome_label<'a>(&self, record: &'a LeadRecord) -> Option<&'a str> {
        record.get(&self.outcome_column)
    }

    pub fn records(&self) -> &[LeadRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&LeadRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_fields_drops_null_and_blank_values() {
        let record = LeadRecord::from_fields([
            ("Equity", Some("High Equity")),
            ("Occupancy", None),
            ("Property Type", Some("   ")),
        ]);

        assert_eq!(record.get("Equity"), Some("High Equity"));
        assert_eq!(record.get("Occupancy"), None);
        assert_eq!(record.get("Property Type"), None);
        assert_eq!(record.fields().count(), 1);
    }

    #[test]
    fn zero_width_padding_is_stripped_from_values() {
        let record = LeadRecord::from_fields([
            ("Size", Some("\u{200b}Small")),
            ("Equity", Some("\u{feff}\u{200b}")),
        ]);

        assert_eq!(record.get("Size"), Some("Small"));
        assert_eq!(record.get("Equity"), None);
        assert_eq!(normalize_value(" \u{200b}Large "), Some("Large"));
    }

    #[test]
    fn names_are_normalized_on_both_sides() {
        let record = LeadRecord::from_fields([(
            "\u{feff}Assigned  To - Ac Manager - name",
            Some("Dana"),
        )]);
        let set = RecordSet::new(
            ["\u{feff}Assigned  To - Ac Manager - name", "DEAL STATUS"],
            "DEAL STATUS",
            vec![record],
        );

        let column = normalize_column("Assigned  To - Ac Manager - name");
        assert_eq!(column, "Assigned To - Ac Manager - name");
        assert!(set.has_column(&column));
        assert_eq!(set.records()[0].get(&column), Some("Dana"));
    }

    #[test]
    fn outcome_column_presence_is_reported() {
        let set = RecordSet::new(["Equity"], "DEAL STATUS", Vec::new());
        assert!(!set.has_outcome_column());
        assert!(set.is_empty());
    }
}
