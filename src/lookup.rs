//! Query resolution: exact match with fixed partition priority, and
//! substring suggestions on miss.
//!
//! `resolve` is a pure function of (store snapshot, raw query); every
//! outcome is a normal return value, so the per-message path carries no
//! error branch at all.

use crate::models::Record;
use crate::schema::PartitionSchema;
use crate::store::RecordStore;
use crate::utils::normalize;

/// Uniform fallback rendered for missing, blank, or non-numeric cells.
pub const NOT_SPECIFIED: &str = "not specified";

/// Maximum number of suggestions offered on a miss.
pub const MAX_SUGGESTIONS: usize = 5;

/// Outcome of resolving one user query against a store snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Empty or whitespace-only input; callers render a prompt.
    EmptyQuery,
    /// Exact match in exactly one partition.
    Found(RecordCard),
    /// No exact match anywhere.
    Miss(MissReport),
}

/// Transport-agnostic presentation of a matched record.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordCard {
    pub display_name: String,
    pub partition: String,
    /// Ordered (label, value) pairs following the partition schema.
    /// Values are never blank; absent cells carry [`NOT_SPECIFIED`].
    pub fields: Vec<(String, String)>,
}

/// Miss payload: the echoed query plus up to [`MAX_SUGGESTIONS`] names.
#[derive(Debug, Clone, PartialEq)]
pub struct MissReport {
    pub query: String,
    pub suggestions: Vec<String>,
}

/// Resolve a raw query against a store snapshot.
///
/// Partitions are searched in their configured priority order and the
/// first exact match wins; results from different partitions are never
/// merged or ranked.
pub fn resolve(store: &RecordStore, raw_query: &str) -> Resolution {
    let key = normalize(raw_query);
    if key.is_empty() {
        return Resolution::EmptyQuery;
    }

    for partition in store.partitions() {
        if let Some(record) = partition.get(&key) {
            return Resolution::Found(present(record, partition.schema()));
        }
    }

    Resolution::Miss(MissReport {
        query: raw_query.trim().to_string(),
        suggestions: suggestions(store, &key),
    })
}

/// Lay a record out according to its partition schema.
fn present(record: &Record, schema: &PartitionSchema) -> RecordCard {
    let fields = schema
        .fields
        .iter()
        .map(|f| (f.label.clone(), field_value(record, f.source_column())))
        .collect();

    RecordCard {
        display_name: record.display_name.clone(),
        partition: schema.name.clone(),
        fields,
    }
}

fn field_value(record: &Record, column: &str) -> String {
    match record.field(column) {
        Some(v) if !v.trim().is_empty() && !v.trim().eq_ignore_ascii_case("nan") => {
            v.to_string()
        }
        _ => NOT_SPECIFIED.to_string(),
    }
}

/// Display names whose normalized key contains the query as a substring,
/// deduplicated and sorted lexicographically, capped at
/// [`MAX_SUGGESTIONS`].
fn suggestions(store: &RecordStore, normalized_query: &str) -> Vec<String> {
    let mut names: Vec<String> = store
        .partitions()
        .iter()
        .flat_map(|p| p.entries())
        .filter(|(key, _)| key.contains(normalized_query))
        .map(|(_, record)| record.display_name.clone())
        .collect();

    names.sort();
    names.dedup();
    names.truncate(MAX_SUGGESTIONS);
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::default_schemas;
    use crate::source::{DataSourceError, Row, TableSource};
    use std::collections::HashMap;

    struct MemorySource(HashMap<String, Vec<Row>>);

    impl TableSource for MemorySource {
        fn read_partition(&self, name: &str) -> Result<Vec<Row>, DataSourceError> {
            self.0
                .get(name)
                .cloned()
                .ok_or_else(|| DataSourceError::MissingPartition(name.to_string()))
        }
    }

    fn row(cells: &[(&str, &str)]) -> Row {
        cells
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn store(north: Vec<Row>, center: Vec<Row>) -> RecordStore {
        let mut partitions = HashMap::new();
        partitions.insert("North".to_string(), north);
        partitions.insert("Center".to_string(), center);
        RecordStore::load(&MemorySource(partitions), &default_schemas()).unwrap()
    }

    fn sample_store() -> RecordStore {
        store(
            vec![
                row(&[
                    ("Name", "Гульден"),
                    ("Format", "Lite"),
                    ("Address", "Main St 1"),
                ]),
                row(&[("Name", "Чалка"), ("Format", "Super"), ("Pin", "4821")]),
            ],
            vec![
                row(&[("Name", "Джонка"), ("Format", "Mini")]),
                row(&[("Name", "Бакингем"), ("VSSB", "Ivanov")]),
            ],
        )
    }

    #[test]
    fn test_resolve_case_and_whitespace_variants() {
        let store = sample_store();
        for query in ["  Гульден ", "гульден", "ГУЛЬДЕН"] {
            match resolve(&store, query) {
                Resolution::Found(card) => {
                    assert_eq!(card.display_name, "Гульден");
                    assert_eq!(card.partition, "North");
                }
                other => panic!("expected Found for {query:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_found_card_follows_schema_order_with_fallback() {
        let store = sample_store();
        let Resolution::Found(card) = resolve(&store, "гульден") else {
            panic!("expected Found");
        };

        let labels: Vec<&str> = card.fields.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Format", "Branch", "Manager", "DF", "DG", "Address", "Pin"]
        );
        assert_eq!(card.fields[0].1, "Lite");
        assert_eq!(card.fields[5].1, "Main St 1");
        // Unset Manager renders the uniform fallback, never an empty string
        assert_eq!(card.fields[2].1, NOT_SPECIFIED);
    }

    #[test]
    fn test_partition_priority_north_wins() {
        let store = store(
            vec![row(&[("Name", "Гульден"), ("Format", "North format")])],
            vec![row(&[("Name", "Гульден"), ("Format", "Center format")])],
        );

        let Resolution::Found(card) = resolve(&store, "гульден") else {
            panic!("expected Found");
        };
        assert_eq!(card.partition, "North");
        assert_eq!(card.fields[0].1, "North format");
    }

    #[test]
    fn test_center_fallback_uses_center_schema() {
        let store = sample_store();
        let Resolution::Found(card) = resolve(&store, "бакингем") else {
            panic!("expected Found");
        };
        assert_eq!(card.partition, "Center");
        let labels: Vec<&str> = card.fields.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Format", "VSSB", "SSB", "Address", "Pin", "Group Director"]
        );
        assert_eq!(card.fields[1].1, "Ivanov");
    }

    #[test]
    fn test_empty_query() {
        let store = sample_store();
        assert_eq!(resolve(&store, ""), Resolution::EmptyQuery);
        assert_eq!(resolve(&store, "   \t "), Resolution::EmptyQuery);
    }

    #[test]
    fn test_miss_with_substring_suggestions() {
        let store = sample_store();
        let Resolution::Miss(miss) = resolve(&store, "  ка ") else {
            panic!("expected Miss");
        };
        assert_eq!(miss.query, "ка");
        // "ка" is contained in чалка and джонка, sorted by display name
        assert_eq!(miss.suggestions, vec!["Джонка", "Чалка"]);
    }

    #[test]
    fn test_miss_without_suggestions() {
        let store = sample_store();
        let Resolution::Miss(miss) = resolve(&store, "zzz-no-such-name") else {
            panic!("expected Miss");
        };
        assert!(miss.suggestions.is_empty());
    }

    #[test]
    fn test_suggestions_deduplicated_and_capped() {
        let north: Vec<Row> = (1..=7)
            .map(|i| row(&[("Name", format!("Точка {i}").as_str())]))
            .collect();
        // Same name in both partitions must appear once
        let center = vec![row(&[("Name", "Точка 1")])];
        let store = store(north, center);

        let Resolution::Miss(miss) = resolve(&store, "точка") else {
            panic!("expected Miss");
        };
        assert_eq!(miss.suggestions.len(), MAX_SUGGESTIONS);
        let mut deduped = miss.suggestions.clone();
        deduped.dedup();
        assert_eq!(deduped, miss.suggestions);
        for name in &miss.suggestions {
            assert!(normalize(name).contains("точка"));
        }
    }

    #[test]
    fn test_nan_cell_renders_not_specified() {
        let store = store(
            vec![row(&[("Name", "Гульден"), ("Manager", "NaN")])],
            vec![],
        );
        let Resolution::Found(card) = resolve(&store, "гульден") else {
            panic!("expected Found");
        };
        assert_eq!(card.fields[2].1, NOT_SPECIFIED);
    }
}
