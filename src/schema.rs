//! Per-partition presentation schemas.
//!
//! Each partition of the data source carries its own ordered field layout.
//! The layout is a presentation contract: labels and order are reproduced
//! exactly in every rendering of a record from that partition.

use serde::{Deserialize, Serialize};

/// One presentation field: a user-facing label and the source column
/// it is read from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Label shown to users.
    pub label: String,
    /// Source column name. Defaults to the label when omitted.
    #[serde(default)]
    pub column: String,
}

impl FieldSpec {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            column: String::new(),
        }
    }

    /// The source column this field reads from.
    pub fn source_column(&self) -> &str {
        if self.column.is_empty() {
            &self.label
        } else {
            &self.column
        }
    }
}

/// Schema of one partition: its label (also the sheet or table name in
/// the source), the key column, and the ordered presentation fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartitionSchema {
    /// Partition label shown to users and looked up in the data source.
    pub name: String,
    /// Column holding the display name.
    #[serde(default = "default_key_column")]
    pub key_column: String,
    /// Ordered presentation fields.
    pub fields: Vec<FieldSpec>,
}

fn default_key_column() -> String {
    "Name".to_string()
}

impl PartitionSchema {
    pub fn new(name: &str, labels: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            key_column: default_key_column(),
            fields: labels.iter().map(|l| FieldSpec::new(l)).collect(),
        }
    }
}

/// Built-in partition schemas, in lookup priority order: North is the
/// override region, Center the fallback.
pub fn default_schemas() -> Vec<PartitionSchema> {
    vec![
        PartitionSchema::new(
            "North",
            &["Format", "Branch", "Manager", "DF", "DG", "Address", "Pin"],
        ),
        PartitionSchema::new(
            "Center",
            &["Format", "VSSB", "SSB", "Address", "Pin", "Group Director"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_spec_column_defaults_to_label() {
        let spec = FieldSpec::new("Address");
        assert_eq!(spec.source_column(), "Address");

        let spec = FieldSpec {
            label: "Manager".to_string(),
            column: "Store Manager".to_string(),
        };
        assert_eq!(spec.source_column(), "Store Manager");
    }

    #[test]
    fn test_default_schemas_priority_order() {
        let schemas = default_schemas();
        assert_eq!(schemas[0].name, "North");
        assert_eq!(schemas[1].name, "Center");
        assert_eq!(schemas[0].fields.len(), 7);
        assert_eq!(schemas[1].fields.len(), 6);
    }

    #[test]
    fn test_schema_deserializes_with_defaults() {
        let schema: PartitionSchema = toml::from_str(
            r#"
            name = "South"
            fields = [{ label = "Format" }, { label = "Address" }]
            "#,
        )
        .unwrap();
        assert_eq!(schema.key_column, "Name");
        assert_eq!(schema.fields[1].source_column(), "Address");
    }
}
