//! Trading point record type.

use std::collections::HashMap;

/// One trading point row from the data source.
///
/// The display name is the identity field; everything else is a
/// presentational attribute copied verbatim from the source cell.
/// Blank cells are simply absent from `fields`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    /// Name as rendered to users (title form of the trimmed source name).
    pub display_name: String,
    /// Attribute cells by source column name.
    pub fields: HashMap<String, String>,
}

impl Record {
    /// Raw cell value for a source column, if the cell was non-blank.
    pub fn field(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(|s| s.as_str())
    }
}
