//! CSV directory source: one `<partition>.csv` file per partition.
//!
//! Mostly useful for fixtures and small deployments where maintaining a
//! workbook is overkill.

use std::path::{Path, PathBuf};

use csv::ReaderBuilder;

use super::{DataSourceError, Row, TableSource};

/// Table source backed by a directory of CSV files.
pub struct CsvSource {
    dir: PathBuf,
}

impl CsvSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl TableSource for CsvSource {
    fn read_partition(&self, name: &str) -> Result<Vec<Row>, DataSourceError> {
        if !self.dir.exists() {
            return Err(DataSourceError::NotFound(self.dir.display().to_string()));
        }

        let path = self.dir.join(format!("{name}.csv"));
        if !path.exists() {
            return Err(DataSourceError::MissingPartition(name.to_string()));
        }

        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .from_path(&path)
            .map_err(|e| DataSourceError::Open(e.to_string()))?;

        let header: Vec<String> = reader
            .headers()
            .map_err(|e| DataSourceError::Read {
                partition: name.to_string(),
                message: e.to_string(),
            })?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut out = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| DataSourceError::Read {
                partition: name.to_string(),
                message: e.to_string(),
            })?;

            let mut row = Row::new();
            for (i, value) in record.iter().enumerate() {
                let Some(column) = header.get(i) else { break };
                let value = value.trim();
                if column.is_empty() || value.is_empty() {
                    continue;
                }
                row.insert(column.clone(), value.to_string());
            }
            if !row.is_empty() {
                out.push(row);
            }
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_partition(dir: &Path, name: &str, contents: &str) {
        fs::write(dir.join(format!("{name}.csv")), contents).unwrap();
    }

    #[test]
    fn test_reads_rows_by_column_name() {
        let dir = tempfile::tempdir().unwrap();
        write_partition(
            dir.path(),
            "North",
            "Name,Format,Address\nГульден,Lite,Main St 1\nЧалка,,Side St 9\n",
        );

        let source = CsvSource::new(dir.path());
        let rows = source.read_partition("North").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("Name").unwrap(), "Гульден");
        assert_eq!(rows[0].get("Format").unwrap(), "Lite");
        // Blank cell is absent, not an empty string
        assert!(rows[1].get("Format").is_none());
        assert_eq!(rows[1].get("Address").unwrap(), "Side St 9");
    }

    #[test]
    fn test_missing_partition_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = CsvSource::new(dir.path());
        assert!(matches!(
            source.read_partition("West"),
            Err(DataSourceError::MissingPartition(_))
        ));
    }

    #[test]
    fn test_missing_directory() {
        let source = CsvSource::new("/nonexistent/points");
        assert!(matches!(
            source.read_partition("North"),
            Err(DataSourceError::NotFound(_))
        ));
    }

    #[test]
    fn test_short_rows_are_tolerated() {
        let dir = tempfile::tempdir().unwrap();
        write_partition(dir.path(), "North", "Name,Format,Address\nАвинда,Super\n");

        let source = CsvSource::new(dir.path());
        let rows = source.read_partition("North").unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].get("Address").is_none());
    }
}
