//! Excel workbook source (xlsx, xls, xlsb, ods) via calamine.
//!
//! One worksheet per partition; the first row is the header.

use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Data, Reader};

use super::{DataSourceError, Row, TableSource};

/// Table source backed by a single Excel workbook.
pub struct XlsxSource {
    path: PathBuf,
}

impl XlsxSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Render one cell as trimmed text. Whole floats print without a
/// trailing `.0` so pins and numeric codes keep their spreadsheet
/// appearance. Blank, NaN, and error cells yield `None`.
fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) => {
            let s = s.trim();
            if s.is_empty() || s.eq_ignore_ascii_case("nan") {
                None
            } else {
                Some(s.to_string())
            }
        }
        Data::Float(n) => {
            if n.is_nan() {
                None
            } else if n.fract() == 0.0 && n.abs() < 1e15 {
                Some(format!("{}", *n as i64))
            } else {
                Some(n.to_string())
            }
        }
        Data::Int(n) => Some(n.to_string()),
        Data::Bool(b) => Some(if *b { "TRUE" } else { "FALSE" }.to_string()),
        other => Some(other.to_string()),
    }
}

impl TableSource for XlsxSource {
    fn read_partition(&self, name: &str) -> Result<Vec<Row>, DataSourceError> {
        if !self.path.exists() {
            return Err(DataSourceError::NotFound(self.path.display().to_string()));
        }

        let mut workbook = open_workbook_auto(&self.path)
            .map_err(|e| DataSourceError::Open(e.to_string()))?;

        if !workbook.sheet_names().iter().any(|s| s == name) {
            return Err(DataSourceError::MissingPartition(name.to_string()));
        }

        let range = workbook
            .worksheet_range(name)
            .map_err(|e| DataSourceError::Read {
                partition: name.to_string(),
                message: e.to_string(),
            })?;

        let mut rows = range.rows();
        let header: Vec<String> = match rows.next() {
            Some(cells) => cells
                .iter()
                .map(|c| cell_text(c).unwrap_or_default())
                .collect(),
            None => return Ok(Vec::new()),
        };

        let mut out = Vec::new();
        for cells in rows {
            let mut row = Row::new();
            for (i, cell) in cells.iter().enumerate() {
                let Some(column) = header.get(i) else { break };
                if column.is_empty() {
                    continue;
                }
                if let Some(text) = cell_text(cell) {
                    row.insert(column.clone(), text);
                }
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

    #[test]
    fn test_missing_file_is_not_found() {
        let source = XlsxSource::new("/nonexistent/points.xlsx");
        match source.read_partition("North") {
            Err(DataSourceError::NotFound(path)) => {
                assert!(path.contains("points.xlsx"));
            }
            other => panic!("expected NotFound, got {:?}", other.map(|r| r.len())),
        }
    }

    #[test]
    fn test_cell_text_rendering() {
        assert_eq!(cell_text(&Data::Empty), None);
        assert_eq!(cell_text(&Data::String("  ".to_string())), None);
        assert_eq!(cell_text(&Data::String("nan".to_string())), None);
        assert_eq!(
            cell_text(&Data::String(" Main St 1 ".to_string())),
            Some("Main St 1".to_string())
        );
        // Whole floats lose the trailing .0 (spreadsheet pins come in as floats)
        assert_eq!(cell_text(&Data::Float(4821.0)), Some("4821".to_string()));
        assert_eq!(cell_text(&Data::Float(2.5)), Some("2.5".to_string()));
        assert_eq!(cell_text(&Data::Float(f64::NAN)), None);
        assert_eq!(cell_text(&Data::Int(7)), Some("7".to_string()));
    }
}
