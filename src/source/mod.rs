//! Tabular data sources feeding the record store.
//!
//! The store never learns the storage format. It consumes rows through
//! the [`TableSource`] trait and maps cells by column name; whether the
//! bytes came from an Excel workbook or a directory of CSV files is the
//! source's business.

mod csv;
mod xlsx;

pub use csv::CsvSource;
pub use xlsx::XlsxSource;

use std::collections::HashMap;

use thiserror::Error;

/// One row of a partition table: non-blank cell values by column name.
pub type Row = HashMap<String, String>;

/// Errors raised while reading tabular data.
///
/// This is the only failure that crosses the core boundary; query
/// resolution outcomes are always normal return values.
#[derive(Debug, Error)]
pub enum DataSourceError {
    #[error("Data file not found: {0}")]
    NotFound(String),

    #[error("Failed to open data source: {0}")]
    Open(String),

    #[error("Partition '{0}' not found in data source")]
    MissingPartition(String),

    #[error("Partition '{partition}' is missing required column '{column}'")]
    MissingColumn { partition: String, column: String },

    #[error("Failed to read partition '{partition}': {message}")]
    Read { partition: String, message: String },
}

/// Reader abstraction over one tabular dataset with named partitions.
pub trait TableSource: Send + Sync {
    /// Read every row of the named partition. The first row of the
    /// underlying table supplies the column names; cells in columns
    /// beyond the header are dropped.
    fn read_partition(&self, name: &str) -> Result<Vec<Row>, DataSourceError>;
}
