//! Error types for the tabular store.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Database file could not be opened.
    #[error("failed to open database {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A row's value count does not match the table's column list.
    #[error("row {row} of {table} has {actual} values, expected {expected}")]
    RowShape {
        table: &'static str,
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// A filter named a column the table does not have.
    #[error("unknown column '{column}' for table {table}")]
    UnknownColumn {
        table: &'static str,
        column: String,
    },
}

pub type Result<T> = std::result::Result<T, StoreError>;
