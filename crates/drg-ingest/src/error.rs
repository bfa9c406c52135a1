//! Error types for DRG data ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort an ingestion.
///
/// Value-level problems never end up here; they degrade to missing values
/// and are reported as [`CoercionWarning`](crate::CoercionWarning)s.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Input file not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Extension is not a supported spreadsheet format.
    #[error("unsupported file format '{extension}': {path}")]
    UnsupportedFormat { path: PathBuf, extension: String },

    // === Parsing Errors ===
    /// Workbook could not be opened.
    #[error("failed to open workbook {path}: {message}")]
    Workbook { path: PathBuf, message: String },

    /// A worksheet could not be read.
    #[error("failed to read sheet '{sheet}' in {path}: {message}")]
    SheetRead {
        path: PathBuf,
        sheet: String,
        message: String,
    },

    /// Failed to parse a CSV file.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    // === Schema Errors ===
    /// Required column absent from the uploaded table.
    #[error("required column '{column}' not found in {origin}")]
    MissingColumn { column: String, origin: String },

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl IngestError {
    /// True for the schema error class: a required column is absent.
    pub fn is_schema_error(&self) -> bool {
        matches!(self, Self::MissingColumn { .. })
    }
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::MissingColumn {
            column: "名称".to_string(),
            origin: "disease.xlsx".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "required column '名称' not found in disease.xlsx"
        );
        assert!(err.is_schema_error());
    }

    #[test]
    fn test_error_from_polars() {
        let polars_err = polars::prelude::PolarsError::ColumnNotFound("test".into());
        let ingest_err: IngestError = polars_err.into();
        assert!(matches!(ingest_err, IngestError::DataFrame { .. }));
        assert!(!ingest_err.is_schema_error());
    }
}
