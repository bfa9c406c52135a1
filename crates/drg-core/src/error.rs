//! Error types for the analysis engine.

use drg_ingest::IngestError;
use drg_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    // === Layer Errors ===
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Store(#[from] StoreError),

    // === Aggregation Errors ===
    /// Rows of one group disagree on a field that must be shared.
    #[error("group '{group}' has conflicting {field} values: '{first}' and '{other}'")]
    InconsistentGroup {
        group: String,
        field: &'static str,
        first: String,
        other: String,
    },
}

impl CoreError {
    /// True when the error is a missing required column in a source file.
    pub fn is_schema_error(&self) -> bool {
        matches!(self, Self::Ingest(err) if err.is_schema_error())
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
