//! Persistent tabular store for the DRG source tables.
//!
//! Each source table lives in its own SQLite table and is replaced as a
//! whole whenever its file is ingested again.

mod error;
mod filter;
mod record;
mod store;

pub use error::{Result, StoreError};
pub use filter::RowFilter;
pub use record::{ColumnDef, SqlType, StoredRecord, case_cols, consumable_cols, disease_cols};
pub use store::TabularStore;
