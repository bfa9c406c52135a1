//! DRG data ingestion.
//!
//! Reads the hospital exports (workbooks or CSV) into Polars frames,
//! validates the required columns, coerces numeric columns and extracts
//! typed records.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use drg_ingest::{read_consumable_files, read_disease_file};
//!
//! let diseases = read_disease_file(Path::new("病种详情.xlsx"))?;
//! let usage = read_consumable_files(&["耗材1.xlsx".into(), "耗材2.xlsx".into()])?;
//! ```

mod coerce;
mod error;
mod frame;
mod header;
mod polars_utils;
mod records;
mod schema;
mod workbook;

use std::path::{Path, PathBuf};

use drg_model::{CaseRecord, ConsumableUsageRecord, DiseaseRecord};
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};

// === Error Types ===
pub use error::{IngestError, Result};

// === Spreadsheet Reading ===
pub use workbook::{RawSheet, SourceFormat, read_first_sheet, read_sheets};

// === Frames ===
pub use frame::{concat_union, number_values, sheet_to_frame, text_values};
pub use header::{normalize_cell, normalize_header};
pub use polars_utils::{any_to_f64, any_to_string, format_numeric, parse_f64};

// === Schemas & Coercion ===
pub use coerce::{CoercionWarning, coerce_numeric_columns};
pub use records::{case_records, consumable_records, disease_records};
pub use schema::{CASE_SCHEMA, CONSUMABLE_SCHEMA, DISEASE_SCHEMA, TableSchema};

/// Records produced by one ingestion plus the value-level problems met.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingested<R> {
    pub records: Vec<R>,
    pub warnings: Vec<CoercionWarning>,
}

impl<R> Ingested<R> {
    pub fn empty() -> Self {
        Self {
            records: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

/// Validates, coerces and extracts records from an ingested frame.
pub fn normalize_frame<R>(
    mut df: DataFrame,
    schema: &TableSchema,
    origin: &str,
    extract: fn(&DataFrame) -> Vec<R>,
) -> Result<Ingested<R>> {
    schema.validate(&df, origin)?;
    let warnings = coerce_numeric_columns(&mut df, schema)?;
    let records = extract(&df);
    tracing::info!(
        table = schema.kind.label(),
        origin,
        rows = records.len(),
        coerced = warnings.len(),
        "normalized table"
    );
    Ok(Ingested { records, warnings })
}

/// Reads the first sheet of a disease detail file.
pub fn read_disease_file(path: &Path) -> Result<Ingested<DiseaseRecord>> {
    let df = first_sheet_frame(path)?;
    normalize_frame(df, &DISEASE_SCHEMA, &origin_of(path), disease_records)
}

/// Reads the first sheet of a case detail file.
pub fn read_case_file(path: &Path) -> Result<Ingested<CaseRecord>> {
    let df = first_sheet_frame(path)?;
    normalize_frame(df, &CASE_SCHEMA, &origin_of(path), case_records)
}

/// Reads every sheet of every consumable usage file into one table.
///
/// Sheets are stacked in file order, then sheet order, over the union of
/// their columns. Nothing is de-duplicated.
pub fn read_consumable_files(paths: &[PathBuf]) -> Result<Ingested<ConsumableUsageRecord>> {
    let mut frames = Vec::new();
    for path in paths {
        for sheet in read_sheets(path)? {
            tracing::debug!(
                path = %path.display(),
                sheet = %sheet.name,
                rows = sheet.height(),
                "stacking consumable sheet"
            );
            frames.push(sheet_to_frame(&sheet)?);
        }
    }
    let df = concat_union(frames)?;
    let origin = paths
        .iter()
        .map(|path| origin_of(path))
        .collect::<Vec<_>>()
        .join(", ");
    normalize_frame(df, &CONSUMABLE_SCHEMA, &origin, consumable_records)
}

fn first_sheet_frame(path: &Path) -> Result<DataFrame> {
    match read_first_sheet(path)? {
        Some(sheet) => sheet_to_frame(&sheet),
        None => Ok(DataFrame::empty()),
    }
}

fn origin_of(path: &Path) -> String {
    path.display().to_string()
}
