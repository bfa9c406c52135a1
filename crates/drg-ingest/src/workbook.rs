//! Spreadsheet reading.
//!
//! Workbooks (`.xlsx`, `.xlsm`, `.xls`, `.ods`) are read with `calamine`,
//! every sheet in workbook order. CSV files are read with the `csv` crate and
//! yield a single sheet named after the file stem. In both cases the first
//! non-empty row is the header row and fully empty rows are skipped.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use calamine::{Data, Reader, Sheets, open_workbook_auto};
use chrono::Timelike;
use csv::ReaderBuilder;

use crate::error::{IngestError, Result};
use crate::header::{dedupe_headers, normalize_cell, normalize_header};
use crate::polars_utils::format_numeric;

/// Supported input formats, detected by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Workbook,
    Csv,
}

impl SourceFormat {
    pub fn detect(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(Self::Workbook),
            "csv" => Ok(Self::Csv),
            _ => Err(IngestError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension,
            }),
        }
    }
}

/// One sheet of text cells with a normalized, de-duplicated header.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSheet {
    pub name: String,
    pub headers: Vec<String>,
    /// Data rows padded or truncated to the header width.
    pub rows: Vec<Vec<Option<String>>>,
}

impl RawSheet {
    /// Builds a sheet from raw rows: the first non-empty row becomes the
    /// header. Returns `None` when every row is empty.
    pub fn from_rows(name: impl Into<String>, raw_rows: Vec<Vec<Option<String>>>) -> Option<Self> {
        let mut rows_iter = raw_rows
            .into_iter()
            .filter(|row| row.iter().any(Option::is_some));
        let header_row = rows_iter.next()?;
        let headers = dedupe_headers(
            header_row
                .iter()
                .map(|cell| cell.as_deref().map(normalize_header).unwrap_or_default())
                .collect(),
        );
        let width = headers.len();
        let rows = rows_iter
            .map(|mut row| {
                row.resize(width, None);
                row
            })
            .collect();
        Some(Self {
            name: name.into(),
            headers,
            rows,
        })
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }
}

/// Reads every sheet of the file, in workbook order.
///
/// Sheets without any non-empty row are skipped.
pub fn read_sheets(path: &Path) -> Result<Vec<RawSheet>> {
    ensure_file(path)?;
    let sheets = match SourceFormat::detect(path)? {
        SourceFormat::Workbook => {
            let mut workbook = open_workbook(path)?;
            let mut sheets = Vec::new();
            for sheet_name in workbook.sheet_names() {
                sheets.extend(read_workbook_sheet(&mut workbook, path, sheet_name)?);
            }
            sheets
        }
        SourceFormat::Csv => read_csv_sheet(path)?.into_iter().collect(),
    };
    tracing::debug!(
        path = %path.display(),
        sheets = sheets.len(),
        "read spreadsheet"
    );
    Ok(sheets)
}

/// Reads only the first sheet of the file; later sheets are never opened.
///
/// Returns `None` when the first sheet has no non-empty row.
pub fn read_first_sheet(path: &Path) -> Result<Option<RawSheet>> {
    ensure_file(path)?;
    match SourceFormat::detect(path)? {
        SourceFormat::Workbook => {
            let mut workbook = open_workbook(path)?;
            match workbook.sheet_names().into_iter().next() {
                Some(sheet_name) => read_workbook_sheet(&mut workbook, path, sheet_name),
                None => Ok(None),
            }
        }
        SourceFormat::Csv => read_csv_sheet(path),
    }
}

fn ensure_file(path: &Path) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        })
    }
}

fn open_workbook(path: &Path) -> Result<Sheets<BufReader<File>>> {
    open_workbook_auto(path).map_err(|e| IngestError::Workbook {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn read_workbook_sheet(
    workbook: &mut Sheets<BufReader<File>>,
    path: &Path,
    sheet_name: String,
) -> Result<Option<RawSheet>> {
    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| IngestError::SheetRead {
            path: path.to_path_buf(),
            sheet: sheet_name.clone(),
            message: e.to_string(),
        })?;
    let raw_rows: Vec<Vec<Option<String>>> = range
        .rows()
        .map(|row| row.iter().map(cell_to_text).collect())
        .collect();
    let sheet = RawSheet::from_rows(sheet_name.clone(), raw_rows);
    match &sheet {
        Some(sheet) => tracing::debug!(sheet = %sheet.name, rows = sheet.height(), "read sheet"),
        None => tracing::debug!(sheet = %sheet_name, "skipping empty sheet"),
    }
    Ok(sheet)
}

fn read_csv_sheet(path: &Path) -> Result<Option<RawSheet>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    let mut raw_rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        raw_rows.push(record.iter().map(normalize_cell).collect());
    }
    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(RawSheet::from_rows(name, raw_rows))
}

/// Converts a workbook cell to trimmed text; empty and error cells are missing.
pub(crate) fn cell_to_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(v) => normalize_cell(v),
        Data::Float(v) => Some(format_numeric(*v)),
        Data::Int(v) => Some(v.to_string()),
        Data::Bool(v) => Some(v.to_string()),
        Data::DateTime(v) => match v.as_datetime() {
            Some(dt) if dt.num_seconds_from_midnight() == 0 => {
                Some(dt.format("%Y-%m-%d").to_string())
            }
            Some(dt) => Some(dt.format("%Y-%m-%d %H:%M:%S").to_string()),
            None => Some(format_numeric(v.as_f64())),
        },
        Data::DateTimeIso(v) | Data::DurationIso(v) => normalize_cell(v),
    }
}
