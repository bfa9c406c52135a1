//! Conversion of sheets to Polars frames and row-wise concatenation.

use polars::prelude::*;

use crate::error::Result;
use crate::polars_utils::{any_to_f64, any_to_string_non_empty};
use crate::workbook::RawSheet;

/// Builds a frame of nullable string columns from a sheet.
pub fn sheet_to_frame(sheet: &RawSheet) -> Result<DataFrame> {
    let columns: Vec<Column> = sheet
        .headers
        .iter()
        .enumerate()
        .map(|(idx, header)| {
            let values: Vec<Option<String>> = sheet
                .rows
                .iter()
                .map(|row| row.get(idx).cloned().flatten())
                .collect();
            Series::new(header.as_str().into(), values).into_column()
        })
        .collect();
    Ok(DataFrame::new(columns)?)
}

/// Stacks frames row-wise over the union of their columns.
///
/// Column order is first-seen order across the inputs; rows of a frame that
/// lacks a column get nulls for it. Row order is input order.
pub fn concat_union(frames: Vec<DataFrame>) -> Result<DataFrame> {
    let mut names: Vec<String> = Vec::new();
    for frame in &frames {
        for name in frame.get_column_names() {
            if !names.iter().any(|known| known == name.as_str()) {
                names.push(name.to_string());
            }
        }
    }
    let mut combined: Option<DataFrame> = None;
    for frame in frames {
        let aligned = align_columns(&frame, &names)?;
        match combined.as_mut() {
            Some(acc) => {
                acc.vstack_mut(&aligned)?;
            }
            None => combined = Some(aligned),
        }
    }
    Ok(combined.unwrap_or_else(DataFrame::empty))
}

fn align_columns(frame: &DataFrame, names: &[String]) -> Result<DataFrame> {
    let height = frame.height();
    let columns: Vec<Column> = names
        .iter()
        .map(|name| match frame.column(name) {
            Ok(column) => column.clone(),
            Err(_) => {
                Series::full_null(name.as_str().into(), height, &DataType::String).into_column()
            }
        })
        .collect();
    Ok(DataFrame::new(columns)?)
}

pub fn has_column(df: &DataFrame, name: &str) -> bool {
    df.column(name).is_ok()
}

/// Text values of a column; all `None` when the column is absent.
pub fn text_values(df: &DataFrame, name: &str) -> Vec<Option<String>> {
    match df.column(name) {
        Ok(column) => (0..df.height())
            .map(|idx| any_to_string_non_empty(column.get(idx).unwrap_or(AnyValue::Null)))
            .collect(),
        Err(_) => vec![None; df.height()],
    }
}

/// Numeric values of a column; all `None` when the column is absent.
pub fn number_values(df: &DataFrame, name: &str) -> Vec<Option<f64>> {
    match df.column(name) {
        Ok(column) => (0..df.height())
            .map(|idx| any_to_f64(column.get(idx).unwrap_or(AnyValue::Null)))
            .collect(),
        Err(_) => vec![None; df.height()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(name: &str, headers: &[&str], rows: &[&[&str]]) -> RawSheet {
        RawSheet {
            name: name.to_string(),
            headers: headers.iter().map(ToString::to_string).collect(),
            rows: rows
                .iter()
                .map(|row| {
                    row.iter()
                        .map(|v| (!v.is_empty()).then(|| v.to_string()))
                        .collect()
                })
                .collect(),
        }
    }

    #[test]
    fn sheet_becomes_string_frame() {
        let df = sheet_to_frame(&sheet("S", &["A", "B"], &[&["1", ""], &["2", "x"]]))
            .expect("frame");
        assert_eq!(df.height(), 2);
        assert_eq!(text_values(&df, "A"), vec![Some("1".into()), Some("2".into())]);
        assert_eq!(text_values(&df, "B"), vec![None, Some("x".into())]);
        assert_eq!(number_values(&df, "A"), vec![Some(1.0), Some(2.0)]);
        assert_eq!(text_values(&df, "C"), vec![None, None]);
    }

    #[test]
    fn concat_takes_column_union_in_order() {
        let first = sheet_to_frame(&sheet("S1", &["A", "B"], &[&["1", "b1"]])).expect("first");
        let second = sheet_to_frame(&sheet("S2", &["B", "C"], &[&["b2", "c2"], &["b3", ""]]))
            .expect("second");
        let df = concat_union(vec![first, second]).expect("concat");
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        assert_eq!(df.height(), 3);
        assert_eq!(text_values(&df, "A"), vec![Some("1".into()), None, None]);
        assert_eq!(
            text_values(&df, "B"),
            vec![Some("b1".into()), Some("b2".into()), Some("b3".into())]
        );
        assert_eq!(text_values(&df, "C"), vec![None, Some("c2".into()), None]);
    }

    #[test]
    fn concat_of_nothing_is_empty() {
        let df = concat_union(Vec::new()).expect("concat");
        assert_eq!(df.height(), 0);
        assert_eq!(df.width(), 0);
    }
}
