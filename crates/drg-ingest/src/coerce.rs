//! Numeric coercion of designated columns.

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::polars_utils::{any_to_f64, any_to_string_non_empty};
use crate::schema::TableSchema;

/// A cell that was not numeric and was replaced by a missing value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoercionWarning {
    pub column: String,
    /// Zero-based data row index within the ingested table.
    pub row: usize,
    pub value: String,
}

/// Replaces every numeric column of `schema` present in `df` with a Float64
/// column. Non-empty cells that do not parse become null and are reported.
pub fn coerce_numeric_columns(
    df: &mut DataFrame,
    schema: &TableSchema,
) -> Result<Vec<CoercionWarning>> {
    let mut warnings = Vec::new();
    for name in schema.numeric {
        let Ok(column) = df.column(name) else {
            continue;
        };
        let mut values: Vec<Option<f64>> = Vec::with_capacity(df.height());
        let mut failed = 0usize;
        for idx in 0..df.height() {
            let raw = column.get(idx).unwrap_or(AnyValue::Null);
            let parsed = any_to_f64(raw.clone());
            if parsed.is_none()
                && let Some(text) = any_to_string_non_empty(raw)
            {
                failed += 1;
                warnings.push(CoercionWarning {
                    column: (*name).to_string(),
                    row: idx,
                    value: text,
                });
            }
            values.push(parsed);
        }
        if failed > 0 {
            tracing::warn!(
                table = schema.kind.label(),
                column = %name,
                count = failed,
                "non-numeric values replaced with missing"
            );
        }
        df.with_column(Series::new((*name).into(), values))?;
    }
    Ok(warnings)
}
