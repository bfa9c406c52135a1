//! Column requirements of the three source tables.

use drg_model::TableKind;
use drg_model::columns::{case, consumable, disease};
use polars::prelude::DataFrame;

use crate::error::{IngestError, Result};
use crate::frame::has_column;

/// Required and numeric columns of one source table.
#[derive(Debug, Clone, Copy)]
pub struct TableSchema {
    pub kind: TableKind,
    /// Columns whose absence aborts ingestion.
    pub required: &'static [&'static str],
    /// Columns coerced to numbers; unparseable cells become missing.
    pub numeric: &'static [&'static str],
}

pub const DISEASE_SCHEMA: TableSchema = TableSchema {
    kind: TableKind::Disease,
    required: &[
        disease::NAME,
        disease::DEPARTMENT,
        disease::DRG,
        disease::CASE_COUNT,
        disease::AVG_CONSUMABLE_COST,
        disease::CONSUMABLE_COST_EXCESS,
    ],
    numeric: &[
        disease::CASE_COUNT,
        disease::AVG_CONSUMABLE_COST,
        disease::CONSUMABLE_REFERENCE_TOTAL,
        disease::CONSUMABLE_REFERENCE_PER_CASE,
        disease::CONSUMABLE_COST_EXCESS,
        disease::TOTAL_COST,
        disease::DRG_COST,
        disease::INSURANCE_PAID_COST,
        disease::AVG_LENGTH_OF_STAY,
    ],
};

pub const CASE_SCHEMA: TableSchema = TableSchema {
    kind: TableKind::Case,
    required: &[
        case::PATIENT_NAME,
        case::RECORD_NUMBER,
        case::DRG_NAME,
        case::CLASSIFICATION,
        case::LENGTH_OF_STAY,
        case::PRIMARY_DIAGNOSIS,
    ],
    numeric: &[case::LENGTH_OF_STAY, case::PREDICTED_PROFIT_LOSS],
};

pub const CONSUMABLE_SCHEMA: TableSchema = TableSchema {
    kind: TableKind::Consumable,
    required: &[
        consumable::PATIENT_NAME,
        consumable::INPATIENT_ID,
        consumable::OUTPATIENT_ID,
        consumable::ITEM_CODE,
        consumable::QUANTITY,
        consumable::AMOUNT,
    ],
    numeric: &[consumable::QUANTITY, consumable::AMOUNT],
};

impl TableSchema {
    /// Fails with [`IngestError::MissingColumn`] naming the first absent
    /// required column.
    pub fn validate(&self, df: &DataFrame, origin: &str) -> Result<()> {
        if let Some(column) = self.required.iter().find(|name| !has_column(df, name)) {
            return Err(IngestError::MissingColumn {
                column: (*column).to_string(),
                origin: origin.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{IntoColumn, NamedFrom, Series};

    fn frame(names: &[&str]) -> DataFrame {
        let columns = names
            .iter()
            .map(|name| Series::new((*name).into(), vec!["x"]).into_column())
            .collect();
        DataFrame::new(columns).expect("frame")
    }

    #[test]
    fn names_first_missing_required_column() {
        let df = frame(&[disease::NAME, disease::DEPARTMENT]);
        let err = DISEASE_SCHEMA.validate(&df, "disease.csv").unwrap_err();
        match err {
            IngestError::MissingColumn { column, origin } => {
                assert_eq!(column, disease::DRG);
                assert_eq!(origin, "disease.csv");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn consumables_need_both_identifier_columns() {
        let inpatient_only = [
            consumable::PATIENT_NAME,
            consumable::INPATIENT_ID,
            consumable::ITEM_CODE,
            consumable::QUANTITY,
            consumable::AMOUNT,
        ];
        match CONSUMABLE_SCHEMA
            .validate(&frame(&inpatient_only), "usage")
            .unwrap_err()
        {
            IngestError::MissingColumn { column, .. } => {
                assert_eq!(column, consumable::OUTPATIENT_ID);
            }
            other => panic!("unexpected error: {other}"),
        }

        let mut both = inpatient_only.to_vec();
        both.push(consumable::OUTPATIENT_ID);
        CONSUMABLE_SCHEMA
            .validate(&frame(&both), "usage")
            .expect("both identifier columns present");
    }
}
