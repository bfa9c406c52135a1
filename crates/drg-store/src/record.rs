//! Mapping between typed records and SQLite rows.

use drg_model::{CaseRecord, ConsumableUsageRecord, DiseaseRecord, TableKind};
use rusqlite::Row;
use rusqlite::types::Value;

/// Storage class of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlType {
    Text,
    Real,
}

impl SqlType {
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Text => "TEXT",
            Self::Real => "REAL",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: &'static str,
    pub sql_type: SqlType,
}

const fn text(name: &'static str) -> ColumnDef {
    ColumnDef {
        name,
        sql_type: SqlType::Text,
    }
}

const fn real(name: &'static str) -> ColumnDef {
    ColumnDef {
        name,
        sql_type: SqlType::Real,
    }
}

/// A record type persisted as one store table.
///
/// `to_values` must yield one value per entry of `columns`, in order;
/// `from_row` reads them back by the same positions.
pub trait StoredRecord: Sized {
    const KIND: TableKind;

    fn columns() -> &'static [ColumnDef];

    fn to_values(&self) -> Vec<Value>;

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;
}

fn text_value(value: &str) -> Value {
    Value::Text(value.to_string())
}

fn opt_text(value: Option<&String>) -> Value {
    value.map_or(Value::Null, |v| Value::Text(v.clone()))
}

fn opt_real(value: Option<f64>) -> Value {
    value.map_or(Value::Null, Value::Real)
}

pub mod disease_cols {
    pub const NAME: &str = "name";
    pub const DEPARTMENT: &str = "department";
    pub const TREATMENT_GROUP: &str = "treatment_group";
}

const DISEASE_COLUMNS: &[ColumnDef] = &[
    text(disease_cols::NAME),
    text(disease_cols::DEPARTMENT),
    text(disease_cols::TREATMENT_GROUP),
    text("drg"),
    real("case_count"),
    real("avg_consumable_cost"),
    real("consumable_reference_total"),
    real("consumable_reference_per_case"),
    real("consumable_cost_excess"),
    real("total_cost"),
    real("drg_cost"),
    real("insurance_paid_cost"),
    real("avg_length_of_stay"),
];

impl StoredRecord for DiseaseRecord {
    const KIND: TableKind = TableKind::Disease;

    fn columns() -> &'static [ColumnDef] {
        DISEASE_COLUMNS
    }

    fn to_values(&self) -> Vec<Value> {
        vec![
            text_value(&self.name),
            text_value(&self.department),
            opt_text(self.treatment_group.as_ref()),
            text_value(&self.drg),
            opt_real(self.case_count),
            opt_real(self.avg_consumable_cost),
            opt_real(self.consumable_reference_total),
            opt_real(self.consumable_reference_per_case),
            opt_real(self.consumable_cost_excess),
            opt_real(self.total_cost),
            opt_real(self.drg_cost),
            opt_real(self.insurance_paid_cost),
            opt_real(self.avg_length_of_stay),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            name: row.get(0)?,
            department: row.get(1)?,
            treatment_group: row.get(2)?,
            drg: row.get(3)?,
            case_count: row.get(4)?,
            avg_consumable_cost: row.get(5)?,
            consumable_reference_total: row.get(6)?,
            consumable_reference_per_case: row.get(7)?,
            consumable_cost_excess: row.get(8)?,
            total_cost: row.get(9)?,
            drg_cost: row.get(10)?,
            insurance_paid_cost: row.get(11)?,
            avg_length_of_stay: row.get(12)?,
        })
    }
}

pub mod case_cols {
    pub const PATIENT_NAME: &str = "patient_name";
    pub const DRG_NAME: &str = "drg_name";
}

const CASE_COLUMNS: &[ColumnDef] = &[
    text(case_cols::PATIENT_NAME),
    text("record_number"),
    text("drg_code"),
    text(case_cols::DRG_NAME),
    text("classification"),
    text("discharge_department"),
    real("length_of_stay"),
    real("predicted_profit_loss"),
    text("primary_diagnosis"),
    text("discharge_date"),
];

impl StoredRecord for CaseRecord {
    const KIND: TableKind = TableKind::Case;

    fn columns() -> &'static [ColumnDef] {
        CASE_COLUMNS
    }

    fn to_values(&self) -> Vec<Value> {
        vec![
            text_value(&self.patient_name),
            text_value(&self.record_number),
            opt_text(self.drg_code.as_ref()),
            text_value(&self.drg_name),
            text_value(&self.classification),
            opt_text(self.discharge_department.as_ref()),
            opt_real(self.length_of_stay),
            opt_real(self.predicted_profit_loss),
            text_value(&self.primary_diagnosis),
            opt_text(self.discharge_date.as_ref()),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            patient_name: row.get(0)?,
            record_number: row.get(1)?,
            drg_code: row.get(2)?,
            drg_name: row.get(3)?,
            classification: row.get(4)?,
            discharge_department: row.get(5)?,
            length_of_stay: row.get(6)?,
            predicted_profit_loss: row.get(7)?,
            primary_diagnosis: row.get(8)?,
            discharge_date: row.get(9)?,
        })
    }
}

pub mod consumable_cols {
    pub const PATIENT_NAME: &str = "patient_name";
}

const CONSUMABLE_COLUMNS: &[ColumnDef] = &[
    text(consumable_cols::PATIENT_NAME),
    text("inpatient_id"),
    text("outpatient_id"),
    text("item_code"),
    text("item_name"),
    real("quantity"),
    real("amount"),
    text("doctor"),
    text("expense_date"),
];

impl StoredRecord for ConsumableUsageRecord {
    const KIND: TableKind = TableKind::Consumable;

    fn columns() -> &'static [ColumnDef] {
        CONSUMABLE_COLUMNS
    }

    fn to_values(&self) -> Vec<Value> {
        vec![
            text_value(&self.patient_name),
            opt_text(self.inpatient_id.as_ref()),
            opt_text(self.outpatient_id.as_ref()),
            text_value(&self.item_code),
            opt_text(self.item_name.as_ref()),
            opt_real(self.quantity),
            opt_real(self.amount),
            opt_text(self.doctor.as_ref()),
            opt_text(self.expense_date.as_ref()),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            patient_name: row.get(0)?,
            inpatient_id: row.get(1)?,
            outpatient_id: row.get(2)?,
            item_code: row.get(3)?,
            item_name: row.get(4)?,
            quantity: row.get(5)?,
            amount: row.get(6)?,
            doctor: row.get(7)?,
            expense_date: row.get(8)?,
        })
    }
}
