//! Typed rows of the three source tables.
//!
//! Optional fields are `None` when the column is absent or the cell is
//! missing; numeric fields are `None` when the source value did not parse.

use serde::{Deserialize, Serialize};

/// The three tables held by the store, one per source export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    Disease,
    Case,
    Consumable,
}

impl TableKind {
    pub const ALL: [TableKind; 3] = [Self::Disease, Self::Case, Self::Consumable];

    /// Name of the backing table in the relational store.
    pub fn table_name(self) -> &'static str {
        match self {
            Self::Disease => "disease_detail",
            Self::Case => "case_detail",
            Self::Consumable => "consumable_detail",
        }
    }

    /// Human-readable label used in logs and CLI output.
    pub fn label(self) -> &'static str {
        match self {
            Self::Disease => "disease detail",
            Self::Case => "case detail",
            Self::Consumable => "consumable usage",
        }
    }
}

/// One row per (disease name, department, treatment group).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DiseaseRecord {
    pub name: String,
    pub department: String,
    pub treatment_group: Option<String>,
    pub drg: String,
    pub case_count: Option<f64>,
    pub avg_consumable_cost: Option<f64>,
    pub consumable_reference_total: Option<f64>,
    pub consumable_reference_per_case: Option<f64>,
    pub consumable_cost_excess: Option<f64>,
    pub total_cost: Option<f64>,
    pub drg_cost: Option<f64>,
    pub insurance_paid_cost: Option<f64>,
    pub avg_length_of_stay: Option<f64>,
}

/// One row per patient case. Duplicates are preserved.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CaseRecord {
    pub patient_name: String,
    /// Medical-record number, kept as text so leading zeros survive.
    pub record_number: String,
    pub drg_code: Option<String>,
    pub drg_name: String,
    pub classification: String,
    pub discharge_department: Option<String>,
    pub length_of_stay: Option<f64>,
    pub predicted_profit_loss: Option<f64>,
    pub primary_diagnosis: String,
    pub discharge_date: Option<String>,
}

impl CaseRecord {
    /// Whether both rows describe the same admission.
    pub fn is_same_case(&self, other: &CaseRecord) -> bool {
        self.patient_name == other.patient_name && self.record_number == other.record_number
    }
}

/// One row per consumable usage event.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConsumableUsageRecord {
    pub patient_name: String,
    pub inpatient_id: Option<String>,
    /// Outpatient id as text; compared numerically against record numbers.
    pub outpatient_id: Option<String>,
    pub item_code: String,
    pub item_name: Option<String>,
    pub quantity: Option<f64>,
    pub amount: Option<f64>,
    pub doctor: Option<String>,
    pub expense_date: Option<String>,
}
