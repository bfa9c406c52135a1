//! Explicit empty states for queries that legitimately match nothing.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::records::TableKind;

/// Why a query returned no rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EmptyResultNotice {
    /// The source table has not been ingested (or was cleared).
    TableNotLoaded { table: TableKind },
    /// The source table was ingested but holds no rows.
    EmptyTable { table: TableKind },
    NoDisease { disease: String },
    /// Fewer than `offset + 1` diseases are ranked.
    NoRankedLosses { offset: usize },
    NoTreatmentGroups { disease: String, department: String },
    NoCases { disease: String },
    NoReferenceCase { disease: String, patient: String },
    NoSimilarCases { patient: String },
    NoConsumableUsage { patient: String, record_number: String },
    NoSearchMatch { query: String },
}

impl fmt::Display for EmptyResultNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TableNotLoaded { table } => {
                write!(f, "no {} data loaded; ingest the file first", table.label())
            }
            Self::EmptyTable { table } => {
                write!(f, "the {} table was loaded but has no rows", table.label())
            }
            Self::NoDisease { disease } => write!(f, "no rows for disease '{disease}'"),
            Self::NoRankedLosses { offset } => {
                write!(f, "no diseases ranked beyond the first {offset}")
            }
            Self::NoTreatmentGroups {
                disease,
                department,
            } => write!(
                f,
                "no treatment group data for '{disease}' in department '{department}'"
            ),
            Self::NoCases { disease } => write!(f, "no cases recorded for '{disease}'"),
            Self::NoReferenceCase { disease, patient } => {
                write!(f, "patient '{patient}' has no case under '{disease}'")
            }
            Self::NoSimilarCases { patient } => {
                write!(f, "no similar cases found for '{patient}'")
            }
            Self::NoConsumableUsage {
                patient,
                record_number,
            } => write!(
                f,
                "no consumable usage found for '{patient}' (record {record_number})"
            ),
            Self::NoSearchMatch { query } => write!(f, "no disease matches '{query}'"),
        }
    }
}

/// Query output: the rows, plus a notice when there are none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRows<T> {
    pub rows: Vec<T>,
    pub notice: Option<EmptyResultNotice>,
}

impl<T> QueryRows<T> {
    /// Wrap rows, attaching `notice` only when `rows` is empty.
    pub fn new(rows: Vec<T>, notice: EmptyResultNotice) -> Self {
        let notice = rows.is_empty().then_some(notice);
        Self { rows, notice }
    }

    pub fn empty(notice: EmptyResultNotice) -> Self {
        Self {
            rows: Vec::new(),
            notice: Some(notice),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn into_rows(self) -> Vec<T> {
        self.rows
    }
}
