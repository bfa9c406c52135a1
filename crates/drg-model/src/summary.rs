//! Derived aggregates. None of these are persisted.

use serde::{Deserialize, Serialize};

/// Profit/loss totals for one disease name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiseaseSummary {
    pub name: String,
    pub case_count: f64,
    /// Summed consumable-cost-excess; positive means loss.
    pub cost_excess: f64,
    pub drg: String,
}

/// Grouping level of a [`CostBreakdown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakdownLevel {
    Department,
    TreatmentGroup,
}

/// Costs of one disease aggregated by department or treatment group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub level: BreakdownLevel,
    /// Department or treatment group name.
    pub label: String,
    pub consumable_cost: f64,
    pub case_count: f64,
    pub cost_excess: f64,
    pub drg: String,
}

pub type DepartmentBreakdown = CostBreakdown;
pub type TreatmentGroupBreakdown = CostBreakdown;

/// Consumable usage of one patient aggregated by item code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsumableUsageSummary {
    pub item_code: String,
    pub item_name: Option<String>,
    pub quantity: f64,
    pub amount: f64,
    /// Doctor of the first usage row in the group.
    pub doctor: Option<String>,
    /// Expense date of the first usage row in the group.
    pub expense_date: Option<String>,
}

/// Headline cost figures of one disease across all its departments.
///
/// Ratios are `None` when their denominator is zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiseaseCostOverview {
    pub name: String,
    pub case_count: f64,
    /// 万元
    pub total_cost: f64,
    /// 万元
    pub drg_cost: f64,
    /// 万元
    pub insurance_paid_cost: f64,
    pub consumable_cost: f64,
    pub consumable_reference_total: f64,
    /// Mean of the per-case reference over rows that carry one.
    pub consumable_reference_per_case: Option<f64>,
    pub cost_excess: f64,
    /// Case-weighted mean length of stay in days.
    pub avg_length_of_stay: Option<f64>,
    /// DRG cost as a percentage of the insurance-paid cost.
    pub payment_rate_pct: Option<f64>,
    pub consumable_per_case: Option<f64>,
    pub excess_ratio: Option<f64>,
    pub loss_per_case: Option<f64>,
}
