//! Disease-level cost aggregation.
//!
//! All sums treat missing values as zero. Groups are returned ordered by
//! their key.

use std::collections::BTreeMap;

use drg_model::{
    BreakdownLevel, CostBreakdown, DiseaseCostOverview, DiseaseRecord, DiseaseSummary,
    RepresentativePolicy,
};

use crate::error::Result;
use crate::group::{Representative, add};

const DRG_FIELD: &str = "DRG";

#[derive(Default)]
struct CostTotals {
    consumable_cost: f64,
    case_count: f64,
    cost_excess: f64,
    drg: Representative,
}

impl CostTotals {
    fn push(
        &mut self,
        record: &DiseaseRecord,
        policy: RepresentativePolicy,
        group: &str,
    ) -> Result<()> {
        add(&mut self.consumable_cost, record.avg_consumable_cost);
        add(&mut self.case_count, record.case_count);
        add(&mut self.cost_excess, record.consumable_cost_excess);
        self.drg.offer(Some(&record.drg), policy, group, DRG_FIELD)
    }
}

/// Profit/loss per disease name: summed case count and cost-excess with
/// the representative DRG.
pub fn disease_summary(
    records: &[DiseaseRecord],
    policy: RepresentativePolicy,
) -> Result<Vec<DiseaseSummary>> {
    let mut groups: BTreeMap<&str, CostTotals> = BTreeMap::new();
    for record in records {
        groups
            .entry(record.name.as_str())
            .or_default()
            .push(record, policy, &record.name)?;
    }
    Ok(groups
        .into_iter()
        .map(|(name, totals)| DiseaseSummary {
            name: name.to_string(),
            case_count: totals.case_count,
            cost_excess: totals.cost_excess,
            drg: totals.drg.into_value().unwrap_or_default(),
        })
        .collect())
}

/// The `n` summaries starting at rank `offset` (0-based) by cost-excess.
///
/// Ranking is by cost-excess descending with ties broken by name, so
/// consecutive windows never overlap. Out-of-range windows are clamped.
pub fn top_n_losses(summaries: &[DiseaseSummary], n: usize, offset: usize) -> Vec<DiseaseSummary> {
    let mut ranked = summaries.to_vec();
    ranked.sort_by(|a, b| {
        b.cost_excess
            .total_cmp(&a.cost_excess)
            .then_with(|| a.name.cmp(&b.name))
    });
    ranked.into_iter().skip(offset).take(n).collect()
}

/// Costs of one disease per department.
pub fn department_breakdown(
    records: &[DiseaseRecord],
    disease: &str,
    policy: RepresentativePolicy,
) -> Result<Vec<CostBreakdown>> {
    breakdown(
        records
            .iter()
            .filter(|r| r.name == disease)
            .map(|r| (r.department.as_str(), r)),
        BreakdownLevel::Department,
        disease,
        policy,
    )
}

/// Costs of one disease within one department, per treatment group.
///
/// Rows without a treatment group are left out; the result is empty when
/// none carry one.
pub fn treatment_group_breakdown(
    records: &[DiseaseRecord],
    disease: &str,
    department: &str,
    policy: RepresentativePolicy,
) -> Result<Vec<CostBreakdown>> {
    breakdown(
        records
            .iter()
            .filter(|r| r.name == disease && r.department == department)
            .filter_map(|r| {
                r.treatment_group
                    .as_deref()
                    .filter(|group| !group.trim().is_empty())
                    .map(|group| (group, r))
            }),
        BreakdownLevel::TreatmentGroup,
        disease,
        policy,
    )
}

fn breakdown<'a>(
    rows: impl Iterator<Item = (&'a str, &'a DiseaseRecord)>,
    level: BreakdownLevel,
    disease: &str,
    policy: RepresentativePolicy,
) -> Result<Vec<CostBreakdown>> {
    let mut groups: BTreeMap<&str, CostTotals> = BTreeMap::new();
    for (label, record) in rows {
        let group = format!("{disease} / {label}");
        groups.entry(label).or_default().push(record, policy, &group)?;
    }
    Ok(groups
        .into_iter()
        .map(|(label, totals)| CostBreakdown {
            level,
            label: label.to_string(),
            consumable_cost: totals.consumable_cost,
            case_count: totals.case_count,
            cost_excess: totals.cost_excess,
            drg: totals.drg.into_value().unwrap_or_default(),
        })
        .collect())
}

fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    (denominator != 0.0).then(|| numerator / denominator)
}

/// Headline cost figures of one disease; `None` when it has no rows.
pub fn disease_cost_overview(
    records: &[DiseaseRecord],
    disease: &str,
) -> Option<DiseaseCostOverview> {
    let rows: Vec<&DiseaseRecord> = records.iter().filter(|r| r.name == disease).collect();
    if rows.is_empty() {
        return None;
    }

    let mut case_count = 0.0;
    let mut total_cost = 0.0;
    let mut drg_cost = 0.0;
    let mut insurance_paid_cost = 0.0;
    let mut consumable_cost = 0.0;
    let mut reference_total = 0.0;
    let mut cost_excess = 0.0;
    let mut stay_days = 0.0;
    let mut per_case_refs = Vec::new();
    for row in &rows {
        add(&mut case_count, row.case_count);
        add(&mut total_cost, row.total_cost);
        add(&mut drg_cost, row.drg_cost);
        add(&mut insurance_paid_cost, row.insurance_paid_cost);
        add(&mut consumable_cost, row.avg_consumable_cost);
        add(&mut reference_total, row.consumable_reference_total);
        add(&mut cost_excess, row.consumable_cost_excess);
        if let (Some(count), Some(los)) = (row.case_count, row.avg_length_of_stay) {
            stay_days += count * los;
        }
        per_case_refs.extend(row.consumable_reference_per_case);
    }

    let reference_per_case = (!per_case_refs.is_empty())
        .then(|| per_case_refs.iter().sum::<f64>() / per_case_refs.len() as f64);
    let consumable_per_case = ratio(consumable_cost, case_count);
    let loss_per_case = match (consumable_per_case, reference_per_case) {
        (Some(actual), Some(reference)) => Some(actual - reference),
        _ => None,
    };

    Some(DiseaseCostOverview {
        name: disease.to_string(),
        case_count,
        total_cost,
        drg_cost,
        insurance_paid_cost,
        consumable_cost,
        consumable_reference_total: reference_total,
        consumable_reference_per_case: reference_per_case,
        cost_excess,
        avg_length_of_stay: ratio(stay_days, case_count),
        payment_rate_pct: ratio(drg_cost, insurance_paid_cost).map(|rate| rate * 100.0),
        consumable_per_case,
        excess_ratio: ratio(consumable_cost, reference_total),
        loss_per_case,
    })
}

/// Disease names containing `query`, ignoring case. An empty query matches all.
pub fn search_diseases(summaries: &[DiseaseSummary], query: &str) -> Vec<String> {
    let needle = query.trim().to_lowercase();
    summaries
        .iter()
        .filter(|s| needle.is_empty() || s.name.to_lowercase().contains(&needle))
        .map(|s| s.name.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(
        name: &str,
        dept: &str,
        group: Option<&str>,
        count: f64,
        excess: Option<f64>,
    ) -> DiseaseRecord {
        DiseaseRecord {
            name: name.to_string(),
            department: dept.to_string(),
            treatment_group: group.map(str::to_string),
            drg: format!("{name}-DRG"),
            case_count: Some(count),
            avg_consumable_cost: Some(count * 100.0),
            consumable_cost_excess: excess,
            ..DiseaseRecord::default()
        }
    }

    #[test]
    fn summary_groups_by_name() {
        let records = vec![
            row("X", "心内科", None, 3.0, None),
            row("X", "急诊科", None, 2.0, Some(100.0)),
            row("Y", "骨科", None, 4.0, Some(-20.0)),
        ];
        let summary = disease_summary(&records, RepresentativePolicy::RequireAgreement).unwrap();
        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].name, "X");
        assert_eq!(summary[0].case_count, 5.0);
        assert_eq!(summary[0].cost_excess, 100.0);
        assert_eq!(summary[0].drg, "X-DRG");
    }

    #[test]
    fn all_missing_excess_sums_to_zero() {
        let records = vec![row("X", "心内科", None, 1.0, None), row("X", "骨科", None, 1.0, None)];
        let summary = disease_summary(&records, RepresentativePolicy::RequireAgreement).unwrap();
        assert_eq!(summary[0].cost_excess, 0.0);
    }

    #[test]
    fn ranking_breaks_ties_by_name() {
        let summaries: Vec<DiseaseSummary> = ["C", "A", "B"]
            .iter()
            .map(|name| DiseaseSummary {
                name: (*name).to_string(),
                case_count: 1.0,
                cost_excess: 10.0,
                drg: String::new(),
            })
            .collect();
        let names: Vec<String> = top_n_losses(&summaries, 2, 0)
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, ["A", "B"]);
        assert!(top_n_losses(&summaries, 5, 10).is_empty());
    }

    #[test]
    fn treatment_groups_skip_rows_without_group() {
        let records = vec![
            row("X", "心内科", Some("一组"), 3.0, Some(5.0)),
            row("X", "心内科", None, 2.0, Some(1.0)),
            row("X", "骨科", Some("二组"), 1.0, Some(1.0)),
        ];
        let groups =
            treatment_group_breakdown(&records, "X", "心内科", RepresentativePolicy::RequireAgreement)
                .unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].label, "一组");
        assert_eq!(groups[0].level, BreakdownLevel::TreatmentGroup);
        assert_eq!(groups[0].case_count, 3.0);
    }

    #[test]
    fn overview_weights_length_of_stay_by_cases() {
        let mut a = row("X", "心内科", None, 3.0, Some(10.0));
        a.avg_length_of_stay = Some(4.0);
        a.consumable_reference_total = Some(200.0);
        a.consumable_reference_per_case = Some(60.0);
        a.drg_cost = Some(9.0);
        a.insurance_paid_cost = Some(10.0);
        let mut b = row("X", "骨科", None, 1.0, Some(-2.0));
        b.avg_length_of_stay = Some(8.0);
        b.consumable_reference_total = Some(200.0);
        b.consumable_reference_per_case = Some(80.0);

        let overview = disease_cost_overview(&[a, b], "X").unwrap();
        assert_eq!(overview.case_count, 4.0);
        assert_eq!(overview.avg_length_of_stay, Some(5.0));
        assert_eq!(overview.consumable_cost, 400.0);
        assert_eq!(overview.consumable_per_case, Some(100.0));
        assert_eq!(overview.consumable_reference_per_case, Some(70.0));
        assert_eq!(overview.loss_per_case, Some(30.0));
        assert_eq!(overview.excess_ratio, Some(1.0));
        assert_eq!(overview.cost_excess, 8.0);
        assert_eq!(overview.payment_rate_pct, Some(90.0));
        assert!(disease_cost_overview(&[], "X").is_none());
    }

    #[test]
    fn overview_leaves_zero_denominators_empty() {
        let overview = disease_cost_overview(&[row("X", "心内科", None, 0.0, None)], "X").unwrap();
        assert_eq!(overview.avg_length_of_stay, None);
        assert_eq!(overview.payment_rate_pct, None);
        assert_eq!(overview.consumable_per_case, None);
        assert_eq!(overview.loss_per_case, None);
    }

    #[test]
    fn search_is_case_insensitive() {
        let summaries: Vec<DiseaseSummary> = ["Heart Failure", "Fracture", "心衰"]
            .iter()
            .map(|name| DiseaseSummary {
                name: (*name).to_string(),
                case_count: 0.0,
                cost_excess: 0.0,
                drg: String::new(),
            })
            .collect();
        assert_eq!(search_diseases(&summaries, "frac"), ["Fracture"]);
        assert_eq!(search_diseases(&summaries, "  ").len(), 3);
        assert!(search_diseases(&summaries, "肺").is_empty());
    }
}
