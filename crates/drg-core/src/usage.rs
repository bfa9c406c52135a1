//! Per-case consumable usage.

use std::collections::BTreeMap;

use drg_ingest::parse_f64;
use drg_model::{ConsumableUsageRecord, ConsumableUsageSummary, RepresentativePolicy};

use crate::error::Result;
use crate::group::{FirstValue, Representative, add};

const ITEM_NAME_FIELD: &str = "item name";

/// Usage rows recorded for one case.
///
/// A row belongs to the case when its patient name matches and either its
/// inpatient id equals `record_number` or its outpatient id is numerically
/// equal to it, so outpatient `"00123"` matches record `"123"`. Rows whose
/// outpatient id is missing or not a number are dropped.
pub fn consumable_usage_rows(
    rows: &[ConsumableUsageRecord],
    patient: &str,
    record_number: &str,
) -> Vec<ConsumableUsageRecord> {
    let record = record_number.trim();
    let record_numeric = parse_f64(record);
    rows.iter()
        .filter(|row| row.patient_name == patient)
        .filter(|row| {
            let Some(outpatient) = row.outpatient_id.as_deref().and_then(parse_f64) else {
                return false;
            };
            let inpatient_match = row
                .inpatient_id
                .as_deref()
                .is_some_and(|id| id.trim() == record);
            inpatient_match || record_numeric == Some(outpatient)
        })
        .cloned()
        .collect()
}

#[derive(Default)]
struct ItemTotals {
    quantity: f64,
    amount: f64,
    item_name: Representative,
    doctor: FirstValue,
    expense_date: FirstValue,
}

/// Usage of one case totalled per item code, in item code order.
///
/// Doctor and expense date come from the first usage row of each item.
pub fn consumable_usage_summary(
    rows: &[ConsumableUsageRecord],
    patient: &str,
    record_number: &str,
    policy: RepresentativePolicy,
) -> Result<Vec<ConsumableUsageSummary>> {
    summarize_usage(&consumable_usage_rows(rows, patient, record_number), policy)
}

/// Totals already-matched usage rows per item code.
pub fn summarize_usage(
    matched: &[ConsumableUsageRecord],
    policy: RepresentativePolicy,
) -> Result<Vec<ConsumableUsageSummary>> {
    let mut items: BTreeMap<&str, ItemTotals> = BTreeMap::new();
    for row in matched {
        let totals = items.entry(row.item_code.as_str()).or_default();
        add(&mut totals.quantity, row.quantity);
        add(&mut totals.amount, row.amount);
        totals
            .item_name
            .offer(row.item_name.as_deref(), policy, &row.item_code, ITEM_NAME_FIELD)?;
        totals.doctor.offer(row.doctor.as_ref());
        totals.expense_date.offer(row.expense_date.as_ref());
    }
    Ok(items
        .into_iter()
        .map(|(code, totals)| ConsumableUsageSummary {
            item_code: code.to_string(),
            item_name: totals.item_name.into_value(),
            quantity: totals.quantity,
            amount: totals.amount,
            doctor: totals.doctor.into_value(),
            expense_date: totals.expense_date.into_value(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usage(
        patient: &str,
        inpatient: Option<&str>,
        outpatient: Option<&str>,
        code: &str,
    ) -> ConsumableUsageRecord {
        ConsumableUsageRecord {
            patient_name: patient.to_string(),
            inpatient_id: inpatient.map(str::to_string),
            outpatient_id: outpatient.map(str::to_string),
            item_code: code.to_string(),
            quantity: Some(1.0),
            amount: Some(10.0),
            ..ConsumableUsageRecord::default()
        }
    }

    #[test]
    fn outpatient_ids_match_numerically() {
        let rows = vec![
            usage("张三", None, Some("00123"), "C01"),
            usage("张三", None, Some("124"), "C01"),
            usage("李四", None, Some("123"), "C01"),
        ];
        let matched = consumable_usage_rows(&rows, "张三", "123");
        assert_eq!(matched, vec![rows[0].clone()]);
    }

    #[test]
    fn unparseable_outpatient_rows_are_dropped() {
        let rows = vec![
            usage("张三", Some("00123"), None, "C01"),
            usage("张三", Some("00123"), Some("MZ-9"), "C01"),
            usage("张三", Some("00123"), Some("0"), "C02"),
        ];
        let matched = consumable_usage_rows(&rows, "张三", "00123");
        assert_eq!(matched, vec![rows[2].clone()]);
    }

    #[test]
    fn summary_takes_first_doctor_and_date() {
        let mut first = usage("张三", None, Some("1"), "C01");
        first.doctor = Some("王医生".to_string());
        first.expense_date = Some("2024-03-01".to_string());
        let mut second = usage("张三", None, Some("1"), "C01");
        second.doctor = Some("赵医生".to_string());
        second.quantity = None;
        let summary = consumable_usage_summary(
            &[first, second],
            "张三",
            "1",
            RepresentativePolicy::RequireAgreement,
        )
        .unwrap();
        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].quantity, 1.0);
        assert_eq!(summary[0].amount, 20.0);
        assert_eq!(summary[0].doctor.as_deref(), Some("王医生"));
        assert_eq!(summary[0].expense_date.as_deref(), Some("2024-03-01"));
    }

    #[test]
    fn conflicting_item_names_need_lenient_policy() {
        let mut a = usage("张三", None, Some("1"), "C01");
        a.item_name = Some("导管".to_string());
        let mut b = usage("张三", None, Some("1"), "C01");
        b.item_name = Some("导丝".to_string());
        let rows = [a, b];
        assert!(
            consumable_usage_summary(&rows, "张三", "1", RepresentativePolicy::RequireAgreement)
                .is_err()
        );
        let lenient =
            consumable_usage_summary(&rows, "张三", "1", RepresentativePolicy::FirstSeen).unwrap();
        assert_eq!(lenient[0].item_name.as_deref(), Some("导管"));
    }
}
