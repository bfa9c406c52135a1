//! Extraction of typed records from validated, coerced frames.

use drg_model::columns::{case, consumable, disease};
use drg_model::{CaseRecord, ConsumableUsageRecord, DiseaseRecord};
use polars::prelude::DataFrame;

use crate::frame::{number_values, text_values};

pub fn disease_records(df: &DataFrame) -> Vec<DiseaseRecord> {
    let name = text_values(df, disease::NAME);
    let department = text_values(df, disease::DEPARTMENT);
    let treatment_group = text_values(df, disease::TREATMENT_GROUP);
    let drg = text_values(df, disease::DRG);
    let case_count = number_values(df, disease::CASE_COUNT);
    let avg_consumable_cost = number_values(df, disease::AVG_CONSUMABLE_COST);
    let reference_total = number_values(df, disease::CONSUMABLE_REFERENCE_TOTAL);
    let reference_per_case = number_values(df, disease::CONSUMABLE_REFERENCE_PER_CASE);
    let cost_excess = number_values(df, disease::CONSUMABLE_COST_EXCESS);
    let total_cost = number_values(df, disease::TOTAL_COST);
    let drg_cost = number_values(df, disease::DRG_COST);
    let insurance_paid = number_values(df, disease::INSURANCE_PAID_COST);
    let avg_los = number_values(df, disease::AVG_LENGTH_OF_STAY);

    (0..df.height())
        .map(|idx| DiseaseRecord {
            name: name[idx].clone().unwrap_or_default(),
            department: department[idx].clone().unwrap_or_default(),
            treatment_group: treatment_group[idx].clone(),
            drg: drg[idx].clone().unwrap_or_default(),
            case_count: case_count[idx],
            avg_consumable_cost: avg_consumable_cost[idx],
            consumable_reference_total: reference_total[idx],
            consumable_reference_per_case: reference_per_case[idx],
            consumable_cost_excess: cost_excess[idx],
            total_cost: total_cost[idx],
            drg_cost: drg_cost[idx],
            insurance_paid_cost: insurance_paid[idx],
            avg_length_of_stay: avg_los[idx],
        })
        .collect()
}

pub fn case_records(df: &DataFrame) -> Vec<CaseRecord> {
    let patient_name = text_values(df, case::PATIENT_NAME);
    let record_number = text_values(df, case::RECORD_NUMBER);
    let drg_code = text_values(df, case::DRG_CODE);
    let drg_name = text_values(df, case::DRG_NAME);
    let classification = text_values(df, case::CLASSIFICATION);
    let department = text_values(df, case::DISCHARGE_DEPARTMENT);
    let length_of_stay = number_values(df, case::LENGTH_OF_STAY);
    let profit_loss = number_values(df, case::PREDICTED_PROFIT_LOSS);
    let diagnosis = text_values(df, case::PRIMARY_DIAGNOSIS);
    let discharge_date = text_values(df, case::DISCHARGE_DATE);

    (0..df.height())
        .map(|idx| CaseRecord {
            patient_name: patient_name[idx].clone().unwrap_or_default(),
            record_number: record_number[idx].clone().unwrap_or_default(),
            drg_code: drg_code[idx].clone(),
            drg_name: drg_name[idx].clone().unwrap_or_default(),
            classification: classification[idx].clone().unwrap_or_default(),
            discharge_department: department[idx].clone(),
            length_of_stay: length_of_stay[idx],
            predicted_profit_loss: profit_loss[idx],
            primary_diagnosis: diagnosis[idx].clone().unwrap_or_default(),
            discharge_date: discharge_date[idx].clone(),
        })
        .collect()
}

pub fn consumable_records(df: &DataFrame) -> Vec<ConsumableUsageRecord> {
    let patient_name = text_values(df, consumable::PATIENT_NAME);
    let inpatient_id = text_values(df, consumable::INPATIENT_ID);
    let outpatient_id = text_values(df, consumable::OUTPATIENT_ID);
    let item_code = text_values(df, consumable::ITEM_CODE);
    let item_name = text_values(df, consumable::ITEM_NAME);
    let quantity = number_values(df, consumable::QUANTITY);
    let amount = number_values(df, consumable::AMOUNT);
    let doctor = text_values(df, consumable::DOCTOR);
    let expense_date = text_values(df, consumable::EXPENSE_DATE);

    (0..df.height())
        .map(|idx| ConsumableUsageRecord {
            patient_name: patient_name[idx].clone().unwrap_or_default(),
            inpatient_id: inpatient_id[idx].clone(),
            outpatient_id: outpatient_id[idx].clone(),
            item_code: item_code[idx].clone().unwrap_or_default(),
            item_name: item_name[idx].clone(),
            quantity: quantity[idx],
            amount: amount[idx],
            doctor: doctor[idx].clone(),
            expense_date: expense_date[idx].clone(),
        })
        .collect()
}
