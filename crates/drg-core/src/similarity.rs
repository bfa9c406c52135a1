//! Similar-case matching.

use drg_model::{CaseRecord, SimilarityOptions};

/// Cases filed under the DRG named `drg_name`, in input order.
pub fn cases_for_disease(cases: &[CaseRecord], drg_name: &str) -> Vec<CaseRecord> {
    cases
        .iter()
        .filter(|case| case.drg_name == drg_name)
        .cloned()
        .collect()
}

/// The first case of the named patient.
pub fn reference_case<'a>(cases: &'a [CaseRecord], patient_name: &str) -> Option<&'a CaseRecord> {
    cases.iter().find(|case| case.patient_name == patient_name)
}

/// True when `a` and `b` share classification and primary diagnosis and
/// their lengths of stay differ by at most `window` days.
pub fn is_similar(a: &CaseRecord, b: &CaseRecord, window: f64) -> bool {
    let (Some(a_los), Some(b_los)) = (a.length_of_stay, b.length_of_stay) else {
        return false;
    };
    a.classification == b.classification
        && a.primary_diagnosis == b.primary_diagnosis
        && (a_los - b_los).abs() <= window
}

/// Cases similar to `reference`, in input order.
///
/// With `promote_reference` the rows that are the reference case itself
/// are moved to the front, keeping their relative order.
pub fn find_similar(
    cases: &[CaseRecord],
    reference: &CaseRecord,
    options: &SimilarityOptions,
) -> Vec<CaseRecord> {
    let matches = cases
        .iter()
        .filter(|case| is_similar(case, reference, options.window))
        .cloned();
    if !options.promote_reference {
        return matches.collect();
    }
    let (mut promoted, rest): (Vec<_>, Vec<_>) =
        matches.partition(|case| case.is_same_case(reference));
    promoted.extend(rest);
    promoted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case(name: &str, record: &str, los: Option<f64>) -> CaseRecord {
        CaseRecord {
            patient_name: name.to_string(),
            record_number: record.to_string(),
            drg_name: "X".to_string(),
            classification: "A".to_string(),
            primary_diagnosis: "冠心病".to_string(),
            length_of_stay: los,
            ..CaseRecord::default()
        }
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let reference = case("张三", "1", Some(10.0));
        let cases = vec![
            case("李四", "2", Some(6.0)),
            case("王五", "3", Some(14.0)),
            case("赵六", "4", Some(14.5)),
            case("钱七", "5", None),
            reference.clone(),
        ];
        let names: Vec<String> = find_similar(&cases, &reference, &SimilarityOptions::default())
            .into_iter()
            .map(|c| c.patient_name)
            .collect();
        assert_eq!(names, ["张三", "李四", "王五"]);
    }

    #[test]
    fn without_promotion_input_order_is_kept() {
        let reference = case("张三", "1", Some(10.0));
        let cases = vec![case("李四", "2", Some(9.0)), reference.clone()];
        let options = SimilarityOptions::default().with_promote_reference(false);
        let names: Vec<String> = find_similar(&cases, &reference, &options)
            .into_iter()
            .map(|c| c.patient_name)
            .collect();
        assert_eq!(names, ["李四", "张三"]);
    }

    #[test]
    fn reference_without_stay_matches_nothing() {
        let reference = case("张三", "1", None);
        let cases = vec![reference.clone(), case("李四", "2", Some(1.0))];
        assert!(find_similar(&cases, &reference, &SimilarityOptions::default()).is_empty());
    }

    #[test]
    fn different_diagnosis_never_matches() {
        let reference = case("张三", "1", Some(5.0));
        let mut other = case("李四", "2", Some(5.0));
        other.primary_diagnosis = "心衰".to_string();
        assert!(!is_similar(&reference, &other, 4.0));
    }

    #[test]
    fn reference_is_first_case_of_patient() {
        let cases = vec![case("张三", "1", Some(1.0)), case("张三", "2", Some(2.0))];
        assert_eq!(
            reference_case(&cases, "张三").map(|c| c.record_number.as_str()),
            Some("1")
        );
        assert!(reference_case(&cases, "李四").is_none());
    }
}
