//! Tests for drg-model types.

use drg_model::{
    AnalysisOptions, CaseRecord, EmptyResultNotice, QueryRows, RepresentativePolicy,
    SimilarityOptions, TableKind,
};

#[test]
fn default_options_match_dashboard_defaults() {
    let options = AnalysisOptions::default();
    assert_eq!(options.top_loss_count, 15);
    assert_eq!(options.representative, RepresentativePolicy::RequireAgreement);
    assert!((options.similarity.window - 4.0).abs() < f64::EPSILON);
    assert!(options.similarity.promote_reference);
}

#[test]
fn representative_policy_uses_kebab_case() {
    let json = serde_json::to_string(&RepresentativePolicy::FirstSeen).expect("serialize");
    assert_eq!(json, "\"first-seen\"");
    let parsed: RepresentativePolicy =
        serde_json::from_str("\"require-agreement\"").expect("deserialize");
    assert_eq!(parsed, RepresentativePolicy::RequireAgreement);
}

#[test]
fn same_case_requires_name_and_record_number() {
    let a = CaseRecord {
        patient_name: "张三".to_string(),
        record_number: "00123".to_string(),
        ..CaseRecord::default()
    };
    let mut b = a.clone();
    assert!(a.is_same_case(&b));
    b.record_number = "123".to_string();
    assert!(!a.is_same_case(&b));
}

#[test]
fn similarity_builders_override_defaults() {
    let options = SimilarityOptions::default()
        .with_window(2.0)
        .with_promote_reference(false);
    assert!((options.window - 2.0).abs() < f64::EPSILON);
    assert!(!options.promote_reference);
}

#[test]
fn notice_serializes_with_kind_tag() {
    let rows: QueryRows<u8> = QueryRows::empty(EmptyResultNotice::TableNotLoaded {
        table: TableKind::Consumable,
    });
    let json = serde_json::to_value(&rows).expect("serialize rows");
    assert_eq!(json["notice"]["kind"], "table_not_loaded");
    assert_eq!(json["notice"]["table"], "consumable");
    assert_eq!(
        rows.notice.expect("notice").to_string(),
        "no consumable usage data loaded; ingest the file first"
    );
}

#[test]
fn empty_table_notice_differs_from_not_loaded() {
    let empty = EmptyResultNotice::EmptyTable {
        table: TableKind::Disease,
    };
    let json = serde_json::to_value(&empty).expect("serialize notice");
    assert_eq!(json["kind"], "empty_table");
    assert!(!empty.to_string().contains("ingest"));
    assert_eq!(
        EmptyResultNotice::NoRankedLosses { offset: 15 }.to_string(),
        "no diseases ranked beyond the first 15"
    );
}
