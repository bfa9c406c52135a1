use drg_model::{CaseRecord, ConsumableUsageRecord, DiseaseRecord, TableKind};
use drg_store::{
    ColumnDef, RowFilter, SqlType, StoreError, StoredRecord, TabularStore, case_cols,
    disease_cols,
};
use rusqlite::Row;
use rusqlite::types::Value;
use tempfile::TempDir;

fn disease(name: &str, department: &str, excess: Option<f64>) -> DiseaseRecord {
    DiseaseRecord {
        name: name.to_string(),
        department: department.to_string(),
        drg: format!("{name}1"),
        consumable_cost_excess: excess,
        ..DiseaseRecord::default()
    }
}

#[test]
fn missing_table_reads_as_empty() {
    let store = TabularStore::open_in_memory().expect("open store");
    assert!(!store.table_exists(TableKind::Case).expect("exists"));
    assert_eq!(store.row_count(TableKind::Case).expect("count"), 0);
    assert!(store.load::<CaseRecord>().expect("load").is_empty());
}

#[test]
fn replace_discards_previous_rows() {
    let mut store = TabularStore::open_in_memory().expect("open store");
    store
        .replace_table(&[disease("X", "心内科", Some(1.0)), disease("Y", "骨科", None)])
        .expect("first upload");
    store
        .replace_table(&[disease("Z", "外科", Some(2.5))])
        .expect("second upload");

    let rows = store.load::<DiseaseRecord>().expect("load");
    assert_eq!(rows, vec![disease("Z", "外科", Some(2.5))]);
}

#[test]
fn select_filters_and_preserves_insertion_order() {
    let mut store = TabularStore::open_in_memory().expect("open store");
    let rows = vec![
        disease("X", "心内科", Some(3.0)),
        disease("Y", "骨科", None),
        disease("X", "外科", Some(1.0)),
    ];
    store.replace_table(&rows).expect("upload");

    let x_rows: Vec<DiseaseRecord> = store
        .select(&RowFilter::all().eq(disease_cols::NAME, "X"))
        .expect("select");
    assert_eq!(x_rows, vec![rows[0].clone(), rows[2].clone()]);

    let narrowed: Vec<DiseaseRecord> = store
        .select(
            &RowFilter::all()
                .eq(disease_cols::NAME, "X")
                .eq(disease_cols::DEPARTMENT, "外科"),
        )
        .expect("select");
    assert_eq!(narrowed, vec![rows[2].clone()]);
}

#[test]
fn unknown_filter_column_is_rejected() {
    let store = TabularStore::open_in_memory().expect("open store");
    let err = store
        .select::<CaseRecord>(&RowFilter::all().eq("nope", "x"))
        .unwrap_err();
    assert!(matches!(err, StoreError::UnknownColumn { .. }));
}

#[test]
fn record_numbers_round_trip_as_text() {
    let mut store = TabularStore::open_in_memory().expect("open store");
    let case = CaseRecord {
        patient_name: "张三".to_string(),
        record_number: "00123".to_string(),
        drg_name: "X".to_string(),
        length_of_stay: Some(6.0),
        ..CaseRecord::default()
    };
    store.replace_table(&[case.clone(), case.clone()]).expect("upload");

    let rows: Vec<CaseRecord> = store
        .select(&RowFilter::all().eq(case_cols::PATIENT_NAME, "张三"))
        .expect("select");
    assert_eq!(rows, vec![case.clone(), case]);
}

struct MisshapenRecord;

impl StoredRecord for MisshapenRecord {
    const KIND: TableKind = TableKind::Disease;

    fn columns() -> &'static [ColumnDef] {
        &[
            ColumnDef {
                name: "a",
                sql_type: SqlType::Text,
            },
            ColumnDef {
                name: "b",
                sql_type: SqlType::Real,
            },
        ]
    }

    fn to_values(&self) -> Vec<Value> {
        vec![Value::Text("only one".to_string())]
    }

    fn from_row(_row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self)
    }
}

#[test]
fn failed_replace_keeps_previous_table() {
    let mut store = TabularStore::open_in_memory().expect("open store");
    let original = vec![disease("X", "心内科", Some(1.0))];
    store.replace_table(&original).expect("upload");

    let err = store.replace_table(&[MisshapenRecord]).unwrap_err();
    assert!(matches!(
        err,
        StoreError::RowShape {
            expected: 2,
            actual: 1,
            ..
        }
    ));
    assert_eq!(store.load::<DiseaseRecord>().expect("load"), original);
}

#[test]
fn drop_table_reports_prior_existence() {
    let mut store = TabularStore::open_in_memory().expect("open store");
    assert!(!store.drop_table(TableKind::Consumable).expect("drop"));

    let usage = ConsumableUsageRecord {
        patient_name: "张三".to_string(),
        item_code: "C01".to_string(),
        amount: Some(50.0),
        ..ConsumableUsageRecord::default()
    };
    store.replace_table(&[usage]).expect("upload");
    assert!(store.drop_table(TableKind::Consumable).expect("drop"));
    assert!(store.load::<ConsumableUsageRecord>().expect("load").is_empty());
}

#[test]
fn file_store_persists_across_connections() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("drg_cost.db");
    {
        let mut store = TabularStore::open(&path).expect("open store");
        store
            .replace_table(&[disease("X", "心内科", None)])
            .expect("upload");
    }
    let store = TabularStore::open(&path).expect("reopen store");
    assert_eq!(store.path(), Some(path.as_path()));
    assert_eq!(store.row_count(TableKind::Disease).expect("count"), 1);
}
