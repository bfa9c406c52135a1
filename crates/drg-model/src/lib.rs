//! Data model for DRG case-mix cost analysis.
//!
//! Record schemas for the three source tables, the derived aggregates
//! returned by the analysis engine and the options that parameterize it.

pub mod columns;
pub mod notice;
pub mod options;
pub mod records;
pub mod summary;

pub use notice::{EmptyResultNotice, QueryRows};
pub use options::{
    AnalysisOptions, DEFAULT_SIMILARITY_WINDOW, EXTRA_LOSS_CHOICES, RepresentativePolicy,
    SimilarityOptions, TOP_LOSS_COUNT,
};
pub use records::{CaseRecord, ConsumableUsageRecord, DiseaseRecord, TableKind};
pub use summary::{
    BreakdownLevel, ConsumableUsageSummary, CostBreakdown, DepartmentBreakdown,
    DiseaseCostOverview, DiseaseSummary, TreatmentGroupBreakdown,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_rows_attaches_notice_only_when_empty() {
        let notice = EmptyResultNotice::NoCases {
            disease: "X".to_string(),
        };
        let filled = QueryRows::new(vec![1, 2], notice.clone());
        assert!(filled.notice.is_none());
        assert_eq!(filled.len(), 2);

        let empty: QueryRows<i32> = QueryRows::new(Vec::new(), notice.clone());
        assert_eq!(empty.notice, Some(notice));
        assert!(empty.is_empty());
    }

    #[test]
    fn table_names_are_distinct() {
        let names: std::collections::BTreeSet<_> =
            TableKind::ALL.iter().map(|kind| kind.table_name()).collect();
        assert_eq!(names.len(), 3);
    }
}
