//! Caller-owned analysis context.

use std::path::{Path, PathBuf};

use drg_ingest::Ingested;
use drg_model::{
    AnalysisOptions, CaseRecord, ConsumableUsageRecord, ConsumableUsageSummary, CostBreakdown,
    DiseaseCostOverview, DiseaseRecord, DiseaseSummary, EmptyResultNotice, QueryRows,
    SimilarityOptions, TableKind,
};
use drg_store::{RowFilter, TabularStore, consumable_cols, disease_cols};

use crate::error::Result;
use crate::{aggregate, pipeline, similarity, usage};

/// A store plus the options every query runs with.
///
/// Every query re-reads the store, so results always reflect the latest
/// ingestion.
pub struct AnalysisSession {
    store: TabularStore,
    options: AnalysisOptions,
}

impl AnalysisSession {
    pub fn new(store: TabularStore, options: AnalysisOptions) -> Self {
        Self { store, options }
    }

    pub fn open(path: &Path, options: AnalysisOptions) -> Result<Self> {
        Ok(Self::new(TabularStore::open(path)?, options))
    }

    pub fn in_memory(options: AnalysisOptions) -> Result<Self> {
        Ok(Self::new(TabularStore::open_in_memory()?, options))
    }

    pub fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    pub fn store(&self) -> &TabularStore {
        &self.store
    }

    // === Ingestion ===

    pub fn ingest_disease_file(&mut self, path: &Path) -> Result<Ingested<DiseaseRecord>> {
        pipeline::normalize_disease_file(&mut self.store, path)
    }

    pub fn ingest_case_file(&mut self, path: &Path) -> Result<Ingested<CaseRecord>> {
        pipeline::normalize_case_file(&mut self.store, path)
    }

    pub fn ingest_consumable_files(
        &mut self,
        paths: &[PathBuf],
    ) -> Result<Ingested<ConsumableUsageRecord>> {
        pipeline::normalize_consumable_files(&mut self.store, paths)
    }

    /// Row count of every store table; zero for tables not loaded.
    pub fn table_counts(&self) -> Result<Vec<(TableKind, usize)>> {
        TableKind::ALL
            .iter()
            .map(|kind| Ok((*kind, self.store.row_count(*kind)?)))
            .collect()
    }

    // === Disease Queries ===

    pub fn disease_summary(&self) -> Result<QueryRows<DiseaseSummary>> {
        if let Some(notice) = self.not_loaded(TableKind::Disease)? {
            return Ok(QueryRows::empty(notice));
        }
        let records = self.store.load::<DiseaseRecord>()?;
        let rows = aggregate::disease_summary(&records, self.options.representative)?;
        Ok(QueryRows::new(rows, empty_table_notice(TableKind::Disease)))
    }

    /// The headline loss ranking.
    pub fn top_losses(&self) -> Result<QueryRows<DiseaseSummary>> {
        self.ranked_losses(self.options.top_loss_count, 0)
    }

    /// The `extra` diseases ranked right after the headline ranking.
    pub fn extra_losses(&self, extra: usize) -> Result<QueryRows<DiseaseSummary>> {
        self.ranked_losses(extra, self.options.top_loss_count)
    }

    fn ranked_losses(&self, n: usize, offset: usize) -> Result<QueryRows<DiseaseSummary>> {
        let summary = self.disease_summary()?;
        if summary.notice.is_some() {
            return Ok(summary);
        }
        let rows = aggregate::top_n_losses(&summary.rows, n, offset);
        Ok(QueryRows::new(rows, EmptyResultNotice::NoRankedLosses { offset }))
    }

    pub fn search_diseases(&self, query: &str) -> Result<QueryRows<String>> {
        let summary = self.disease_summary()?;
        if let Some(notice) = summary.notice {
            return Ok(QueryRows::empty(notice));
        }
        let rows = aggregate::search_diseases(&summary.rows, query);
        Ok(QueryRows::new(
            rows,
            EmptyResultNotice::NoSearchMatch {
                query: query.to_string(),
            },
        ))
    }

    pub fn department_breakdown(&self, disease: &str) -> Result<QueryRows<CostBreakdown>> {
        if let Some(notice) = self.not_loaded(TableKind::Disease)? {
            return Ok(QueryRows::empty(notice));
        }
        let records = self.disease_rows(disease)?;
        let rows = aggregate::department_breakdown(&records, disease, self.options.representative)?;
        Ok(QueryRows::new(rows, no_disease(disease)))
    }

    pub fn treatment_group_breakdown(
        &self,
        disease: &str,
        department: &str,
    ) -> Result<QueryRows<CostBreakdown>> {
        if let Some(notice) = self.not_loaded(TableKind::Disease)? {
            return Ok(QueryRows::empty(notice));
        }
        let records = self.disease_rows(disease)?;
        if records.is_empty() {
            return Ok(QueryRows::empty(no_disease(disease)));
        }
        let rows = aggregate::treatment_group_breakdown(
            &records,
            disease,
            department,
            self.options.representative,
        )?;
        Ok(QueryRows::new(
            rows,
            EmptyResultNotice::NoTreatmentGroups {
                disease: disease.to_string(),
                department: department.to_string(),
            },
        ))
    }

    /// At most one row: the overview of `disease`.
    pub fn disease_cost_overview(&self, disease: &str) -> Result<QueryRows<DiseaseCostOverview>> {
        if let Some(notice) = self.not_loaded(TableKind::Disease)? {
            return Ok(QueryRows::empty(notice));
        }
        let records = self.disease_rows(disease)?;
        let rows = aggregate::disease_cost_overview(&records, disease)
            .into_iter()
            .collect();
        Ok(QueryRows::new(rows, no_disease(disease)))
    }

    // === Case Queries ===

    pub fn cases_for_disease(&self, disease: &str) -> Result<QueryRows<CaseRecord>> {
        if let Some(notice) = self.not_loaded(TableKind::Case)? {
            return Ok(QueryRows::empty(notice));
        }
        let cases = self.store.load::<CaseRecord>()?;
        let rows = similarity::cases_for_disease(&cases, disease);
        Ok(QueryRows::new(
            rows,
            EmptyResultNotice::NoCases {
                disease: disease.to_string(),
            },
        ))
    }

    /// Cases of `disease` similar to the first case of `patient`, using the
    /// session's similarity options.
    pub fn similar_cases(&self, disease: &str, patient: &str) -> Result<QueryRows<CaseRecord>> {
        let options = self.options.similarity;
        self.similar_cases_with(disease, patient, &options)
    }

    pub fn similar_cases_with(
        &self,
        disease: &str,
        patient: &str,
        options: &SimilarityOptions,
    ) -> Result<QueryRows<CaseRecord>> {
        let cases = self.cases_for_disease(disease)?;
        if let Some(notice) = cases.notice {
            return Ok(QueryRows::empty(notice));
        }
        let Some(reference) = similarity::reference_case(&cases.rows, patient) else {
            return Ok(QueryRows::empty(EmptyResultNotice::NoReferenceCase {
                disease: disease.to_string(),
                patient: patient.to_string(),
            }));
        };
        let rows = similarity::find_similar(&cases.rows, reference, options);
        Ok(QueryRows::new(
            rows,
            EmptyResultNotice::NoSimilarCases {
                patient: patient.to_string(),
            },
        ))
    }

    // === Consumable Queries ===

    /// Raw usage rows of one case.
    pub fn consumable_usage(
        &self,
        patient: &str,
        record_number: &str,
    ) -> Result<QueryRows<ConsumableUsageRecord>> {
        if let Some(notice) = self.not_loaded(TableKind::Consumable)? {
            return Ok(QueryRows::empty(notice));
        }
        let candidates: Vec<ConsumableUsageRecord> = self
            .store
            .select(&RowFilter::all().eq(consumable_cols::PATIENT_NAME, patient))?;
        let rows = usage::consumable_usage_rows(&candidates, patient, record_number);
        Ok(QueryRows::new(rows, no_usage(patient, record_number)))
    }

    pub fn consumable_usage_summary(
        &self,
        patient: &str,
        record_number: &str,
    ) -> Result<QueryRows<ConsumableUsageSummary>> {
        let matched = self.consumable_usage(patient, record_number)?;
        if let Some(notice) = matched.notice {
            return Ok(QueryRows::empty(notice));
        }
        let rows = usage::summarize_usage(&matched.rows, self.options.representative)?;
        Ok(QueryRows::new(rows, no_usage(patient, record_number)))
    }

    fn disease_rows(&self, disease: &str) -> Result<Vec<DiseaseRecord>> {
        Ok(self
            .store
            .select(&RowFilter::all().eq(disease_cols::NAME, disease))?)
    }

    fn not_loaded(&self, kind: TableKind) -> Result<Option<EmptyResultNotice>> {
        let loaded = self.store.table_exists(kind)?;
        Ok((!loaded).then(|| not_loaded_notice(kind)))
    }
}

fn not_loaded_notice(table: TableKind) -> EmptyResultNotice {
    EmptyResultNotice::TableNotLoaded { table }
}

fn empty_table_notice(table: TableKind) -> EmptyResultNotice {
    EmptyResultNotice::EmptyTable { table }
}

fn no_disease(disease: &str) -> EmptyResultNotice {
    EmptyResultNotice::NoDisease {
        disease: disease.to_string(),
    }
}

fn no_usage(patient: &str, record_number: &str) -> EmptyResultNotice {
    EmptyResultNotice::NoConsumableUsage {
        patient: patient.to_string(),
        record_number: record_number.to_string(),
    }
}
