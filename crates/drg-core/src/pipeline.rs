//! Ingestion into the store: normalize, replace, re-read.

use std::path::{Path, PathBuf};

use drg_ingest::Ingested;
use drg_model::{CaseRecord, ConsumableUsageRecord, DiseaseRecord, TableKind};
use drg_store::{StoredRecord, TabularStore};
use tracing::{info, warn};

use crate::error::Result;

/// Loads a disease detail file and replaces the disease table with it.
pub fn normalize_disease_file(
    store: &mut TabularStore,
    path: &Path,
) -> Result<Ingested<DiseaseRecord>> {
    let ingested = drg_ingest::read_disease_file(path)?;
    persist(store, ingested)
}

/// Loads a case detail file and replaces the case table with it.
pub fn normalize_case_file(store: &mut TabularStore, path: &Path) -> Result<Ingested<CaseRecord>> {
    let ingested = drg_ingest::read_case_file(path)?;
    persist(store, ingested)
}

/// Loads consumable usage files and replaces the usage table with them.
///
/// An empty `paths` list clears the table.
pub fn normalize_consumable_files(
    store: &mut TabularStore,
    paths: &[PathBuf],
) -> Result<Ingested<ConsumableUsageRecord>> {
    if paths.is_empty() {
        let existed = store.drop_table(TableKind::Consumable)?;
        info!(existed, "cleared consumable usage table");
        return Ok(Ingested::empty());
    }
    let ingested = drg_ingest::read_consumable_files(paths)?;
    persist(store, ingested)
}

fn persist<R: StoredRecord>(
    store: &mut TabularStore,
    ingested: Ingested<R>,
) -> Result<Ingested<R>> {
    let Ingested { records, warnings } = ingested;
    if !warnings.is_empty() {
        warn!(
            table = R::KIND.label(),
            count = warnings.len(),
            "values replaced by missing during ingestion"
        );
    }
    store.replace_table(&records)?;
    let records = store.load::<R>()?;
    Ok(Ingested { records, warnings })
}
