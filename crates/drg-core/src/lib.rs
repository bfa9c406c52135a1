//! DRG cost analysis engine.
//!
//! Aggregates the stored disease, case and consumable tables into loss
//! rankings, cost breakdowns, similar-case lists and per-case usage totals.
//! Every operation returns plain data; rendering is left to the caller.

pub mod aggregate;
mod error;
mod group;
pub mod pipeline;
mod session;
pub mod similarity;
pub mod usage;

pub use aggregate::{
    department_breakdown, disease_cost_overview, disease_summary, search_diseases,
    top_n_losses, treatment_group_breakdown,
};
pub use error::{CoreError, Result};
pub use pipeline::{normalize_case_file, normalize_consumable_files, normalize_disease_file};
pub use session::AnalysisSession;
pub use similarity::{cases_for_disease, find_similar, is_similar, reference_case};
pub use usage::{consumable_usage_rows, consumable_usage_summary, summarize_usage};
