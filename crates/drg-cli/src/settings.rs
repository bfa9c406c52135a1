//! User settings stored as TOML.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use drg_model::{
    AnalysisOptions, DEFAULT_SIMILARITY_WINDOW, RepresentativePolicy, SimilarityOptions,
    TOP_LOSS_COUNT,
};
use serde::{Deserialize, Serialize};

/// Default database file, relative to the working directory.
pub const DEFAULT_DATABASE: &str = "drg_cost.db";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// SQLite database file.
    pub database: PathBuf,

    pub analysis: AnalysisSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database: PathBuf::from(DEFAULT_DATABASE),
            analysis: AnalysisSettings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Diseases in the headline loss ranking.
    pub top_loss_count: usize,

    /// Length-of-stay window for similar cases, in days.
    pub similarity_window: f64,

    /// List the reference case first among similar cases.
    pub promote_reference: bool,

    pub representative: RepresentativePolicy,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            top_loss_count: TOP_LOSS_COUNT,
            similarity_window: DEFAULT_SIMILARITY_WINDOW,
            promote_reference: true,
            representative: RepresentativePolicy::default(),
        }
    }
}

impl Settings {
    /// Load from `explicit` when given, else from the default path if it exists.
    ///
    /// An explicit path must exist; a missing default file yields defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }
        let path = Self::config_path();
        if path.is_file() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read settings {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parse settings {}", path.display()))
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create config directory {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("serialize settings")?;
        std::fs::write(path, content).with_context(|| format!("write settings {}", path.display()))
    }

    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("org", "DrgCostStudio", "drg-cost")
            .map(|dirs| dirs.config_dir().join("settings.toml"))
            .unwrap_or_else(|| PathBuf::from("settings.toml"))
    }

    pub fn analysis_options(&self) -> AnalysisOptions {
        let analysis = &self.analysis;
        AnalysisOptions::new()
            .with_top_loss_count(analysis.top_loss_count)
            .with_representative(analysis.representative)
            .with_similarity(
                SimilarityOptions::default()
                    .with_window(analysis.similarity_window)
                    .with_promote_reference(analysis.promote_reference),
            )
    }
}
