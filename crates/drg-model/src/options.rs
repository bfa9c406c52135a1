//! Configuration options for cost analysis.

use serde::{Deserialize, Serialize};

/// Number of diseases in the headline loss ranking.
pub const TOP_LOSS_COUNT: usize = 15;

/// Sizes offered for the follow-up ranking after the headline ranking.
pub const EXTRA_LOSS_CHOICES: [usize; 4] = [15, 30, 45, 60];

/// Default length-of-stay window, in days, for similar-case matching.
pub const DEFAULT_SIMILARITY_WINDOW: f64 = 4.0;

/// How a group picks its representative text value (DRG name, item name).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RepresentativePolicy {
    /// Every row of the group must carry the same value; disagreement is an error.
    #[default]
    RequireAgreement,
    /// Take the first value encountered in the group.
    FirstSeen,
}

/// Options for similar-case matching.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimilarityOptions {
    /// Inclusive length-of-stay distance from the reference case, in days.
    pub window: f64,
    /// Move the reference case itself to the front of the result.
    pub promote_reference: bool,
}

impl Default for SimilarityOptions {
    fn default() -> Self {
        Self {
            window: DEFAULT_SIMILARITY_WINDOW,
            promote_reference: true,
        }
    }
}

impl SimilarityOptions {
    #[must_use]
    pub fn with_window(mut self, window: f64) -> Self {
        self.window = window;
        self
    }

    #[must_use]
    pub fn with_promote_reference(mut self, enable: bool) -> Self {
        self.promote_reference = enable;
        self
    }
}

/// Options controlling an analysis session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisOptions {
    pub top_loss_count: usize,
    pub representative: RepresentativePolicy,
    pub similarity: SimilarityOptions,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            top_loss_count: TOP_LOSS_COUNT,
            representative: RepresentativePolicy::default(),
            similarity: SimilarityOptions::default(),
        }
    }
}

impl AnalysisOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_representative(mut self, policy: RepresentativePolicy) -> Self {
        self.representative = policy;
        self
    }

    #[must_use]
    pub fn with_similarity(mut self, similarity: SimilarityOptions) -> Self {
        self.similarity = similarity;
        self
    }

    #[must_use]
    pub fn with_top_loss_count(mut self, count: usize) -> Self {
        self.top_loss_count = count;
        self
    }
}
