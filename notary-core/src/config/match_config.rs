use chrono::Duration;
use serde::{Deserialize, Serialize};

use super::defaults;

/// Set matching configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Maximum allowed |committed time - observed time| for a pair to
    /// count as matched.
    pub max_timestamp_diff_secs: u64,
    /// Minimum score for a candidate set to appear in the ranked output.
    pub min_score: f64,
    /// Cap on the number of ranked results returned.
    pub max_results: Option<usize>,
}

impl MatchConfig {
    pub fn max_timestamp_diff(&self) -> Duration {
        Duration::seconds(self.max_timestamp_diff_secs as i64)
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_timestamp_diff_secs: defaults::DEFAULT_MAX_TIMESTAMP_DIFF_SECS,
            min_score: defaults::DEFAULT_MIN_SCORE,
            max_results: None,
        }
    }
}
