use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Backend composition configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Independent timeout for each backend call inside an aggregate query.
    pub backend_timeout_secs: u64,
    /// Bound on one aggregate call as a whole; partial results past this
    /// deadline are discarded.
    pub overall_deadline_secs: u64,
}

impl IndexConfig {
    pub fn backend_timeout(&self) -> Duration {
        Duration::from_secs(self.backend_timeout_secs)
    }

    pub fn overall_deadline(&self) -> Duration {
        Duration::from_secs(self.overall_deadline_secs)
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            backend_timeout_secs: defaults::DEFAULT_BACKEND_TIMEOUT_SECS,
            overall_deadline_secs: defaults::DEFAULT_OVERALL_DEADLINE_SECS,
        }
    }
}
