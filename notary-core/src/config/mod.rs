//! Subsystem configuration with TOML overrides.

pub mod defaults;

mod index_config;
mod match_config;

pub use index_config::IndexConfig;
pub use match_config::MatchConfig;

use serde::{Deserialize, Serialize};

use crate::errors::NotaryResult;

/// Workspace-wide configuration. Every field has a default, so a partial
/// (or empty) TOML document is a valid override.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NotaryConfig {
    pub index: IndexConfig,
    pub matching: MatchConfig,
}

impl NotaryConfig {
    /// Parse a TOML override document.
    pub fn from_toml_str(s: &str) -> NotaryResult<Self> {
        Ok(toml::from_str(s)?)
    }
}
