//! Workbench configuration

use ledgerdesk_tabs::TabLimits;
use serde::{Deserialize, Serialize};

use crate::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Module and child tab capacity
    pub tabs: TabLimits,
    /// Log filter used when `RUST_LOG` is not set
    pub log_filter: String,
}

impl Config {
    pub fn new(tabs: TabLimits) -> Self {
        Self {
            tabs,
            ..Self::default()
        }
    }

    /// Parse configuration from JSON. Missing fields take their defaults;
    /// zero capacities are rejected.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tabs: TabLimits::default(),
            log_filter: "info".to_string(),
        }
    }
}
