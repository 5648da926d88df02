//! Registry capacity

use serde::{Deserialize, Serialize};

use crate::error::TabError;
use crate::Result;

pub const DEFAULT_MAX_MODULES: usize = 8;
pub const DEFAULT_MAX_TABS_PER_MODULE: usize = 10;

/// Capacity bounds, both supplied by the host configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTabLimits")]
pub struct TabLimits {
    /// Maximum number of concurrently open modules
    pub max_modules: usize,
    /// Maximum number of open child tabs inside one module
    pub max_tabs_per_module: usize,
}

impl TabLimits {
    pub fn new(max_modules: usize, max_tabs_per_module: usize) -> Result<Self> {
        if max_modules == 0 {
            return Err(TabError::InvalidLimits(
                "max_modules must be at least 1".to_string(),
            ));
        }
        if max_tabs_per_module == 0 {
            return Err(TabError::InvalidLimits(
                "max_tabs_per_module must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            max_modules,
            max_tabs_per_module,
        })
    }
}

impl Default for TabLimits {
    fn default() -> Self {
        Self {
            max_modules: DEFAULT_MAX_MODULES,
            max_tabs_per_module: DEFAULT_MAX_TABS_PER_MODULE,
        }
    }
}

#[derive(Deserialize)]
struct RawTabLimits {
    #[serde(default = "default_max_modules")]
    max_modules: usize,
    #[serde(default = "default_max_tabs_per_module")]
    max_tabs_per_module: usize,
}

fn default_max_modules() -> usize {
    DEFAULT_MAX_MODULES
}

fn default_max_tabs_per_module() -> usize {
    DEFAULT_MAX_TABS_PER_MODULE
}

impl TryFrom<RawTabLimits> for TabLimits {
    type Error = TabError;

    fn try_from(raw: RawTabLimits) -> Result<Self> {
        TabLimits::new(raw.max_modules, raw.max_tabs_per_module)
    }
}
