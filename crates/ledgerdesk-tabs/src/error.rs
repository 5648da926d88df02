//! Tab error types
//!
//! All failures are expected, user-facing conditions. They are returned,
//! never panicked, and a failing operation never mutates the registry.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TabError {
    #[error("Maximum of {limit} open modules reached. Close another module before opening a new one.")]
    MaxModulesReached { limit: usize },

    #[error(
        "Maximum of {limit} open tabs reached in module '{module_id}'. \
         Close another tab (especially ones with unsaved changes) before opening a new one."
    )]
    MaxTabsReached { module_id: String, limit: usize },

    #[error("No active module")]
    NoActiveModule,

    #[error("Module not found: {0}")]
    ModuleNotFound(String),

    #[error("Invalid tab id: {0}")]
    InvalidId(String),

    #[error("Invalid tab limits: {0}")]
    InvalidLimits(String),
}

/// Machine-readable failure discriminant, stable on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    MaxModulesReached,
    MaxTabsReached,
    NoActiveModule,
    InvalidId,
    InvalidLimits,
}

impl FailureReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureReason::MaxModulesReached => "max_modules_reached",
            FailureReason::MaxTabsReached => "max_tabs_reached",
            FailureReason::NoActiveModule => "no_active_module",
            FailureReason::InvalidId => "invalid_id",
            FailureReason::InvalidLimits => "invalid_limits",
        }
    }
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TabError {
    pub fn reason(&self) -> FailureReason {
        match self {
            TabError::MaxModulesReached { .. } => FailureReason::MaxModulesReached,
            TabError::MaxTabsReached { .. } => FailureReason::MaxTabsReached,
            // An explicit module id that does not resolve is reported the
            // same way as a missing active module.
            TabError::NoActiveModule | TabError::ModuleNotFound(_) => FailureReason::NoActiveModule,
            TabError::InvalidId(_) => FailureReason::InvalidId,
            TabError::InvalidLimits(_) => FailureReason::InvalidLimits,
        }
    }
}
