//! Core error types

use ledgerdesk_tabs::FailureReason;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error(transparent)]
    Tab(#[from] ledgerdesk_tabs::TabError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unknown menu item: {0}")]
    UnknownMenuItem(String),

    #[error("Menu item '{menu_id}' uses unregistered component '{component}'")]
    UnknownComponent { menu_id: String, component: String },
}

impl CoreError {
    /// Registry failure reason, when the error came from the registry
    pub fn tab_reason(&self) -> Option<FailureReason> {
        match self {
            CoreError::Tab(e) => Some(e.reason()),
            _ => None,
        }
    }
}
