//! Ledgerdesk Core
//!
//! Application layer around the tab registry: configuration, the menu
//! catalog, the component registry and the shared `Workbench` handle that
//! every UI surface goes through. The registry is owned by the workbench;
//! there is no global instance.

mod components;
mod config;
mod dirty;
mod error;
mod menu;
mod view;
mod workbench;

pub use components::ComponentRegistry;
pub use config::Config;
pub use dirty::TabDirty;
pub use error::CoreError;
pub use menu::{MenuCatalog, MenuItem};
pub use view::{ChildTabView, CommandResult, ModuleTabView, WorkbenchView};
pub use workbench::Workbench;

// Re-export the tab registry surface
pub use ledgerdesk_tabs::{
    child_tab_id, ChildTab, ChildTabId, Clock, FailureReason, ManualClock, ModuleTab,
    ModuleTabId, OpenChildTab, OpenChildTabOutcome, OpenModule, OpenModuleOutcome, Props,
    SystemClock, TabError, TabLimits, TabRegistry,
};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
///
/// `RUST_LOG` wins over the configured filter.
pub fn init_logging(config: &Config) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_filter.as_str()));

    fmt().with_env_filter(filter).with_target(true).init();
}
