//! Ledgerdesk Tab Registry
//!
//! Two-level tab session manager:
//! - Module tabs are top-level workspaces, one per opened menu section.
//! - Child tabs are documents/forms/lists nested inside exactly one module.
//!
//! The registry is a pure state machine. Every operation is a single
//! transition that either completes or leaves the state untouched; no I/O
//! happens here.

mod children;
mod clock;
mod error;
mod id;
mod limits;
mod module;
mod registry;
mod state;
mod tab;

pub use children::ChildTabs;
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{FailureReason, TabError};
pub use id::{child_tab_id, ChildTabId, ModuleTabId, CHILD_TAB_ID_SEPARATOR};
pub use limits::TabLimits;
pub use module::{ModuleTab, OpenModule};
pub use registry::{OpenChildTabOutcome, OpenModuleOutcome, TabRegistry};
pub use state::Protection;
pub use tab::{ChildTab, OpenChildTab, Props};

pub type Result<T> = std::result::Result<T, TabError>;
