//! Tab identifiers
//!
//! Child tab ids are derived as `module_id + "::" + local_id`, which makes
//! them globally unique as long as neither part contains the separator.

use crate::error::TabError;
use crate::Result;

pub type ModuleTabId = String;
pub type ChildTabId = String;

pub const CHILD_TAB_ID_SEPARATOR: &str = "::";

/// Build the global id of a child tab.
pub fn child_tab_id(module_id: &str, local_id: &str) -> ChildTabId {
    format!("{module_id}{CHILD_TAB_ID_SEPARATOR}{local_id}")
}

pub(crate) fn validate_id(kind: &str, id: &str) -> Result<()> {
    if id.is_empty() {
        return Err(TabError::InvalidId(format!("{kind} id cannot be empty")));
    }
    if id.contains(CHILD_TAB_ID_SEPARATOR) {
        return Err(TabError::InvalidId(format!(
            "{kind} id '{id}' must not contain '{CHILD_TAB_ID_SEPARATOR}'"
        )));
    }
    Ok(())
}
