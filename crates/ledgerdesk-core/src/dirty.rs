//! Dirty-state accessor for form tabs
//!
//! Forms hold one of these for their own tab: they read the flag to show a
//! "modified" marker and to decide whether to confirm a close, and report
//! edits/saves through `mark_dirty`/`clear_dirty`. It never touches recency
//! or activation.

use crate::workbench::Workbench;

#[derive(Clone)]
pub struct TabDirty {
    workbench: Workbench,
    tab_id: String,
}

impl TabDirty {
    pub(crate) fn new(workbench: Workbench, tab_id: String) -> Self {
        Self { workbench, tab_id }
    }

    pub fn tab_id(&self) -> &str {
        &self.tab_id
    }

    /// False once the tab has been closed
    pub fn dirty(&self) -> bool {
        self.workbench.is_dirty(&self.tab_id)
    }

    pub fn mark_dirty(&self) {
        self.workbench.set_dirty(&self.tab_id, true);
    }

    pub fn clear_dirty(&self) {
        self.workbench.set_dirty(&self.tab_id, false);
    }
}

impl std::fmt::Debug for TabDirty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TabDirty")
            .field("tab_id", &self.tab_id)
            .field("dirty", &self.dirty())
            .finish()
    }
}
