//! Child tab protection
//!
//! ```text
//! {absent} --open--> {open, clean} <--set_dirty--> {open, dirty}
//!     ^                   |                             |
//!     +------close--------+-------------close-----------+
//!     ^                   |
//!     +------evict--------+   (only when Evictable)
//! ```
//!
//! Eviction is the only system-triggered transition, and it is refused for
//! anything that is not `Evictable`.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protection {
    /// Currently presented tab of its module
    Active,
    /// Tab the user is not allowed to close
    Pinned,
    /// Tab holds unsaved edits
    Dirty,
    /// Clean, closable, background tab
    Evictable,
}

impl Protection {
    /// Classify a tab. Precedence: active, then pinned, then dirty.
    pub fn classify(is_active: bool, closable: bool, dirty: bool) -> Self {
        if is_active {
            Protection::Active
        } else if !closable {
            Protection::Pinned
        } else if dirty {
            Protection::Dirty
        } else {
            Protection::Evictable
        }
    }

    pub fn can_evict(&self) -> bool {
        matches!(self, Protection::Evictable)
    }
}
