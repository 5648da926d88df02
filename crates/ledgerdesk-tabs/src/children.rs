//! Child-tab registry of a single module
//!
//! Owns the ordered tab list (insertion order is display order) and the
//! module's active child tab. Eviction is scoped to this list: modules
//! never share an eviction pool.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::id::ChildTabId;
use crate::state::Protection;
use crate::tab::ChildTab;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildTabs {
    tabs: Vec<ChildTab>,
    active_child_tab_id: Option<ChildTabId>,
}

impl ChildTabs {
    pub fn tabs(&self) -> &[ChildTab] {
        &self.tabs
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn active_child_tab_id(&self) -> Option<&str> {
        self.active_child_tab_id.as_deref()
    }

    pub fn active_tab(&self) -> Option<&ChildTab> {
        self.active_child_tab_id
            .as_deref()
            .and_then(|id| self.get(id))
    }

    pub fn get(&self, tab_id: &str) -> Option<&ChildTab> {
        self.tabs.iter().find(|t| t.id == tab_id)
    }

    pub fn contains(&self, tab_id: &str) -> bool {
        self.position(tab_id).is_some()
    }

    pub fn position(&self, tab_id: &str) -> Option<usize> {
        self.tabs.iter().position(|t| t.id == tab_id)
    }

    pub fn has_dirty(&self) -> bool {
        self.tabs.iter().any(|t| t.dirty)
    }

    pub fn protection(&self, tab: &ChildTab) -> Protection {
        let is_active = self.active_child_tab_id.as_deref() == Some(tab.id.as_str());
        Protection::classify(is_active, tab.closable, tab.dirty)
    }

    /// Least recently used evictable tab.
    ///
    /// Ties on `last_accessed_at` go to the tab that appears first in the
    /// list (`min_by_key` keeps the first minimum).
    pub fn eviction_candidate(&self) -> Option<&ChildTab> {
        self.tabs
            .iter()
            .filter(|t| self.protection(t).can_evict())
            .min_by_key(|t| t.last_accessed_at)
    }

    pub(crate) fn get_mut(&mut self, tab_id: &str) -> Option<&mut ChildTab> {
        self.tabs.iter_mut().find(|t| t.id == tab_id)
    }

    /// Make `tab_id` the active tab and stamp it. Returns false if unknown.
    pub(crate) fn activate(&mut self, tab_id: &str, now: DateTime<Utc>) -> bool {
        match self.get_mut(tab_id) {
            Some(tab) => {
                tab.touch(now);
                self.active_child_tab_id = Some(tab_id.to_string());
                true
            }
            None => false,
        }
    }

    /// Append a freshly opened tab and make it active.
    pub(crate) fn push_active(&mut self, tab: ChildTab) {
        self.active_child_tab_id = Some(tab.id.clone());
        self.tabs.push(tab);
    }

    /// Remove a tab. When it was the active one, the tab now sitting at its
    /// index becomes active, else its predecessor, else none.
    pub(crate) fn remove(&mut self, tab_id: &str) -> Option<ChildTab> {
        let index = self.position(tab_id)?;
        let removed = self.tabs.remove(index);

        if self.active_child_tab_id.as_deref() == Some(tab_id) {
            self.active_child_tab_id =
                neighbor_after_removal(&self.tabs, index).map(|t| t.id.clone());
        }

        Some(removed)
    }

    /// Activate the first tab when tabs exist but none is active.
    pub(crate) fn ensure_active(&mut self) {
        if self.active_child_tab_id.is_none() {
            self.active_child_tab_id = self.tabs.first().map(|t| t.id.clone());
        }
    }
}

/// Element now occupying `index`, else the one just before it.
pub(crate) fn neighbor_after_removal<T>(items: &[T], index: usize) -> Option<&T> {
    items
        .get(index)
        .or_else(|| index.checked_sub(1).and_then(|i| items.get(i)))
}
