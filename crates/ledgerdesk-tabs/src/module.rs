//! Module tab data structure
//!
//! A module tab is a top-level workspace slot, one per opened menu section.
//! It embeds the child-tab registry of its documents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::children::ChildTabs;
use crate::id::{ChildTabId, ModuleTabId};
use crate::tab::{ChildTab, OpenChildTab};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleTab {
    /// Caller-supplied id, e.g. a menu entry key
    pub id: ModuleTabId,
    pub title: String,
    /// The UI must refuse user-initiated close when false
    pub closable: bool,
    /// Rendering hint, not interpreted by the registry
    pub show_sub_tabs_bar: bool,
    pub opened_at: DateTime<Utc>,
    pub last_accessed_at: DateTime<Utc>,
    #[serde(flatten)]
    children: ChildTabs,
}

impl ModuleTab {
    pub(crate) fn open(request: &OpenModule, now: DateTime<Utc>) -> Self {
        Self {
            id: request.id.clone(),
            title: request.title.clone(),
            closable: request.closable.unwrap_or(true),
            show_sub_tabs_bar: request.show_sub_tabs_bar.unwrap_or(true),
            opened_at: now,
            last_accessed_at: now,
            children: ChildTabs::default(),
        }
    }

    /// Child tabs in open order
    pub fn tabs(&self) -> &[ChildTab] {
        self.children.tabs()
    }

    pub fn children(&self) -> &ChildTabs {
        &self.children
    }

    pub fn active_child_tab_id(&self) -> Option<&str> {
        self.children.active_child_tab_id()
    }

    pub fn active_child_tab(&self) -> Option<&ChildTab> {
        self.children.active_tab()
    }

    pub fn tab(&self, tab_id: &str) -> Option<&ChildTab> {
        self.children.get(tab_id)
    }

    pub fn tab_ids(&self) -> Vec<ChildTabId> {
        self.tabs().iter().map(|t| t.id.clone()).collect()
    }

    pub(crate) fn children_mut(&mut self) -> &mut ChildTabs {
        &mut self.children
    }

    pub(crate) fn touch(&mut self, now: DateTime<Utc>) {
        self.last_accessed_at = now;
    }
}

/// Request to open (or re-activate) a module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenModule {
    pub id: ModuleTabId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_sub_tabs_bar: Option<bool>,
    /// Child tab every module is opened with
    pub default_child: OpenChildTab,
}

impl OpenModule {
    pub fn new(
        id: impl Into<ModuleTabId>,
        title: impl Into<String>,
        default_child: OpenChildTab,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            closable: None,
            show_sub_tabs_bar: None,
            default_child,
        }
    }

    pub fn closable(mut self, closable: bool) -> Self {
        self.closable = Some(closable);
        self
    }

    pub fn show_sub_tabs_bar(mut self, show: bool) -> Self {
        self.show_sub_tabs_bar = Some(show);
        self
    }
}
