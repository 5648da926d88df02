//! Tab-bar views
//!
//! Serializable snapshots handed to the renderer. They are plain copies;
//! mutating them has no effect on the registry.

use chrono::{DateTime, Utc};
use ledgerdesk_tabs::{ChildTab, FailureReason, ModuleTab, TabRegistry};
use serde::Serialize;

use crate::error::CoreError;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildTabView {
    pub id: String,
    pub local_id: String,
    pub title: String,
    pub component: String,
    pub props: serde_json::Map<String, serde_json::Value>,
    pub dirty: bool,
    pub closable: bool,
    pub is_active: bool,
    pub last_accessed_at: DateTime<Utc>,
}

impl ChildTabView {
    fn new(tab: &ChildTab, is_active: bool) -> Self {
        Self {
            id: tab.id.clone(),
            local_id: tab.local_id.clone(),
            title: tab.title.clone(),
            component: tab.component.clone(),
            props: tab.props.clone(),
            dirty: tab.dirty,
            closable: tab.closable,
            is_active,
            last_accessed_at: tab.last_accessed_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleTabView {
    pub id: String,
    pub title: String,
    pub closable: bool,
    pub show_sub_tabs_bar: bool,
    pub is_active: bool,
    /// Drives the "modified" marker on the module tab
    pub has_dirty_tabs: bool,
    pub active_child_tab_id: Option<String>,
    pub tabs: Vec<ChildTabView>,
}

impl ModuleTabView {
    fn new(module: &ModuleTab, is_active: bool) -> Self {
        let active_child = module.active_child_tab_id();
        Self {
            id: module.id.clone(),
            title: module.title.clone(),
            closable: module.closable,
            show_sub_tabs_bar: module.show_sub_tabs_bar,
            is_active,
            has_dirty_tabs: module.children().has_dirty(),
            active_child_tab_id: active_child.map(str::to_string),
            tabs: module
                .tabs()
                .iter()
                .map(|tab| ChildTabView::new(tab, active_child == Some(tab.id.as_str())))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkbenchView {
    pub active_module_id: Option<String>,
    pub modules: Vec<ModuleTabView>,
}

impl From<&TabRegistry> for WorkbenchView {
    fn from(registry: &TabRegistry) -> Self {
        let active = registry.active_module_id();
        Self {
            active_module_id: active.map(str::to_string),
            modules: registry
                .modules()
                .iter()
                .map(|module| ModuleTabView::new(module, active == Some(module.id.as_str())))
                .collect(),
        }
    }
}

/// Boundary result: `{ ok: true, data }` or `{ ok: false, reason, message }`
#[derive(Debug, Serialize)]
pub struct CommandResult<T> {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<FailureReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> CommandResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            ok: true,
            data: Some(data),
            reason: None,
            message: None,
        }
    }

    pub fn err(error: &CoreError) -> Self {
        Self {
            ok: false,
            data: None,
            reason: error.tab_reason(),
            message: Some(error.to_string()),
        }
    }
}

impl<T> From<crate::Result<T>> for CommandResult<T> {
    fn from(result: crate::Result<T>) -> Self {
        match result {
            Ok(data) => CommandResult::ok(data),
            Err(e) => CommandResult::err(&e),
        }
    }
}
