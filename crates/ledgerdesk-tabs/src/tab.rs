//! Child tab data structure
//!
//! A child tab is one document, form or list view nested inside a module.
//! `component` names the UI that renders it and `props` is handed to that
//! UI verbatim; neither is interpreted here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{child_tab_id, ChildTabId, ModuleTabId};

pub type Props = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildTab {
    /// Globally unique id, `module_id::local_id`
    pub id: ChildTabId,
    /// Id unique within the owning module, e.g. "list" or "invoice-42"
    pub local_id: String,
    pub title: String,
    /// Key of the UI component that renders this tab
    pub component: String,
    pub props: Props,
    /// Tab holds unsaved edits
    pub dirty: bool,
    pub closable: bool,
    pub opened_at: DateTime<Utc>,
    pub last_accessed_at: DateTime<Utc>,
}

impl ChildTab {
    pub(crate) fn open(module_id: &str, request: &OpenChildTab, now: DateTime<Utc>) -> Self {
        Self {
            id: child_tab_id(module_id, &request.local_id),
            local_id: request.local_id.clone(),
            title: request.title.clone(),
            component: request.component.clone(),
            props: request.props.clone(),
            dirty: false,
            closable: request.closable.unwrap_or(true),
            opened_at: now,
            last_accessed_at: now,
        }
    }

    pub(crate) fn touch(&mut self, now: DateTime<Utc>) {
        self.last_accessed_at = now;
    }
}

/// Request to open (or re-activate) a child tab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenChildTab {
    /// Target module; the active module when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_id: Option<ModuleTabId>,
    pub local_id: String,
    pub title: String,
    pub component: String,
    #[serde(default)]
    pub props: Props,
    /// Defaults to closable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closable: Option<bool>,
}

impl OpenChildTab {
    pub fn new(
        local_id: impl Into<String>,
        title: impl Into<String>,
        component: impl Into<String>,
    ) -> Self {
        Self {
            module_id: None,
            local_id: local_id.into(),
            title: title.into(),
            component: component.into(),
            props: Props::new(),
            closable: None,
        }
    }

    pub fn in_module(mut self, module_id: impl Into<ModuleTabId>) -> Self {
        self.module_id = Some(module_id.into());
        self
    }

    pub fn with_prop(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.props.insert(key.into(), value);
        self
    }

    pub fn with_props(mut self, props: Props) -> Self {
        self.props = props;
        self
    }

    pub fn closable(mut self, closable: bool) -> Self {
        self.closable = Some(closable);
        self
    }
}
