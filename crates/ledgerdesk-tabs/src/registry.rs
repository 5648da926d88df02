//! Module-tab registry
//!
//! Owns the ordered list of open modules and the active module id, and
//! routes child-tab operations to the right module. Each public operation
//! validates first and mutates afterwards, so a returned error always
//! means the registry is unchanged.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

use crate::children::neighbor_after_removal;
use crate::clock::{Clock, SystemClock};
use crate::error::TabError;
use crate::id::{child_tab_id, validate_id, ChildTabId, ModuleTabId};
use crate::limits::TabLimits;
use crate::module::{ModuleTab, OpenModule};
use crate::tab::{ChildTab, OpenChildTab};
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenModuleOutcome {
    /// The module was already open and has only been re-activated
    pub activated_existing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenChildTabOutcome {
    /// The tab was already open and has only been re-activated
    pub activated_existing: bool,
    /// Tabs closed to make room, at most one
    pub evicted_tab_ids: Vec<ChildTabId>,
    pub tab_id: ChildTabId,
}

#[derive(Debug, Clone)]
pub struct TabRegistry {
    /// Open modules in open order (tab-bar order)
    modules: Vec<ModuleTab>,
    active_module_id: Option<ModuleTabId>,
    limits: TabLimits,
    clock: Arc<dyn Clock>,
    /// Latest stamp handed out, keeps stamps non-decreasing
    last_stamp: Option<DateTime<Utc>>,
}

impl TabRegistry {
    pub fn new(limits: TabLimits) -> Self {
        Self::with_clock(limits, Arc::new(SystemClock))
    }

    pub fn with_clock(limits: TabLimits, clock: Arc<dyn Clock>) -> Self {
        Self {
            modules: Vec::new(),
            active_module_id: None,
            limits,
            clock,
            last_stamp: None,
        }
    }

    // === Queries ===

    pub fn limits(&self) -> TabLimits {
        self.limits
    }

    pub fn modules(&self) -> &[ModuleTab] {
        &self.modules
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn active_module_id(&self) -> Option<&str> {
        self.active_module_id.as_deref()
    }

    pub fn active_module(&self) -> Option<&ModuleTab> {
        self.active_module_id
            .as_deref()
            .and_then(|id| self.module(id))
    }

    pub fn active_child_tab(&self) -> Option<&ChildTab> {
        self.active_module().and_then(|m| m.active_child_tab())
    }

    pub fn module(&self, module_id: &str) -> Option<&ModuleTab> {
        self.modules.iter().find(|m| m.id == module_id)
    }

    /// Global lookup; child tab ids are unique across modules.
    pub fn child_tab(&self, tab_id: &str) -> Option<&ChildTab> {
        self.modules.iter().find_map(|m| m.tab(tab_id))
    }

    pub fn is_dirty(&self, tab_id: &str) -> bool {
        self.child_tab(tab_id).map(|t| t.dirty).unwrap_or(false)
    }

    pub fn has_any_dirty_in_active_module(&self) -> bool {
        self.active_module()
            .map(|m| m.children().has_dirty())
            .unwrap_or(false)
    }

    // === Module operations ===

    /// Open a module, or re-activate it when it is already open.
    ///
    /// A new module is opened together with its default child tab. An
    /// existing module without an active child tab gets the default child
    /// opened into it.
    pub fn open_module(&mut self, request: &OpenModule) -> Result<OpenModuleOutcome> {
        validate_id("module", &request.id)?;

        if let Some(index) = self.module_position(&request.id) {
            // The default child only matters when the module has nothing to show
            if self.modules[index].active_child_tab_id().is_none() {
                let default_child = request.default_child.clone().in_module(request.id.clone());
                self.open_child_tab(&default_child)?;
            }

            let now = self.now();
            self.modules[index].touch(now);
            self.active_module_id = Some(request.id.clone());

            tracing::debug!(module_id = %request.id, "Re-activated module");

            return Ok(OpenModuleOutcome {
                activated_existing: true,
            });
        }

        validate_id("child tab", &request.default_child.local_id)?;

        if self.modules.len() >= self.limits.max_modules {
            tracing::warn!(
                module_id = %request.id,
                limit = self.limits.max_modules,
                "Refused to open module: capacity reached"
            );
            return Err(TabError::MaxModulesReached {
                limit: self.limits.max_modules,
            });
        }

        let now = self.now();
        let mut module = ModuleTab::open(request, now);
        let default_child = ChildTab::open(&request.id, &request.default_child, now);
        let default_child_id = default_child.id.clone();
        module.children_mut().push_active(default_child);

        self.modules.push(module);
        self.active_module_id = Some(request.id.clone());

        tracing::info!(
            module_id = %request.id,
            tab_id = %default_child_id,
            module_count = self.modules.len(),
            "Opened module"
        );

        Ok(OpenModuleOutcome {
            activated_existing: false,
        })
    }

    /// Make a module the active one. No-op for unknown ids.
    pub fn activate_module(&mut self, module_id: &str) -> bool {
        let Some(index) = self.module_position(module_id) else {
            return false;
        };

        let now = self.now();
        let module = &mut self.modules[index];
        module.touch(now);
        module.children_mut().ensure_active();
        self.active_module_id = Some(module_id.to_string());

        tracing::debug!(module_id = %module_id, "Activated module");

        true
    }

    /// Close a module and every child tab in it. No-op for unknown ids.
    ///
    /// When the active module is closed, the module now at its index becomes
    /// active, else the one before it, else none.
    pub fn close_module(&mut self, module_id: &str) -> Option<ModuleTab> {
        let index = self.module_position(module_id)?;
        let removed = self.modules.remove(index);

        if self.active_module_id.as_deref() == Some(module_id) {
            self.active_module_id =
                neighbor_after_removal(&self.modules, index).map(|m| m.id.clone());
        }

        tracing::info!(
            module_id = %module_id,
            closed_tabs = removed.tabs().len(),
            active_module_id = ?self.active_module_id,
            "Closed module"
        );

        Some(removed)
    }

    // === Child tab operations ===

    /// Open a child tab in the requested module, or the active module.
    ///
    /// When the module is full, the least recently used evictable tab is
    /// closed first. Exactly one tab is evicted at most; if none qualifies
    /// the call fails with `MaxTabsReached` and nothing changes.
    pub fn open_child_tab(&mut self, request: &OpenChildTab) -> Result<OpenChildTabOutcome> {
        let module_id = match request
            .module_id
            .as_deref()
            .or(self.active_module_id.as_deref())
        {
            Some(id) => id.to_string(),
            None => return Err(TabError::NoActiveModule),
        };
        let index = self
            .module_position(&module_id)
            .ok_or_else(|| TabError::ModuleNotFound(module_id.clone()))?;
        validate_id("child tab", &request.local_id)?;

        let tab_id = child_tab_id(&module_id, &request.local_id);

        if self.modules[index].children().contains(&tab_id) {
            let now = self.now();
            self.modules[index].children_mut().activate(&tab_id, now);

            tracing::debug!(module_id = %module_id, tab_id = %tab_id, "Re-activated child tab");

            return Ok(OpenChildTabOutcome {
                activated_existing: true,
                evicted_tab_ids: Vec::new(),
                tab_id,
            });
        }

        let children = self.modules[index].children();
        let eviction = if children.len() >= self.limits.max_tabs_per_module {
            match children.eviction_candidate() {
                Some(candidate) => Some(candidate.id.clone()),
                None => {
                    tracing::warn!(
                        module_id = %module_id,
                        tab_id = %tab_id,
                        limit = self.limits.max_tabs_per_module,
                        "Refused to open child tab: no evictable tab"
                    );
                    return Err(TabError::MaxTabsReached {
                        module_id,
                        limit: self.limits.max_tabs_per_module,
                    });
                }
            }
        } else {
            None
        };

        let now = self.now();
        let module = &mut self.modules[index];
        let mut evicted_tab_ids = Vec::new();

        if let Some(evicted_id) = eviction {
            module.children_mut().remove(&evicted_id);
            tracing::info!(module_id = %module_id, tab_id = %evicted_id, "Evicted child tab");
            evicted_tab_ids.push(evicted_id);
        }

        module
            .children_mut()
            .push_active(ChildTab::open(&module_id, request, now));
        module.touch(now);
        self.active_module_id = Some(module_id.clone());

        tracing::info!(
            module_id = %module_id,
            tab_id = %tab_id,
            evicted = evicted_tab_ids.len(),
            "Opened child tab"
        );

        Ok(OpenChildTabOutcome {
            activated_existing: false,
            evicted_tab_ids,
            tab_id,
        })
    }

    /// Activate a child tab and its owning module. No-op for unknown ids.
    pub fn activate_child_tab(&mut self, tab_id: &str) -> bool {
        let Some(index) = self.owner_position(tab_id) else {
            return false;
        };

        let now = self.now();
        let module = &mut self.modules[index];
        module.touch(now);
        module.children_mut().activate(tab_id, now);
        self.active_module_id = Some(module.id.clone());

        tracing::debug!(module_id = %module.id, tab_id = %tab_id, "Activated child tab");

        true
    }

    /// Close a child tab. No-op for unknown ids.
    ///
    /// Uses the same index fallback as `close_module`, within the owning
    /// module.
    pub fn close_child_tab(&mut self, tab_id: &str) -> Option<ChildTab> {
        let index = self.owner_position(tab_id)?;
        let module = &mut self.modules[index];
        let removed = module.children_mut().remove(tab_id)?;

        tracing::info!(
            module_id = %module.id,
            tab_id = %tab_id,
            active_child_tab_id = ?module.active_child_tab_id(),
            "Closed child tab"
        );

        Some(removed)
    }

    pub fn set_dirty(&mut self, tab_id: &str, dirty: bool) -> bool {
        match self.child_tab_mut(tab_id) {
            Some(tab) => {
                tab.dirty = dirty;
                tracing::debug!(tab_id = %tab_id, dirty, "Updated dirty flag");
                true
            }
            None => false,
        }
    }

    pub fn update_title(&mut self, tab_id: &str, title: impl Into<String>) -> bool {
        match self.child_tab_mut(tab_id) {
            Some(tab) => {
                tab.title = title.into();
                true
            }
            None => false,
        }
    }

    // === Internals ===

    fn module_position(&self, module_id: &str) -> Option<usize> {
        self.modules.iter().position(|m| m.id == module_id)
    }

    fn owner_position(&self, tab_id: &str) -> Option<usize> {
        self.modules
            .iter()
            .position(|m| m.children().contains(tab_id))
    }

    fn child_tab_mut(&mut self, tab_id: &str) -> Option<&mut ChildTab> {
        self.modules
            .iter_mut()
            .find_map(|m| m.children_mut().get_mut(tab_id))
    }

    fn now(&mut self) -> DateTime<Utc> {
        let reading = self.clock.now();
        let stamp = match self.last_stamp {
            Some(last) if last > reading => last,
            _ => reading,
        };
        self.last_stamp = Some(stamp);
        stamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use std::collections::HashSet;

    fn registry(max_modules: usize, max_tabs: usize) -> TabRegistry {
        TabRegistry::with_clock(
            TabLimits::new(max_modules, max_tabs).unwrap(),
            Arc::new(ManualClock::default()),
        )
    }

    fn module_request(id: &str) -> OpenModule {
        OpenModule::new(
            id,
            id.to_uppercase(),
            OpenChildTab::new("list", "List", "ListWorkspace").closable(false),
        )
    }

    fn child(local_id: &str) -> OpenChildTab {
        OpenChildTab::new(local_id, local_id, "FormWorkspace")
    }

    fn module_ids(registry: &TabRegistry) -> Vec<&str> {
        registry.modules().iter().map(|m| m.id.as_str()).collect()
    }

    fn snapshot(registry: &TabRegistry) -> (Vec<ModuleTab>, Option<String>) {
        (
            registry.modules().to_vec(),
            registry.active_module_id().map(str::to_string),
        )
    }

    fn assert_invariants(registry: &TabRegistry) {
        let limits = registry.limits();
        assert!(registry.len() <= limits.max_modules);

        let mut module_ids = HashSet::new();
        let mut all_tab_ids = HashSet::new();
        for module in registry.modules() {
            assert!(module_ids.insert(module.id.clone()), "duplicate module id");
            assert!(module.tabs().len() <= limits.max_tabs_per_module);
            assert!(module.last_accessed_at >= module.opened_at);

            let mut local_ids = HashSet::new();
            for tab in module.tabs() {
                assert!(local_ids.insert(tab.local_id.clone()), "duplicate local id");
                assert!(all_tab_ids.insert(tab.id.clone()), "duplicate tab id");
                assert_eq!(tab.id, child_tab_id(&module.id, &tab.local_id));
                assert!(tab.last_accessed_at >= tab.opened_at);
            }

            if let Some(active) = module.active_child_tab_id() {
                assert!(module.tab(active).is_some(), "dangling active child tab");
            }
        }

        if let Some(active) = registry.active_module_id() {
            assert!(registry.module(active).is_some(), "dangling active module");
        }
    }

    #[test]
    fn test_open_module_creates_default_child() {
        let mut registry = registry(3, 3);

        let outcome = registry.open_module(&module_request("sales")).unwrap();
        assert!(!outcome.activated_existing);

        let module = registry.active_module().unwrap();
        assert_eq!(module.id, "sales");
        assert_eq!(module.tab_ids(), vec!["sales::list"]);
        assert_eq!(module.active_child_tab_id(), Some("sales::list"));
        assert!(!module.tabs()[0].closable);
        assert_invariants(&registry);
    }

    #[test]
    fn test_reopen_module_is_idempotent() {
        let mut registry = registry(3, 3);
        registry.open_module(&module_request("sales")).unwrap();
        registry.open_module(&module_request("vendors")).unwrap();
        let opened_at = registry.module("sales").unwrap().opened_at;

        let outcome = registry.open_module(&module_request("sales")).unwrap();
        assert!(outcome.activated_existing);
        assert_eq!(registry.active_module_id(), Some("sales"));
        assert_eq!(module_ids(&registry), vec!["sales", "vendors"]);

        let sales = registry.module("sales").unwrap();
        assert_eq!(sales.opened_at, opened_at);
        assert!(sales.last_accessed_at > opened_at);
        assert_eq!(sales.tabs().len(), 1);
    }

    #[test]
    fn test_reopen_module_without_tabs_restores_default_child() {
        let mut registry = registry(3, 3);
        registry.open_module(&module_request("sales")).unwrap();
        registry.close_child_tab("sales::list");
        assert!(registry.module("sales").unwrap().tabs().is_empty());

        let outcome = registry.open_module(&module_request("sales")).unwrap();
        assert!(outcome.activated_existing);
        let sales = registry.module("sales").unwrap();
        assert_eq!(sales.active_child_tab_id(), Some("sales::list"));
        assert_invariants(&registry);
    }

    #[test]
    fn test_reopen_module_ignores_unused_default_child() {
        let mut registry = registry(3, 3);
        registry.open_module(&module_request("m")).unwrap();
        registry.open_module(&module_request("n")).unwrap();

        let request = OpenModule::new("m", "M", OpenChildTab::new("", "L", "X"));
        let outcome = registry.open_module(&request).unwrap();
        assert!(outcome.activated_existing);
        assert_eq!(registry.active_module_id(), Some("m"));
        assert_eq!(registry.module("m").unwrap().tab_ids(), vec!["m::list"]);

        // Here the default child is needed, so its id is checked
        registry.close_child_tab("m::list");
        registry.activate_module("n");
        let before = snapshot(&registry);
        let err = registry.open_module(&request).unwrap_err();
        assert_eq!(err.reason(), crate::FailureReason::InvalidId);
        assert_eq!(snapshot(&registry), before);
    }

    #[test]
    fn test_module_capacity_leaves_state_unchanged() {
        let mut registry = registry(2, 3);
        registry.open_module(&module_request("a")).unwrap();
        registry.open_module(&module_request("b")).unwrap();
        let before = snapshot(&registry);

        let err = registry.open_module(&module_request("c")).unwrap_err();
        assert_eq!(err, TabError::MaxModulesReached { limit: 2 });
        assert_eq!(err.reason(), crate::FailureReason::MaxModulesReached);
        assert_eq!(snapshot(&registry), before);

        // Re-activating an open module never hits the ceiling
        assert!(registry.open_module(&module_request("a")).unwrap().activated_existing);
    }

    #[test]
    fn test_close_module_fallback() {
        let mut registry = registry(5, 3);
        for id in ["a", "b", "c"] {
            registry.open_module(&module_request(id)).unwrap();
        }

        registry.activate_module("b");
        registry.close_module("b");
        assert_eq!(registry.active_module_id(), Some("c"));

        let mut registry = self::registry(5, 3);
        for id in ["a", "b"] {
            registry.open_module(&module_request(id)).unwrap();
        }
        registry.close_module("b");
        assert_eq!(registry.active_module_id(), Some("a"));

        registry.close_module("a");
        assert_eq!(registry.active_module_id(), None);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_close_inactive_module_keeps_active() {
        let mut registry = registry(5, 3);
        for id in ["a", "b", "c"] {
            registry.open_module(&module_request(id)).unwrap();
        }

        let removed = registry.close_module("a").unwrap();
        assert_eq!(removed.id, "a");
        assert_eq!(registry.active_module_id(), Some("c"));
        assert!(registry.close_module("missing").is_none());
        assert!(registry.child_tab("a::list").is_none());
    }

    #[test]
    fn test_activate_unknown_is_noop() {
        let mut registry = registry(3, 3);
        registry.open_module(&module_request("a")).unwrap();
        let before = snapshot(&registry);

        assert!(!registry.activate_module("missing"));
        assert!(!registry.activate_child_tab("a::missing"));
        assert!(registry.close_child_tab("a::missing").is_none());
        assert!(!registry.set_dirty("a::missing", true));
        assert!(!registry.update_title("a::missing", "x"));
        assert_eq!(snapshot(&registry), before);
    }

    #[test]
    fn test_open_child_without_active_module() {
        let mut registry = registry(3, 3);
        let err = registry.open_child_tab(&child("invoice-1")).unwrap_err();
        assert_eq!(err, TabError::NoActiveModule);

        let err = registry
            .open_child_tab(&child("invoice-1").in_module("missing"))
            .unwrap_err();
        assert_eq!(err.reason(), crate::FailureReason::NoActiveModule);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_open_child_targets_active_module_and_reactivates_parent() {
        let mut registry = registry(3, 5);
        registry.open_module(&module_request("sales")).unwrap();
        registry.open_module(&module_request("vendors")).unwrap();

        let outcome = registry.open_child_tab(&child("bill-7")).unwrap();
        assert_eq!(outcome.tab_id, "vendors::bill-7");
        assert!(outcome.evicted_tab_ids.is_empty());

        let outcome = registry
            .open_child_tab(&child("invoice-1").in_module("sales"))
            .unwrap();
        assert_eq!(outcome.tab_id, "sales::invoice-1");
        assert_eq!(registry.active_module_id(), Some("sales"));
        assert_eq!(
            registry.active_child_tab().map(|t| t.id.as_str()),
            Some("sales::invoice-1")
        );
        assert_invariants(&registry);
    }

    #[test]
    fn test_reopen_child_is_idempotent() {
        let mut registry = registry(3, 5);
        registry.open_module(&module_request("sales")).unwrap();
        registry.open_child_tab(&child("invoice-1")).unwrap();
        let opened_at = registry.child_tab("sales::invoice-1").unwrap().opened_at;
        registry.activate_child_tab("sales::list");

        let outcome = registry.open_child_tab(&child("invoice-1")).unwrap();
        assert!(outcome.activated_existing);
        assert!(outcome.evicted_tab_ids.is_empty());

        let sales = registry.module("sales").unwrap();
        assert_eq!(sales.tabs().len(), 2);
        assert_eq!(sales.active_child_tab_id(), Some("sales::invoice-1"));
        let tab = sales.tab("sales::invoice-1").unwrap();
        assert_eq!(tab.opened_at, opened_at);
        assert!(tab.last_accessed_at > opened_at);
    }

    #[test]
    fn test_eviction_removes_lru_clean_tab() {
        let mut registry = registry(3, 2);
        registry
            .open_module(&OpenModule::new("m", "M", child("t1")))
            .unwrap();
        registry.open_child_tab(&child("t2")).unwrap();

        let outcome = registry.open_child_tab(&child("t3")).unwrap();
        assert!(!outcome.activated_existing);
        assert_eq!(outcome.evicted_tab_ids, vec!["m::t1".to_string()]);

        let module = registry.module("m").unwrap();
        assert_eq!(module.tab_ids(), vec!["m::t2", "m::t3"]);
        assert_eq!(module.active_child_tab_id(), Some("m::t3"));
        assert_invariants(&registry);
    }

    #[test]
    fn test_dirty_tab_blocks_eviction() {
        let mut registry = registry(3, 2);
        registry
            .open_module(&OpenModule::new("m", "M", child("t1")))
            .unwrap();
        registry.open_child_tab(&child("t2")).unwrap();
        registry.set_dirty("m::t1", true);
        let before = snapshot(&registry);

        let err = registry.open_child_tab(&child("t3")).unwrap_err();
        assert_eq!(
            err,
            TabError::MaxTabsReached {
                module_id: "m".to_string(),
                limit: 2
            }
        );
        assert_eq!(snapshot(&registry), before);
    }

    #[test]
    fn test_eviction_skips_protected_lru() {
        let mut registry = registry(3, 3);
        // "list" is non-closable and the oldest tab
        registry.open_module(&module_request("m")).unwrap();
        registry.open_child_tab(&child("a")).unwrap();
        registry.open_child_tab(&child("b")).unwrap();
        registry.set_dirty("m::a", true);
        registry.activate_child_tab("m::a");
        registry.activate_child_tab("m::b");

        // list: pinned, a: dirty, b: active -> nothing to evict
        assert!(registry.open_child_tab(&child("c")).is_err());

        registry.set_dirty("m::a", false);
        let outcome = registry.open_child_tab(&child("c")).unwrap();
        assert_eq!(outcome.evicted_tab_ids, vec!["m::a".to_string()]);
        assert!(registry.child_tab("m::list").is_some());
    }

    #[test]
    fn test_eviction_is_scoped_to_module() {
        let mut registry = registry(3, 2);
        registry
            .open_module(&OpenModule::new("a", "A", child("old")))
            .unwrap();
        registry
            .open_module(&OpenModule::new("b", "B", child("x")))
            .unwrap();
        registry.open_child_tab(&child("y")).unwrap();

        // "a::old" is globally the least recently used, but only "b" is full
        let outcome = registry.open_child_tab(&child("z")).unwrap();
        assert_eq!(outcome.evicted_tab_ids, vec!["b::x".to_string()]);
        assert!(registry.child_tab("a::old").is_some());
    }

    #[test]
    fn test_activate_child_tab_switches_module() {
        let mut registry = registry(3, 3);
        registry.open_module(&module_request("a")).unwrap();
        registry.open_child_tab(&child("doc")).unwrap();
        registry.open_module(&module_request("b")).unwrap();

        let before = registry.child_tab("a::list").unwrap().last_accessed_at;
        let module_before = registry.module("a").unwrap().last_accessed_at;
        assert!(registry.activate_child_tab("a::list"));
        assert_eq!(registry.active_module_id(), Some("a"));
        assert_eq!(
            registry.module("a").unwrap().active_child_tab_id(),
            Some("a::list")
        );
        assert!(registry.child_tab("a::list").unwrap().last_accessed_at > before);
        assert!(registry.module("a").unwrap().last_accessed_at > module_before);
    }

    #[test]
    fn test_close_child_tab_fallback() {
        let mut registry = registry(3, 5);
        registry.open_module(&module_request("m")).unwrap();
        registry.open_child_tab(&child("a")).unwrap();
        registry.open_child_tab(&child("b")).unwrap();
        registry.activate_child_tab("m::a");

        registry.close_child_tab("m::a");
        assert_eq!(registry.module("m").unwrap().active_child_tab_id(), Some("m::b"));

        registry.close_child_tab("m::b");
        assert_eq!(registry.module("m").unwrap().active_child_tab_id(), Some("m::list"));
    }

    #[test]
    fn test_set_dirty_and_title_do_not_touch_recency() {
        let mut registry = registry(3, 3);
        registry.open_module(&module_request("m")).unwrap();
        registry.open_child_tab(&child("doc")).unwrap();
        registry.activate_child_tab("m::list");
        let before = registry.child_tab("m::doc").unwrap().clone();

        assert!(registry.set_dirty("m::doc", true));
        assert!(registry.update_title("m::doc", "Invoice INV-001"));

        let after = registry.child_tab("m::doc").unwrap();
        assert!(after.dirty);
        assert!(registry.is_dirty("m::doc"));
        assert_eq!(after.title, "Invoice INV-001");
        assert_eq!(after.last_accessed_at, before.last_accessed_at);
        assert_eq!(registry.active_child_tab().unwrap().id, "m::list");
        assert!(registry.has_any_dirty_in_active_module());

        registry.set_dirty("m::doc", false);
        assert!(!registry.has_any_dirty_in_active_module());
    }

    #[test]
    fn test_invalid_ids_rejected() {
        let mut registry = registry(3, 3);
        let err = registry.open_module(&module_request("a::b")).unwrap_err();
        assert_eq!(err.reason(), crate::FailureReason::InvalidId);

        registry.open_module(&module_request("a")).unwrap();
        let before = snapshot(&registry);
        assert!(registry.open_child_tab(&child("")).is_err());
        assert_eq!(snapshot(&registry), before);
    }

    #[test]
    fn test_stamps_never_go_backwards() {
        #[derive(Debug)]
        struct FrozenClock(DateTime<Utc>);
        impl Clock for FrozenClock {
            fn now(&self) -> DateTime<Utc> {
                self.0
            }
        }

        let mut registry = TabRegistry::with_clock(
            TabLimits::new(3, 2).unwrap(),
            Arc::new(FrozenClock(DateTime::<Utc>::UNIX_EPOCH)),
        );
        registry
            .open_module(&OpenModule::new("m", "M", child("t1")))
            .unwrap();
        registry.open_child_tab(&child("t2")).unwrap();

        // Equal stamps: first in open order is evicted
        let outcome = registry.open_child_tab(&child("t3")).unwrap();
        assert_eq!(outcome.evicted_tab_ids, vec!["m::t1".to_string()]);
    }

    #[test]
    fn test_random_operations_preserve_invariants() {
        let mut registry = registry(3, 3);
        let modules = ["a", "b", "c", "d"];
        let locals = ["l0", "l1", "l2", "l3", "l4"];

        // xorshift, fixed seed
        let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
        let mut next = move |bound: usize| {
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;
            (seed % bound as u64) as usize
        };

        for _ in 0..2_000 {
            let module = modules[next(modules.len())];
            let local = locals[next(locals.len())];
            let tab_id = child_tab_id(module, local);

            match next(8) {
                0 => {
                    let before = snapshot(&registry);
                    if registry.open_module(&module_request(module)).is_err() {
                        assert_eq!(snapshot(&registry), before);
                    }
                }
                1 => {
                    let before = snapshot(&registry);
                    let count = registry.module(module).map(|m| m.tabs().len());
                    match registry.open_child_tab(&child(local).in_module(module)) {
                        Ok(outcome) => {
                            assert!(outcome.evicted_tab_ids.len() <= 1);
                            if outcome.activated_existing {
                                assert!(outcome.evicted_tab_ids.is_empty());
                            }
                            for evicted in &outcome.evicted_tab_ids {
                                let old = before.0.iter().find(|m| m.id == module).unwrap();
                                let tab = old.tab(evicted).unwrap();
                                assert!(tab.closable && !tab.dirty);
                                assert_ne!(old.active_child_tab_id(), Some(evicted.as_str()));
                            }
                            assert!(registry.module(module).map(|m| m.tabs().len()) >= count);
                        }
                        Err(_) => assert_eq!(snapshot(&registry), before),
                    }
                }
                2 => {
                    registry.activate_module(module);
                }
                3 => {
                    registry.close_module(module);
                }
                4 => {
                    registry.activate_child_tab(&tab_id);
                }
                5 => {
                    registry.close_child_tab(&tab_id);
                }
                6 => {
                    registry.set_dirty(&tab_id, next(2) == 0);
                }
                _ => {
                    registry.update_title(&tab_id, "renamed");
                }
            }

            assert_invariants(&registry);
        }
    }
}
