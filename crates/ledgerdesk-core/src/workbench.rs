//! Workbench state container
//!
//! The workbench is the explicit handle to the tab registry. The host creates
//! one at startup and hands clones to the menu, the tab bars and the forms;
//! clones share the same registry. Each call takes the write lock once, so
//! every operation is a single atomic transition.

use ledgerdesk_tabs::{
    Clock, ModuleTab, OpenChildTab, OpenChildTabOutcome, OpenModule, OpenModuleOutcome,
    SystemClock, TabRegistry,
};
use parking_lot::RwLock;
use std::sync::Arc;

use crate::components::ComponentRegistry;
use crate::config::Config;
use crate::dirty::TabDirty;
use crate::error::CoreError;
use crate::menu::MenuCatalog;
use crate::view::WorkbenchView;
use crate::Result;

pub struct Workbench {
    /// Configuration
    config: Config,
    /// Sidebar entries
    menu: Arc<MenuCatalog>,
    /// Module and child tabs
    registry: Arc<RwLock<TabRegistry>>,
}

impl Workbench {
    /// Workbench with the built-in menu and wall-clock stamps
    pub fn new(config: Config) -> Self {
        Self::build(config, MenuCatalog::default(), Arc::new(SystemClock))
    }

    pub fn with_clock(config: Config, clock: Arc<dyn Clock>) -> Self {
        Self::build(config, MenuCatalog::default(), clock)
    }

    /// Workbench with a custom menu, checked against the renderable components
    pub fn with_menu(
        config: Config,
        menu: MenuCatalog,
        components: &ComponentRegistry,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        menu.validate(components)?;
        Ok(Self::build(config, menu, clock))
    }

    fn build(config: Config, menu: MenuCatalog, clock: Arc<dyn Clock>) -> Self {
        let registry = TabRegistry::with_clock(config.tabs, clock);

        tracing::info!(
            max_modules = config.tabs.max_modules,
            max_tabs_per_module = config.tabs.max_tabs_per_module,
            menu_items = menu.items().len(),
            "Workbench initialized"
        );

        Self {
            config,
            menu: Arc::new(menu),
            registry: Arc::new(RwLock::new(registry)),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn menu(&self) -> &MenuCatalog {
        &self.menu
    }

    /// Read access for renderers
    pub fn with_registry<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&TabRegistry) -> T,
    {
        let registry = self.registry.read();
        f(&registry)
    }

    pub fn snapshot(&self) -> WorkbenchView {
        self.with_registry(|registry| WorkbenchView::from(registry))
    }

    // === Menu ===

    /// Open (or re-activate) the module behind a sidebar entry
    pub fn open_menu_item(&self, menu_id: &str) -> Result<OpenModuleOutcome> {
        let item = self
            .menu
            .get(menu_id)
            .ok_or_else(|| CoreError::UnknownMenuItem(menu_id.to_string()))?;

        self.open_module(&item.to_open_module())
    }

    // === Module operations ===

    pub fn open_module(&self, request: &OpenModule) -> Result<OpenModuleOutcome> {
        Ok(self.registry.write().open_module(request)?)
    }

    pub fn activate_module(&self, module_id: &str) -> bool {
        self.registry.write().activate_module(module_id)
    }

    pub fn close_module(&self, module_id: &str) -> Option<ModuleTab> {
        self.registry.write().close_module(module_id)
    }

    // === Child tab operations ===

    pub fn open_child_tab(&self, request: &OpenChildTab) -> Result<OpenChildTabOutcome> {
        Ok(self.registry.write().open_child_tab(request)?)
    }

    pub fn activate_child_tab(&self, tab_id: &str) -> bool {
        self.registry.write().activate_child_tab(tab_id)
    }

    pub fn close_child_tab(&self, tab_id: &str) -> bool {
        self.registry.write().close_child_tab(tab_id).is_some()
    }

    pub fn set_dirty(&self, tab_id: &str, dirty: bool) -> bool {
        self.registry.write().set_dirty(tab_id, dirty)
    }

    pub fn is_dirty(&self, tab_id: &str) -> bool {
        self.registry.read().is_dirty(tab_id)
    }

    pub fn update_title(&self, tab_id: &str, title: impl Into<String>) -> bool {
        self.registry.write().update_title(tab_id, title)
    }

    /// Dirty-state accessor for the form rendered in `tab_id`
    pub fn tab_dirty(&self, tab_id: impl Into<String>) -> TabDirty {
        TabDirty::new(self.clone(), tab_id.into())
    }
}

impl Clone for Workbench {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            menu: Arc::clone(&self.menu),
            registry: Arc::clone(&self.registry),
        }
    }
}
