//! Menu catalog
//!
//! Every sidebar entry opens (or re-activates) one module tab together with
//! its default child tab. Navigation never creates tabs on its own; it
//! always goes through `MenuItem::to_open_module` and the registry.

use ledgerdesk_tabs::{OpenChildTab, OpenModule};
use serde::{Deserialize, Serialize};

use crate::components::ComponentRegistry;
use crate::error::CoreError;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_sub_tabs_bar: Option<bool>,
    pub default_child: OpenChildTab,
}

impl MenuItem {
    pub fn to_open_module(&self) -> OpenModule {
        OpenModule {
            id: self.id.clone(),
            title: self.title.clone(),
            closable: self.closable,
            show_sub_tabs_bar: self.show_sub_tabs_bar,
            default_child: self.default_child.clone(),
        }
    }
}

/// Menu entries in sidebar order
#[derive(Debug, Clone, PartialEq)]
pub struct MenuCatalog {
    items: Vec<MenuItem>,
}

impl MenuCatalog {
    pub fn new(items: Vec<MenuItem>) -> Self {
        Self { items }
    }

    /// Parse a JSON array of menu items
    pub fn from_json(json: &str) -> Result<Self> {
        let items: Vec<MenuItem> = serde_json::from_str(json)?;
        Ok(Self::new(items))
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Check every default child against the components the UI can render
    pub fn validate(&self, components: &ComponentRegistry) -> Result<()> {
        for item in &self.items {
            if !components.is_registered(&item.default_child.component) {
                return Err(CoreError::UnknownComponent {
                    menu_id: item.id.clone(),
                    component: item.default_child.component.clone(),
                });
            }
        }
        Ok(())
    }
}

fn list_section(id: &str, title: &str, component: &str) -> MenuItem {
    MenuItem {
        id: id.to_string(),
        title: title.to_string(),
        closable: None,
        show_sub_tabs_bar: Some(true),
        default_child: OpenChildTab::new("list", title, component).closable(false),
    }
}

impl Default for MenuCatalog {
    fn default() -> Self {
        Self::new(vec![
            MenuItem {
                id: "dashboard".to_string(),
                title: "Dashboard".to_string(),
                closable: Some(false),
                show_sub_tabs_bar: Some(false),
                default_child: OpenChildTab::new("home", "Dashboard", "DashboardWorkspace")
                    .closable(false),
            },
            list_section("customers", "Customers", "CustomersListWorkspace"),
            list_section("vendors", "Vendors", "VendorsListWorkspace"),
            list_section("products", "Products", "ProductsListWorkspace"),
            list_section("warehouses", "Warehouses", "WarehousesListWorkspace"),
            list_section("sales-invoices", "Sales Invoices", "SalesInvoiceListWorkspace"),
        ])
    }
}
