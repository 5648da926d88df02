//! Component registry
//!
//! Component keys name the UI a child tab renders. The tab registry treats
//! them as opaque strings; this is the list the UI actually knows how to
//! mount.

use std::collections::BTreeSet;

const BUILTIN_COMPONENTS: &[&str] = &[
    "DashboardWorkspace",
    "CustomersListWorkspace",
    "CustomerFormWorkspace",
    "VendorsListWorkspace",
    "VendorFormWorkspace",
    "ProductsListWorkspace",
    "ProductFormWorkspace",
    "WarehousesListWorkspace",
    "WarehouseFormWorkspace",
    "SalesInvoiceListWorkspace",
    "SalesInvoiceFormWorkspace",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentRegistry {
    keys: BTreeSet<String>,
}

impl ComponentRegistry {
    pub fn empty() -> Self {
        Self {
            keys: BTreeSet::new(),
        }
    }

    pub fn register(&mut self, key: impl Into<String>) -> bool {
        self.keys.insert(key.into())
    }

    pub fn is_registered(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        for key in BUILTIN_COMPONENTS {
            registry.register(*key);
        }
        registry
    }
}
