use std::collections::HashMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::Money;

/// Highest unit price the catalog accepts. Keeps line totals and cart totals
/// far from the decimal range limit.
pub const MAX_UNIT_PRICE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Identifier of a menu item as assigned by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MenuItemId(pub u32);

impl fmt::Display for MenuItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A purchasable item as served by the menu endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default = "default_available")]
    pub is_available: bool,
}

fn default_available() -> bool {
    true
}

impl MenuItem {
    pub fn new(id: u32, name: impl Into<String>, price: Decimal, is_available: bool) -> Self {
        Self {
            id: MenuItemId(id),
            name: name.into(),
            price,
            is_available,
        }
    }

    pub fn unit_price(&self) -> Money {
        Money::new(self.price)
    }
}

/// Read-only snapshot of the menu, keyed by id.
///
/// Keeps the order the backend listed items in so the menu renders the same
/// way every time.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: HashMap<MenuItemId, MenuItem>,
    order: Vec<MenuItemId>,
}

impl Catalog {
    /// Builds a snapshot, dropping entries that cannot be sold: negative
    /// prices, prices above [`MAX_UNIT_PRICE`] and repeated ids (the first
    /// occurrence wins).
    pub fn new(items: Vec<MenuItem>) -> Self {
        let mut catalog = Self::default();
        for item in items {
            if item.unit_price().is_negative() {
                warn!(item_id = %item.id, price = %item.price, "Dropping menu item with negative price");
                continue;
            }
            if item.price > MAX_UNIT_PRICE {
                warn!(item_id = %item.id, price = %item.price, "Dropping menu item priced above the cap");
                continue;
            }
            if catalog.items.contains_key(&item.id) {
                warn!(item_id = %item.id, "Dropping duplicate menu item");
                continue;
            }
            catalog.order.push(item.id);
            catalog.items.insert(item.id, item);
        }
        catalog
    }

    pub fn get(&self, id: MenuItemId) -> Option<&MenuItem> {
        self.items.get(&id)
    }

    /// Resolves an id to an item that can currently be added to a cart.
    pub fn resolve(&self, id: MenuItemId) -> Option<&MenuItem> {
        self.get(id).filter(|item| item.is_available)
    }

    /// Available items in listing order.
    pub fn available(&self) -> Vec<MenuItem> {
        self.order
            .iter()
            .filter_map(|id| self.items.get(id))
            .filter(|item| item.is_available)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }
}
