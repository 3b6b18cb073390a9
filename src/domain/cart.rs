use super::{MenuItem, MenuItemId, Money, OrderLine, OrderRequest};

/// One selected item. Name and price are copied from the menu when the item
/// is first added and are not refreshed afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub item_id: MenuItemId,
    pub name: String,
    pub unit_price: Money,
    pub quantity: u32,
}

impl CartLine {
    fn from_menu_item(item: &MenuItem) -> Self {
        Self {
            item_id: item.id,
            name: item.name.clone(),
            unit_price: item.unit_price(),
            quantity: 1,
        }
    }

    pub fn line_total(&self) -> Money {
        self.unit_price.times(self.quantity)
    }
}

/// Direction of a quantity button press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    Increment,
    Decrement,
}

/// The in-progress selection for one page session.
///
/// Lines are kept in insertion order, hold at most one entry per item and
/// never hold a quantity below one.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit of `item`, appending a new line if it is not in the cart yet.
    pub fn add(&mut self, item: &MenuItem) {
        match self.position(item.id) {
            Some(index) => {
                let line = &mut self.lines[index];
                line.quantity = line.quantity.saturating_add(1);
            }
            None => self.lines.push(CartLine::from_menu_item(item)),
        }
    }

    /// Applies a quantity change to an existing line. Returns `false` if the
    /// item is not in the cart. A line that drops to zero is removed.
    pub fn change_quantity(&mut self, item_id: MenuItemId, change: QuantityChange) -> bool {
        let Some(index) = self.position(item_id) else {
            return false;
        };
        match change {
            QuantityChange::Increment => {
                let line = &mut self.lines[index];
                line.quantity = line.quantity.saturating_add(1);
            }
            QuantityChange::Decrement => {
                if self.lines[index].quantity <= 1 {
                    self.lines.remove(index);
                } else {
                    self.lines[index].quantity -= 1;
                }
            }
        }
        true
    }

    pub fn total(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, item_id: MenuItemId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.item_id == item_id)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Takes a placed order out of the cart. A cart left untouched since the
    /// order was built ends up empty; units added afterwards stay.
    pub fn remove_ordered(&mut self, order: &OrderRequest) {
        for ordered in &order.items {
            let Some(index) = self.position(ordered.menu_item_id) else {
                continue;
            };
            let line = &mut self.lines[index];
            line.quantity = line.quantity.saturating_sub(ordered.quantity);
            if line.quantity == 0 {
                self.lines.remove(index);
            }
        }
    }

    /// Builds the outbound order, one entry per line in cart order.
    pub fn to_order_request(&self) -> OrderRequest {
        OrderRequest {
            items: self
                .lines
                .iter()
                .map(|line| OrderLine {
                    menu_item_id: line.item_id,
                    quantity: line.quantity,
                })
                .collect(),
        }
    }

    fn position(&self, item_id: MenuItemId) -> Option<usize> {
        self.lines.iter().position(|line| line.item_id == item_id)
    }
}
