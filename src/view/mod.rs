//! Presentation seam between the cart actor and whatever draws the page.

mod console;

pub use console::*;

use crate::domain::{Cart, MenuItem, MenuItemId, Money};

/// Everything the cart actor asks of the page.
///
/// Calls are synchronous and made from inside the actor, so implementations
/// must not block.
pub trait CartView: Send + Sync {
    fn render_menu(&self, items: &[MenuItem]);
    /// The menu could not be fetched.
    fn menu_unavailable(&self);
    fn render_cart(&self, cart: &CartRender);
    fn notify(&self, notice: &Notice);
    fn set_submit_enabled(&self, enabled: bool);
    fn redirect_to_login(&self);
}

/// User-facing notification.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    OrderPlaced { daily_order_id: Option<u32> },
    Error(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedLine {
    pub item_id: MenuItemId,
    pub name: String,
    pub quantity: u32,
    pub line_total: Money,
}

/// Render model of a cart: lines in insertion order plus the grand total.
#[derive(Debug, Clone, PartialEq)]
pub struct CartRender {
    pub lines: Vec<RenderedLine>,
    pub total: Money,
}

impl CartRender {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl From<&Cart> for CartRender {
    fn from(cart: &Cart) -> Self {
        Self {
            lines: cart
                .lines()
                .iter()
                .map(|line| RenderedLine {
                    item_id: line.item_id,
                    name: line.name.clone(),
                    quantity: line.quantity,
                    line_total: line.line_total(),
                })
                .collect(),
            total: cart.total(),
        }
    }
}
