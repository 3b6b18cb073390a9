use tracing::{debug, info};

use super::{CartRender, CartView, Notice};
use crate::domain::MenuItem;

/// Draws the page as plain text on stdout.
#[derive(Debug, Default)]
pub struct ConsoleView;

impl CartView for ConsoleView {
    fn render_menu(&self, items: &[MenuItem]) {
        println!("--- Menu ---");
        for item in items {
            println!("[{}] {}  ₹{}", item.id, item.name, item.unit_price());
        }
    }

    fn menu_unavailable(&self) {
        println!("Failed to load menu.");
    }

    fn render_cart(&self, cart: &CartRender) {
        println!("--- Cart ---");
        if cart.is_empty() {
            println!("Your cart is empty.");
        }
        for line in &cart.lines {
            println!("{} (x{})  ₹{}", line.name, line.quantity, line.line_total);
        }
        println!("Total: ₹{}", cart.total);
    }

    fn notify(&self, notice: &Notice) {
        match notice {
            Notice::OrderPlaced { daily_order_id: Some(id) } => {
                println!("Order placed successfully! Your order number is #{}.", id)
            }
            Notice::OrderPlaced { daily_order_id: None } => println!("Order placed successfully!"),
            Notice::Error(message) => println!("Error: {}", message),
        }
    }

    fn set_submit_enabled(&self, enabled: bool) {
        debug!(enabled, "Place order control toggled");
    }

    fn redirect_to_login(&self) {
        info!("Redirecting to login");
        println!("Please log in to continue.");
    }
}
