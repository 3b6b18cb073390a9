mod domain;
mod messages;
mod clients;
mod view;

mod app_system;

#[cfg(test)]
mod mock_framework;

mod backend_actor;
mod cart_actor;

use std::sync::Arc;

use tracing::{error, info, warn, Instrument};
use crate::app_system::{setup_tracing, AppConfig, PageSession};
use crate::domain::Session;
use crate::view::ConsoleView;

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = AppConfig::load().map_err(|e| e.to_string())?;
    info!(base_url = %config.api_base_url, "Starting canteen cart");

    let page = PageSession::start(&config, Arc::new(ConsoleView), Session::anonymous())
        .map_err(|e| e.to_string())?;
    let cart = page.cart_client.clone();

    if let Some(credentials) = config.credentials.clone() {
        let span = tracing::info_span!("login");
        async {
            match cart.login(credentials).await {
                Ok(()) => info!("Signed in"),
                Err(e) => warn!(error = %e, "Sign-in failed; continuing anonymously"),
            }
        }
        .instrument(span)
        .await;
    }

    let span = tracing::info_span!("menu");
    let menu = async {
        cart.load_catalog().await?;
        cart.menu().await
    }
    .instrument(span)
    .await;

    let menu = match menu {
        Ok(items) => items,
        Err(e) => {
            error!(error = %e, "No menu to order from");
            page.shutdown().await?;
            return Ok(());
        }
    };

    // Pick the first two items, taking the first one twice
    let span = tracing::info_span!("cart");
    async {
        for item in menu.iter().take(2).chain(menu.first()) {
            if let Err(e) = cart.add_item(item.id).await {
                warn!(error = %e, item_id = %item.id, "Could not add item");
            }
        }
        match cart.compute_total().await {
            Ok(total) => info!(total = %total, "Cart ready"),
            Err(e) => warn!(error = %e, "Could not compute total"),
        }
    }
    .instrument(span)
    .await;

    let span = tracing::info_span!("order_submission");
    let order_result = async {
        info!("Placing order");
        cart.submit_order().await
    }
    .instrument(span)
    .await;

    match order_result {
        Ok(ack) => info!(daily_order_id = ?ack.daily_order_id(), "Order placed"),
        Err(e) => warn!(error = %e, "Order not placed"),
    }

    page.shutdown().await?;

    info!("Canteen cart finished");
    Ok(())
}
