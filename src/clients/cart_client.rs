use tokio::sync::mpsc;
use tracing::{debug, instrument};

use crate::cart_actor::{CartError, OrderError};
use crate::domain::{CartLine, Credentials, MenuItem, MenuItemId, Money, OrderAck, QuantityChange};
use crate::messages::CartRequest;
use crate::view::CartRender;

/// Client for the cart actor. Each call is one page event.
#[derive(Clone)]
pub struct CartClient {
    sender: mpsc::Sender<CartRequest>,
}

impl CartClient {
    pub fn new(sender: mpsc::Sender<CartRequest>) -> Self {
        Self { sender }
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), CartError> {
        debug!("Sending shutdown request");
        self.sender
            .send(CartRequest::Shutdown)
            .await
            .map_err(|_| CartError::ActorCommunicationError("Actor closed".to_string()))
    }

    pub async fn increment(&self, item_id: MenuItemId) -> Result<(), CartError> {
        self.change_quantity(item_id, QuantityChange::Increment).await
    }

    pub async fn decrement(&self, item_id: MenuItemId) -> Result<(), CartError> {
        self.change_quantity(item_id, QuantityChange::Decrement).await
    }
}

client_method!(CartClient => fn load_catalog() -> usize as CartRequest::LoadCatalog, Error = CartError);
client_method!(CartClient => fn menu() -> Vec<MenuItem> as CartRequest::Menu, Error = CartError);
client_method!(CartClient => fn add_item(item_id: MenuItemId) -> () as CartRequest::AddItem, Error = CartError);
client_method!(CartClient => fn change_quantity(item_id: MenuItemId, change: QuantityChange) -> () as CartRequest::ChangeQuantity, Error = CartError);
client_method!(CartClient => fn compute_total() -> Money as CartRequest::ComputeTotal, Error = CartError);
client_method!(CartClient => fn lines() -> Vec<CartLine> as CartRequest::Lines, Error = CartError);
client_method!(CartClient => fn render_cart() -> CartRender as CartRequest::RenderCart, Error = CartError);
client_method!(CartClient => fn login(credentials: Credentials) -> () as CartRequest::Login, Error = CartError);
client_method!(CartClient => fn logout() -> () as CartRequest::Logout, Error = CartError);
client_method!(CartClient => fn submit_order() -> OrderAck as CartRequest::SubmitOrder, Error = OrderError);
