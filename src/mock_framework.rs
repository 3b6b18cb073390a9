//! # Mock Framework
//!
//! Utilities for testing the cart actor without a network or a page.
//!
//! Use [`create_mock_backend`] to get a [`BackendClient`] and the receiver its
//! requests land on, then answer them with the `expect_*` helpers. A
//! [`RecordingView`] stands in for the page and records every call made on it.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::mpsc;

use crate::backend_actor::BackendError;
use crate::cart_actor::CartActor;
use crate::clients::{BackendClient, CartClient};
use crate::domain::{BearerToken, Credentials, MenuItem, OrderAck, OrderRequest, Session};
use crate::messages::{BackendRequest, ServiceResponse};
use crate::view::{CartRender, CartView, Notice};

/// Creates a mock backend client and a receiver for asserting requests.
///
/// Tests drive the "server" side by receiving from the channel and replying
/// through the embedded responder, which lets them choose the outcome and
/// its timing deterministically.
pub fn create_mock_backend(buffer_size: usize) -> (BackendClient, mpsc::Receiver<BackendRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (BackendClient::new(sender), receiver)
}

/// Helper to verify that the next message is a FetchMenu request
pub async fn expect_fetch_menu(
    receiver: &mut mpsc::Receiver<BackendRequest>,
) -> Option<ServiceResponse<Vec<MenuItem>, BackendError>> {
    match receiver.recv().await {
        Some(BackendRequest::FetchMenu { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Helper to verify that the next message is a SubmitOrder request
pub async fn expect_submit_order(
    receiver: &mut mpsc::Receiver<BackendRequest>,
) -> Option<(OrderRequest, BearerToken, ServiceResponse<OrderAck, BackendError>)> {
    match receiver.recv().await {
        Some(BackendRequest::SubmitOrder { order, token, respond_to }) => Some((order, token, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Login request
pub async fn expect_login(
    receiver: &mut mpsc::Receiver<BackendRequest>,
) -> Option<(Credentials, ServiceResponse<BearerToken, BackendError>)> {
    match receiver.recv().await {
        Some(BackendRequest::Login { credentials, respond_to }) => Some((credentials, respond_to)),
        _ => None,
    }
}

/// The two-item menu used across tests: Tea at 10.00 and Samosa at 15.00,
/// plus an unavailable Vada.
pub fn canteen_menu() -> Vec<MenuItem> {
    vec![
        MenuItem::new(1, "Tea", "10.00".parse().unwrap(), true),
        MenuItem::new(2, "Samosa", "15.00".parse().unwrap(), true),
        MenuItem::new(3, "Vada", "12.00".parse().unwrap(), false),
    ]
}

/// Harness around a running cart actor wired to a mock backend.
pub struct CartHarness {
    pub client: CartClient,
    pub backend_rx: mpsc::Receiver<BackendRequest>,
    pub view: Arc<RecordingView>,
}

impl CartHarness {
    pub fn start(session: Session) -> Self {
        Self::start_with_timeout(session, Duration::from_secs(5))
    }

    pub fn start_with_timeout(session: Session, submit_timeout: Duration) -> Self {
        let (backend, backend_rx) = create_mock_backend(10);
        let view = Arc::new(RecordingView::default());
        let (actor, client) = CartActor::new(10, backend, view.clone(), session, submit_timeout);
        tokio::spawn(actor.run());
        Self { client, backend_rx, view }
    }

    pub fn signed_in() -> Self {
        Self::start(Session::authenticated(BearerToken::new("good-token")))
    }

    /// Loads [`canteen_menu`] into the cart actor.
    pub async fn load_menu(&mut self) {
        let client = self.client.clone();
        let task = tokio::spawn(async move { client.load_catalog().await });
        let responder = expect_fetch_menu(&mut self.backend_rx)
            .await
            .expect("Expected FetchMenu");
        responder.send(Ok(canteen_menu())).unwrap();
        assert_eq!(task.await.unwrap(), Ok(2));
    }
}

/// One call made on a [`RecordingView`].
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    Menu(Vec<MenuItem>),
    MenuUnavailable,
    Cart(CartRender),
    Notice(Notice),
    SubmitEnabled(bool),
    RedirectToLogin,
}

/// A [`CartView`] that remembers what it was asked to show.
#[derive(Debug, Default)]
pub struct RecordingView {
    events: Mutex<Vec<ViewEvent>>,
}

impl RecordingView {
    fn record(&self, event: ViewEvent) {
        self.events.lock().unwrap().push(event);
    }

    pub fn events(&self) -> Vec<ViewEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn last_cart(&self) -> Option<CartRender> {
        self.events().into_iter().rev().find_map(|event| match event {
            ViewEvent::Cart(render) => Some(render),
            _ => None,
        })
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                ViewEvent::Notice(notice) => Some(notice),
                _ => None,
            })
            .collect()
    }

    pub fn submit_toggles(&self) -> Vec<bool> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                ViewEvent::SubmitEnabled(enabled) => Some(enabled),
                _ => None,
            })
            .collect()
    }

    pub fn redirects(&self) -> usize {
        self.events()
            .iter()
            .filter(|event| matches!(event, ViewEvent::RedirectToLogin))
            .count()
    }
}

impl CartView for RecordingView {
    fn render_menu(&self, items: &[MenuItem]) {
        self.record(ViewEvent::Menu(items.to_vec()));
    }

    fn menu_unavailable(&self) {
        self.record(ViewEvent::MenuUnavailable);
    }

    fn render_cart(&self, cart: &CartRender) {
        self.record(ViewEvent::Cart(cart.clone()));
    }

    fn notify(&self, notice: &Notice) {
        self.record(ViewEvent::Notice(notice.clone()));
    }

    fn set_submit_enabled(&self, enabled: bool) {
        self.record(ViewEvent::SubmitEnabled(enabled));
    }

    fn redirect_to_login(&self) {
        self.record(ViewEvent::RedirectToLogin);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_backend() {
        let (client, mut receiver) = create_mock_backend(10);

        let fetch_task = tokio::spawn(async move { client.fetch_menu().await });

        let responder = expect_fetch_menu(&mut receiver).await.expect("Expected FetchMenu request");
        responder.send(Ok(canteen_menu())).unwrap();

        let items = fetch_task.await.unwrap().unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].name, "Tea");
    }

    #[tokio::test]
    async fn test_dropped_responder_is_communication_error() {
        let (client, mut receiver) = create_mock_backend(10);
        let task = tokio::spawn(async move { client.fetch_menu().await });

        let responder = expect_fetch_menu(&mut receiver).await.unwrap();
        drop(responder);

        let result = task.await.unwrap();
        assert!(matches!(result, Err(BackendError::ActorCommunicationError(_))));
    }
}
