use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument, warn, Instrument};

use super::{CartError, OrderError, SubmitGate};
use crate::backend_actor::BackendError;
use crate::clients::{BackendClient, CartClient};
use crate::domain::{Cart, Catalog, Credentials, MenuItemId, Money, OrderAck, QuantityChange, Session};
use crate::messages::{CartRequest, ServiceResponse, SubmissionSettled};
use crate::view::{CartRender, CartView, Notice};

const GENERIC_REJECTION: &str = "Failed to place order";
const GENERIC_LOGIN_FAILURE: &str = "Login failed!";

/// Page-scoped owner of the cart.
///
/// Requests are handled one at a time, mirroring the page's event loop. An
/// order submission is the only request that waits on the network: it is
/// sent from a separate task and its outcome comes back as a
/// [`SubmissionSettled`] message, so the cart stays responsive meanwhile.
pub struct CartActor {
    receiver: mpsc::Receiver<CartRequest>,
    settled_tx: mpsc::Sender<SubmissionSettled>,
    settled_rx: mpsc::Receiver<SubmissionSettled>,
    backend: BackendClient,
    view: Arc<dyn CartView>,
    cart: Cart,
    catalog: Catalog,
    session: Session,
    submit_gate: SubmitGate,
    submit_timeout: Duration,
}

impl CartActor {
    pub fn new(
        buffer_size: usize,
        backend: BackendClient,
        view: Arc<dyn CartView>,
        session: Session,
        submit_timeout: Duration,
    ) -> (Self, CartClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        // One in-flight submission at most, so one slot is enough
        let (settled_tx, settled_rx) = mpsc::channel(1);
        let actor = Self {
            receiver,
            settled_tx,
            settled_rx,
            backend,
            view,
            cart: Cart::new(),
            catalog: Catalog::default(),
            session,
            submit_gate: SubmitGate::new(),
            submit_timeout,
        };
        (actor, CartClient::new(sender))
    }

    #[instrument(name = "cart_actor", skip(self))]
    pub async fn run(mut self) {
        info!("CartActor starting");
        self.render_cart();

        loop {
            tokio::select! {
                msg = self.receiver.recv() => match msg {
                    Some(CartRequest::Shutdown) | None => {
                        info!("CartActor shutting down");
                        break;
                    }
                    Some(msg) => self.handle(msg).await,
                },
                Some(settled) = self.settled_rx.recv() => {
                    self.handle_submission_settled(settled).await;
                }
            }
        }

        info!("CartActor stopped");
    }

    async fn handle(&mut self, msg: CartRequest) {
        match msg {
            CartRequest::LoadCatalog { respond_to } => self.handle_load_catalog(respond_to).await,
            CartRequest::Menu { respond_to } => {
                let _ = respond_to.send(Ok(self.catalog.available()));
            }
            CartRequest::AddItem { item_id, respond_to } => self.handle_add_item(item_id, respond_to),
            CartRequest::ChangeQuantity { item_id, change, respond_to } => {
                self.handle_change_quantity(item_id, change, respond_to)
            }
            CartRequest::ComputeTotal { respond_to } => self.handle_compute_total(respond_to),
            CartRequest::Lines { respond_to } => {
                let _ = respond_to.send(Ok(self.cart.lines().to_vec()));
            }
            CartRequest::RenderCart { respond_to } => {
                let _ = respond_to.send(Ok(self.render_cart()));
            }
            CartRequest::Login { credentials, respond_to } => self.handle_login(credentials, respond_to).await,
            CartRequest::Logout { respond_to } => self.handle_logout(respond_to),
            CartRequest::SubmitOrder { respond_to } => self.handle_submit_order(respond_to),
            CartRequest::Shutdown => {}
        }
    }

    fn render_cart(&self) -> CartRender {
        let render = CartRender::from(&self.cart);
        self.view.render_cart(&render);
        render
    }

    /// Replaces the catalog snapshot with the backend's current menu.
    async fn refresh_catalog(&mut self) -> Result<usize, CartError> {
        match self.backend.fetch_menu().await {
            Ok(items) => {
                self.catalog = Catalog::new(items);
                let available = self.catalog.available();
                self.view.render_menu(&available);
                info!(item_count = self.catalog.len(), available = available.len(), "Catalog loaded");
                Ok(available.len())
            }
            Err(e) => {
                warn!(error = %e, "Catalog unavailable");
                self.view.menu_unavailable();
                Err(CartError::MenuUnavailable(e.to_string()))
            }
        }
    }

    #[instrument(skip(self, respond_to))]
    async fn handle_load_catalog(&mut self, respond_to: ServiceResponse<usize, CartError>) {
        debug!("Processing load_catalog request");
        let result = self.refresh_catalog().await;
        let _ = respond_to.send(result);
    }

    #[instrument(fields(item_id = %item_id), skip(self, respond_to))]
    fn handle_add_item(&mut self, item_id: MenuItemId, respond_to: ServiceResponse<(), CartError>) {
        debug!("Processing add_item request");
        match self.catalog.resolve(item_id) {
            Some(item) => {
                self.cart.add(item);
                info!(line_count = self.cart.len(), "Item added to cart");
                self.render_cart();
            }
            None => debug!("Item not on the current menu; ignoring"),
        }
        let _ = respond_to.send(Ok(()));
    }

    #[instrument(fields(item_id = %item_id), skip(self, respond_to))]
    fn handle_change_quantity(
        &mut self,
        item_id: MenuItemId,
        change: QuantityChange,
        respond_to: ServiceResponse<(), CartError>,
    ) {
        debug!("Processing change_quantity request");
        if self.cart.change_quantity(item_id, change) {
            self.render_cart();
        } else {
            debug!("Item not in cart; ignoring");
        }
        let _ = respond_to.send(Ok(()));
    }

    fn handle_compute_total(&self, respond_to: ServiceResponse<Money, CartError>) {
        let _ = respond_to.send(Ok(self.cart.total()));
    }

    #[instrument(fields(email = %credentials.email), skip(self, credentials, respond_to))]
    async fn handle_login(&mut self, credentials: Credentials, respond_to: ServiceResponse<(), CartError>) {
        debug!("Processing login request");
        let result = match self.backend.login(credentials).await {
            Ok(token) => {
                self.session.sign_in(token);
                info!("Signed in");
                Ok(())
            }
            Err(BackendError::Rejected { message, .. }) => Err(CartError::InvalidCredentials(
                message.unwrap_or_else(|| GENERIC_LOGIN_FAILURE.to_string()),
            )),
            Err(BackendError::Unauthorized) => {
                Err(CartError::InvalidCredentials(GENERIC_LOGIN_FAILURE.to_string()))
            }
            Err(e) => Err(CartError::TransportError(e.to_string())),
        };
        if let Err(e) = &result {
            warn!(error = %e, "Login failed");
        }
        let _ = respond_to.send(result);
    }

    #[instrument(skip(self, respond_to))]
    fn handle_logout(&mut self, respond_to: ServiceResponse<(), CartError>) {
        debug!("Processing logout request");
        self.session.sign_out();
        self.view.redirect_to_login();
        let _ = respond_to.send(Ok(()));
    }

    fn reject_submission(&self, error: OrderError, respond_to: ServiceResponse<OrderAck, OrderError>) {
        self.view.notify(&Notice::Error(error.to_string()));
        let _ = respond_to.send(Err(error));
    }

    #[instrument(fields(line_count = self.cart.len()), skip(self, respond_to))]
    fn handle_submit_order(&mut self, respond_to: ServiceResponse<OrderAck, OrderError>) {
        debug!("Processing submit_order request");

        // The control is disabled while a submission is pending; a click
        // that still gets through is dropped without touching the network.
        if self.submit_gate.is_in_flight() {
            warn!("Submission already in flight; ignoring");
            let _ = respond_to.send(Err(OrderError::SubmissionInFlight));
            return;
        }

        let Some(token) = self.session.token().cloned() else {
            warn!("No session credential");
            self.view.redirect_to_login();
            self.reject_submission(OrderError::Unauthenticated, respond_to);
            return;
        };

        if self.cart.is_empty() {
            debug!("Cart is empty");
            self.reject_submission(OrderError::EmptyCart, respond_to);
            return;
        }

        let Some(guard) = self.submit_gate.try_acquire(Arc::clone(&self.view)) else {
            let _ = respond_to.send(Err(OrderError::SubmissionInFlight));
            return;
        };

        let order = self.cart.to_order_request();
        let backend = self.backend.clone();
        let settled_tx = self.settled_tx.clone();
        let timeout = self.submit_timeout;

        info!(line_count = order.items.len(), "Submitting order");
        tokio::spawn(
            async move {
                let outcome = match tokio::time::timeout(timeout, backend.submit_order(order.clone(), token)).await {
                    Ok(outcome) => outcome,
                    Err(_) => Err(BackendError::Transport(format!(
                        "no response within {}s",
                        timeout.as_secs_f64()
                    ))),
                };
                let settled = SubmissionSettled {
                    order,
                    outcome,
                    guard,
                    respond_to,
                };
                if settled_tx.send(settled).await.is_err() {
                    error!("Cart actor gone before the submission settled");
                }
            }
            .in_current_span(),
        );
    }

    #[instrument(skip(self, settled))]
    async fn handle_submission_settled(&mut self, settled: SubmissionSettled) {
        let SubmissionSettled {
            order,
            outcome,
            guard,
            respond_to,
        } = settled;

        let result = match outcome {
            Ok(ack) => {
                info!(daily_order_id = ?ack.daily_order_id(), "Order placed");
                // Only what was sent leaves the cart; edits made while the
                // request was pending stay for the next order
                self.cart.remove_ordered(&order);
                self.render_cart();
                self.view.notify(&Notice::OrderPlaced {
                    daily_order_id: ack.daily_order_id(),
                });
                Ok(ack)
            }
            Err(BackendError::Unauthorized) => {
                warn!("Session expired during submission");
                self.session.sign_out();
                self.view.notify(&Notice::Error(OrderError::SessionExpired.to_string()));
                self.view.redirect_to_login();
                Err(OrderError::SessionExpired)
            }
            Err(BackendError::Rejected { status, message }) => {
                let error = OrderError::OrderRejected(message.unwrap_or_else(|| GENERIC_REJECTION.to_string()));
                warn!(status, error = %error, "Order rejected");
                self.view.notify(&Notice::Error(error.to_string()));
                // Resync with the server's menu instead of guessing which line was at fault
                if let Err(e) = self.refresh_catalog().await {
                    debug!(error = %e, "Catalog refresh after rejection failed");
                }
                Err(error)
            }
            Err(e) => {
                let error = OrderError::TransportError(e.to_string());
                warn!(error = %error, "Order submission did not complete");
                self.view.notify(&Notice::Error(error.to_string()));
                Err(error)
            }
        };

        // Re-enable only once the cart reflects the outcome
        drop(guard);
        let _ = respond_to.send(result);
    }
}
