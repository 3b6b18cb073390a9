use tokio::sync::mpsc;
use tracing::{debug, instrument};

use crate::backend_actor::BackendError;
use crate::domain::{BearerToken, Credentials, MenuItem, OrderAck, OrderRequest};
use crate::messages::BackendRequest;

/// Client for the backend actor.
#[derive(Clone)]
pub struct BackendClient {
    sender: mpsc::Sender<BackendRequest>,
}

impl BackendClient {
    pub fn new(sender: mpsc::Sender<BackendRequest>) -> Self {
        Self { sender }
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), BackendError> {
        debug!("Sending shutdown request");
        self.sender
            .send(BackendRequest::Shutdown)
            .await
            .map_err(|_| BackendError::ActorCommunicationError("Actor closed".to_string()))
    }
}

client_method!(BackendClient => fn fetch_menu() -> Vec<MenuItem> as BackendRequest::FetchMenu, Error = BackendError);
client_method!(BackendClient => fn submit_order(order: OrderRequest, token: BearerToken) -> OrderAck as BackendRequest::SubmitOrder, Error = BackendError);
client_method!(BackendClient => fn login(credentials: Credentials) -> BearerToken as BackendRequest::Login, Error = BackendError);
