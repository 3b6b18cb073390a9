use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, instrument};

use super::AppConfig;
use crate::backend_actor::{BackendActor, BackendError};
use crate::cart_actor::CartActor;
use crate::clients::{BackendClient, CartClient};
use crate::domain::Session;
use crate::view::CartView;

/// Everything one page load owns.
///
/// Starts the backend actor first, then the cart actor with the backend
/// client injected. Dropping the page means calling [`PageSession::shutdown`].
pub struct PageSession {
    pub cart_client: CartClient,
    pub backend_client: BackendClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl PageSession {
    #[instrument(name = "page_session", skip(config, view, session), fields(base_url = %config.api_base_url))]
    pub fn start(config: &AppConfig, view: Arc<dyn CartView>, session: Session) -> Result<Self, BackendError> {
        info!("Starting page session");

        let (backend_actor, backend_client) = BackendActor::new(
            config.channel_buffer,
            config.api_base_url.clone(),
            config.request_timeout,
            config.connect_timeout,
        )?;
        let backend_handle = tokio::spawn(backend_actor.run());

        let mut page = Self::with_backend(
            backend_client,
            view,
            session,
            config.channel_buffer,
            config.request_timeout,
        );
        page.handles.insert(0, backend_handle);

        info!("Page session started");
        Ok(page)
    }

    /// Starts only the cart actor, on top of an existing backend client.
    pub fn with_backend(
        backend_client: BackendClient,
        view: Arc<dyn CartView>,
        session: Session,
        buffer_size: usize,
        submit_timeout: Duration,
    ) -> Self {
        let (cart_actor, cart_client) =
            CartActor::new(buffer_size, backend_client.clone(), view, session, submit_timeout);
        let cart_handle = tokio::spawn(cart_actor.run());

        Self {
            cart_client,
            backend_client,
            handles: vec![cart_handle],
        }
    }

    /// Stops the cart actor, then the backend, and waits for both.
    #[instrument(skip(self))]
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down page session");

        let _ = self.cart_client.shutdown().await;
        let _ = self.backend_client.shutdown().await;

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = ?e, "Actor task failed");
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("Page session shutdown complete");
        Ok(())
    }
}
