use std::time::Duration;

use reqwest::{Response, StatusCode, Url};
use serde::Deserialize;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn, Instrument};

use super::BackendError;
use crate::clients::BackendClient;
use crate::domain::{BearerToken, Credentials, MenuItem, OrderAck, OrderRequest};
use crate::messages::{BackendRequest, ServiceResponse};

/// Error body shape shared by the backend's own handlers (`message`) and its
/// JWT layer (`msg`).
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default, alias = "msg")]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    access_token: String,
}

/// Thin typed wrapper over the REST endpoints.
#[derive(Clone)]
struct RestApi {
    http: reqwest::Client,
    base_url: Url,
}

impl RestApi {
    fn endpoint(&self, path: &str) -> Result<Url, BackendError> {
        self.base_url
            .join(path)
            .map_err(|e| BackendError::Transport(format!("invalid endpoint {}: {}", path, e)))
    }

    async fn fetch_menu(&self) -> Result<Vec<MenuItem>, BackendError> {
        let response = self.http.get(self.endpoint("api/menu")?).send().await?;
        let response = require_success(response).await?;
        Ok(response.json::<Vec<MenuItem>>().await?)
    }

    async fn submit_order(&self, order: &OrderRequest, token: &BearerToken) -> Result<OrderAck, BackendError> {
        let response = self
            .http
            .post(self.endpoint("api/orders")?)
            .bearer_auth(token.expose())
            .json(order)
            .send()
            .await?;
        let response = require_success(response).await?;

        // The order is stored once the status says so; a body we cannot read
        // does not undo that.
        match response.json::<OrderAck>().await {
            Ok(ack) => Ok(ack),
            Err(e) => {
                warn!(error = %e, "Order accepted but acknowledgement unreadable");
                Ok(OrderAck::default())
            }
        }
    }

    async fn login(&self, credentials: &Credentials) -> Result<BearerToken, BackendError> {
        let response = self
            .http
            .post(self.endpoint("api/login")?)
            .json(credentials)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(rejection(response).await);
        }
        let body = response.json::<LoginResponse>().await?;
        Ok(BearerToken::new(body.access_token))
    }
}

/// 401 means the credential is missing or stale; anything else outside 2xx is
/// a rejection carrying the server's message when it sent one.
async fn require_success(response: Response) -> Result<Response, BackendError> {
    let status = response.status();
    if status == StatusCode::UNAUTHORIZED {
        return Err(BackendError::Unauthorized);
    }
    if !status.is_success() {
        return Err(rejection(response).await);
    }
    Ok(response)
}

async fn rejection(response: Response) -> BackendError {
    let status = response.status().as_u16();
    let message = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.message);
    BackendError::Rejected { status, message }
}

/// Actor fronting the REST backend.
///
/// Every request runs on its own task which owns the response channel, so a
/// slow order submission never holds up a menu fetch.
pub struct BackendActor {
    receiver: mpsc::Receiver<BackendRequest>,
    api: RestApi,
}

impl BackendActor {
    pub fn new(
        buffer_size: usize,
        base_url: Url,
        request_timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<(Self, BackendClient), BackendError> {
        let http = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .build()?;
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            api: RestApi { http, base_url },
        };
        Ok((actor, BackendClient::new(sender)))
    }

    #[instrument(name = "backend_actor", skip(self), fields(base_url = %self.api.base_url))]
    pub async fn run(mut self) {
        info!("BackendActor starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                BackendRequest::FetchMenu { respond_to } => self.handle_fetch_menu(respond_to),
                BackendRequest::SubmitOrder { order, token, respond_to } => {
                    self.handle_submit_order(order, token, respond_to)
                }
                BackendRequest::Login { credentials, respond_to } => {
                    self.handle_login(credentials, respond_to)
                }
                BackendRequest::Shutdown => {
                    info!("BackendActor shutting down");
                    break;
                }
            }
        }
        info!("BackendActor stopped");
    }

    #[instrument(skip(self, respond_to))]
    fn handle_fetch_menu(&self, respond_to: ServiceResponse<Vec<MenuItem>, BackendError>) {
        debug!("Processing fetch_menu request");
        let api = self.api.clone();
        tokio::spawn(
            async move {
                let result = api.fetch_menu().await;
                match &result {
                    Ok(items) => info!(item_count = items.len(), "Menu fetched"),
                    Err(e) => warn!(error = %e, "Menu fetch failed"),
                }
                let _ = respond_to.send(result);
            }
            .in_current_span(),
        );
    }

    #[instrument(fields(line_count = order.items.len()), skip(self, order, token, respond_to))]
    fn handle_submit_order(
        &self,
        order: OrderRequest,
        token: BearerToken,
        respond_to: ServiceResponse<OrderAck, BackendError>,
    ) {
        debug!("Processing submit_order request");
        let api = self.api.clone();
        tokio::spawn(
            async move {
                let result = api.submit_order(&order, &token).await;
                match &result {
                    Ok(ack) => info!(daily_order_id = ?ack.daily_order_id(), "Order accepted"),
                    Err(e) => warn!(error = %e, "Order submission failed"),
                }
                let _ = respond_to.send(result);
            }
            .in_current_span(),
        );
    }

    #[instrument(fields(email = %credentials.email), skip(self, credentials, respond_to))]
    fn handle_login(&self, credentials: Credentials, respond_to: ServiceResponse<BearerToken, BackendError>) {
        debug!("Processing login request");
        let api = self.api.clone();
        tokio::spawn(
            async move {
                let result = api.login(&credentials).await;
                match &result {
                    Ok(_) => info!("Login succeeded"),
                    Err(e) => warn!(error = %e, "Login failed"),
                }
                let _ = respond_to.send(result);
            }
            .in_current_span(),
        );
    }
}
