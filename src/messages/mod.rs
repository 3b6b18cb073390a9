use tokio::sync::oneshot;

use crate::backend_actor::BackendError;
use crate::cart_actor::{CartError, OrderError, SubmitGuard};
use crate::domain::{BearerToken, CartLine, Credentials, MenuItem, MenuItemId, Money, OrderAck, OrderRequest, QuantityChange};
use crate::view::CartRender;

/// Generic type aliases for service communication
pub type ServiceResult<T, E> = std::result::Result<T, E>;
pub type ServiceResponse<T, E> = oneshot::Sender<ServiceResult<T, E>>;

/// Requests served by the backend actor. Each maps to one REST call.
#[derive(Debug)]
pub enum BackendRequest {
    FetchMenu {
        respond_to: ServiceResponse<Vec<MenuItem>, BackendError>,
    },
    SubmitOrder {
        order: OrderRequest,
        token: BearerToken,
        respond_to: ServiceResponse<OrderAck, BackendError>,
    },
    Login {
        credentials: Credentials,
        respond_to: ServiceResponse<BearerToken, BackendError>,
    },
    Shutdown,
}

/// Page events delivered to the cart actor. The actor handles one at a time.
#[derive(Debug)]
pub enum CartRequest {
    LoadCatalog {
        respond_to: ServiceResponse<usize, CartError>,
    },
    Menu {
        respond_to: ServiceResponse<Vec<MenuItem>, CartError>,
    },
    AddItem {
        item_id: MenuItemId,
        respond_to: ServiceResponse<(), CartError>,
    },
    ChangeQuantity {
        item_id: MenuItemId,
        change: QuantityChange,
        respond_to: ServiceResponse<(), CartError>,
    },
    ComputeTotal {
        respond_to: ServiceResponse<Money, CartError>,
    },
    Lines {
        respond_to: ServiceResponse<Vec<CartLine>, CartError>,
    },
    RenderCart {
        respond_to: ServiceResponse<CartRender, CartError>,
    },
    Login {
        credentials: Credentials,
        respond_to: ServiceResponse<(), CartError>,
    },
    Logout {
        respond_to: ServiceResponse<(), CartError>,
    },
    SubmitOrder {
        respond_to: ServiceResponse<OrderAck, OrderError>,
    },
    Shutdown,
}

/// Outcome of an order submission, handed back to the cart actor once the
/// backend has answered. Dropping it releases the submit control.
#[derive(Debug)]
pub struct SubmissionSettled {
    pub order: OrderRequest,
    pub outcome: Result<OrderAck, BackendError>,
    pub guard: SubmitGuard,
    pub respond_to: ServiceResponse<OrderAck, OrderError>,
}
