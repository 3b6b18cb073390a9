use thiserror::Error;

/// Ways an order submission can fail. The display text is what the user sees.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Authentication error. Please log in again.")]
    Unauthenticated,
    #[error("Your cart is empty!")]
    EmptyCart,
    #[error("Your session has expired. Please log in again.")]
    SessionExpired,
    #[error("{0}")]
    OrderRejected(String),
    #[error("Could not reach the canteen: {0}")]
    TransportError(String),
    #[error("An order is already being placed")]
    SubmissionInFlight,
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

/// Errors from the cart's other page events.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("Failed to load menu: {0}")]
    MenuUnavailable(String),
    #[error("{0}")]
    InvalidCredentials(String),
    #[error("Could not reach the canteen: {0}")]
    TransportError(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
