use thiserror::Error;

/// Failures talking to the canteen REST backend.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BackendError {
    #[error("Credential missing, expired or rejected")]
    Unauthorized,
    #[error("Request rejected with status {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Rejected { status: u16, message: Option<String> },
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Malformed response: {0}")]
    Decode(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<reqwest::Error> for BackendError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            Self::Decode(value.to_string())
        } else {
            Self::Transport(value.to_string())
        }
    }
}
