//! System orchestration, startup, and shutdown logic.

pub mod config;
pub mod page_session;
pub mod telemetry;

pub use config::*;
pub use page_session::*;
pub use telemetry::*;
