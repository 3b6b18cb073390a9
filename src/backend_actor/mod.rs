//! REST backend access: menu listing, order creation and login.

pub mod error;
pub mod http;

pub use error::*;
pub use http::*;
