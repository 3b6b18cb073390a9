//! The cart manager: page-scoped cart state and the order submission workflow.

mod actor;
pub mod error;
pub mod guard;

pub use actor::*;
pub use error::*;
pub use guard::*;
