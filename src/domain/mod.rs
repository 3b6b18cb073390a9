pub mod cart;
pub mod menu;
pub mod money;
pub mod order;
pub mod session;

pub use cart::*;
pub use menu::*;
pub use money::*;
pub use order::*;
pub use session::*;
