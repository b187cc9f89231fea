//! In-memory stores and their operations.
//!
//! Each store owns one logical entity type and is updated only by its own
//! operations' lifecycle transitions. Operations are methods on
//! [`crate::StoreContext`], grouped one file per store.

pub mod cart;
pub mod orders;
pub mod products;
pub mod session;

pub use cart::CartState;
pub use orders::OrderState;
pub use products::ProductState;
pub use session::SessionState;
