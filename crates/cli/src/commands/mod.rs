//! CLI command implementations, one module per store.

pub mod auth;
pub mod cart;
pub mod orders;
pub mod products;
pub mod users;
