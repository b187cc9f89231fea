//! Shared type definitions.
//!
//! - [`id`] - Type-safe entity ID newtypes
//! - [`email`] - Validated email addresses
//! - [`money`] - Decimal money rounding and order-total computation

pub mod email;
pub mod id;
pub mod money;

pub use email::{Email, EmailError};
pub use id::{OrderId, ProductId, ReviewId, UserId};
pub use money::{OrderTotals, round_money};
