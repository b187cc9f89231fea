//! Juniper Market client data-synchronization layer.
//!
//! Mediates between UI surfaces and the remote storefront REST API: tracks
//! in-flight requests, merges server responses into local collections, and
//! persists the cart and session across process restarts.
//!
//! # Architecture
//!
//! - [`api`] - Request gateway: typed endpoint wrappers over a `Transport`
//!   seam, bearer-token attachment, uniform error-message extraction
//! - [`lifecycle`] - The pending/fulfilled/rejected envelope every operation
//!   runs inside
//! - [`stores`] - Product, session, cart, and order stores; each slice is
//!   mutated only by its own operations' lifecycle transitions
//! - [`storage`] - Durable file-per-key JSON storage for the cart and session
//! - [`state`] - [`StoreContext`], the single handle UI code receives
//!
//! # Example
//!
//! ```rust,ignore
//! use juniper_market_client::{ClientConfig, StoreContext};
//!
//! let config = ClientConfig::from_env()?;
//! let ctx = StoreContext::new(&config)?;
//!
//! ctx.login("buyer@example.com", "hunter2").await?;
//! ctx.add_line(&"p1".into(), 2).await?;
//! ctx.save_shipping_address(address)?;
//! ctx.save_payment_method("GooglePay")?;
//! let order = ctx.create_order().await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod state;
pub mod storage;
pub mod stores;

pub use api::{ApiClient, ApiRequest, ApiResponse, HttpTransport, Transport};
pub use config::{ClientConfig, ConfigError};
pub use error::{AppError, Result};
pub use state::StoreContext;
