//! Juniper Market Core - Shared types library.
//!
//! This crate provides common types used across all Juniper Market components:
//! - `client` - The client-side data-synchronization layer
//! - `cli` - Command-line surface driving the client layer
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps it
//! lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, and money helpers

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
