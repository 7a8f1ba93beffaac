//! Crunchbox Core - Shared types library.
//!
//! This crate provides common types used across all Crunchbox components:
//! - `storefront` - Cart store, order totals and checkout
//! - `admin` - Back office store, repositories and reports
//! - `cli` - Command-line tools for operators
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no database access,
//! no HTTP clients. Collaborators such as the product catalog and the order
//! store are described by the traits in [`store`] and implemented elsewhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, money, products, orders, customers and statuses
//! - [`store`] - Product catalog and order persistence traits

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod store;
pub mod types;

pub use store::{OrderStore, ProductCatalog, StoreError};
pub use types::*;
