//! Crunchbox back office library.
//!
//! Everything the shop owner does behind the counter:
//! - Catalog and stock management over an in-memory [`db::MemoryStore`]
//! - Sales reports and dashboard stats
//! - Employee records and daily attendance
//! - The business profile shown in the storefront footer
//!
//! The store also implements the core `ProductCatalog` and `OrderStore`
//! traits, so the storefront checkout can place orders against it directly.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;

pub use config::AdminConfig;
pub use db::{MemoryStore, RepositoryError, SeedData};
pub use error::AdminError;
