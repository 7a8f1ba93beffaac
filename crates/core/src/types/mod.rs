//! Core types for Crunchbox.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod customer;
pub mod id;
pub mod money;
pub mod order;
pub mod product;
pub mod status;

pub use customer::{CustomerInfo, CustomerInfoError};
pub use id::*;
pub use money::{CurrencyCode, Money, MoneyError};
pub use order::{NewOrder, Order, OrderLine, OrderTotals};
pub use product::{Product, StockLevel};
pub use status::*;
