//! Crunchbox Storefront library.
//!
//! Customer-facing logic: the shopping cart, order totals, a cached view of
//! the product catalog and checkout. Rendering and routing live elsewhere;
//! this crate is synchronous where it can be and async only where it talks to
//! the catalog or order store.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod totals;

pub use cart::{Cart, CartLine, CartSession, StockExceeded};
pub use checkout::{Checkout, CheckoutError, CheckoutReceipt, CheckoutSummary};
pub use totals::{PricingPolicy, compute_totals};
