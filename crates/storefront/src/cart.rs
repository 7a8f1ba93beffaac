//! Shopping cart store.
//!
//! A cart is an ordered list of lines keyed by product ID. Every mutation keeps
//! `1 <= quantity <= product.stock` for each line: requests beyond stock are
//! clamped or refused with [`StockExceeded`], and a line is removed rather than
//! dropped to zero.
//!
//! [`CartSession`] wraps a cart with a `watch` channel so badge displays can
//! follow the item count without polling.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, warn};

use rust_decimal::Decimal;

use crunchbox_core::{Money, Product, ProductId};

/// A request asked for more units than are in stock.
///
/// This is a user-facing warning, not a failure: the cart is always left in a
/// valid state (unchanged or clamped to `stock`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("only {stock} of {product_name} in stock")]
pub struct StockExceeded {
    /// Product that ran short.
    pub product_id: ProductId,
    /// Product name for the notification.
    pub product_name: String,
    /// Units currently in stock.
    pub stock: u32,
}

impl StockExceeded {
    fn for_product(product: &Product) -> Self {
        Self {
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            stock: product.stock,
        }
    }
}

/// One product and the quantity the customer intends to buy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    product: Product,
    quantity: u32,
}

impl CartLine {
    /// Snapshot of the product as last seen by the cart.
    #[must_use]
    pub const fn product(&self) -> &Product {
        &self.product
    }

    /// Units in the cart (always at least 1).
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }
}

/// How a line changed when fresher product data was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdjustmentKind {
    /// Quantity was lowered to the available stock.
    Clamped {
        /// Quantity before the refresh.
        from: u32,
        /// Quantity after the refresh.
        to: u32,
    },
    /// The unit price changed since the line was added.
    Repriced {
        /// Price the customer last saw.
        from: Money,
        /// Current price.
        to: Money,
    },
    /// The product sold out or disappeared, so the line was dropped.
    Removed,
}

/// A line that no longer matched the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineAdjustment {
    /// Affected product.
    pub product_id: ProductId,
    /// Product name for the notification.
    pub product_name: String,
    /// What happened to the line.
    pub kind: AdjustmentKind,
}

impl std::fmt::Display for LineAdjustment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            AdjustmentKind::Clamped { from, to } => {
                write!(f, "{}: quantity reduced from {from} to {to}", self.product_name)
            }
            AdjustmentKind::Repriced { from, to } => write!(
                f,
                "{}: price changed from {} to {}",
                self.product_name,
                from.display(),
                to.display()
            ),
            AdjustmentKind::Removed => write!(f, "{}: no longer available", self.product_name),
        }
    }
}

/// Items the current customer intends to purchase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredCart")]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add one unit of `product`.
    ///
    /// Appends a new line with quantity 1, or increments the existing line. The
    /// line's product snapshot is replaced with `product`.
    ///
    /// # Errors
    ///
    /// Returns [`StockExceeded`] and leaves the cart unchanged if the new
    /// quantity would exceed `product.stock` (including a zero-stock product).
    pub fn add_item(&mut self, product: &Product) -> Result<(), StockExceeded> {
        if let Some(line) = self.lines.iter_mut().find(|l| l.product.id == product.id) {
            if line.quantity >= product.stock {
                return Err(StockExceeded::for_product(product));
            }
            line.quantity += 1;
            line.product = product.clone();
            return Ok(());
        }

        if product.stock == 0 {
            return Err(StockExceeded::for_product(product));
        }
        self.lines.push(CartLine {
            product: product.clone(),
            quantity: 1,
        });
        Ok(())
    }

    /// Set the quantity of an existing line, clamped to `[1, stock]`.
    ///
    /// Does nothing if the product is not in the cart. Values below 1 become 1;
    /// removing a line is [`Cart::remove_item`]'s job.
    ///
    /// # Errors
    ///
    /// Returns [`StockExceeded`] when `requested` exceeds stock. The line has
    /// already been set to the full stock when this is returned.
    pub fn update_quantity(
        &mut self,
        product_id: &ProductId,
        requested: i64,
    ) -> Result<(), StockExceeded> {
        let Some(line) = self.lines.iter_mut().find(|l| &l.product.id == product_id) else {
            return Ok(());
        };

        let stock = line.product.stock;
        if requested > i64::from(stock) {
            line.quantity = stock;
            return Err(StockExceeded::for_product(&line.product));
        }

        // negative requests fail the conversion and fall back to 1
        line.quantity = u32::try_from(requested).unwrap_or(1).max(1);
        Ok(())
    }

    /// Remove a product's line. Missing IDs are ignored.
    pub fn remove_item(&mut self, product_id: &ProductId) {
        self.lines.retain(|l| &l.product.id != product_id);
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Total units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Look up the line for a product.
    #[must_use]
    pub fn get(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.product.id == product_id)
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns `true` if there are no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Apply fresher catalog data to the matching line.
    ///
    /// The snapshot is replaced and the quantity clamped to the new stock; a
    /// line whose product sold out is removed. A clamp is reported ahead of a
    /// price change. Returns what changed, or `None` if the line still matches
    /// (or the product is not in the cart).
    pub fn refresh_product(&mut self, product: &Product) -> Option<LineAdjustment> {
        let index = self.position(&product.id)?;
        let line = self.lines.get_mut(index)?;
        let previous = line.quantity;
        let previous_price = line.product.price;
        line.product = product.clone();

        if product.stock == 0 {
            self.lines.remove(index);
            return Some(LineAdjustment {
                product_id: product.id.clone(),
                product_name: product.name.clone(),
                kind: AdjustmentKind::Removed,
            });
        }

        if previous > product.stock {
            line.quantity = product.stock;
            return Some(LineAdjustment {
                product_id: product.id.clone(),
                product_name: product.name.clone(),
                kind: AdjustmentKind::Clamped {
                    from: previous,
                    to: product.stock,
                },
            });
        }

        if previous_price != product.price {
            return Some(LineAdjustment {
                product_id: product.id.clone(),
                product_name: product.name.clone(),
                kind: AdjustmentKind::Repriced {
                    from: previous_price,
                    to: product.price,
                },
            });
        }

        None
    }

    /// Drop the line for a product that no longer exists in the catalog.
    pub fn discard_missing(&mut self, product_id: &ProductId) -> Option<LineAdjustment> {
        let index = self.position(product_id)?;
        let line = self.lines.remove(index);
        Some(LineAdjustment {
            product_id: line.product.id,
            product_name: line.product.name,
            kind: AdjustmentKind::Removed,
        })
    }

    /// Serialize for session storage.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Restore a cart saved with [`Cart::to_json`].
    ///
    /// Stored data is normalized: duplicate products are merged, quantities
    /// clamped to the snapshot's stock, and empty or negatively priced lines
    /// dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not a serialized cart.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    fn position(&self, product_id: &ProductId) -> Option<usize> {
        self.lines.iter().position(|l| &l.product.id == product_id)
    }
}

/// Cart as found in session storage, before normalization.
#[derive(Deserialize)]
struct StoredCart {
    lines: Vec<CartLine>,
}

impl From<StoredCart> for Cart {
    fn from(stored: StoredCart) -> Self {
        let mut cart = Self::new();
        for line in stored.lines {
            if line.product.price.amount < Decimal::ZERO {
                debug!(
                    product_id = %line.product.id,
                    "Dropping negatively priced cart line from session"
                );
                continue;
            }
            let quantity = match cart.position(&line.product.id) {
                Some(index) => cart
                    .lines
                    .get(index)
                    .map_or(line.quantity, |l| l.quantity.saturating_add(line.quantity)),
                None => line.quantity,
            };
            let quantity = quantity.min(line.product.stock);
            if quantity == 0 {
                debug!(product_id = %line.product.id, "Dropping empty cart line from session");
                continue;
            }

            match cart.position(&line.product.id) {
                Some(index) => {
                    if let Some(existing) = cart.lines.get_mut(index) {
                        existing.quantity = quantity;
                    }
                }
                None => cart.lines.push(CartLine {
                    product: line.product,
                    quantity,
                }),
            }
        }
        cart
    }
}

// =============================================================================
// CartSession
// =============================================================================

/// A cart owned by one customer session, publishing its item count.
#[derive(Debug)]
pub struct CartSession {
    cart: Cart,
    item_count: watch::Sender<u64>,
}

impl CartSession {
    /// Start a session with an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::restore(Cart::new())
    }

    /// Start a session from a previously saved cart.
    #[must_use]
    pub fn restore(cart: Cart) -> Self {
        let (item_count, _) = watch::channel(cart.item_count());
        Self { cart, item_count }
    }

    /// Receive the item count after every change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.item_count.subscribe()
    }

    /// Current cart contents.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// See [`Cart::add_item`].
    ///
    /// # Errors
    ///
    /// Returns [`StockExceeded`] if the product has no more units to add.
    pub fn add_item(&mut self, product: &Product) -> Result<(), StockExceeded> {
        let result = self.cart.add_item(product);
        if let Err(e) = &result {
            warn!(product_id = %e.product_id, stock = e.stock, "Add to cart exceeds stock");
        }
        self.publish();
        result
    }

    /// See [`Cart::update_quantity`].
    ///
    /// # Errors
    ///
    /// Returns [`StockExceeded`] after clamping to the available stock.
    pub fn update_quantity(
        &mut self,
        product_id: &ProductId,
        requested: i64,
    ) -> Result<(), StockExceeded> {
        let result = self.cart.update_quantity(product_id, requested);
        if let Err(e) = &result {
            warn!(product_id = %e.product_id, requested, stock = e.stock, "Quantity clamped to stock");
        }
        self.publish();
        result
    }

    /// See [`Cart::remove_item`].
    pub fn remove_item(&mut self, product_id: &ProductId) {
        self.cart.remove_item(product_id);
        self.publish();
    }

    /// See [`Cart::clear`].
    pub fn clear(&mut self) {
        self.cart.clear();
        self.publish();
    }

    /// See [`Cart::item_count`].
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.cart.item_count()
    }

    /// See [`Cart::refresh_product`].
    pub fn refresh_product(&mut self, product: &Product) -> Option<LineAdjustment> {
        let adjustment = self.cart.refresh_product(product);
        self.publish();
        adjustment
    }

    /// See [`Cart::discard_missing`].
    pub fn discard_missing(&mut self, product_id: &ProductId) -> Option<LineAdjustment> {
        let adjustment = self.cart.discard_missing(product_id);
        self.publish();
        adjustment
    }

    /// Consume the session and return the cart (e.g., to persist it).
    #[must_use]
    pub fn into_cart(self) -> Cart {
        self.cart
    }

    fn publish(&self) {
        let count = self.cart.item_count();
        self.item_count.send_if_modified(|current| {
            if *current == count {
                false
            } else {
                *current = count;
                true
            }
        });
    }
}

impl Default for CartSession {
    fn default() -> Self {
        Self::new()
    }
}
