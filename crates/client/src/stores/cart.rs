//! Cart store: locally-owned line items with durable persistence.
//!
//! Lines merge server-verified product snapshots into user-chosen
//! quantities, keyed by product ID - the per-product merge makes line
//! updates safe under out-of-order settlement. Every mutation persists its
//! durable key immediately, and each key is written independently. The
//! cart lock is held across the write so a concurrent mutator can never
//! persist a stale snapshot over a newer one.

use juniper_market_core::ProductId;
use tracing::instrument;

use crate::api::types::{CartLine, ShippingAddress};
use crate::error::{AppError, Result};
use crate::lifecycle::{OpState, drive, lock};
use crate::state::StoreContext;
use crate::storage::keys;

/// Cart store state. Restored from durable storage at startup; cleared only
/// by explicit checkout completion or removal of all lines.
#[derive(Debug, Clone, Default)]
pub struct CartState {
    /// Lifecycle of the add-line fetch.
    pub add: OpState,
    /// Lines in insertion order.
    pub items: Vec<CartLine>,
    /// Saved shipping address, if any.
    pub shipping_address: Option<ShippingAddress>,
    /// Selected payment method, if any.
    pub payment_method: Option<String>,
}

impl CartState {
    /// Insert the line, or replace the existing line for the same product in
    /// place. Re-adding never duplicates and never reorders.
    pub(crate) fn upsert_line(&mut self, line: CartLine) {
        if let Some(existing) = self.items.iter_mut().find(|l| l.product == line.product) {
            *existing = line;
        } else {
            self.items.push(line);
        }
    }

    /// Remove the line at `index`; later lines shift down one position.
    /// Out of range is a no-op.
    pub(crate) fn remove_at(&mut self, index: usize) {
        if index < self.items.len() {
            self.items.remove(index);
        }
    }
}

impl StoreContext {
    /// Add a product to the cart, or replace its existing line.
    ///
    /// Fetches a fresh product snapshot through the gateway, clamps the
    /// quantity to at least 1, merges by product ID, and persists the line
    /// items. Comparing the requested quantity against the returned
    /// snapshot's stock is the caller's responsibility.
    ///
    /// # Errors
    ///
    /// Returns the rejection reason also recorded on the add slice.
    #[instrument(skip(self), fields(id = %product_id, qty))]
    pub async fn add_line(&self, product_id: &ProductId, qty: u32) -> Result<CartLine> {
        let api = self.api().clone();
        let line = drive(
            self.cart(),
            |s| &mut s.add,
            async move {
                let product = api.fetch_product(product_id).await?;
                Ok(CartLine::from_product(&product, qty))
            },
            |s, line: &CartLine| s.upsert_line(line.clone()),
        )
        .await?;

        // Serialize the items under the same lock that guards them; a
        // storage fault becomes the add slice's rejection reason.
        let mut cart = lock(self.cart());
        if let Err(err) = self.storage().put(keys::CART_ITEMS, &cart.items) {
            let err = AppError::from(err);
            cart.add.reject(err.reason());
            return Err(err);
        }
        drop(cart);
        Ok(line)
    }

    /// Remove the line at `index` and persist the remaining items.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails.
    #[instrument(skip(self))]
    pub fn remove_line(&self, index: usize) -> Result<()> {
        let mut cart = lock(self.cart());
        cart.remove_at(index);
        self.storage().put(keys::CART_ITEMS, &cart.items)?;
        Ok(())
    }

    /// Save the shipping address and persist it under its own key.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails.
    #[instrument(skip(self, address))]
    pub fn save_shipping_address(&self, address: ShippingAddress) -> Result<()> {
        let mut cart = lock(self.cart());
        cart.shipping_address = Some(address);
        self.storage()
            .put(keys::SHIPPING_ADDRESS, &cart.shipping_address)?;
        Ok(())
    }

    /// Save the payment method and persist it under its own key.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails.
    #[instrument(skip(self))]
    pub fn save_payment_method(&self, method: &str) -> Result<()> {
        let mut cart = lock(self.cart());
        cart.payment_method = Some(method.to_string());
        self.storage()
            .put(keys::PAYMENT_METHOD, &cart.payment_method)?;
        Ok(())
    }

    /// Remove all lines and persist the empty cart. The shipping address and
    /// payment method keep their keys.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails.
    #[instrument(skip(self))]
    pub fn clear_cart(&self) -> Result<()> {
        let mut cart = lock(self.cart());
        cart.items.clear();
        self.storage().put(keys::CART_ITEMS, &cart.items)?;
        Ok(())
    }
}
