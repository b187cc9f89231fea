//! Order store: checkout and the created → paid → delivered progression.
//!
//! Both transitions are monotonic and one-directional; the server is the
//! sole enforcer of the transition guards, and the client surfaces its
//! rejection messages verbatim. Refetching an order resets the pay and
//! deliver slices so a revisited order page never shows a stale success
//! banner.

use juniper_market_core::{OrderId, OrderTotals};
use tracing::instrument;

use crate::api::types::{CreateOrderRequest, Order, PaymentResult};
use crate::error::{AppError, Result};
use crate::lifecycle::{OpState, drive, require_token};
use crate::state::StoreContext;

/// Order store slices.
#[derive(Debug, Clone, Default)]
pub struct OrderState {
    /// Lifecycle of checkout.
    pub create: OpState,
    /// Order created by the last successful checkout.
    pub created: Option<Order>,

    /// Lifecycle of the detail fetch.
    pub detail: OpState,
    /// Most recently fetched order.
    pub selected: Option<Order>,

    /// Lifecycle of the pay transition.
    pub pay: OpState,
    /// Lifecycle of the deliver transition.
    pub deliver: OpState,

    /// Lifecycle of the own-orders fetch.
    pub mine: OpState,
    /// The session user's orders.
    pub my_orders: Vec<Order>,

    /// Lifecycle of the all-orders fetch (admin).
    pub all: OpState,
    /// All orders (admin view).
    pub orders: Vec<Order>,
}

impl StoreContext {
    /// Create an order from the cart's current lines, shipping address, and
    /// payment method, with totals computed from the frozen line items.
    ///
    /// Requires a session and a non-empty cart. Does not clear the cart;
    /// clearing after checkout is an explicit caller decision via
    /// [`StoreContext::clear_cart`].
    ///
    /// # Errors
    ///
    /// Returns the rejection reason also recorded on the create slice.
    #[instrument(skip(self))]
    pub async fn create_order(&self) -> Result<Order> {
        let api = self.api().clone();
        let token = self.current_token();
        let cart = self.cart_state();

        drive(
            self.orders(),
            |s| &mut s.create,
            async move {
                let token = require_token(token)?;
                if cart.items.is_empty() {
                    return Err(AppError::Invalid("cart is empty".to_string()));
                }
                let shipping_address = cart
                    .shipping_address
                    .ok_or_else(|| AppError::Invalid("no shipping address saved".to_string()))?;
                let payment_method = cart
                    .payment_method
                    .ok_or_else(|| AppError::Invalid("no payment method selected".to_string()))?;

                let totals =
                    OrderTotals::compute(cart.items.iter().map(|line| (line.price, line.qty)));
                let request = CreateOrderRequest::new(
                    &cart.items,
                    shipping_address,
                    payment_method,
                    totals,
                );
                api.post_order(&token, &request).await
            },
            |s, order: &Order| {
                s.created = Some(order.clone());
                // A fresh order gets a fresh transition lifecycle.
                s.pay.reset();
                s.deliver.reset();
            },
        )
        .await
    }

    /// Fetch one order. On success the pay and deliver slices are reset, so
    /// transition flags never outlive the page view that produced them.
    ///
    /// # Errors
    ///
    /// Returns the rejection reason also recorded on the detail slice.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn get_order(&self, id: &OrderId) -> Result<Order> {
        let api = self.api().clone();
        let token = self.current_token();
        drive(
            self.orders(),
            |s| &mut s.detail,
            async move {
                let token = require_token(token)?;
                api.fetch_order(&token, id).await
            },
            |s, order: &Order| {
                s.selected = Some(order.clone());
                s.pay.reset();
                s.deliver.reset();
            },
        )
        .await
    }

    /// Mark the order paid (CREATED → PAID). The server rejects an order
    /// that is already paid; that message becomes the rejection reason.
    ///
    /// # Errors
    ///
    /// Returns the rejection reason also recorded on the pay slice.
    #[instrument(skip(self, payment), fields(id = %id))]
    pub async fn pay_order(&self, id: &OrderId, payment: PaymentResult) -> Result<Order> {
        let api = self.api().clone();
        let token = self.current_token();
        drive(
            self.orders(),
            |s| &mut s.pay,
            async move {
                let token = require_token(token)?;
                api.put_order_paid(&token, id, &payment).await
            },
            |s, order: &Order| s.selected = Some(order.clone()),
        )
        .await
    }

    /// Mark the order delivered (PAID → DELIVERED). Admin only; the server
    /// rejects unpaid or already-delivered orders.
    ///
    /// # Errors
    ///
    /// Returns the rejection reason also recorded on the deliver slice.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn deliver_order(&self, id: &OrderId) -> Result<Order> {
        let api = self.api().clone();
        let token = self.current_token();
        drive(
            self.orders(),
            |s| &mut s.deliver,
            async move {
                let token = require_token(token)?;
                api.put_order_delivered(&token, id).await
            },
            |s, order: &Order| s.selected = Some(order.clone()),
        )
        .await
    }

    /// Fetch the session user's orders.
    ///
    /// # Errors
    ///
    /// Returns the rejection reason also recorded on the mine slice.
    #[instrument(skip(self))]
    pub async fn list_my_orders(&self) -> Result<Vec<Order>> {
        let api = self.api().clone();
        let token = self.current_token();
        drive(
            self.orders(),
            |s| &mut s.mine,
            async move {
                let token = require_token(token)?;
                api.fetch_my_orders(&token).await
            },
            |s, orders: &Vec<Order>| s.my_orders = orders.clone(),
        )
        .await
    }

    /// Fetch all orders. Admin only.
    ///
    /// # Errors
    ///
    /// Returns the rejection reason also recorded on the all slice.
    #[instrument(skip(self))]
    pub async fn list_all_orders(&self) -> Result<Vec<Order>> {
        let api = self.api().clone();
        let token = self.current_token();
        drive(
            self.orders(),
            |s| &mut s.all,
            async move {
                let token = require_token(token)?;
                api.fetch_all_orders(&token).await
            },
            |s, orders: &Vec<Order>| s.orders = orders.clone(),
        )
        .await
    }
}
