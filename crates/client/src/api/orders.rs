//! Typed order endpoints.

use reqwest::Method;

use juniper_market_core::OrderId;

use crate::error::Result;

use super::ApiClient;
use super::types::{CreateOrderRequest, Order, PaymentResult};

impl ApiClient {
    /// `POST /api/orders` - create an order from frozen checkout data.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn post_order(&self, token: &str, request: &CreateOrderRequest) -> Result<Order> {
        self.call(
            Method::POST,
            "/api/orders",
            Some(serde_json::to_value(request)?),
            Some(token),
        )
        .await
    }

    /// `GET /api/orders/:id` - order detail. The server enforces that the
    /// caller owns the order or holds admin rights.
    ///
    /// # Errors
    ///
    /// Returns an error if the caller lacks rights or the order is missing.
    pub async fn fetch_order(&self, token: &str, id: &OrderId) -> Result<Order> {
        self.call(Method::GET, &format!("/api/orders/{id}"), None, Some(token))
            .await
    }

    /// `PUT /api/orders/:id/pay` - mark the order paid. The server rejects
    /// orders that are already paid.
    ///
    /// # Errors
    ///
    /// Returns an error with the server's message on an invalid transition.
    pub async fn put_order_paid(
        &self,
        token: &str,
        id: &OrderId,
        payment: &PaymentResult,
    ) -> Result<Order> {
        self.call(
            Method::PUT,
            &format!("/api/orders/{id}/pay"),
            Some(serde_json::to_value(payment)?),
            Some(token),
        )
        .await
    }

    /// `PUT /api/orders/:id/deliver` - mark the order delivered. Admin only;
    /// the server rejects unpaid or already-delivered orders.
    ///
    /// # Errors
    ///
    /// Returns an error with the server's message on an invalid transition.
    pub async fn put_order_delivered(&self, token: &str, id: &OrderId) -> Result<Order> {
        self.call(
            Method::PUT,
            &format!("/api/orders/{id}/deliver"),
            None,
            Some(token),
        )
        .await
    }

    /// `GET /api/orders/myorders` - the caller's own orders.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn fetch_my_orders(&self, token: &str) -> Result<Vec<Order>> {
        self.call(Method::GET, "/api/orders/myorders", None, Some(token))
            .await
    }

    /// `GET /api/orders` - all orders. Admin only.
    ///
    /// # Errors
    ///
    /// Returns an error if the caller lacks admin rights.
    pub async fn fetch_all_orders(&self, token: &str) -> Result<Vec<Order>> {
        self.call(Method::GET, "/api/orders", None, Some(token)).await
    }
}
