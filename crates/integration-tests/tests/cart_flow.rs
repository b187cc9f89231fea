//! Cart behavior: add/replace semantics, positional removal, durable
//! persistence, and rehydration into a fresh context.

#![allow(clippy::unwrap_used)]

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use tokio::sync::Semaphore;

use juniper_market_client::api::{ApiRequest, ApiResponse, Transport};
use juniper_market_client::lifecycle::Phase;
use juniper_market_client::storage::keys;
use juniper_market_client::{Result as ClientResult, StoreContext};
use juniper_market_core::ProductId;
use rust_decimal::Decimal;
use serde_json::Value;

use juniper_market_integration_tests::{StubTransport, TestDir, context, fail, ok, product_json};

/// Responder serving two fixed products by ID.
fn catalog(request: &ApiRequest) -> ApiResponse {
    match request.path.as_str() {
        "/api/products/p1" => ok(&product_json("p1", "Walnut Desk", 90.0, 7)),
        "/api/products/p2" => ok(&product_json("p2", "Oak Chair", 35.5, 3)),
        _ => fail(404, "Product not found"),
    }
}

// ============================================================================
// Add & replace
// ============================================================================

#[tokio::test]
async fn add_line_snapshots_the_product() {
    let (ctx, _, _dir) = context(catalog);

    let line = ctx.add_line(&ProductId::from("p1"), 2).await.unwrap();
    assert_eq!(line.name, "Walnut Desk");
    assert_eq!(line.qty, 2);
    assert_eq!(line.price, Decimal::new(90, 0));
    assert_eq!(line.count_in_stock, 7);

    let cart = ctx.cart_state();
    assert!(cart.add.succeeded());
    assert_eq!(cart.items.len(), 1);
}

#[tokio::test]
async fn re_adding_a_product_replaces_its_line_in_place() {
    let (ctx, _, _dir) = context(catalog);

    ctx.add_line(&ProductId::from("p1"), 1).await.unwrap();
    ctx.add_line(&ProductId::from("p2"), 1).await.unwrap();
    ctx.add_line(&ProductId::from("p1"), 5).await.unwrap();

    let cart = ctx.cart_state();
    assert_eq!(cart.items.len(), 2);
    // Position is stable across the replace.
    assert_eq!(cart.items[0].product.as_str(), "p1");
    assert_eq!(cart.items[0].qty, 5);
    assert_eq!(cart.items[1].product.as_str(), "p2");
}

#[tokio::test]
async fn quantity_is_never_below_one() {
    let (ctx, _, _dir) = context(catalog);

    let line = ctx.add_line(&ProductId::from("p1"), 0).await.unwrap();
    assert_eq!(line.qty, 1);
}

#[tokio::test]
async fn failed_add_leaves_the_cart_untouched() {
    let (ctx, _, _dir) = context(catalog);

    ctx.add_line(&ProductId::from("p1"), 1).await.unwrap();
    let err = ctx.add_line(&ProductId::from("missing"), 1).await;
    assert!(err.is_err());

    let cart = ctx.cart_state();
    assert_eq!(cart.add.phase(), Phase::Rejected);
    assert_eq!(cart.add.error(), Some("Product not found"));
    assert_eq!(cart.items.len(), 1);
}

// ============================================================================
// Removal
// ============================================================================

#[tokio::test]
async fn remove_shifts_later_lines_down() {
    let (ctx, _, _dir) = context(catalog);

    ctx.add_line(&ProductId::from("p1"), 1).await.unwrap();
    ctx.add_line(&ProductId::from("p2"), 1).await.unwrap();

    ctx.remove_line(0).unwrap();
    let cart = ctx.cart_state();
    assert_eq!(cart.items.len(), 1);
    assert_eq!(cart.items[0].product.as_str(), "p2");
}

#[tokio::test]
async fn remove_out_of_range_is_a_no_op() {
    let (ctx, _, _dir) = context(catalog);

    ctx.add_line(&ProductId::from("p1"), 1).await.unwrap();
    ctx.remove_line(5).unwrap();
    assert_eq!(ctx.cart_state().items.len(), 1);
}

// ============================================================================
// Persistence & rehydration
// ============================================================================

#[tokio::test]
async fn cart_survives_a_context_restart() {
    let (ctx, _, dir) = context(catalog);

    ctx.add_line(&ProductId::from("p1"), 2).await.unwrap();
    ctx.save_shipping_address(juniper_market_client::api::types::ShippingAddress {
        address: "1 Main St".to_string(),
        city: "Lisbon".to_string(),
        postal_code: "1100".to_string(),
        country: "PT".to_string(),
    })
    .unwrap();
    ctx.save_payment_method("PayPal").unwrap();
    drop(ctx);

    let fresh = StoreContext::with_parts(StubTransport::new(catalog), dir.store()).unwrap();
    let cart = fresh.cart_state();
    assert_eq!(cart.items.len(), 1);
    assert_eq!(cart.items[0].qty, 2);
    assert_eq!(cart.shipping_address.unwrap().city, "Lisbon");
    assert_eq!(cart.payment_method.as_deref(), Some("PayPal"));
}

#[tokio::test]
async fn cart_files_use_the_wire_schema() {
    let (ctx, _, dir) = context(catalog);

    ctx.add_line(&ProductId::from("p2"), 1).await.unwrap();

    let raw: Option<Value> = dir.store().get(keys::CART_ITEMS).unwrap();
    let lines = raw.unwrap();
    assert_eq!(lines[0]["product"], "p2");
    assert_eq!(lines[0]["countInStock"], 3);
}

/// Transport that withholds the response for `p1` until `p2` has been
/// served, forcing two in-flight adds to settle in reverse order.
struct GatedCatalog {
    release_p1: Semaphore,
    served: Mutex<Vec<String>>,
}

impl GatedCatalog {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            release_p1: Semaphore::new(0),
            served: Mutex::new(Vec::new()),
        })
    }

    fn served(&self) -> Vec<String> {
        self.served
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn record(&self, path: &str) {
        self.served
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(path.to_string());
    }
}

#[async_trait]
impl Transport for GatedCatalog {
    async fn send(&self, request: ApiRequest) -> ClientResult<ApiResponse> {
        match request.path.as_str() {
            "/api/products/p1" => {
                let _permit = self.release_p1.acquire().await;
                self.record("/api/products/p1");
                Ok(ok(&product_json("p1", "Walnut Desk", 90.0, 7)))
            }
            "/api/products/p2" => {
                // Recorded before the gate opens so the served order is
                // deterministic.
                self.record("/api/products/p2");
                self.release_p1.add_permits(1);
                Ok(ok(&product_json("p2", "Oak Chair", 35.5, 3)))
            }
            _ => Ok(fail(404, "Product not found")),
        }
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn out_of_order_settlement_keeps_both_lines() {
    let dir = TestDir::new();
    let transport = GatedCatalog::new();
    let ctx = StoreContext::with_parts(transport.clone(), dir.store()).unwrap();

    let first = tokio::spawn({
        let ctx = ctx.clone();
        async move { ctx.add_line(&ProductId::from("p1"), 1).await }
    });
    let second = tokio::spawn({
        let ctx = ctx.clone();
        async move { ctx.add_line(&ProductId::from("p2"), 1).await }
    });
    first.await.unwrap().unwrap();
    second.await.unwrap().unwrap();

    // The gate guarantees p2's response was served before p1's.
    assert_eq!(transport.served(), ["/api/products/p2", "/api/products/p1"]);

    // Both line-keyed merges survive the reversed settlement order.
    let mut in_memory: Vec<&str> = Vec::new();
    let cart = ctx.cart_state();
    for line in &cart.items {
        in_memory.push(line.product.as_str());
    }
    in_memory.sort_unstable();
    assert_eq!(in_memory, ["p1", "p2"]);

    // The durable copy agrees with memory once both settlements persist.
    let fresh = StoreContext::with_parts(StubTransport::new(catalog), dir.store()).unwrap();
    let mut rehydrated: Vec<String> = fresh
        .cart_state()
        .items
        .iter()
        .map(|line| line.product.as_str().to_string())
        .collect();
    rehydrated.sort_unstable();
    assert_eq!(rehydrated, ["p1", "p2"]);
}

#[tokio::test]
async fn clear_cart_empties_items_and_storage() {
    let (ctx, _, dir) = context(catalog);

    ctx.add_line(&ProductId::from("p1"), 1).await.unwrap();
    ctx.clear_cart().unwrap();

    assert!(ctx.cart_state().items.is_empty());
    let fresh = StoreContext::with_parts(StubTransport::new(catalog), dir.store()).unwrap();
    assert!(fresh.cart_state().items.is_empty());
}
