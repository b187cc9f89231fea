//! Checkout preconditions, totals computation, and the created → paid →
//! delivered lifecycle.

#![allow(clippy::unwrap_used)]

use juniper_market_client::api::types::ShippingAddress;
use juniper_market_client::api::{ApiRequest, ApiResponse};
use juniper_market_client::lifecycle::Phase;
use juniper_market_client::{AppError, StoreContext};
use juniper_market_core::{OrderId, ProductId};
use serde_json::json;

use juniper_market_integration_tests::{
    context, fail, ok, order_json, product_json, user_info_json,
};

fn shop(request: &ApiRequest) -> ApiResponse {
    match request.path.as_str() {
        "/api/users/login" => ok(&user_info_json("u1", "Ada", "ada@example.com", false)),
        "/api/products/p1" => ok(&product_json("p1", "Walnut Desk", 90.0, 7)),
        "/api/orders" => ok(&order_json("o1", "u1")),
        "/api/orders/o1" => ok(&order_json("o1", "u1")),
        "/api/orders/o1/pay" => {
            let mut order = order_json("o1", "u1");
            order["isPaid"] = json!(true);
            order["paidAt"] = json!("2026-08-02T10:00:00Z");
            ok(&order)
        }
        "/api/orders/myorders" => ok(&json!([order_json("o1", "u1")])),
        _ => fail(404, "Not found"),
    }
}

/// Log in, fill the cart, and save checkout details.
async fn ready_to_check_out(ctx: &StoreContext) {
    ctx.login("ada@example.com", "secret").await.unwrap();
    ctx.add_line(&ProductId::from("p1"), 2).await.unwrap();
    ctx.save_shipping_address(ShippingAddress {
        address: "1 Main St".to_string(),
        city: "Lisbon".to_string(),
        postal_code: "1100".to_string(),
        country: "PT".to_string(),
    })
    .unwrap();
    ctx.save_payment_method("PayPal").unwrap();
}

// ============================================================================
// Checkout preconditions
// ============================================================================

#[tokio::test]
async fn checkout_requires_a_session() {
    let (ctx, transport, _dir) = context(shop);

    let err = ctx.create_order().await.unwrap_err();
    assert!(matches!(err, AppError::NotAuthenticated));
    assert!(transport.requests().is_empty());
    assert_eq!(ctx.orders_state().create.phase(), Phase::Rejected);
}

#[tokio::test]
async fn checkout_requires_a_non_empty_cart() {
    let (ctx, _, _dir) = context(shop);
    ctx.login("ada@example.com", "secret").await.unwrap();

    let err = ctx.create_order().await.unwrap_err();
    assert_eq!(err.to_string(), "cart is empty");
}

#[tokio::test]
async fn checkout_requires_address_and_payment_method() {
    let (ctx, _, _dir) = context(shop);
    ctx.login("ada@example.com", "secret").await.unwrap();
    ctx.add_line(&ProductId::from("p1"), 1).await.unwrap();

    let err = ctx.create_order().await.unwrap_err();
    assert_eq!(err.to_string(), "no shipping address saved");

    ctx.save_shipping_address(ShippingAddress {
        address: "1 Main St".to_string(),
        city: "Lisbon".to_string(),
        postal_code: "1100".to_string(),
        country: "PT".to_string(),
    })
    .unwrap();
    let err = ctx.create_order().await.unwrap_err();
    assert_eq!(err.to_string(), "no payment method selected");
}

// ============================================================================
// Checkout
// ============================================================================

#[tokio::test]
async fn checkout_freezes_lines_and_computes_totals() {
    let (ctx, transport, _dir) = context(shop);
    ready_to_check_out(&ctx).await;

    let order = ctx.create_order().await.unwrap();
    assert_eq!(order.id.as_str(), "o1");

    let requests = transport.requests();
    let body = requests.last().unwrap().body.clone().unwrap();
    assert_eq!(body["orderItems"][0]["product"], "p1");
    assert_eq!(body["orderItems"][0]["qty"], 2);
    // 2 x 90.00 clears the free-shipping threshold; tax is 15%.
    assert_eq!(body["itemsPrice"], json!(180.0));
    assert_eq!(body["shippingPrice"], json!(0.0));
    assert_eq!(body["taxPrice"], json!(27.0));
    assert_eq!(body["totalPrice"], json!(207.0));

    let orders = ctx.orders_state();
    assert!(orders.create.succeeded());
    assert_eq!(orders.created.unwrap().id.as_str(), "o1");
}

#[tokio::test]
async fn checkout_does_not_clear_the_cart() {
    let (ctx, _, _dir) = context(shop);
    ready_to_check_out(&ctx).await;

    ctx.create_order().await.unwrap();
    assert_eq!(ctx.cart_state().items.len(), 1);

    ctx.clear_cart().unwrap();
    assert!(ctx.cart_state().items.is_empty());
}

#[tokio::test]
async fn shipping_is_charged_below_the_threshold() {
    let (ctx, transport, _dir) = context(shop);
    ctx.login("ada@example.com", "secret").await.unwrap();
    ctx.add_line(&ProductId::from("p1"), 1).await.unwrap();
    ctx.save_shipping_address(ShippingAddress {
        address: "1 Main St".to_string(),
        city: "Lisbon".to_string(),
        postal_code: "1100".to_string(),
        country: "PT".to_string(),
    })
    .unwrap();
    ctx.save_payment_method("PayPal").unwrap();

    ctx.create_order().await.unwrap();
    let body = transport.requests().last().unwrap().body.clone().unwrap();
    assert_eq!(body["itemsPrice"], json!(90.0));
    assert_eq!(body["shippingPrice"], json!(10.0));
    assert_eq!(body["taxPrice"], json!(13.5));
    assert_eq!(body["totalPrice"], json!(113.5));
}

// ============================================================================
// Lifecycle transitions
// ============================================================================

#[tokio::test]
async fn pay_updates_the_selected_order() {
    let (ctx, _, _dir) = context(shop);
    ctx.login("ada@example.com", "secret").await.unwrap();

    let order = ctx
        .pay_order(
            &OrderId::from("o1"),
            juniper_market_client::api::types::PaymentResult {
                id: "tx-1".to_string(),
                status: "COMPLETED".to_string(),
                update_time: None,
                email_address: None,
            },
        )
        .await
        .unwrap();
    assert!(order.is_paid);

    let orders = ctx.orders_state();
    assert!(orders.pay.succeeded());
    assert!(orders.selected.unwrap().is_paid);
}

#[tokio::test]
async fn deliver_rejection_surfaces_the_server_message() {
    let (ctx, _, _dir) = context(|request: &ApiRequest| {
        if request.path == "/api/users/login" {
            ok(&user_info_json("u2", "Root", "root@example.com", true))
        } else {
            fail(400, "Order is not paid")
        }
    });
    ctx.login("root@example.com", "secret").await.unwrap();

    let err = ctx.deliver_order(&OrderId::from("o1")).await.unwrap_err();
    assert_eq!(err.to_string(), "Order is not paid");
    assert_eq!(ctx.orders_state().deliver.error(), Some("Order is not paid"));
}

#[tokio::test]
async fn fetching_an_order_resets_transition_slices() {
    let (ctx, _, _dir) = context(shop);
    ctx.login("ada@example.com", "secret").await.unwrap();

    ctx.pay_order(
        &OrderId::from("o1"),
        juniper_market_client::api::types::PaymentResult {
            id: "tx-1".to_string(),
            status: "COMPLETED".to_string(),
            update_time: None,
            email_address: None,
        },
    )
    .await
    .unwrap();
    assert!(ctx.orders_state().pay.succeeded());

    ctx.get_order(&OrderId::from("o1")).await.unwrap();
    let orders = ctx.orders_state();
    assert_eq!(orders.pay.phase(), Phase::Idle);
    assert_eq!(orders.deliver.phase(), Phase::Idle);
    assert_eq!(orders.selected.unwrap().id.as_str(), "o1");
}

#[tokio::test]
async fn my_orders_requires_a_session() {
    let (ctx, transport, _dir) = context(shop);

    let err = ctx.list_my_orders().await.unwrap_err();
    assert!(matches!(err, AppError::NotAuthenticated));
    assert!(transport.requests().is_empty());

    ctx.login("ada@example.com", "secret").await.unwrap();
    let orders = ctx.list_my_orders().await.unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(ctx.orders_state().my_orders.len(), 1);
}
