//! Catalog behavior: paginated listing, keyword encoding, detail fetch,
//! and the admin delete-then-refresh chain.

#![allow(clippy::unwrap_used)]

use juniper_market_client::api::types::ProductUpdate;
use juniper_market_client::api::{ApiRequest, ApiResponse};
use juniper_market_client::lifecycle::Phase;
use juniper_market_core::ProductId;
use rust_decimal::Decimal;
use serde_json::json;

use juniper_market_integration_tests::{
    context, fail, message_json, ok, page_json, product_json, user_info_json,
};

fn catalog(request: &ApiRequest) -> ApiResponse {
    let path = request.path.as_str();
    if path.starts_with("/api/products?") {
        return ok(&page_json(
            vec![
                product_json("p1", "Walnut Desk", 90.0, 7),
                product_json("p2", "Oak Chair", 35.5, 3),
            ],
            1,
            4,
        ));
    }
    match path {
        "/api/users/login" => ok(&user_info_json("u2", "Root", "root@example.com", true)),
        "/api/products/top" => ok(&json!([product_json("p1", "Walnut Desk", 90.0, 7)])),
        "/api/products/p1" => ok(&product_json("p1", "Walnut Desk", 90.0, 7)),
        "/api/products/p2" => ok(&message_json("Product removed")),
        _ => fail(404, "Product not found"),
    }
}

// ============================================================================
// Listing
// ============================================================================

#[tokio::test]
async fn list_defaults_to_page_one_and_no_keyword() {
    let (ctx, transport, _dir) = context(catalog);

    let page = ctx.list_products(None, None).await.unwrap();
    assert_eq!(page.products.len(), 2);

    assert_eq!(
        transport.paths(),
        ["/api/products?keyword=&pageNumber=1"]
    );
    let products = ctx.products_state();
    assert!(products.list.succeeded());
    assert_eq!(products.page, 1);
    assert_eq!(products.pages, 4);
}

#[tokio::test]
async fn keywords_are_percent_encoded() {
    let (ctx, transport, _dir) = context(catalog);

    ctx.list_products(Some("walnut desk"), Some(2)).await.unwrap();
    assert_eq!(
        transport.paths(),
        ["/api/products?keyword=walnut%20desk&pageNumber=2"]
    );
}

#[tokio::test]
async fn list_failure_keeps_the_previous_page() {
    let (ctx, _, _dir) = context(catalog);
    ctx.list_products(None, None).await.unwrap();

    // The stub 404s unknown keyword-free detail paths; force a rejection.
    let err = ctx.get_product(&ProductId::from("missing")).await.unwrap_err();
    assert_eq!(err.to_string(), "Product not found");

    let products = ctx.products_state();
    assert_eq!(products.detail.phase(), Phase::Rejected);
    // The list slice and its data are untouched.
    assert!(products.list.succeeded());
    assert_eq!(products.products.len(), 2);
}

#[tokio::test]
async fn top_products_fill_their_own_slice() {
    let (ctx, _, _dir) = context(catalog);

    let top = ctx.list_top_products().await.unwrap();
    assert_eq!(top.len(), 1);
    assert_eq!(ctx.products_state().top_products.len(), 1);
}

// ============================================================================
// Detail
// ============================================================================

#[tokio::test]
async fn detail_fetch_selects_the_product() {
    let (ctx, _, _dir) = context(catalog);

    let product = ctx.get_product(&ProductId::from("p1")).await.unwrap();
    assert_eq!(product.name, "Walnut Desk");
    assert_eq!(
        ctx.products_state().selected.unwrap().id.as_str(),
        "p1"
    );
}

// ============================================================================
// Admin mutations
// ============================================================================

#[tokio::test]
async fn delete_refreshes_the_list() {
    let (ctx, transport, _dir) = context(catalog);
    ctx.login("root@example.com", "secret").await.unwrap();

    ctx.delete_product(&ProductId::from("p2")).await.unwrap();

    let requests = transport.requests();
    assert_eq!(requests[1].path, "/api/products/p2");
    assert_eq!(requests[1].method, reqwest::Method::DELETE);
    assert!(requests[1].token.is_some());
    // The refresh follows in the same call.
    assert_eq!(requests[2].path, "/api/products?keyword=&pageNumber=1");
    assert!(ctx.products_state().delete.succeeded());
}

#[tokio::test]
async fn update_is_absorbed_into_list_and_selection() {
    let (ctx, _, _dir) = context(|request: &ApiRequest| {
        let path = request.path.as_str();
        if path.starts_with("/api/products?") {
            return ok(&page_json(
                vec![product_json("p1", "Walnut Desk", 90.0, 7)],
                1,
                1,
            ));
        }
        if path == "/api/products/p1" && request.method == reqwest::Method::PUT {
            ok(&product_json("p1", "Walnut Standing Desk", 120.0, 5))
        } else if path == "/api/products/p1" {
            ok(&product_json("p1", "Walnut Desk", 90.0, 7))
        } else if path == "/api/users/login" {
            ok(&user_info_json("u2", "Root", "root@example.com", true))
        } else {
            fail(404, "Product not found")
        }
    });
    ctx.login("root@example.com", "secret").await.unwrap();
    ctx.list_products(None, None).await.unwrap();
    ctx.get_product(&ProductId::from("p1")).await.unwrap();

    let updated = ctx
        .update_product(
            &ProductId::from("p1"),
            ProductUpdate {
                name: "Walnut Standing Desk".to_string(),
                price: Decimal::new(120, 0),
                description: "Adjustable height".to_string(),
                image: "/images/p1.jpg".to_string(),
                brand: "Juniper".to_string(),
                category: "General".to_string(),
                count_in_stock: 5,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Walnut Standing Desk");

    let products = ctx.products_state();
    assert_eq!(products.products[0].name, "Walnut Standing Desk");
    assert_eq!(products.selected.unwrap().name, "Walnut Standing Desk");
}
