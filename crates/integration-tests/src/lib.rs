//! Test support for exercising the client data layer end to end.
//!
//! Tests run against a [`StubTransport`]: a scripted responder stands in for
//! the remote API, and every request that reaches the transport is recorded
//! so assertions can inspect paths, bodies, and attached tokens. Durable
//! state lands in a throwaway directory owned by a [`TestDir`] guard.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use serde_json::{Value, json};

use juniper_market_client::api::{ApiRequest, ApiResponse, Transport};
use juniper_market_client::storage::LocalStore;
use juniper_market_client::{Result, StoreContext};

/// Bearer token issued by the stub login fixtures.
pub const TOKEN: &str = "stub-token-1";

// =============================================================================
// Stub transport
// =============================================================================

type Responder = dyn Fn(&ApiRequest) -> ApiResponse + Send + Sync;

/// Transport that answers from a scripted closure and records every request
/// it sees, in arrival order.
pub struct StubTransport {
    responder: Box<Responder>,
    seen: Mutex<Vec<ApiRequest>>,
}

impl StubTransport {
    /// Create a transport answering with `responder`.
    pub fn new(
        responder: impl Fn(&ApiRequest) -> ApiResponse + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            responder: Box::new(responder),
            seen: Mutex::new(Vec::new()),
        })
    }

    /// Every request sent so far.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Paths of every request sent so far.
    pub fn paths(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.path).collect()
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let response = (self.responder)(&request);
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);
        Ok(response)
    }
}

/// A 200 response carrying `body` as JSON.
#[must_use]
pub fn ok(body: &Value) -> ApiResponse {
    ApiResponse {
        status: 200,
        body: body.to_string(),
    }
}

/// A non-2xx response carrying the API's standard error envelope.
#[must_use]
pub fn fail(status: u16, message: &str) -> ApiResponse {
    ApiResponse {
        status,
        body: json!({ "message": message }).to_string(),
    }
}

// =============================================================================
// Throwaway storage
// =============================================================================

static DIR_COUNTER: AtomicU32 = AtomicU32::new(0);

/// A unique directory under the system temp dir, removed on drop.
pub struct TestDir {
    path: PathBuf,
}

impl TestDir {
    #[must_use]
    pub fn new() -> Self {
        let n = DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let path = std::env::temp_dir().join(format!(
            "juniper-market-it-{}-{n}",
            std::process::id()
        ));
        Self { path }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a store rooted at this directory.
    #[allow(clippy::missing_panics_doc)]
    #[must_use]
    pub fn store(&self) -> LocalStore {
        LocalStore::open(&self.path).expect("open test store")
    }
}

impl Default for TestDir {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TestDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

/// A context over a fresh stub transport and throwaway storage.
///
/// Returns the transport and the directory guard alongside the context so
/// tests can inspect recorded requests and rehydrate from the same files.
#[allow(clippy::missing_panics_doc)]
pub fn context(
    responder: impl Fn(&ApiRequest) -> ApiResponse + Send + Sync + 'static,
) -> (StoreContext, Arc<StubTransport>, TestDir) {
    let dir = TestDir::new();
    let transport = StubTransport::new(responder);
    let ctx = StoreContext::with_parts(transport.clone(), dir.store()).expect("build context");
    (ctx, transport, dir)
}

// =============================================================================
// Wire fixtures
// =============================================================================

/// A catalog product with sensible defaults and no reviews.
#[must_use]
pub fn product_json(id: &str, name: &str, price: f64, count_in_stock: u32) -> Value {
    json!({
        "_id": id,
        "name": name,
        "image": format!("/images/{id}.jpg"),
        "brand": "Juniper",
        "category": "General",
        "description": format!("{name} description"),
        "price": price,
        "countInStock": count_in_stock,
        "rating": 4.0,
        "numReviews": 2,
        "reviews": [],
    })
}

/// One catalog page wrapping `products`.
#[must_use]
pub fn page_json(products: Vec<Value>, page: u32, pages: u32) -> Value {
    json!({ "products": products, "page": page, "pages": pages })
}

/// A signed-in user carrying [`TOKEN`].
#[must_use]
pub fn user_info_json(id: &str, name: &str, email: &str, is_admin: bool) -> Value {
    json!({
        "_id": id,
        "name": name,
        "email": email,
        "isAdmin": is_admin,
        "token": TOKEN,
    })
}

/// An unpaid, undelivered order owned by `user_id`.
#[must_use]
pub fn order_json(id: &str, user_id: &str) -> Value {
    json!({
        "_id": id,
        "user": user_id,
        "orderItems": [
            {
                "name": "Walnut Desk",
                "qty": 2,
                "image": "/images/p1.jpg",
                "price": 90.0,
                "product": "p1",
            },
        ],
        "shippingAddress": {
            "address": "1 Main St",
            "city": "Lisbon",
            "postalCode": "1100",
            "country": "PT",
        },
        "paymentMethod": "PayPal",
        "itemsPrice": 180.0,
        "shippingPrice": 0.0,
        "taxPrice": 27.0,
        "totalPrice": 207.0,
        "isPaid": false,
        "isDelivered": false,
        "createdAt": "2026-08-01T09:30:00Z",
    })
}

/// The API's `{ "message": ... }` acknowledgement body.
#[must_use]
pub fn message_json(text: &str) -> Value {
    json!({ "message": text })
}
