//! Wire schemas for the storefront REST API.
//!
//! One explicit serde schema per endpoint payload, validated at the gateway
//! boundary. The API uses camelCase field names and Mongo-style `_id`
//! identifiers; monetary fields travel as JSON numbers.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use juniper_market_core::{OrderId, OrderTotals, ProductId, ReviewId, UserId};

// =============================================================================
// Product Types
// =============================================================================

/// A product review, appended by `POST /api/products/:id/reviews`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Server-assigned review ID.
    #[serde(rename = "_id")]
    pub id: ReviewId,
    /// Display name of the reviewing user.
    pub name: String,
    /// Star rating, 1-5.
    pub rating: u8,
    /// Free-form comment text.
    pub comment: String,
    /// Reviewing user reference.
    pub user: UserId,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A catalog product.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Server-assigned product ID.
    #[serde(rename = "_id")]
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Image reference (path or URL).
    pub image: String,
    /// Brand name.
    pub brand: String,
    /// Category name.
    pub category: String,
    /// Long description.
    #[serde(default)]
    pub description: String,
    /// Unit price.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Units in stock.
    pub count_in_stock: u32,
    /// Average review rating.
    #[serde(default)]
    pub rating: f64,
    /// Number of reviews.
    #[serde(default)]
    pub num_reviews: u32,
    /// Reviews, in creation order. List endpoints may omit these.
    #[serde(default)]
    pub reviews: Vec<Review>,
}

/// One page of the product list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductPage {
    /// Products on this page.
    pub products: Vec<Product>,
    /// Current page number (1-based).
    pub page: u32,
    /// Total number of pages.
    pub pages: u32,
}

/// Mutable fields for an admin product update (full replace).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    /// Display name.
    pub name: String,
    /// Unit price.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Long description.
    pub description: String,
    /// Image reference.
    pub image: String,
    /// Brand name.
    pub brand: String,
    /// Category name.
    pub category: String,
    /// Units in stock.
    pub count_in_stock: u32,
}

/// Input for creating a product review.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewInput {
    /// Star rating, 1-5.
    pub rating: u8,
    /// Free-form comment text.
    pub comment: String,
}

// =============================================================================
// User & Session Types
// =============================================================================

/// Authenticated session snapshot, returned by login, register, and profile
/// update. Persisted durably so a restart does not require re-authentication.
///
/// Implements `Debug` manually to redact the token.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    /// User ID.
    #[serde(rename = "_id")]
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Whether this user holds admin rights.
    pub is_admin: bool,
    /// Bearer token attached to credentialed requests.
    pub token: String,
}

impl std::fmt::Debug for UserInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserInfo")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("is_admin", &self.is_admin)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

/// A user record without session credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// User ID.
    #[serde(rename = "_id")]
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Whether this user holds admin rights.
    #[serde(default)]
    pub is_admin: bool,
}

/// Login request body.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    /// Email address.
    pub email: &'a str,
    /// Plaintext password; hashing is the server's concern.
    pub password: &'a str,
}

/// Registration request body.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest<'a> {
    /// Display name.
    pub name: &'a str,
    /// Email address.
    pub email: &'a str,
    /// Plaintext password.
    pub password: &'a str,
}

/// Own-profile update. Absent fields keep their current value.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    /// New display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// New password.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Admin update of another user.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    /// Target user ID.
    #[serde(rename = "_id")]
    pub id: UserId,
    /// New display name.
    pub name: String,
    /// New email address.
    pub email: String,
    /// New admin flag.
    pub is_admin: bool,
}

// =============================================================================
// Cart Types
// =============================================================================

/// Shipping address captured on the cart and frozen onto orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    /// Street address.
    pub address: String,
    /// City.
    pub city: String,
    /// Postal code.
    pub postal_code: String,
    /// Country.
    pub country: String,
}

/// One cart line: a product reference plus a snapshot of the product data
/// taken when the line was last added. Uniquely keyed by product ID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Product reference.
    pub product: ProductId,
    /// Name at add time.
    pub name: String,
    /// Image at add time.
    pub image: String,
    /// Unit price at add time.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Stock count at add time; quantity must not exceed it.
    pub count_in_stock: u32,
    /// Requested quantity, always at least 1.
    pub qty: u32,
}

impl CartLine {
    /// Build a line from a freshly fetched product snapshot.
    #[must_use]
    pub fn from_product(product: &Product, qty: u32) -> Self {
        Self {
            product: product.id.clone(),
            name: product.name.clone(),
            image: product.image.clone(),
            price: product.price,
            count_in_stock: product.count_in_stock,
            qty: qty.max(1),
        }
    }
}

// =============================================================================
// Order Types
// =============================================================================

/// Payment processor confirmation recorded on a paid order.
///
/// Field names follow the processor's callback payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentResult {
    /// Processor transaction ID.
    pub id: String,
    /// Processor status string.
    pub status: String,
    /// Processor-reported update time.
    #[serde(default)]
    pub update_time: Option<String>,
    /// Payer email address.
    #[serde(default)]
    pub email_address: Option<String>,
}

/// An order line item: a frozen snapshot taken at checkout, immutable
/// thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// Product name at checkout.
    pub name: String,
    /// Quantity.
    pub qty: u32,
    /// Image at checkout.
    pub image: String,
    /// Unit price at checkout.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Product reference.
    pub product: ProductId,
}

impl From<&CartLine> for OrderItem {
    fn from(line: &CartLine) -> Self {
        Self {
            name: line.name.clone(),
            qty: line.qty,
            image: line.image.clone(),
            price: line.price,
            product: line.product.clone(),
        }
    }
}

/// The order's owning user: a bare reference on creation, populated with
/// name and email on detail fetches.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OrderOwner {
    /// Bare user reference.
    Id(UserId),
    /// Populated user details.
    Details(OrderOwnerDetails),
}

/// Populated owner details on an order detail payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderOwnerDetails {
    /// User ID.
    #[serde(rename = "_id", default)]
    pub id: Option<UserId>,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
}

/// An order. Created once at checkout, then mutated exactly twice in its
/// lifecycle: marked paid, marked delivered.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Server-assigned order ID.
    #[serde(rename = "_id")]
    pub id: OrderId,
    /// Owning user.
    pub user: OrderOwner,
    /// Frozen line items.
    pub order_items: Vec<OrderItem>,
    /// Shipping address frozen at checkout.
    pub shipping_address: ShippingAddress,
    /// Payment method selected at checkout.
    pub payment_method: String,
    /// Processor confirmation, present once paid.
    #[serde(default)]
    pub payment_result: Option<PaymentResult>,
    /// Items subtotal.
    #[serde(with = "rust_decimal::serde::float")]
    pub items_price: Decimal,
    /// Shipping charge.
    #[serde(with = "rust_decimal::serde::float")]
    pub shipping_price: Decimal,
    /// Tax charge.
    #[serde(with = "rust_decimal::serde::float")]
    pub tax_price: Decimal,
    /// Grand total.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
    /// Whether the order has been paid.
    #[serde(default)]
    pub is_paid: bool,
    /// When the order was paid.
    #[serde(default)]
    pub paid_at: Option<DateTime<Utc>>,
    /// Whether the order has been delivered.
    #[serde(default)]
    pub is_delivered: bool,
    /// When the order was delivered.
    #[serde(default)]
    pub delivered_at: Option<DateTime<Utc>>,
    /// When the order was created.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Checkout request body: frozen cart lines plus computed totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    /// Frozen line items.
    pub order_items: Vec<OrderItem>,
    /// Shipping address from the cart.
    pub shipping_address: ShippingAddress,
    /// Payment method from the cart.
    pub payment_method: String,
    /// Items subtotal.
    #[serde(with = "rust_decimal::serde::float")]
    pub items_price: Decimal,
    /// Shipping charge.
    #[serde(with = "rust_decimal::serde::float")]
    pub shipping_price: Decimal,
    /// Tax charge.
    #[serde(with = "rust_decimal::serde::float")]
    pub tax_price: Decimal,
    /// Grand total.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
}

impl CreateOrderRequest {
    /// Assemble a checkout request from cart contents and computed totals.
    #[must_use]
    pub fn new(
        lines: &[CartLine],
        shipping_address: ShippingAddress,
        payment_method: String,
        totals: OrderTotals,
    ) -> Self {
        Self {
            order_items: lines.iter().map(OrderItem::from).collect(),
            shipping_address,
            payment_method,
            items_price: totals.items_price,
            shipping_price: totals.shipping_price,
            tax_price: totals.tax_price,
            total_price: totals.total_price,
        }
    }
}

/// Generic `{message}` acknowledgement payload.
#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    /// Human-readable acknowledgement.
    pub message: String,
}
