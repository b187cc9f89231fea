//! Typed product endpoints.

use reqwest::Method;

use juniper_market_core::ProductId;

use crate::error::Result;

use super::ApiClient;
use super::types::{Message, Product, ProductPage, ProductUpdate, ReviewInput};

impl ApiClient {
    /// `GET /api/products?keyword=&pageNumber=` - paginated catalog search.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the payload does not decode.
    pub async fn fetch_products(
        &self,
        keyword: Option<&str>,
        page: Option<u32>,
    ) -> Result<ProductPage> {
        let path = format!(
            "/api/products?keyword={}&pageNumber={}",
            urlencoding::encode(keyword.unwrap_or_default()),
            page.unwrap_or(1)
        );
        self.call(Method::GET, &path, None, None).await
    }

    /// `GET /api/products/:id` - product detail with reviews.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is missing or the request fails.
    pub async fn fetch_product(&self, id: &ProductId) -> Result<Product> {
        self.call(Method::GET, &format!("/api/products/{id}"), None, None)
            .await
    }

    /// `GET /api/products/top` - highest-rated products.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn fetch_top_products(&self) -> Result<Vec<Product>> {
        self.call(Method::GET, "/api/products/top", None, None)
            .await
    }

    /// `POST /api/products` - create a product with server-assigned sample
    /// defaults. Admin only.
    ///
    /// # Errors
    ///
    /// Returns an error if the caller lacks admin rights or the request fails.
    pub async fn post_product(&self, token: &str) -> Result<Product> {
        self.call(Method::POST, "/api/products", None, Some(token))
            .await
    }

    /// `PUT /api/products/:id` - full replace of a product's mutable fields.
    /// Admin only.
    ///
    /// # Errors
    ///
    /// Returns an error if the caller lacks admin rights or the request fails.
    pub async fn put_product(
        &self,
        token: &str,
        id: &ProductId,
        update: &ProductUpdate,
    ) -> Result<Product> {
        self.call(
            Method::PUT,
            &format!("/api/products/{id}"),
            Some(serde_json::to_value(update)?),
            Some(token),
        )
        .await
    }

    /// `DELETE /api/products/:id`. Admin only.
    ///
    /// # Errors
    ///
    /// Returns an error if the caller lacks admin rights or the request fails.
    pub async fn delete_product_by_id(&self, token: &str, id: &ProductId) -> Result<Message> {
        self.call(
            Method::DELETE,
            &format!("/api/products/{id}"),
            None,
            Some(token),
        )
        .await
    }

    /// `POST /api/products/:id/reviews` - append a review.
    ///
    /// # Errors
    ///
    /// Returns an error if the caller already reviewed this product or the
    /// request fails.
    pub async fn post_review(
        &self,
        token: &str,
        id: &ProductId,
        review: &ReviewInput,
    ) -> Result<Message> {
        self.call(
            Method::POST,
            &format!("/api/products/{id}/reviews"),
            Some(serde_json::to_value(review)?),
            Some(token),
        )
        .await
    }
}
