//! Product store: catalog list, detail, top-rated, and admin mutations.

use juniper_market_core::ProductId;
use tracing::instrument;

use crate::api::types::{Message, Product, ProductPage, ProductUpdate, ReviewInput};
use crate::error::Result;
use crate::lifecycle::{OpState, drive, require_token};
use crate::state::StoreContext;

/// Product store slices.
///
/// The list is a whole-collection replacement on every fetch (last write
/// wins); the selected detail and admin slices are independent.
#[derive(Debug, Clone, Default)]
pub struct ProductState {
    /// Lifecycle of the paginated list fetch.
    pub list: OpState,
    /// Current page of products.
    pub products: Vec<Product>,
    /// Current page number (1-based).
    pub page: u32,
    /// Total pages for the current keyword.
    pub pages: u32,

    /// Lifecycle of the detail fetch.
    pub detail: OpState,
    /// Most recently fetched product detail.
    pub selected: Option<Product>,

    /// Lifecycle of the top-rated fetch.
    pub top: OpState,
    /// Top-rated products.
    pub top_products: Vec<Product>,

    /// Lifecycle of admin product creation.
    pub create: OpState,
    /// Most recently created product.
    pub created: Option<Product>,

    /// Lifecycle of admin product update.
    pub update: OpState,
    /// Lifecycle of admin product deletion.
    pub delete: OpState,
    /// Lifecycle of review submission.
    pub review: OpState,
}

impl ProductState {
    /// Merge an updated product into whichever collections currently hold it.
    fn absorb(&mut self, product: &Product) {
        if let Some(existing) = self.products.iter_mut().find(|p| p.id == product.id) {
            *existing = product.clone();
        }
        if self
            .selected
            .as_ref()
            .is_some_and(|selected| selected.id == product.id)
        {
            self.selected = Some(product.clone());
        }
    }
}

impl StoreContext {
    /// Fetch one page of the catalog. Omitted parameters default to an empty
    /// keyword and the first page.
    ///
    /// # Errors
    ///
    /// Returns the rejection reason also recorded on the list slice.
    #[instrument(skip(self))]
    pub async fn list_products(
        &self,
        keyword: Option<&str>,
        page: Option<u32>,
    ) -> Result<ProductPage> {
        let api = self.api().clone();
        drive(
            self.products(),
            |s| &mut s.list,
            async move { api.fetch_products(keyword, page).await },
            |s, page: &ProductPage| {
                s.products = page.products.clone();
                s.page = page.page;
                s.pages = page.pages;
            },
        )
        .await
    }

    /// Fetch one product's detail, including its reviews.
    ///
    /// # Errors
    ///
    /// Returns the rejection reason also recorded on the detail slice.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn get_product(&self, id: &ProductId) -> Result<Product> {
        let api = self.api().clone();
        drive(
            self.products(),
            |s| &mut s.detail,
            async move { api.fetch_product(id).await },
            |s, product: &Product| s.selected = Some(product.clone()),
        )
        .await
    }

    /// Fetch the highest-rated products.
    ///
    /// # Errors
    ///
    /// Returns the rejection reason also recorded on the top slice.
    #[instrument(skip(self))]
    pub async fn list_top_products(&self) -> Result<Vec<Product>> {
        let api = self.api().clone();
        drive(
            self.products(),
            |s| &mut s.top,
            async move { api.fetch_top_products().await },
            |s, products: &Vec<Product>| s.top_products = products.clone(),
        )
        .await
    }

    /// Create a product with server-assigned sample defaults. Admin only;
    /// fails fast without a session.
    ///
    /// # Errors
    ///
    /// Returns the rejection reason also recorded on the create slice.
    #[instrument(skip(self))]
    pub async fn create_product(&self) -> Result<Product> {
        let api = self.api().clone();
        let token = self.current_token();
        drive(
            self.products(),
            |s| &mut s.create,
            async move {
                let token = require_token(token)?;
                api.post_product(&token).await
            },
            |s, product: &Product| s.created = Some(product.clone()),
        )
        .await
    }

    /// Replace a product's mutable fields. Admin only.
    ///
    /// # Errors
    ///
    /// Returns the rejection reason also recorded on the update slice.
    #[instrument(skip(self, update), fields(id = %id))]
    pub async fn update_product(&self, id: &ProductId, update: ProductUpdate) -> Result<Product> {
        let api = self.api().clone();
        let token = self.current_token();
        drive(
            self.products(),
            |s| &mut s.update,
            async move {
                let token = require_token(token)?;
                api.put_product(&token, id, &update).await
            },
            |s, product: &Product| s.absorb(product),
        )
        .await
    }

    /// Delete a product, then refresh the catalog list with default
    /// parameters. Admin only. A failed refresh surfaces through the list
    /// slice, not the delete slice; a concurrent reader may observe the
    /// deleted item for one more render cycle.
    ///
    /// # Errors
    ///
    /// Returns the rejection reason also recorded on the delete slice.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete_product(&self, id: &ProductId) -> Result<Message> {
        let api = self.api().clone();
        let token = self.current_token();
        let message = drive(
            self.products(),
            |s| &mut s.delete,
            async move {
                let token = require_token(token)?;
                api.delete_product_by_id(&token, id).await
            },
            |_, _: &Message| {},
        )
        .await?;

        let _ = self.list_products(None, None).await;
        Ok(message)
    }

    /// Append a review to a product. The detail view refetches to pick up
    /// the new rating.
    ///
    /// # Errors
    ///
    /// Returns the rejection reason also recorded on the review slice.
    #[instrument(skip(self, comment), fields(id = %id, rating))]
    pub async fn create_review(&self, id: &ProductId, rating: u8, comment: &str) -> Result<Message> {
        let api = self.api().clone();
        let token = self.current_token();
        let review = ReviewInput {
            rating,
            comment: comment.to_string(),
        };
        drive(
            self.products(),
            |s| &mut s.review,
            async move {
                let token = require_token(token)?;
                api.post_review(&token, id, &review).await
            },
            |_, _: &Message| {},
        )
        .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use juniper_market_core::ProductId;

    fn product(id: &str, name: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            image: String::new(),
            brand: String::new(),
            category: String::new(),
            description: String::new(),
            price: "10".parse().unwrap(),
            count_in_stock: 1,
            rating: 0.0,
            num_reviews: 0,
            reviews: vec![],
        }
    }

    #[test]
    fn test_absorb_updates_list_and_selected() {
        let mut state = ProductState::default();
        state.products = vec![product("p1", "Old"), product("p2", "Other")];
        state.selected = Some(product("p1", "Old"));

        state.absorb(&product("p1", "New"));

        assert_eq!(state.products.first().unwrap().name, "New");
        assert_eq!(state.products.get(1).unwrap().name, "Other");
        assert_eq!(state.selected.unwrap().name, "New");
    }

    #[test]
    fn test_absorb_ignores_unknown_product() {
        let mut state = ProductState::default();
        state.products = vec![product("p1", "Kept")];

        state.absorb(&product("p9", "Elsewhere"));

        assert_eq!(state.products.len(), 1);
        assert!(state.selected.is_none());
    }
}
