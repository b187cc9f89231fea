//! Catalog commands.

use clap::Subcommand;
use rust_decimal::Decimal;

use juniper_market_client::api::types::ProductUpdate;
use juniper_market_client::{Result, StoreContext};
use juniper_market_core::ProductId;

#[derive(Subcommand)]
pub enum ProductAction {
    /// List one page of the catalog
    List {
        /// Search keyword
        #[arg(short, long)]
        keyword: Option<String>,

        /// Page number (1-based)
        #[arg(short, long)]
        page: Option<u32>,
    },
    /// Show one product with its reviews
    Show {
        /// Product ID
        id: String,
    },
    /// Show the top-rated products
    Top,
    /// Create a product with sample defaults (admin)
    Create,
    /// Replace a product's fields (admin)
    Update {
        /// Product ID
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: Decimal,
        #[arg(long)]
        description: String,
        #[arg(long)]
        image: String,
        #[arg(long)]
        brand: String,
        #[arg(long)]
        category: String,
        #[arg(long)]
        count_in_stock: u32,
    },
    /// Delete a product (admin)
    Delete {
        /// Product ID
        id: String,
    },
    /// Review a product
    Review {
        /// Product ID
        id: String,
        /// Star rating, 1-5
        #[arg(short, long)]
        rating: u8,
        /// Comment text
        #[arg(short, long)]
        comment: String,
    },
}

pub async fn run(ctx: &StoreContext, action: ProductAction) -> Result<()> {
    match action {
        ProductAction::List { keyword, page } => {
            let page = ctx.list_products(keyword.as_deref(), page).await?;
            println!("page {}/{}", page.page, page.pages);
            for product in &page.products {
                println!(
                    "{}  {}  ${}  ({} in stock)",
                    product.id, product.name, product.price, product.count_in_stock
                );
            }
        }
        ProductAction::Show { id } => {
            let product = ctx.get_product(&ProductId::new(id)).await?;
            println!("{}  {}", product.id, product.name);
            println!("  ${}  {} in stock", product.price, product.count_in_stock);
            println!("  {} ({} reviews)", product.rating, product.num_reviews);
            for review in &product.reviews {
                println!("  [{}/5] {}: {}", review.rating, review.name, review.comment);
            }
        }
        ProductAction::Top => {
            for product in ctx.list_top_products().await? {
                println!("{}  {}  {}", product.id, product.name, product.rating);
            }
        }
        ProductAction::Create => {
            let product = ctx.create_product().await?;
            println!("created {}", product.id);
        }
        ProductAction::Update {
            id,
            name,
            price,
            description,
            image,
            brand,
            category,
            count_in_stock,
        } => {
            let update = ProductUpdate {
                name,
                price,
                description,
                image,
                brand,
                category,
                count_in_stock,
            };
            let product = ctx.update_product(&ProductId::new(id), update).await?;
            println!("updated {}", product.id);
        }
        ProductAction::Delete { id } => {
            let message = ctx.delete_product(&ProductId::new(id)).await?;
            println!("{}", message.message);
        }
        ProductAction::Review {
            id,
            rating,
            comment,
        } => {
            let message = ctx
                .create_review(&ProductId::new(id), rating, &comment)
                .await?;
            println!("{}", message.message);
        }
    }
    Ok(())
}
