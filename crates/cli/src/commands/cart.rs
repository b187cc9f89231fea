//! Local cart commands. Everything here mutates durable local state;
//! only `add` talks to the API (to snapshot the product).

use clap::Subcommand;

use juniper_market_client::api::types::ShippingAddress;
use juniper_market_client::{Result, StoreContext};
use juniper_market_core::{OrderTotals, ProductId};

#[derive(Subcommand)]
pub enum CartAction {
    /// Add a product to the cart (replaces the line if already present)
    Add {
        /// Product ID
        id: String,

        /// Quantity
        #[arg(short, long, default_value_t = 1)]
        qty: u32,
    },
    /// Remove a cart line by position
    Remove {
        /// Zero-based line index (as shown by `cart show`)
        index: usize,
    },
    /// Show the cart contents and projected totals
    Show,
    /// Save the shipping address
    Ship {
        /// Street address
        #[arg(long)]
        address: String,

        /// City
        #[arg(long)]
        city: String,

        /// Postal code
        #[arg(long)]
        postal_code: String,

        /// Country
        #[arg(long)]
        country: String,
    },
    /// Save the payment method
    Payment {
        /// Method name, e.g. PayPal
        method: String,
    },
    /// Empty the cart
    Clear,
}

pub async fn run(ctx: &StoreContext, action: CartAction) -> Result<()> {
    match action {
        CartAction::Add { id, qty } => {
            let line = ctx.add_line(&ProductId::from(id), qty).await?;
            println!("added {} x{} at {}", line.name, line.qty, line.price);
        }
        CartAction::Remove { index } => {
            ctx.remove_line(index)?;
            println!("removed line {index}");
        }
        CartAction::Show => {
            let cart = ctx.cart_state();
            for (i, line) in cart.items.iter().enumerate() {
                println!("[{i}] {} x{} at {}", line.name, line.qty, line.price);
            }
            if cart.items.is_empty() {
                println!("cart is empty");
            } else {
                let totals =
                    OrderTotals::compute(cart.items.iter().map(|line| (line.price, line.qty)));
                println!(
                    "items {} + shipping {} + tax {} = {}",
                    totals.items_price,
                    totals.shipping_price,
                    totals.tax_price,
                    totals.total_price
                );
            }
            if let Some(address) = &cart.shipping_address {
                println!(
                    "ship to: {}, {}, {}, {}",
                    address.address, address.city, address.postal_code, address.country
                );
            }
            if let Some(method) = &cart.payment_method {
                println!("pay with: {method}");
            }
        }
        CartAction::Ship {
            address,
            city,
            postal_code,
            country,
        } => {
            ctx.save_shipping_address(ShippingAddress {
                address,
                city,
                postal_code,
                country,
            })?;
            println!("shipping address saved");
        }
        CartAction::Payment { method } => {
            ctx.save_payment_method(&method)?;
            println!("payment method saved");
        }
        CartAction::Clear => {
            ctx.clear_cart()?;
            println!("cart cleared");
        }
    }
    Ok(())
}
