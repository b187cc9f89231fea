//! Checkout and order lifecycle commands.

use clap::Subcommand;

use juniper_market_client::api::types::{Order, PaymentResult};
use juniper_market_client::{Result, StoreContext};
use juniper_market_core::OrderId;

#[derive(Subcommand)]
pub enum OrderAction {
    /// Place an order from the current cart
    Place,
    /// Show one order
    Show {
        /// Order ID
        id: String,
    },
    /// Mark an order as paid
    Pay {
        /// Order ID
        id: String,

        /// Processor transaction ID
        #[arg(long)]
        transaction: String,

        /// Processor status string
        #[arg(long, default_value = "COMPLETED")]
        status: String,
    },
    /// Mark an order as delivered (admin)
    Deliver {
        /// Order ID
        id: String,
    },
    /// List your own orders
    Mine,
    /// List all orders (admin)
    All,
}

pub async fn run(ctx: &StoreContext, action: OrderAction) -> Result<()> {
    match action {
        OrderAction::Place => {
            let order = ctx.create_order().await?;
            println!("order {} placed, total {}", order.id, order.total_price);
            println!("cart kept; run `jm cart clear` to empty it");
        }
        OrderAction::Show { id } => {
            let order = ctx.get_order(&OrderId::from(id)).await?;
            print_order(&order);
        }
        OrderAction::Pay {
            id,
            transaction,
            status,
        } => {
            let order = ctx
                .pay_order(
                    &OrderId::from(id),
                    PaymentResult {
                        id: transaction,
                        status,
                        update_time: None,
                        email_address: None,
                    },
                )
                .await?;
            println!("order {} paid: {}", order.id, order.is_paid);
        }
        OrderAction::Deliver { id } => {
            let order = ctx.deliver_order(&OrderId::from(id)).await?;
            println!("order {} delivered: {}", order.id, order.is_delivered);
        }
        OrderAction::Mine => {
            let orders = ctx.list_my_orders().await?;
            for order in &orders {
                print_summary(order);
            }
            println!("{} order(s)", orders.len());
        }
        OrderAction::All => {
            let orders = ctx.list_all_orders().await?;
            for order in &orders {
                print_summary(order);
            }
            println!("{} order(s)", orders.len());
        }
    }
    Ok(())
}

fn print_order(order: &Order) {
    println!("order {}", order.id);
    for item in &order.order_items {
        println!("  {} x{} at {}", item.name, item.qty, item.price);
    }
    println!(
        "  items {} + shipping {} + tax {} = {}",
        order.items_price, order.shipping_price, order.tax_price, order.total_price
    );
    println!(
        "  ship to: {}, {}, {}, {}",
        order.shipping_address.address,
        order.shipping_address.city,
        order.shipping_address.postal_code,
        order.shipping_address.country
    );
    println!("  paid: {}  delivered: {}", order.is_paid, order.is_delivered);
}

fn print_summary(order: &Order) {
    println!(
        "{}  total {}  paid: {}  delivered: {}",
        order.id, order.total_price, order.is_paid, order.is_delivered
    );
}
