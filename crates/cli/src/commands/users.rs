//! Admin user-management commands.

use clap::Subcommand;

use juniper_market_client::api::types::UserUpdate;
use juniper_market_client::{Result, StoreContext};
use juniper_market_core::UserId;

#[derive(Subcommand)]
pub enum UserAction {
    /// List all users
    List,
    /// Show one user
    Show {
        /// User ID
        id: String,
    },
    /// Update a user's name, email, or admin flag
    Update {
        /// User ID
        id: String,

        /// New display name
        #[arg(long)]
        name: String,

        /// New email address
        #[arg(long)]
        email: String,

        /// Grant admin rights
        #[arg(long)]
        admin: bool,
    },
    /// Delete a user
    Delete {
        /// User ID
        id: String,
    },
}

pub async fn run(ctx: &StoreContext, action: UserAction) -> Result<()> {
    match action {
        UserAction::List => {
            let users = ctx.list_users().await?;
            for user in &users {
                let role = if user.is_admin { "admin" } else { "customer" };
                println!("{}  {} <{}> ({role})", user.id, user.name, user.email);
            }
            println!("{} user(s)", users.len());
        }
        UserAction::Show { id } => {
            let user = ctx.get_user_details(&UserId::from(id)).await?;
            let role = if user.is_admin { "admin" } else { "customer" };
            println!("{}  {} <{}> ({role})", user.id, user.name, user.email);
        }
        UserAction::Update {
            id,
            name,
            email,
            admin,
        } => {
            let user = ctx
                .update_user(UserUpdate {
                    id: UserId::from(id),
                    name,
                    email,
                    is_admin: admin,
                })
                .await?;
            println!("updated {}  {} <{}>", user.id, user.name, user.email);
        }
        UserAction::Delete { id } => {
            let message = ctx.delete_user(&UserId::from(id)).await?;
            println!("{}", message.message);
        }
    }
    Ok(())
}
