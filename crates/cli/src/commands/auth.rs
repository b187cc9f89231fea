//! Session and own-profile commands.

use clap::Subcommand;

use juniper_market_client::api::types::ProfileUpdate;
use juniper_market_client::{Result, StoreContext};

#[derive(Subcommand)]
pub enum AuthAction {
    /// Log in with email and password
    Login {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// Register a new account (logs in on success)
    Register {
        /// Display name
        #[arg(short, long)]
        name: String,

        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// Clear the local session
    Logout,
    /// Show the current session
    Profile,
    /// Update your own profile
    UpdateProfile {
        /// New display name
        #[arg(long)]
        name: Option<String>,

        /// New email address
        #[arg(long)]
        email: Option<String>,

        /// New password
        #[arg(long)]
        password: Option<String>,
    },
}

pub async fn run(ctx: &StoreContext, action: AuthAction) -> Result<()> {
    match action {
        AuthAction::Login { email, password } => {
            let info = ctx.login(&email, &password).await?;
            println!("signed in as {} <{}>", info.name, info.email);
        }
        AuthAction::Register {
            name,
            email,
            password,
        } => {
            let info = ctx.register(&name, &email, &password).await?;
            println!("registered and signed in as {} <{}>", info.name, info.email);
        }
        AuthAction::Logout => {
            ctx.logout()?;
            println!("signed out");
        }
        AuthAction::Profile => match ctx.session_state().user_info {
            Some(info) => {
                let role = if info.is_admin { "admin" } else { "customer" };
                println!("{} <{}> ({role})", info.name, info.email);
            }
            None => println!("not signed in"),
        },
        AuthAction::UpdateProfile {
            name,
            email,
            password,
        } => {
            let info = ctx
                .update_profile(ProfileUpdate {
                    name,
                    email,
                    password,
                })
                .await?;
            println!("profile updated: {} <{}>", info.name, info.email);
        }
    }
    Ok(())
}
