//! Session store: authentication, own profile, and admin user management.
//!
//! The session snapshot is the source of truth for whether the gateway
//! attaches credentials. It is persisted durably so a restart does not
//! require re-authenticating, and cleared locally on logout without a
//! server call.

use juniper_market_core::{Email, UserId};
use tracing::instrument;

use crate::api::types::{
    LoginRequest, Message, ProfileUpdate, RegisterRequest, User, UserInfo, UserUpdate,
};
use crate::error::{AppError, Result};
use crate::lifecycle::{OpState, drive, lock, require_token};
use crate::state::StoreContext;
use crate::storage::keys;

/// Session store slices.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    /// Lifecycle of login.
    pub login: OpState,
    /// Authenticated session snapshot; `None` when signed out.
    pub user_info: Option<UserInfo>,

    /// Lifecycle of registration.
    pub register: OpState,
    /// Lifecycle of own-profile update.
    pub profile: OpState,

    /// Lifecycle of the user-detail fetch.
    pub details: OpState,
    /// Most recently fetched user detail.
    pub user: Option<User>,

    /// Lifecycle of the admin user list fetch.
    pub list: OpState,
    /// All users (admin view).
    pub users: Vec<User>,

    /// Lifecycle of the admin user update.
    pub update: OpState,
    /// Lifecycle of the admin user deletion.
    pub delete: OpState,
}

impl StoreContext {
    /// Authenticate and install the returned session snapshot, persisting it
    /// durably.
    ///
    /// # Errors
    ///
    /// Returns the rejection reason also recorded on the login slice; bad
    /// credentials surface the server's message verbatim.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(&self, email: &str, password: &str) -> Result<UserInfo> {
        let api = self.api().clone();
        let info = drive(
            self.session(),
            |s| &mut s.login,
            async move {
                let email = Email::parse(email).map_err(|e| AppError::Invalid(e.to_string()))?;
                api.post_login(&LoginRequest {
                    email: email.as_str(),
                    password,
                })
                .await
            },
            |s, info: &UserInfo| s.user_info = Some(info.clone()),
        )
        .await?;

        self.persist_on(self.session(), |s| &mut s.login, keys::USER_INFO, &info)?;
        Ok(info)
    }

    /// Register a new account, then log in with the same credentials.
    ///
    /// Registration alone does not yield a usable session, so success is
    /// followed by an explicit sequential `login`; a failed registration
    /// triggers no login and leaves the session absent.
    ///
    /// # Errors
    ///
    /// Returns the rejection reason also recorded on the register slice
    /// (duplicate email surfaces the server's message verbatim).
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<UserInfo> {
        let api = self.api().clone();
        drive(
            self.session(),
            |s| &mut s.register,
            async move {
                let email = Email::parse(email).map_err(|e| AppError::Invalid(e.to_string()))?;
                api.post_register(&RegisterRequest {
                    name,
                    email: email.as_str(),
                    password,
                })
                .await
            },
            |_, _: &UserInfo| {},
        )
        .await?;

        self.login(email, password).await
    }

    /// Clear the session locally. No server call is made; the token simply
    /// stops being attached from the next call onward.
    ///
    /// # Errors
    ///
    /// Returns an error if the durable session snapshot cannot be removed.
    #[instrument(skip(self))]
    pub fn logout(&self) -> Result<()> {
        *lock(self.session()) = SessionState::default();
        self.storage().remove(keys::USER_INFO)?;
        Ok(())
    }

    /// Fetch one user's details. Admin or self only (server-enforced).
    ///
    /// # Errors
    ///
    /// Returns the rejection reason also recorded on the details slice.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn get_user_details(&self, id: &UserId) -> Result<User> {
        let api = self.api().clone();
        let token = self.current_token();
        drive(
            self.session(),
            |s| &mut s.details,
            async move {
                let token = require_token(token)?;
                api.fetch_user(&token, id).await
            },
            |s, user: &User| s.user = Some(user.clone()),
        )
        .await
    }

    /// Update the caller's own profile. On success the session snapshot -
    /// in memory and durable - is overwritten so the new profile data shows
    /// without re-login.
    ///
    /// # Errors
    ///
    /// Returns the rejection reason also recorded on the profile slice.
    #[instrument(skip(self, update))]
    pub async fn update_profile(&self, update: ProfileUpdate) -> Result<UserInfo> {
        let api = self.api().clone();
        let token = self.current_token();
        let info = drive(
            self.session(),
            |s| &mut s.profile,
            async move {
                let token = require_token(token)?;
                api.put_profile(&token, &update).await
            },
            |s, info: &UserInfo| s.user_info = Some(info.clone()),
        )
        .await?;

        self.persist_on(self.session(), |s| &mut s.profile, keys::USER_INFO, &info)?;
        Ok(info)
    }

    /// Fetch all users. Admin only.
    ///
    /// # Errors
    ///
    /// Returns the rejection reason also recorded on the list slice.
    #[instrument(skip(self))]
    pub async fn list_users(&self) -> Result<Vec<User>> {
        let api = self.api().clone();
        let token = self.current_token();
        drive(
            self.session(),
            |s| &mut s.list,
            async move {
                let token = require_token(token)?;
                api.fetch_users(&token).await
            },
            |s, users: &Vec<User>| s.users = users.clone(),
        )
        .await
    }

    /// Update another user. Admin only. On success that user's details are
    /// re-fetched; a failed refresh surfaces through the details slice.
    ///
    /// # Errors
    ///
    /// Returns the rejection reason also recorded on the update slice.
    #[instrument(skip(self, update))]
    pub async fn update_user(&self, update: UserUpdate) -> Result<User> {
        let api = self.api().clone();
        let token = self.current_token();
        let updated = drive(
            self.session(),
            |s| &mut s.update,
            async move {
                let token = require_token(token)?;
                api.put_user(&token, &update).await
            },
            |_, _: &User| {},
        )
        .await?;

        let _ = self.get_user_details(&updated.id).await;
        Ok(updated)
    }

    /// Delete a user. Admin only. On success the user list is re-fetched;
    /// a failed refresh surfaces through the list slice.
    ///
    /// # Errors
    ///
    /// Returns the rejection reason also recorded on the delete slice.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete_user(&self, id: &UserId) -> Result<Message> {
        let api = self.api().clone();
        let token = self.current_token();
        let message = drive(
            self.session(),
            |s| &mut s.delete,
            async move {
                let token = require_token(token)?;
                api.delete_user_by_id(&token, id).await
            },
            |_, _: &Message| {},
        )
        .await?;

        let _ = self.list_users().await;
        Ok(message)
    }
}
