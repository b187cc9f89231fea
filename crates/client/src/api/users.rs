//! Typed user and authentication endpoints.

use reqwest::Method;

use juniper_market_core::UserId;

use crate::error::Result;

use super::ApiClient;
use super::types::{
    LoginRequest, Message, ProfileUpdate, RegisterRequest, User, UserInfo, UserUpdate,
};

impl ApiClient {
    /// `POST /api/users/login` - authenticate and receive a session snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error with the server's message on bad credentials.
    pub async fn post_login(&self, request: &LoginRequest<'_>) -> Result<UserInfo> {
        self.call(
            Method::POST,
            "/api/users/login",
            Some(serde_json::to_value(request)?),
            None,
        )
        .await
    }

    /// `POST /api/users` - register a new account.
    ///
    /// The returned snapshot is not a usable session; callers follow up with
    /// [`ApiClient::post_login`].
    ///
    /// # Errors
    ///
    /// Returns an error with the server's message on duplicate email.
    pub async fn post_register(&self, request: &RegisterRequest<'_>) -> Result<UserInfo> {
        self.call(
            Method::POST,
            "/api/users",
            Some(serde_json::to_value(request)?),
            None,
        )
        .await
    }

    /// `PUT /api/users/profile` - update the caller's own profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn put_profile(&self, token: &str, update: &ProfileUpdate) -> Result<UserInfo> {
        self.call(
            Method::PUT,
            "/api/users/profile",
            Some(serde_json::to_value(update)?),
            Some(token),
        )
        .await
    }

    /// `GET /api/users/:id` - user detail. Admin or self only.
    ///
    /// # Errors
    ///
    /// Returns an error if the caller lacks rights or the request fails.
    pub async fn fetch_user(&self, token: &str, id: &UserId) -> Result<User> {
        self.call(Method::GET, &format!("/api/users/{id}"), None, Some(token))
            .await
    }

    /// `GET /api/users` - all users. Admin only.
    ///
    /// # Errors
    ///
    /// Returns an error if the caller lacks admin rights.
    pub async fn fetch_users(&self, token: &str) -> Result<Vec<User>> {
        self.call(Method::GET, "/api/users", None, Some(token)).await
    }

    /// `PUT /api/users/:id` - admin update of another user.
    ///
    /// # Errors
    ///
    /// Returns an error if the caller lacks admin rights.
    pub async fn put_user(&self, token: &str, update: &UserUpdate) -> Result<User> {
        self.call(
            Method::PUT,
            &format!("/api/users/{}", update.id),
            Some(serde_json::to_value(update)?),
            Some(token),
        )
        .await
    }

    /// `DELETE /api/users/:id`. Admin only.
    ///
    /// # Errors
    ///
    /// Returns an error if the caller lacks admin rights.
    pub async fn delete_user_by_id(&self, token: &str, id: &UserId) -> Result<Message> {
        self.call(
            Method::DELETE,
            &format!("/api/users/{id}"),
            None,
            Some(token),
        )
        .await
    }
}
