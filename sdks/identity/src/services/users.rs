use std::sync::Arc;

use crate::client::ApiClient;
use crate::error::ApiClientError;
use crate::models::{CreateUserRequest, UpdateUserRequest, UserDto};

/// Operations on `/users`.
#[derive(Clone)]
pub struct UsersClient {
    client: Arc<ApiClient>,
}

impl UsersClient {
    pub(crate) fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Get the currently signed-in user (`GET /users/me`).
    pub async fn current_user(&self) -> Result<UserDto, ApiClientError> {
        self.client.get("/users/me").await
    }

    /// List users, optionally filtered by licensee id
    /// (`GET /users?licenseeId=…`).
    pub async fn by_licensee(
        &self,
        licensee_id: Option<&str>,
    ) -> Result<Vec<UserDto>, ApiClientError> {
        let endpoint = match licensee_id {
            Some(id) => format!("/users?licenseeId={}", urlencoding::encode(id)),
            None => "/users".to_owned(),
        };
        self.client.get(&endpoint).await
    }

    /// Get a user by id (`GET /users/{id}`).
    pub async fn by_id(&self, user_id: &str) -> Result<UserDto, ApiClientError> {
        self.client.get(&format!("/users/{user_id}")).await
    }

    /// Create a user (`POST /users`).
    pub async fn create(&self, user: &CreateUserRequest) -> Result<UserDto, ApiClientError> {
        self.client.post("/users", user).await
    }

    /// Update a user (`PUT /users/{id}`).
    pub async fn update(
        &self,
        user_id: &str,
        user: &UpdateUserRequest,
    ) -> Result<(), ApiClientError> {
        self.client.put(&format!("/users/{user_id}"), user).await
    }

    /// Deactivate a user (`DELETE /users/{id}`).
    pub async fn delete(&self, user_id: &str) -> Result<(), ApiClientError> {
        self.client.delete(&format!("/users/{user_id}")).await
    }

    /// Check whether a username is taken
    /// (`GET /users/usernameexists/{name}`, name percent-encoded).
    pub async fn username_exists(&self, username: &str) -> Result<bool, ApiClientError> {
        self.client
            .get(&format!(
                "/users/usernameexists/{}",
                urlencoding::encode(username)
            ))
            .await
    }
}
