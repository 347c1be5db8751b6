use std::sync::Arc;

use crate::client::ApiClient;
use crate::error::ApiClientError;
use crate::models::RoleDto;

/// Operations on `/roles`.
#[derive(Clone)]
pub struct RolesClient {
    client: Arc<ApiClient>,
}

impl RolesClient {
    pub(crate) fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// List all roles (`GET /roles`).
    pub async fn all(&self) -> Result<Vec<RoleDto>, ApiClientError> {
        self.client.get("/roles").await
    }

    /// Create a role (`POST /roles`).
    pub async fn create(&self, role: &RoleDto) -> Result<RoleDto, ApiClientError> {
        self.client.post("/roles", role).await
    }

    /// Update a role (`PUT /roles/{id}`).
    pub async fn update(&self, role_id: &str, role: &RoleDto) -> Result<(), ApiClientError> {
        self.client.put(&format!("/roles/{role_id}"), role).await
    }

    /// Deactivate a role (`DELETE /roles/{id}`).
    pub async fn delete(&self, role_id: &str) -> Result<(), ApiClientError> {
        self.client.delete(&format!("/roles/{role_id}")).await
    }
}
