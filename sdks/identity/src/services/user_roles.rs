use std::sync::Arc;

use crate::client::ApiClient;
use crate::error::ApiClientError;
use crate::models::{AssignRolesRequest, RoleDto};

/// Operations on the per-user role assignments.
#[derive(Clone)]
pub struct UserRolesClient {
    client: Arc<ApiClient>,
}

impl UserRolesClient {
    pub(crate) fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// List a user's roles (`GET /{userId}/roles`).
    pub async fn for_user(&self, user_id: &str) -> Result<Vec<RoleDto>, ApiClientError> {
        self.client.get(&format!("/{user_id}/roles")).await
    }

    /// Assign roles to a user (`PATCH /{userId}/roles`).
    ///
    /// The backend answers with one boolean per requested assignment.
    pub async fn assign(
        &self,
        user_id: &str,
        request: &AssignRolesRequest,
    ) -> Result<Vec<bool>, ApiClientError> {
        self.client
            .patch(&format!("/{user_id}/roles"), request)
            .await
    }
}
