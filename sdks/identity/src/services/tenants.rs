use std::sync::Arc;

use crate::client::ApiClient;
use crate::error::ApiClientError;
use crate::models::{CreateTenantRequest, TenantDto, UpdateTenantRequest};
use crate::request::ApiRequest;

/// Operations on `/tenants`.
#[derive(Clone)]
pub struct TenantsClient {
    client: Arc<ApiClient>,
}

impl TenantsClient {
    pub(crate) fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// List all tenants (`GET /tenants`).
    pub async fn all(&self) -> Result<Vec<TenantDto>, ApiClientError> {
        self.client.get("/tenants").await
    }

    /// Get a tenant by id (`GET /tenants/{id}`).
    pub async fn by_id(&self, tenant_id: &str) -> Result<TenantDto, ApiClientError> {
        self.client.get(&format!("/tenants/{tenant_id}")).await
    }

    /// Create a tenant (`POST /tenants`).
    ///
    /// This endpoint expects multipart/form-data; the transport supplies
    /// the boundary-bearing content type.
    pub async fn create(&self, tenant: &CreateTenantRequest) -> Result<TenantDto, ApiClientError> {
        self.client
            .execute(ApiRequest::post("/tenants").multipart(tenant.to_form()))
            .await
    }

    /// Update a tenant (`PUT /tenants/{id}`, JSON).
    pub async fn update(
        &self,
        tenant_id: &str,
        tenant: &UpdateTenantRequest,
    ) -> Result<(), ApiClientError> {
        self.client
            .put(&format!("/tenants/{tenant_id}"), tenant)
            .await
    }

    /// Deactivate a tenant (`DELETE /tenants/{id}`).
    pub async fn delete(&self, tenant_id: &str) -> Result<(), ApiClientError> {
        self.client.delete(&format!("/tenants/{tenant_id}")).await
    }
}
