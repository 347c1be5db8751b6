#![allow(dead_code)] // each test binary uses a subset of these helpers

use std::sync::Arc;

use async_trait::async_trait;
use httpmock::MockServer;

use idc_auth::{AuthError, SecretString, StaticTokenProvider, TokenProvider};
use idc_identity_sdk::{ApiClient, ApiConfig, ApiService};

/// Scope set the console requests for every authenticated call.
pub const SCOPES: &str = "api://identity-api/.default";

/// Gateway pointed at the mock server, no credential provider.
pub fn gateway(server: &MockServer) -> ApiClient {
    ApiClient::for_testing(ApiConfig::new(server.base_url()))
}

/// Gateway with a fixed-token provider installed.
pub fn authed_gateway(server: &MockServer, token: &str) -> ApiClient {
    gateway(server).with_token_provider(
        Arc::new(StaticTokenProvider::new(token)),
        vec![SCOPES.to_owned()],
    )
}

/// Full facade with a fixed-token provider installed.
pub fn service(server: &MockServer, token: &str) -> ApiService {
    ApiService::new(authed_gateway(server, token))
}

/// Provider whose silent acquisition always fails.
pub struct FailingTokenProvider;

#[async_trait]
impl TokenProvider for FailingTokenProvider {
    async fn acquire_token(&self, _scopes: &[String]) -> Result<SecretString, AuthError> {
        Err(AuthError::InteractionRequired("no active session".into()))
    }
}
