//! Console bootstrap: build the facade once for the session, then load the
//! entry data (current user, roles, tenants) in one concurrent pass.
//!
//! The interactive sign-in flow lives in the View Layer; this example takes
//! its result (a refresh token) from `IDENTITY_REFRESH_TOKEN` and relies on
//! `IDENTITY_API_BASE_URL` / `IDENTITY_API_TIMEOUT` for the gateway.

use std::sync::Arc;

use idc_auth::{AuthConfig, SecretString, SessionTokenProvider};
use idc_identity_sdk::{ApiClient, ApiConfig, ApiService};
use url::Url;

const SCOPES: &str = "api://identity-api/.default";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let auth_config = AuthConfig {
        issuer_url: Some(Url::parse(
            &std::env::var("IDENTITY_AUTHORITY_URL")
                .unwrap_or_else(|_| "https://login.example.com/common".to_owned()),
        )?),
        client_id: std::env::var("IDENTITY_CLIENT_ID")
            .unwrap_or_else(|_| "identity-console".to_owned()),
        scopes: vec![SCOPES.to_owned()],
        ..Default::default()
    };

    let provider = Arc::new(SessionTokenProvider::new(auth_config).await?);
    provider.begin_session(SecretString::new(std::env::var("IDENTITY_REFRESH_TOKEN")?));

    let client = ApiClient::new(ApiConfig::from_env())?
        .with_token_provider(provider, vec![SCOPES.to_owned()]);
    let api = ApiService::new(client);

    let overview = api.load_overview().await?;

    println!(
        "signed in as {} ({} roles, {} tenants visible)",
        overview.current_user.username.as_deref().unwrap_or("<unknown>"),
        overview.roles.len(),
        overview.tenants.len(),
    );

    if overview.current_user.has_role("Super Admin") {
        for tenant in &overview.tenants {
            println!(
                "tenant {}: {}",
                tenant.tenant_id,
                tenant.tenant_name.as_deref().unwrap_or("<unnamed>")
            );
        }
    }

    Ok(())
}
