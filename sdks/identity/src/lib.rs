#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Typed client SDK for the identity/tenant management API.
//!
//! The stack, bottom up:
//!
//! - [`ApiClient`] — the request gateway. Every backend call passes through
//!   [`ApiClient::execute`]: it composes the URL, merges headers, attaches
//!   the bearer token from the configured [`TokenProvider`], serializes the
//!   body, and classifies the response into a value or an
//!   [`ApiClientError`].
//! - Resource clients ([`UsersClient`], [`RolesClient`], [`TenantsClient`],
//!   [`UserRolesClient`]) — stateless, one named operation per backend
//!   endpoint, each binding a descriptor and delegating to the gateway.
//! - [`ApiService`] — the facade: one gateway instance shared by all four
//!   resource clients, constructed once per authenticated session.
//!
//! # Example
//!
//! ```ignore
//! use idc_identity_sdk::{ApiClient, ApiConfig, ApiService};
//! use idc_auth::{AuthConfig, SessionTokenProvider};
//! use std::sync::Arc;
//!
//! let provider = Arc::new(SessionTokenProvider::new(auth_config).await?);
//! provider.begin_session(refresh_token);
//!
//! let client = ApiClient::new(ApiConfig::from_env())?
//!     .with_token_provider(provider, scopes);
//! let api = ApiService::new(client);
//!
//! let overview = api.load_overview().await?;
//! let exists = api.users.username_exists("jdoe").await?;
//! ```

mod api;
mod client;
mod config;
mod error;
mod models;
mod request;
mod services;

pub use api::{ApiService, Overview};
pub use client::ApiClient;
pub use config::ApiConfig;
pub use error::ApiClientError;
pub use models::{
    AssignRolesRequest, CreateTenantRequest, CreateUserRequest, PermissionDto, RoleDto, TenantDto,
    UpdateTenantRequest, UpdateUserRequest, UserDto, UsState,
};
pub use request::{ApiRequest, RequestBody};
pub use services::{RolesClient, TenantsClient, UserRolesClient, UsersClient};

// The SDK error taxonomy is built on these; re-export for callers that
// match on them.
pub use idc_auth::{AuthError, TokenProvider};
pub use idc_errors::{Problem, ValidationErrors};
pub use idc_http::HttpError;
