#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Credential provider for the identity console SDK.
//!
//! Wraps the identity provider's token endpoint behind the
//! [`TokenProvider`] contract: "give me a currently valid access token for
//! this scope set". Acquisition is silent — a cached access token is served
//! while fresh, otherwise the stored refresh token is redeemed. When no
//! session exists or the provider demands user interaction
//! (`interaction_required`, `consent_required`, `login_required`,
//! `invalid_grant`), acquisition fails with the distinguished
//! [`AuthError::InteractionRequired`] so the caller can route the user to
//! interactive sign-in. This crate never triggers interactive sign-in
//! itself.

mod config;
pub(crate) mod discovery;
mod error;
pub mod http_error;
mod provider;
mod types;

pub use config::AuthConfig;
pub use error::AuthError;
pub use provider::{SessionTokenProvider, StaticTokenProvider, TokenProvider};
pub use types::{ClientAuthMethod, SecretString};
