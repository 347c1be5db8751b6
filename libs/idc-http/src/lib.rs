#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Outbound HTTP client for the identity console SDK.
//!
//! A hyper-based client with:
//! - TLS via rustls (HTTPS only by default)
//! - Connection pooling
//! - Per-request timeout
//! - Body-size-limited response reading
//! - JSON, form-urlencoded and multipart/form-data request bodies
//!
//! Deliberately no automatic retries and no redirect following: every
//! request is a single round trip, and failures surface to the caller who
//! decides what to do (in the console, retry is a user action).
//!
//! # Example
//!
//! ```ignore
//! use idc_http::HttpClient;
//! use std::time::Duration;
//!
//! let client = HttpClient::builder()
//!     .timeout(Duration::from_secs(10))
//!     .user_agent("identity-console/1.0")
//!     .build()?;
//!
//! let data: MyData = client
//!     .get("https://api.example.com/users/me")
//!     .header("authorization", "Bearer …")
//!     .send()
//!     .await?
//!     .json()
//!     .await?;
//! ```

mod builder;
mod client;
mod config;
mod error;
mod multipart;
mod request;
mod response;
mod tls;

pub use builder::HttpClientBuilder;
pub use client::HttpClient;
pub use config::{
    DEFAULT_USER_AGENT, HttpClientConfig, TlsRootConfig, TransportSecurity,
};
pub use error::{HttpError, InvalidUriKind};
pub use multipart::MultipartForm;
pub use request::RequestBuilder;
pub use response::{ERROR_BODY_PREVIEW_LIMIT, HttpResponse};
