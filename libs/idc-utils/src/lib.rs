#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Shared utilities for the identity console workspace.

mod secret_string;

pub use secret_string::SecretString;
