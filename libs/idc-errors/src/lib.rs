#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Problem Details error model (RFC 9457) as consumed by the identity
//! console SDK.
//!
//! Pure data model: no HTTP framework dependency. The backend emits this
//! shape for every non-2xx response; the gateway parses it (or synthesizes
//! it from the status line when the body is unparseable) and carries it to
//! the caller unchanged.

mod problem;

pub use problem::{APPLICATION_PROBLEM_JSON, Problem, ValidationErrors};
