//! HTTP middleware available as product decorators.
//!
//! Provides rate limiting and observability middleware. Which of them wrap
//! the product routes is decided by [`crate::api::decorators`].

pub mod access_log;
pub mod rate_limit;
pub mod tracing;
