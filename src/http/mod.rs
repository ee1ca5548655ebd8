//! HTTP client module
//!
//! Request building and status classification shared by every endpoint.
//!
//! # Features
//!
//! - **Error Classification**: transport failures, API rejections and
//!   malformed bodies map to distinct [`crate::Error`] variants
//! - **Outcomes**: structural mutations can report rejections as
//!   [`crate::types::Outcome::Rejected`] instead of failing
//! - **Opt-in Retries**: configurable backoff, disabled by default
//! - **Rate Limiting**: optional token bucket using governor

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
pub use rate_limit::{RateLimiter, RateLimiterConfig};

#[cfg(test)]
mod tests;
