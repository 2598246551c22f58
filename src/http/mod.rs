//! HTTP client layer — `PerpHttp` with per-endpoint retry policies.

pub mod client;
pub mod retry;

pub use client::{ApiResponse, PerpHttp};
pub use retry::{RetryConfig, RetryPolicy};
