//! Shared application kernel: configuration, error handling, request
//! plumbing, outbound HTTP, and the OAuth provider implementations.

pub mod config;
pub mod error;
pub mod extractors;
pub mod fetch;
pub mod middleware;
pub mod oauth;
pub mod rejection;
