//! Tower middleware - API key authentication and submission rate limiting

pub mod auth;
pub mod rate_limit;
