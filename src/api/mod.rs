//! API Module
//!
//! HTTP handlers, routing, and rate limiting for the sentiment server.
//!
//! # Endpoints
//! - `GET /api/sentiment` - Current sentiment snapshot
//! - `POST /api/analyze` - Score free text against a category
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod rate_limit;
pub mod routes;
pub mod security;

pub use handlers::*;
pub use rate_limit::RateLimiter;
pub use routes::create_router;
