//! HTTP API layer for atelier.
//!
//! This crate provides the REST API:
//!
//! - **Endpoints**: profile, feed, social graph, messaging, project
//!   requests, portfolio, badges, assistant
//! - **Extractors**: authenticated-user extraction from request extensions
//! - **Middleware**: bearer-token verification and identity resolution
//!
//! Built on Axum 0.8 with Tower middleware stack.

pub mod endpoints;
pub mod extractors;
pub mod middleware;

pub use endpoints::router;
