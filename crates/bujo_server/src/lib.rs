//! REST transport for the bujo core.
//!
//! # Responsibility
//! - Expose the four journal resources over HTTP (axum).
//! - Map core outcomes to status codes and response bodies.
//!
//! Business rules live in `bujo_core`; this crate stays thin.

pub mod error;
pub mod handlers;
pub mod response;
pub mod routes;
