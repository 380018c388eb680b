//! HTTP server layer.
//!
//! Thin Axum shell over the render service: one route for the image pipeline,
//! a health check, and a no-op root. Errors cross this boundary as JSON
//! `{message, code}` bodies.

pub mod handlers;
pub mod routes;

pub use handlers::{
    health_handler, image_handler, root_handler, AppState, ErrorResponse, HealthResponse,
};
pub use routes::{create_router, RouterConfig};
