//! # shufflepix
//!
//! A web server that serves a random image from a directory, resized and
//! filtered on the fly.
//!
//! A request names its output as a single dash-delimited path segment:
//! `GET /640-480-sepia-crop` returns a randomly chosen image at 640x480 with
//! the sepia filter, cropped to the exact box. Positions after the dimensions
//! may carry a filter name and/or a scale method in any order.
//!
//! ## Features
//!
//! - **Pool cache**: the directory listing is persisted next to the images
//!   with a configurable TTL, so stateless invocations skip rescans
//! - **Filters**: grayscale, five colorize palettes, kernels (emboss, smooth,
//!   sketchy, edge detect), brightness, contrast, negate, pixelate, and a
//!   `random` sentinel resolved once per request
//! - **Scale methods**: `crop`, `inside`, `outside`, `fill`
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`params`] - Request parameter parsing and validation
//! - [`pool`] - Cached directory listing and random selection
//! - [`transform`] - Filter table and geometric scaling
//! - [`service`] - Pipeline orchestration
//! - [`server`] - Axum-based HTTP server and routes
//! - [`config`] - CLI and configuration types
//! - [`clock`] - Injected time source
//!
//! ## Example
//!
//! ```rust,no_run
//! use shufflepix::{AppConfig, RenderService, RouterConfig, create_router};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::load("config/config.json".as_ref()).unwrap();
//!     let service = RenderService::new(config);
//!     let router = create_router(service, RouterConfig::new());
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
//!     axum::serve(listener, router).await.unwrap();
//! }
//! ```

pub mod clock;
pub mod config;
pub mod error;
pub mod params;
pub mod pool;
pub mod server;
pub mod service;
pub mod transform;

// Re-export commonly used types
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{AppConfig, Cli, DEFAULT_CACHE_HOURS, DEFAULT_MAX_HEIGHT, DEFAULT_MAX_WIDTH};
pub use error::{ConfigError, ParamError, PoolError, RenderError};
pub use params::RequestParams;
pub use pool::{pick, PoolCache, CACHE_FILE_NAME};
pub use server::{create_router, AppState, ErrorResponse, HealthResponse, RouterConfig};
pub use service::{Rendered, RenderService};
pub use transform::{apply_filter, resolve_filter, FilterKind, ScaleMethod, FILTER_TABLE};
