//! HTTP request handlers.
//!
//! # Endpoints
//!
//! - `GET /{spec}` - Render a random image per the dash-delimited spec
//! - `GET /health` - Health check endpoint
//! - `GET /` - No-op (200, empty body)

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, warn};

use crate::error::RenderError;
use crate::service::RenderService;

// =============================================================================
// Application State
// =============================================================================

/// Shared application state containing the render service.
///
/// This is passed to all handlers via Axum's State extractor.
#[derive(Clone)]
pub struct AppState {
    /// The render service for processing image requests
    pub service: Arc<RenderService>,
}

impl AppState {
    /// Create a new application state with the given render service.
    pub fn new(service: RenderService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

// =============================================================================
// Response Types
// =============================================================================

/// JSON error response returned for all error conditions.
///
/// `code` carries the error's associated application code: 400 for parameter
/// validation failures, 0 otherwise.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub message: String,

    /// Application error code
    pub code: u32,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,
}

// =============================================================================
// Error Mapping
// =============================================================================

/// Wrapper for pipeline errors to implement IntoResponse.
///
/// Logs at WARN for client errors (4xx) and ERROR for server errors (5xx),
/// then emits the JSON `{message, code}` body.
pub struct HandlerError(pub RenderError);

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let message = self.0.to_string();

        if status.is_server_error() {
            error!(status = status.as_u16(), "Server error: {}", message);
        } else {
            warn!(status = status.as_u16(), "Client error: {}", message);
        }

        let body = ErrorResponse {
            message,
            code: self.0.app_code(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<RenderError> for HandlerError {
    fn from(err: RenderError) -> Self {
        HandlerError(err)
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Handle image requests.
///
/// # Endpoint
///
/// `GET /{spec}`
///
/// # Path Parameters
///
/// - `spec`: Dash-delimited parameter string, e.g. `640-480-sepia-crop`.
///   Width and height come first; positions 2-4 may name a filter and/or a
///   scale method.
///
/// # Response
///
/// - `200 OK`: the rendered image; `Content-Type` reflects the source image
/// - `400 Bad Request`: invalid width/height parameters
/// - `500 Internal Server Error`: pool or processing failure
///
/// # Headers
///
/// - `Content-Type`: MIME type of the randomly selected source image
/// - `Last-Modified`: the time of this request; every response is freshly
///   generated
pub async fn image_handler(
    State(state): State<AppState>,
    Path(spec): Path<String>,
) -> Result<Response, HandlerError> {
    let service = state.service.clone();

    // the pipeline is synchronous CPU/file work; keep it off the async workers
    let rendered = match tokio::task::spawn_blocking(move || service.render(&spec)).await {
        Ok(result) => result.map_err(HandlerError)?,
        Err(join_err) => {
            error!("render task failed: {}", join_err);
            let body = ErrorResponse {
                message: "internal error".to_string(),
                code: 0,
            };
            return Ok((StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response());
        }
    };

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, rendered.mime)
        .header(header::LAST_MODIFIED, http_date(&state))
        .body(axum::body::Body::from(rendered.data))
        .unwrap();

    Ok(response)
}

/// Format the service clock's "now" as an HTTP date.
fn http_date(state: &AppState) -> String {
    let now: DateTime<Utc> = state.service.now().into();
    now.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Handle health check requests.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response
///
/// `200 OK` with JSON body:
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0"
/// }
/// ```
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Handle requests without a parameter string.
///
/// The service does nothing when no spec is present; respond 200 with an
/// empty body.
pub async fn root_handler() -> StatusCode {
    StatusCode::OK
}

// =============================================================================
// Tests
// =============================================================================
