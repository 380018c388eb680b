//! Shared fixtures for integration tests.

use std::path::Path;
use std::sync::Arc;
use std::time::SystemTime;

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use image::{Rgb, RgbImage, Rgba, RgbaImage};
use tempfile::TempDir;
use tower::ServiceExt;

use shufflepix::{create_router, AppConfig, FixedClock, RenderService, RouterConfig, ScaleMethod};

/// Write a PNG test image with a simple gradient.
pub fn write_png(dir: &Path, name: &str, width: u32, height: u32) {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, 64, 255])
    });
    img.save(dir.join(name)).unwrap();
}

/// Write a JPEG test image.
pub fn write_jpg(dir: &Path, name: &str, width: u32, height: u32) {
    let img = RgbImage::from_pixel(width, height, Rgb([120, 90, 60]));
    img.save(dir.join(name)).unwrap();
}

/// A temporary image directory holding one PNG plus a non-image file.
pub fn png_pool() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_png(dir.path(), "a.png", 400, 300);
    std::fs::write(dir.path().join("notes.txt"), b"not an image").unwrap();
    dir
}

/// Pipeline configuration over `dir` with test-friendly bounds.
pub fn test_config(dir: &Path) -> AppConfig {
    AppConfig {
        images_dir: dir.to_path_buf(),
        max_width: 1920,
        max_height: 1080,
        cache_hours: 2,
        scale_method: ScaleMethod::Crop,
    }
}

/// Router over `dir` with a clock pinned to "now" and tracing off.
pub fn make_router(dir: &Path) -> Router {
    let service =
        RenderService::with_clock(test_config(dir), Arc::new(FixedClock(SystemTime::now())));
    create_router(service, RouterConfig::new().with_tracing(false))
}

/// Issue a GET against the router.
pub async fn get(router: Router, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    router.oneshot(request).await.unwrap()
}

/// Collect the full response body.
pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

/// Whether the bytes start with the PNG magic.
pub fn is_valid_png(data: &[u8]) -> bool {
    data.starts_with(&[0x89, b'P', b'N', b'G'])
}
