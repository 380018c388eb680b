//! Pipeline tests verifying scale-method geometry and filters on the decoded
//! response bytes.

use axum::http::StatusCode;
use tempfile::TempDir;

use super::test_utils::{body_bytes, get, make_router, write_png};

async fn fetch_dimensions(dir: &TempDir, uri: &str) -> (u32, u32) {
    let response = get(make_router(dir.path()), uri).await;
    assert_eq!(response.status(), StatusCode::OK, "{uri}");
    let body = body_bytes(response).await;
    let img = image::load_from_memory(&body).unwrap();
    (img.width(), img.height())
}

fn wide_pool() -> TempDir {
    // 400x300: wider than tall, so inside/outside hit different axes
    let dir = TempDir::new().unwrap();
    write_png(dir.path(), "wide.png", 400, 300);
    dir
}

#[tokio::test]
async fn test_fill_distorts_to_exact_box() {
    let pool = wide_pool();
    assert_eq!(fetch_dimensions(&pool, "/64-128-fill").await, (64, 128));
}

#[tokio::test]
async fn test_crop_produces_exact_box() {
    let pool = wide_pool();
    assert_eq!(fetch_dimensions(&pool, "/100-100-crop").await, (100, 100));
}

#[tokio::test]
async fn test_inside_fits_within_box() {
    let pool = wide_pool();
    // 400x300 into 100x100 -> 100x75
    assert_eq!(fetch_dimensions(&pool, "/100-100-inside").await, (100, 75));
}

#[tokio::test]
async fn test_outside_covers_box() {
    let pool = wide_pool();
    let (w, h) = fetch_dimensions(&pool, "/100-100-outside").await;
    assert!(w >= 100 && h >= 100, "got {w}x{h}");
    assert_eq!(h, 100);
}

#[tokio::test]
async fn test_default_scale_method_applies() {
    // the test config defaults to crop: exact box without naming a method
    let pool = wide_pool();
    assert_eq!(fetch_dimensions(&pool, "/120-80").await, (120, 80));
}

#[tokio::test]
async fn test_bw_filter_produces_grayscale() {
    let pool = wide_pool();
    let response = get(make_router(pool.path()), "/64-64-bw-fill").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_bytes(response).await;
    let img = image::load_from_memory(&body).unwrap().to_rgba8();
    for px in img.pixels() {
        assert_eq!(px[0], px[1]);
        assert_eq!(px[1], px[2]);
    }
}

#[tokio::test]
async fn test_random_filter_renders() {
    let pool = wide_pool();
    for _ in 0..10 {
        let (w, h) = fetch_dimensions(&pool, "/64-48-random").await;
        assert_eq!((w, h), (64, 48));
    }
}

#[tokio::test]
async fn test_filter_position_overwrite_applies_last() {
    // bw then sepia: sepia wins, so the output is NOT grayscale
    let pool = wide_pool();
    let response = get(make_router(pool.path()), "/64-64-bw-sepia-fill").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_bytes(response).await;
    let img = image::load_from_memory(&body).unwrap().to_rgba8();
    let colored = img.pixels().any(|px| px[0] != px[1] || px[1] != px[2]);
    assert!(colored, "sepia output should not be grayscale");
}

#[tokio::test]
async fn test_minimum_dimensions_render() {
    let pool = wide_pool();
    assert_eq!(fetch_dimensions(&pool, "/16-16-fill").await, (16, 16));
}
