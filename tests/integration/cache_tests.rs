//! Pool cache record lifecycle tests.
//!
//! The record lives next to the images as `cache.json`; requests create it,
//! fresh records short-circuit rescans, and writes are atomic replaces.

use std::fs;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use axum::http::StatusCode;
use tempfile::TempDir;

use shufflepix::{FixedClock, PoolCache, RenderService, CACHE_FILE_NAME};

use super::test_utils::{get, make_router, test_config, write_png};

#[tokio::test]
async fn test_request_creates_cache_record() {
    let dir = TempDir::new().unwrap();
    write_png(dir.path(), "a.png", 100, 100);
    fs::write(dir.path().join("skip.txt"), b"x").unwrap();

    let response = get(make_router(dir.path()), "/32-32").await;
    assert_eq!(response.status(), StatusCode::OK);

    let raw = fs::read(dir.path().join(CACHE_FILE_NAME)).unwrap();
    let names: Vec<String> = serde_json::from_slice(&raw).unwrap();
    assert_eq!(names, vec!["a.png"]);
}

#[tokio::test]
async fn test_cache_record_is_never_served() {
    // the record's .json extension keeps it out of its own pool
    let dir = TempDir::new().unwrap();
    write_png(dir.path(), "a.png", 100, 100);

    for _ in 0..10 {
        let response = get(make_router(dir.path()), "/32-32").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "image/png"
        );
    }
}

#[tokio::test]
async fn test_fresh_record_short_circuits_rescan() {
    let dir = TempDir::new().unwrap();
    write_png(dir.path(), "a.png", 100, 100);

    let cache = PoolCache::new(dir.path(), 2);
    cache.rebuild().unwrap();

    // a new image lands after the record was written
    write_png(dir.path(), "b.png", 100, 100);

    let clock = FixedClock(SystemTime::now() + Duration::from_secs(3600));
    let names = cache.load(&clock).unwrap();
    assert_eq!(names, vec!["a.png"]);
}

#[tokio::test]
async fn test_stale_record_triggers_rescan() {
    let dir = TempDir::new().unwrap();
    write_png(dir.path(), "a.png", 100, 100);

    let cache = PoolCache::new(dir.path(), 2);
    cache.rebuild().unwrap();
    write_png(dir.path(), "b.png", 100, 100);

    let clock = FixedClock(SystemTime::now() + Duration::from_secs(3 * 3600));
    let names = cache.load(&clock).unwrap();
    assert_eq!(names, vec!["a.png", "b.png"]);
}

#[tokio::test]
async fn test_stale_record_serves_via_clocked_service() {
    // end to end: a service whose clock sits past the TTL rebuilds and
    // serves an image that only exists in the rescanned listing
    let dir = TempDir::new().unwrap();
    write_png(dir.path(), "old.png", 100, 100);

    let cache = PoolCache::new(dir.path(), 2);
    cache.rebuild().unwrap();

    fs::remove_file(dir.path().join("old.png")).unwrap();
    write_png(dir.path(), "new.png", 100, 100);

    let clock = FixedClock(SystemTime::now() + Duration::from_secs(3 * 3600));
    let service = RenderService::with_clock(test_config(dir.path()), Arc::new(clock));
    let rendered = service.render("32-32").unwrap();
    assert_eq!(rendered.mime, "image/png");
}

#[tokio::test]
async fn test_corrupt_record_is_repaired() {
    let dir = TempDir::new().unwrap();
    write_png(dir.path(), "a.png", 100, 100);
    fs::write(dir.path().join(CACHE_FILE_NAME), b"{not json").unwrap();

    let response = get(make_router(dir.path()), "/32-32").await;
    assert_eq!(response.status(), StatusCode::OK);

    let raw = fs::read(dir.path().join(CACHE_FILE_NAME)).unwrap();
    assert!(serde_json::from_slice::<Vec<String>>(&raw).is_ok());
}

#[tokio::test]
async fn test_concurrent_requests_leave_parsable_record() {
    let dir = TempDir::new().unwrap();
    for i in 0..5 {
        write_png(dir.path(), &format!("img{i}.png"), 64, 64);
    }

    let mut handles = Vec::new();
    for _ in 0..8 {
        let router = make_router(dir.path());
        handles.push(tokio::spawn(async move {
            let response = get(router, "/32-32").await;
            assert_eq!(response.status(), StatusCode::OK);
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let raw = fs::read(dir.path().join(CACHE_FILE_NAME)).unwrap();
    let names: Vec<String> = serde_json::from_slice(&raw).unwrap();
    assert_eq!(names.len(), 5);
}
