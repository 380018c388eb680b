//! shufflepix - serves a random image, resized and filtered on the fly.
//!
//! This binary loads the configuration, builds the router, and runs the
//! HTTP server.

use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shufflepix::{
    config::Cli, create_router, AppConfig, PoolCache, RenderService, RouterConfig, SystemClock,
};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    // Load and validate configuration before any image work
    let config = match AppConfig::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    info!("Configuration:");
    info!("  Images directory: {}", config.images_dir.display());
    info!(
        "  Max dimensions: {}x{}",
        config.max_width, config.max_height
    );
    info!("  Pool cache TTL: {}h", config.cache_hours);
    info!("  Default scale method: {}", config.scale_method.name());

    // Probe the pool once so a misconfigured directory is visible at startup.
    // Pool failures stay per-request errors; this is informational only.
    let pool = PoolCache::new(config.images_dir.clone(), config.cache_hours);
    match pool.load(&SystemClock) {
        Ok(names) => info!("  Found {} image(s) in the pool", names.len()),
        Err(e) => warn!("  Pool probe failed: {}", e),
    }

    let service = RenderService::new(config);
    let router_config = RouterConfig::new().with_tracing(!cli.no_tracing);
    let router = create_router(service, router_config);

    let addr = cli.bind_address();
    info!("Server listening on: http://{}", addr);
    info!("Try: curl http://{}/640-480-sepia-crop -o out.png", addr);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = axum::serve(listener, router).await {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "shufflepix=debug,tower_http=debug"
    } else {
        "shufflepix=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
