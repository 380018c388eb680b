//! Render service orchestrating the request-to-image pipeline.
//!
//! One call runs the whole pipeline for one request:
//!
//! 1. Validate the parameter token
//! 2. Load the image pool (cached directory listing)
//! 3. Pick a random image and decode it
//! 4. Resolve and apply the filter
//! 5. Apply the scale strategy
//! 6. Encode in the source format
//!
//! Every step is synchronous; the server layer decides how to schedule it.

use std::fs;
use std::io::Cursor;
use std::sync::Arc;
use std::time::SystemTime;

use bytes::Bytes;
use image::{DynamicImage, ImageFormat};
use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::config::AppConfig;
use crate::error::{PoolError, RenderError};
use crate::params::RequestParams;
use crate::pool::{pick, PoolCache};
use crate::transform::{apply_filter, resolve_filter};

/// A rendered image ready to be emitted.
#[derive(Debug, Clone)]
pub struct Rendered {
    /// Encoded image bytes.
    pub data: Bytes,

    /// MIME type of the SOURCE image. Filters and scaling do not change the
    /// format, so reporting the source type is accurate in practice.
    pub mime: &'static str,
}

/// Service owning the pipeline configuration, pool cache, and clock.
pub struct RenderService {
    config: AppConfig,
    pool: PoolCache,
    clock: Arc<dyn Clock>,
}

impl RenderService {
    /// Create a service using the system wall clock.
    pub fn new(config: AppConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create a service with an injected clock (tests pin time through this).
    pub fn with_clock(config: AppConfig, clock: Arc<dyn Clock>) -> Self {
        let pool = PoolCache::new(config.images_dir.clone(), config.cache_hours);
        Self {
            config,
            pool,
            clock,
        }
    }

    /// The current time according to the injected clock.
    ///
    /// The server layer uses this for the `Last-Modified` header: every
    /// response is freshly generated, so "now" is the modification time.
    pub fn now(&self) -> SystemTime {
        self.clock.now()
    }

    /// The pipeline configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Run the full pipeline for one parameter token.
    pub fn render(&self, token: &str) -> Result<Rendered, RenderError> {
        let params = RequestParams::from_token(token, &self.config)?;

        let names = self.pool.load(self.clock.as_ref())?;

        let mut rng = rand::thread_rng();
        let name = pick(&names, &mut rng).ok_or_else(|| PoolError::Empty {
            path: self.config.images_dir.clone(),
        })?;
        let path = self.config.images_dir.join(name);

        let raw = fs::read(&path).map_err(|source| RenderError::Read {
            path: path.clone(),
            source,
        })?;
        let format = image::guess_format(&raw).map_err(|e| RenderError::Decode {
            path: path.clone(),
            message: e.to_string(),
        })?;
        let img = image::load_from_memory_with_format(&raw, format).map_err(|e| {
            RenderError::Decode {
                path: path.clone(),
                message: e.to_string(),
            }
        })?;

        // de-randomize once, then apply
        let filter = resolve_filter(params.filter, &mut rng);
        debug!(
            image = %path.display(),
            ?filter,
            scale = params.scale.name(),
            width = params.width,
            height = params.height,
            "rendering"
        );
        let img = match filter {
            Some(kind) => apply_filter(kind, img),
            None => img,
        };

        let img = params.scale.apply(img, params.width, params.height);

        let data = encode(img, format)?;
        Ok(Rendered {
            data,
            mime: format.to_mime_type(),
        })
    }
}

/// Encode the final image in the source format.
fn encode(img: DynamicImage, format: ImageFormat) -> Result<Bytes, RenderError> {
    let img = prepare_for_encode(img, format);
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, format)
        .map_err(|e| RenderError::Encode {
            message: e.to_string(),
        })?;
    Ok(Bytes::from(out.into_inner()))
}

/// Convert to a color type the target encoder accepts.
///
/// The JPEG encoder rejects alpha channels and the GIF encoder wants RGBA;
/// PNG takes everything the pipeline produces.
fn prepare_for_encode(img: DynamicImage, format: ImageFormat) -> DynamicImage {
    match format {
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(img.to_rgb8()),
        ImageFormat::Gif => DynamicImage::ImageRgba8(img.to_rgba8()),
        _ => img,
    }
}

// =============================================================================
// Tests
// =============================================================================
