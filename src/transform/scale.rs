//! Geometric scaling strategies.
//!
//! A request names one of four fixed strategies; each produces a final image
//! sized relative to the requested width and height:
//!
//! - `inside`: fit within the box, aspect ratio preserved
//! - `outside`: cover at least the box, aspect ratio preserved, no crop
//! - `fill`: exactly the box, aspect ratio ignored
//! - `crop`: exactly the box, aspect ratio preserved, overflow cropped

use image::imageops::FilterType;
use image::DynamicImage;
use serde::Deserialize;

/// Resampling filter used for all scaling operations.
const RESAMPLE: FilterType = FilterType::Lanczos3;

/// One of the four fixed resize/crop strategies.
///
/// Deserializes from the lower-case strategy name, which is also the form the
/// request parser matches against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleMethod {
    /// Resize preserving aspect ratio, then center-crop to the exact box.
    #[default]
    Crop,

    /// Resize preserving aspect ratio so the result fits within the box.
    Inside,

    /// Resize preserving aspect ratio so the result covers at least the box.
    Outside,

    /// Resize to the exact box, distorting if the aspect ratio differs.
    Fill,
}

impl ScaleMethod {
    /// Parse a lower-cased request token into a scale method.
    ///
    /// Returns `None` for anything outside the fixed set; the caller falls
    /// back to the configured default.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "crop" => Some(ScaleMethod::Crop),
            "inside" => Some(ScaleMethod::Inside),
            "outside" => Some(ScaleMethod::Outside),
            "fill" => Some(ScaleMethod::Fill),
            _ => None,
        }
    }

    /// The lower-case name of this method.
    pub fn name(&self) -> &'static str {
        match self {
            ScaleMethod::Crop => "crop",
            ScaleMethod::Inside => "inside",
            ScaleMethod::Outside => "outside",
            ScaleMethod::Fill => "fill",
        }
    }

    /// Apply this strategy, producing the final image for `width` x `height`.
    pub fn apply(self, img: DynamicImage, width: u32, height: u32) -> DynamicImage {
        match self {
            ScaleMethod::Inside => img.resize(width, height, RESAMPLE),
            ScaleMethod::Fill => img.resize_exact(width, height, RESAMPLE),
            ScaleMethod::Crop => img.resize_to_fill(width, height, RESAMPLE),
            ScaleMethod::Outside => {
                let (ow, oh) = (img.width().max(1), img.height().max(1));
                let scale = f64::max(
                    width as f64 / ow as f64,
                    height as f64 / oh as f64,
                );
                // ceil so the result never falls short of the box
                let tw = (ow as f64 * scale).ceil() as u32;
                let th = (oh as f64 * scale).ceil() as u32;
                img.resize_exact(tw.max(1), th.max(1), RESAMPLE)
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
