//! Named visual filters.
//!
//! A filter is a named transform with fixed parameters, applied to the decoded
//! image before scaling. The set of names is closed; unrecognized or empty
//! names are a no-op, never an error. The `random` sentinel picks a concrete
//! entry uniformly from the full table, exactly once per request.
//!
//! The pixel work itself is delegated to `image::imageops`; this module only
//! decides which operation runs and with what constants.

use image::imageops::FilterType;
use image::DynamicImage;
use rand::Rng;

use crate::pool::select::pick;

/// Block size for the pixelate filter.
const PIXELATE_BLOCK_SIZE: u32 = 12;

/// Brightness delta for the brightness filter.
const BRIGHTNESS_DELTA: i32 = -25;

/// Contrast adjustment for the contrast filter.
const CONTRAST_AMOUNT: f32 = 25.0;

/// 3x3 smoothing kernel, center weight -1 (normalized by the weight sum of 7).
const SMOOTH_KERNEL: [f32; 9] = [
    1.0 / 7.0,
    1.0 / 7.0,
    1.0 / 7.0,
    1.0 / 7.0,
    -1.0 / 7.0,
    1.0 / 7.0,
    1.0 / 7.0,
    1.0 / 7.0,
    1.0 / 7.0,
];

/// 3x3 emboss kernel.
const EMBOSS_KERNEL: [f32; 9] = [-2.0, -1.0, 0.0, -1.0, 1.0, 1.0, 0.0, 1.0, 2.0];

/// 3x3 mean-removal kernel for the sketchy filter.
const SKETCHY_KERNEL: [f32; 9] = [-1.0, -1.0, -1.0, -1.0, 9.0, -1.0, -1.0, -1.0, -1.0];

/// 3x3 edge-detection kernel.
const EDGE_KERNEL: [f32; 9] = [-1.0, 0.0, -1.0, 0.0, 4.0, 0.0, -1.0, 0.0, -1.0];

// =============================================================================
// Palettes
// =============================================================================

/// Per-channel deltas added to every pixel by a colorize filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub r: i16,
    pub g: i16,
    pub b: i16,
}

const SEPIA: Palette = Palette { r: 40, g: 20, b: -20 };
const CORDOVAN: Palette = Palette { r: 55, g: -25, b: -15 };
const COFFEE: Palette = Palette { r: 30, g: -5, b: -25 };
const MAHAGONY: Palette = Palette { r: 65, g: -20, b: -45 };
const SINOPIA: Palette = Palette { r: 70, g: -10, b: -50 };

// =============================================================================
// Filter Kind
// =============================================================================

/// A named filter from the fixed table.
///
/// `Random` is a sentinel: it stands for "pick any entry uniformly" and is
/// resolved by [`resolve`] before application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Random,
    Bw,
    Sepia,
    Cordovan,
    Coffee,
    Mahagony,
    Sinopia,
    Emboss,
    Smooth,
    Brightness,
    Sketchy,
    Negate,
    Contrast,
    Pixelate,
    Edgedetect,
}

/// The full filter table, as used by the `random` sentinel.
///
/// `None` is the empty filter: a random pick may legitimately resolve to no
/// filter at all. The sentinel itself is a member too; picking it also
/// resolves to no filter (it is never re-drawn).
pub const FILTER_TABLE: [Option<FilterKind>; 16] = [
    None,
    Some(FilterKind::Random),
    Some(FilterKind::Bw),
    Some(FilterKind::Sepia),
    Some(FilterKind::Pixelate),
    Some(FilterKind::Sketchy),
    Some(FilterKind::Emboss),
    Some(FilterKind::Smooth),
    Some(FilterKind::Brightness),
    Some(FilterKind::Negate),
    Some(FilterKind::Contrast),
    Some(FilterKind::Edgedetect),
    Some(FilterKind::Cordovan),
    Some(FilterKind::Coffee),
    Some(FilterKind::Mahagony),
    Some(FilterKind::Sinopia),
];

impl FilterKind {
    /// Parse a lower-cased request token into a filter.
    ///
    /// Returns `None` for anything outside the fixed set.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "random" => Some(FilterKind::Random),
            "bw" => Some(FilterKind::Bw),
            "sepia" => Some(FilterKind::Sepia),
            "cordovan" => Some(FilterKind::Cordovan),
            "coffee" => Some(FilterKind::Coffee),
            "mahagony" => Some(FilterKind::Mahagony),
            "sinopia" => Some(FilterKind::Sinopia),
            "emboss" => Some(FilterKind::Emboss),
            "smooth" => Some(FilterKind::Smooth),
            "brightness" => Some(FilterKind::Brightness),
            "sketchy" => Some(FilterKind::Sketchy),
            "negate" => Some(FilterKind::Negate),
            "contrast" => Some(FilterKind::Contrast),
            "pixelate" => Some(FilterKind::Pixelate),
            "edgedetect" => Some(FilterKind::Edgedetect),
            _ => None,
        }
    }
}

// =============================================================================
// Resolution and Application
// =============================================================================

/// Resolve the `random` sentinel into a concrete filter (or none).
///
/// Any other value passes through unchanged. The pick happens at most once: a
/// draw landing on the sentinel or on the empty entry means no filter.
pub fn resolve<R: Rng + ?Sized>(
    filter: Option<FilterKind>,
    rng: &mut R,
) -> Option<FilterKind> {
    match filter {
        Some(FilterKind::Random) => match pick(&FILTER_TABLE, rng).copied().flatten() {
            None | Some(FilterKind::Random) => None,
            concrete => concrete,
        },
        other => other,
    }
}

/// Apply a filter to the decoded image.
pub fn apply(kind: FilterKind, img: DynamicImage) -> DynamicImage {
    match kind {
        // the sentinel is resolved before application; treat a stray one as a no-op
        FilterKind::Random => img,
        FilterKind::Bw => img.grayscale(),
        FilterKind::Sepia => colorize(img, SEPIA),
        FilterKind::Cordovan => colorize(img, CORDOVAN),
        FilterKind::Coffee => colorize(img, COFFEE),
        FilterKind::Mahagony => colorize(img, MAHAGONY),
        FilterKind::Sinopia => colorize(img, SINOPIA),
        FilterKind::Emboss => img.filter3x3(&EMBOSS_KERNEL),
        FilterKind::Smooth => img.filter3x3(&SMOOTH_KERNEL),
        FilterKind::Brightness => img.brighten(BRIGHTNESS_DELTA),
        FilterKind::Sketchy => img.filter3x3(&SKETCHY_KERNEL),
        FilterKind::Negate => {
            let mut img = img;
            img.invert();
            img
        }
        FilterKind::Contrast => img.adjust_contrast(CONTRAST_AMOUNT),
        FilterKind::Pixelate => pixelate(img, PIXELATE_BLOCK_SIZE),
        FilterKind::Edgedetect => img.filter3x3(&EDGE_KERNEL),
    }
}

/// Add the palette deltas to every pixel, clamping each channel.
fn colorize(img: DynamicImage, palette: Palette) -> DynamicImage {
    let mut rgba = img.to_rgba8();
    for px in rgba.pixels_mut() {
        px[0] = (px[0] as i16 + palette.r).clamp(0, 255) as u8;
        px[1] = (px[1] as i16 + palette.g).clamp(0, 255) as u8;
        px[2] = (px[2] as i16 + palette.b).clamp(0, 255) as u8;
    }
    DynamicImage::ImageRgba8(rgba)
}

/// Pixelate by downscaling to one sample per block and scaling back up,
/// nearest-neighbor both ways.
fn pixelate(img: DynamicImage, block_size: u32) -> DynamicImage {
    let (w, h) = (img.width(), img.height());
    let dw = (w / block_size).max(1);
    let dh = (h / block_size).max(1);
    img.resize_exact(dw, dh, FilterType::Nearest)
        .resize_exact(w, h, FilterType::Nearest)
}

// =============================================================================
// Tests
// =============================================================================
