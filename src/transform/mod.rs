//! Image transforms: named filters and geometric scaling.
//!
//! Both halves dispatch a closed set of names onto `image` crate operations
//! with fixed parameters:
//!
//! - [`FilterKind`]: visual filters applied before scaling (grayscale,
//!   colorize palettes, kernels, pixelate, ...), including the `random`
//!   sentinel resolved once per request.
//! - [`ScaleMethod`]: the four resize/crop strategies producing the final
//!   output dimensions.

pub mod filter;
pub mod scale;

pub use filter::{apply as apply_filter, resolve as resolve_filter, FilterKind, FILTER_TABLE};
pub use scale::ScaleMethod;
