//! Request parameter parsing and validation.
//!
//! A request carries a single dash-delimited token such as
//! `640-480-sepia-crop`. The first two sub-tokens are the width and height;
//! sub-tokens at positions 2..=4 may name a filter and/or a scale method.
//!
//! The two scans over positions 2..=4 are intentionally asymmetric and
//! independent, matching long-standing service behavior:
//!
//! - filter: the LAST matching position wins (each match overwrites),
//! - scale method: the FIRST matching position wins.
//!
//! The name sets are disjoint in practice, but the parser does not assume so;
//! a single sub-token may set both.

use crate::config::{AppConfig, MIN_DIMENSION};
use crate::error::ParamError;
use crate::transform::{FilterKind, ScaleMethod};

/// Positions scanned for filter and scale-method names.
const OPTION_POSITIONS: std::ops::RangeInclusive<usize> = 2..=4;

/// Validated parameters for one request. Built once, immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestParams {
    /// Output width in pixels.
    pub width: u32,

    /// Output height in pixels.
    pub height: u32,

    /// Filter to apply, possibly the unresolved `random` sentinel.
    pub filter: Option<FilterKind>,

    /// Scale strategy; the configured default when the request names none.
    pub scale: ScaleMethod,
}

impl RequestParams {
    /// Parse and validate a dash-delimited parameter token.
    ///
    /// # Errors
    ///
    /// - [`ParamError::InvalidDimensions`] when fewer than two sub-tokens are
    ///   present or the first two are not integers.
    /// - [`ParamError::DimensionOutOfRange`] when a dimension falls outside
    ///   `16..=max` for its axis.
    pub fn from_token(token: &str, config: &AppConfig) -> Result<Self, ParamError> {
        let parts: Vec<&str> = token.split('-').collect();
        if parts.len() < 2 {
            return Err(ParamError::InvalidDimensions);
        }

        let width: i64 = parts[0].parse().map_err(|_| ParamError::InvalidDimensions)?;
        let height: i64 = parts[1].parse().map_err(|_| ParamError::InvalidDimensions)?;

        let min = MIN_DIMENSION as i64;
        if width < min
            || height < min
            || width > config.max_width as i64
            || height > config.max_height as i64
        {
            return Err(ParamError::DimensionOutOfRange {
                width,
                height,
                max_width: config.max_width,
                max_height: config.max_height,
            });
        }

        let mut filter = None;
        let mut scale = None;
        for idx in OPTION_POSITIONS {
            let Some(part) = parts.get(idx) else { break };
            if part.is_empty() {
                continue;
            }
            let lowered = part.to_ascii_lowercase();

            // later filter matches overwrite earlier ones
            if let Some(kind) = FilterKind::from_token(&lowered) {
                filter = Some(kind);
            }
            // the first scale match sticks
            if scale.is_none() {
                scale = ScaleMethod::from_token(&lowered);
            }
        }

        Ok(Self {
            width: width as u32,
            height: height as u32,
            filter,
            scale: scale.unwrap_or(config.scale_method),
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
