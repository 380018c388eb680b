use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating the configuration file.
///
/// These are fatal: the server refuses to start before any image work.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file is missing or cannot be read
    #[error("configuration file {path} does not exist or is unreadable: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid JSON or has the wrong shape
    #[error("unable to parse the configuration file {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration parsed but contains an unusable value
    #[error("invalid configuration: {reason}")]
    Invalid { reason: String },
}

/// Errors raised while validating the request parameter string.
///
/// These map to HTTP 400 responses.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamError {
    /// Fewer than two sub-tokens, or width/height is not a number
    #[error("width or height parameter is missing or not a number")]
    InvalidDimensions,

    /// Width or height is outside the configured bounds
    #[error(
        "dimensions {width}x{height} do not meet the size requirement \
         (allowed: 16..={max_width} x 16..={max_height})"
    )]
    DimensionOutOfRange {
        width: i64,
        height: i64,
        max_width: u32,
        max_height: u32,
    },
}

/// Errors raised by the image pool.
#[derive(Debug, Error)]
pub enum PoolError {
    /// Source directory is missing, unreadable, or not writable
    #[error("cannot find or write to the images folder {path}: {source}")]
    Unavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No eligible images remained after scanning the directory
    #[error("no eligible images found in {path}")]
    Empty { path: PathBuf },
}

/// Top-level error for one render request.
///
/// Everything the pipeline can fail with funnels into this enum; the server
/// layer converts it to an HTTP response.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Invalid request parameters
    #[error(transparent)]
    Param(#[from] ParamError),

    /// Image pool unavailable or empty
    #[error(transparent)]
    Pool(#[from] PoolError),

    /// Selected image file could not be read
    #[error("failed to read image {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Selected image file could not be decoded
    #[error("failed to decode image {path}: {message}")]
    Decode { path: PathBuf, message: String },

    /// Transformed image could not be encoded
    #[error("failed to encode image: {message}")]
    Encode { message: String },
}

impl RenderError {
    /// HTTP status for this error: 400 for parameter errors, 500 otherwise.
    pub fn status_code(&self) -> u16 {
        match self {
            RenderError::Param(_) => 400,
            _ => 500,
        }
    }

    /// Application error code carried in the JSON error body.
    ///
    /// Parameter errors carry 400; everything else has no associated code
    /// and reports 0.
    pub fn app_code(&self) -> u32 {
        match self {
            RenderError::Param(_) => 400,
            _ => 0,
        }
    }
}
