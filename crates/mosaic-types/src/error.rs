//! Error types for PLAYMOSAIC.
//!
//! Loader failures carry the offending file in their message, so parse and
//! I/O errors are folded into [`MosaicError::Config`] or
//! [`MosaicError::Library`] rather than wrapped.

/// Errors produced by the mosaic layout engine and its loaders.
#[derive(Debug, thiserror::Error)]
pub enum MosaicError {
    #[error("invalid viewport: {width}x{height} (both sides must be positive)")]
    InvalidViewport { width: f64, height: f64 },

    #[error("invalid weight for '{identifier}': {hours} hours")]
    InvalidWeight { identifier: String, hours: f64 },

    #[error("config error: {0}")]
    Config(String),

    #[error("library error: {0}")]
    Library(String),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, MosaicError>;
