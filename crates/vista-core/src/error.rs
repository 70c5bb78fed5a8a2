use thiserror::Error;

use crate::config::GuardrailConfig;

#[derive(Error, Debug)]
pub enum VistaError {
    #[error("Unsupported image type \"{mime}\". Supported types: JPEG, PNG, WebP")]
    UnsupportedFormat { mime: String },

    #[error("Could not decode the image; the file may be corrupted")]
    DecodeFailed {
        #[source]
        source: image::ImageError,
    },

    #[error("Could not fetch image from {url}: {reason}")]
    FetchFailed { url: String, reason: String },

    #[error(
        "Image is too large ({width}x{height}). Limits: {} px per side, {} px total",
        .limits.hard_max_dim,
        .limits.hard_max_pixels
    )]
    TooLarge {
        width: u32,
        height: u32,
        limits: GuardrailConfig,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid guardrail config: {0}")]
    InvalidConfig(String),
}

/// Fieldless view of [`VistaError`] for callers that only branch on the kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    UnsupportedFormat,
    DecodeFailed,
    FetchFailed,
    TooLarge,
    Io,
    InvalidConfig,
}

impl VistaError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnsupportedFormat { .. } => ErrorKind::UnsupportedFormat,
            Self::DecodeFailed { .. } => ErrorKind::DecodeFailed,
            Self::FetchFailed { .. } => ErrorKind::FetchFailed,
            Self::TooLarge { .. } => ErrorKind::TooLarge,
            Self::Io(_) => ErrorKind::Io,
            Self::InvalidConfig(_) => ErrorKind::InvalidConfig,
        }
    }
}

pub type Result<T> = std::result::Result<T, VistaError>;
