//! Error types for wallpaper-dl
//!
//! Every failure mode of the pipeline is a distinct variant, so callers can
//! tell a transport failure from a bad HTTP status, a malformed archive
//! document from a missing image URL, and a decode failure from a write
//! failure. Nothing is retried; errors propagate to the caller as-is.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for wallpaper-dl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Which of the two archive HTTP calls produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApiCall {
    /// The metadata query against the image archive endpoint
    ImageList,
    /// The download of the image bytes themselves
    ImageDownload,
}

impl fmt::Display for ApiCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiCall::ImageList => write!(f, "image list request"),
            ApiCall::ImageDownload => write!(f, "image download"),
        }
    }
}

/// Main error type for wallpaper-dl
#[derive(Debug, Error)]
pub enum Error {
    /// Connection or transport failure on either HTTP call
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-success HTTP status from the archive endpoint
    #[error("{call} failed with HTTP {status}")]
    HttpStatus {
        /// Which of the two calls returned the status
        call: ApiCall,
        /// The HTTP status code
        status: u16,
    },

    /// The archive response could not be parsed as the expected XML document
    #[error("malformed image archive response: {0}")]
    Parse(#[from] quick_xml::DeError),

    /// The archive document carried no usable image URL
    #[error("no image URL found in response")]
    MissingImageUrl,

    /// The downloaded bytes are not a decodable image
    #[error("failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    /// Encoding or writing the image to the destination failed
    #[error("failed to write image to {path}: {source}")]
    Write {
        /// The destination path the write was aimed at
        path: PathBuf,
        /// The underlying codec or I/O failure
        #[source]
        source: image::ImageError,
    },

    /// Filesystem error (directory creation, path resolution)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A URL could not be constructed from the endpoint and relative path
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}
