//! # wallpaper-dl
//!
//! Fetches the Bing daily wallpaper and saves it to a configurable location.
//!
//! The whole crate is one linear pipeline: query the image archive for
//! metadata, extract the first entry's relative URL, download the image
//! bytes, resolve the destination path, and write the decoded image in the
//! format implied by the destination's extension. There is no concurrency,
//! no retry, and no state across invocations; any failure aborts the run.
//!
//! ## Quick Start
//!
//! ```no_run
//! use wallpaper_dl::{Config, WallpaperDownloader};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config {
//!         market: "en-US".to_string(),
//!         ..Default::default()
//!     };
//!
//!     let downloader = WallpaperDownloader::new(config)?;
//!     let saved = downloader.download_to(None).await?;
//!     println!("Saved to: {}", saved.display());
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Typed schema for the image archive metadata document
pub mod archive;
/// Fetch configuration and request building
pub mod config;
/// Destination path resolution
pub mod dest;
/// The download pipeline
pub mod downloader;
/// Error types
pub mod error;
/// Image decoding and persistence
pub mod save;

// Re-export commonly used types
pub use archive::{ImageArchive, ImageEntry};
pub use config::{Config, DEFAULT_FILENAME, DEFAULT_MARKET};
pub use dest::{default_directory, resolve_destination};
pub use downloader::WallpaperDownloader;
pub use error::{ApiCall, Error, Result};
pub use save::save_image;
