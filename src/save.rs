//! Image persistence
//!
//! Decodes the downloaded bytes and writes them to the destination, with the
//! output codec chosen from the destination's file extension. An existing
//! file at the destination is overwritten without prompt.

use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};

/// Decode `bytes` as an image and write it to `dest`.
///
/// The input format is sniffed from the bytes; the output format is implied
/// by the extension of `dest`, so saving a JPEG download to `wall.png`
/// re-encodes it as PNG.
///
/// # Errors
/// Returns [`Error::Decode`] when the bytes are not a decodable image and
/// [`Error::Write`] when encoding or writing fails (unknown extension,
/// permissions, disk full).
pub fn save_image(bytes: &[u8], dest: &Path) -> Result<()> {
    let img = image::load_from_memory(bytes).map_err(Error::Decode)?;
    debug!(
        "decoded {}x{} image ({} bytes)",
        img.width(),
        img.height(),
        bytes.len()
    );

    img.save(dest).map_err(|source| Error::Write {
        path: dest.to_path_buf(),
        source,
    })
}
