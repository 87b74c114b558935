//! Typed schema for the HPImageArchive XML document
//!
//! The archive endpoint answers a metadata query with an XML document listing
//! one entry per archived day. Only the first entry's relative URL drives the
//! pipeline; the descriptive fields are kept for diagnostics.

use serde::Deserialize;

/// The parsed image archive document: an ordered sequence of image entries.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename = "images")]
pub struct ImageArchive {
    /// Image entries, newest first. Unknown sibling elements are ignored.
    #[serde(rename = "image", default)]
    pub images: Vec<ImageEntry>,
}

/// A single archived image entry.
///
/// Every field is optional; the service omits or empties fields freely and a
/// missing URL is the caller's error to raise, not a parse failure.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ImageEntry {
    /// Archive date of the entry, formatted `YYYYMMDD`
    #[serde(default)]
    pub startdate: Option<String>,

    /// Relative download URL for the full-resolution image
    #[serde(default)]
    pub url: Option<String>,

    /// Relative URL stem without resolution or format suffix
    #[serde(default, rename = "urlBase")]
    pub url_base: Option<String>,

    /// Copyright line describing the image
    #[serde(default)]
    pub copyright: Option<String>,

    /// Title of the image
    #[serde(default)]
    pub title: Option<String>,
}

impl ImageArchive {
    /// Relative URL of the first entry, if present and non-empty.
    pub fn first_image_url(&self) -> Option<&str> {
        self.images
            .first()
            .and_then(|entry| entry.url.as_deref())
            .filter(|url| !url.is_empty())
    }
}
