//! Destination path resolution
//!
//! Turns the optional output argument into the final file path: directories
//! (and the absent case) get the default filename appended, anything else is
//! taken literally. Parent directories are created before the path is
//! returned, so the persister can write without further checks.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::DEFAULT_FILENAME;
use crate::error::Result;

/// Resolve the final destination path for the downloaded image.
///
/// - No argument: the default directory (see [`default_directory`]) plus
///   [`DEFAULT_FILENAME`].
/// - An existing directory: that directory plus [`DEFAULT_FILENAME`].
/// - Anything else: the argument itself, extension and all; the extension
///   later selects the output image format.
///
/// The resolved path is absolute and its parent directory exists on return.
/// Resolution is idempotent for a fixed argument and filesystem state.
///
/// # Errors
/// Returns an error if the path cannot be made absolute or the parent
/// directories cannot be created.
pub fn resolve_destination(output: Option<&Path>) -> Result<PathBuf> {
    let dest = match output {
        None => default_directory().join(DEFAULT_FILENAME),
        Some(path) if path.is_dir() => path.join(DEFAULT_FILENAME),
        Some(path) => path.to_path_buf(),
    };

    let dest = std::path::absolute(&dest)?;
    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent)?;
    }

    debug!("resolved destination: {}", dest.display());
    Ok(dest)
}

/// The directory used when no output argument is given.
///
/// Candidates are tried in order and the first existing directory wins:
/// the platform downloads directory, then `~/Downloads`. The process temp
/// directory is the final fallback and always exists.
pub fn default_directory() -> PathBuf {
    candidate_directories()
        .into_iter()
        .find(|dir| dir.is_dir())
        .unwrap_or_else(std::env::temp_dir)
}

/// Ordered candidate list for the default directory.
fn candidate_directories() -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Some(dir) = dirs::download_dir() {
        candidates.push(dir);
    }
    if let Some(home) = dirs::home_dir() {
        candidates.push(home.join("Downloads"));
    }
    candidates
}
