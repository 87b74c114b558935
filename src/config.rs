//! Configuration for the wallpaper fetch pipeline

use crate::error::Result;
use serde::{Deserialize, Serialize};
use url::Url;

/// Filename used when the destination is a directory or absent.
pub const DEFAULT_FILENAME: &str = "bingwallpaper.png";

/// Market used when none is given on the command line.
pub const DEFAULT_MARKET: &str = "de-DE";

/// Path of the image archive metadata endpoint, relative to the base URL.
const ARCHIVE_PATH: &str = "/HPImageArchive.aspx";

/// Fetch configuration (market, archive offset, entry count, endpoint)
///
/// Immutable once constructed from CLI input or defaults. The endpoint is a
/// full base URL so tests can point the pipeline at a local mock server.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Market/locale tag selecting the localized image variant (default: "de-DE")
    #[serde(default = "default_market")]
    pub market: String,

    /// Days back from today for which to request the archived image (default: 0)
    #[serde(default)]
    pub offset: u32,

    /// Number of archive entries to request; only the first is used (default: 1)
    #[serde(default = "default_count")]
    pub count: u32,

    /// Base URL of the image archive service (default: "https://www.bing.com")
    #[serde(default = "default_endpoint")]
    pub endpoint: Url,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            market: default_market(),
            offset: 0,
            count: default_count(),
            endpoint: default_endpoint(),
        }
    }
}

impl Config {
    /// Build the metadata query URL for this configuration.
    ///
    /// Combines the endpoint with the archive path and appends `format`,
    /// `idx`, `n`, and `mkt` query parameters. Values are embedded as given;
    /// the upstream service rejects anything invalid.
    pub fn query_url(&self) -> Result<Url> {
        let mut url = self.endpoint.join(ARCHIVE_PATH)?;
        url.query_pairs_mut()
            .append_pair("format", "xml")
            .append_pair("idx", &self.offset.to_string())
            .append_pair("n", &self.count.to_string())
            .append_pair("mkt", &self.market);
        Ok(url)
    }
}

fn default_market() -> String {
    DEFAULT_MARKET.to_string()
}

fn default_count() -> u32 {
    1
}

#[allow(clippy::expect_used)]
fn default_endpoint() -> Url {
    Url::parse("https://www.bing.com").expect("default endpoint is a valid URL")
}
