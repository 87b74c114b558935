//! The wallpaper download pipeline
//!
//! One strict linear sequence per invocation: query the archive metadata,
//! extract the first entry's relative URL, download the image bytes, resolve
//! the destination, decode and write the file. Any failure aborts the
//! remaining steps; nothing is retried.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, info};
use url::Url;

use crate::archive::ImageArchive;
use crate::config::Config;
use crate::dest::resolve_destination;
use crate::error::{ApiCall, Error, Result};
use crate::save::save_image;

/// Timeout for both HTTP calls against the archive endpoint.
const HTTP_TIMEOUT_SECS: u64 = 30;

/// Fetches the daily wallpaper described by a [`Config`].
///
/// Holds the HTTP client for the two sequential GET calls the pipeline
/// performs. Each invocation of [`download_to`](Self::download_to) is
/// independent and stateless.
pub struct WallpaperDownloader {
    /// HTTP client for the metadata and image requests
    http_client: reqwest::Client,

    /// Fetch configuration
    config: Config,
}

impl WallpaperDownloader {
    /// Create a new downloader for the given configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: Config) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .user_agent(concat!("wallpaper-dl/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http_client,
            config,
        })
    }

    /// Fetch and parse the image archive metadata document.
    ///
    /// # Errors
    /// Returns [`Error::HttpStatus`] on a non-success status from the
    /// metadata query and [`Error::Parse`] if the body is not the expected
    /// XML document.
    pub async fn fetch_image_list(&self) -> Result<ImageArchive> {
        let url = self.config.query_url()?;
        debug!("fetching image list from {url}");

        let response = self.http_client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                call: ApiCall::ImageList,
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let archive: ImageArchive = quick_xml::de::from_str(&body)?;
        debug!("archive document contains {} entries", archive.images.len());

        if let Some(entry) = archive.images.first() {
            if let Some(title) = entry.title.as_deref() {
                debug!("first entry: {title}");
            }
            if let Some(copyright) = entry.copyright.as_deref() {
                debug!("copyright: {copyright}");
            }
        }

        Ok(archive)
    }

    /// Fetch the metadata document and return the first entry's relative URL.
    ///
    /// # Errors
    /// Returns [`Error::MissingImageUrl`] when the document carries no
    /// usable URL, in addition to the failures of
    /// [`fetch_image_list`](Self::fetch_image_list).
    pub async fn fetch_image_url(&self) -> Result<String> {
        let archive = self.fetch_image_list().await?;
        archive
            .first_image_url()
            .map(str::to_owned)
            .ok_or(Error::MissingImageUrl)
    }

    /// Download the image at a relative archive URL and return the raw bytes.
    ///
    /// # Errors
    /// Returns [`Error::HttpStatus`] on a non-success status from the image
    /// download.
    pub async fn fetch_image(&self, relative_url: &str) -> Result<Vec<u8>> {
        let url = self.resolve_image_url(relative_url)?;
        info!("downloading {url}");

        let response = self.http_client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                call: ApiCall::ImageDownload,
                status: status.as_u16(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }

    /// Run the full pipeline and return the path the wallpaper was saved to.
    ///
    /// `output` may name a file, an existing directory, or be absent; see
    /// [`resolve_destination`] for how the final path is chosen.
    ///
    /// # Errors
    /// Propagates the first failure of any pipeline step.
    pub async fn download_to(&self, output: Option<&Path>) -> Result<PathBuf> {
        let relative_url = self.fetch_image_url().await?;
        let bytes = self.fetch_image(&relative_url).await?;

        let dest = resolve_destination(output)?;
        save_image(&bytes, &dest)?;

        info!("saved wallpaper to {}", dest.display());
        Ok(dest)
    }

    /// Join a relative archive path onto the configured endpoint.
    fn resolve_image_url(&self, relative_url: &str) -> Result<Url> {
        Ok(self.config.endpoint.join(relative_url)?)
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const ARCHIVE_XML: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<images>
  <image>
    <startdate>20260806</startdate>
    <url>/th/daily.jpg</url>
    <urlBase>/th/daily</urlBase>
    <copyright>Test scene (© Test)</copyright>
    <title>Test scene</title>
  </image>
</images>"#;

    fn downloader_for(server: &MockServer) -> WallpaperDownloader {
        let config = Config {
            market: "en-US".to_string(),
            endpoint: Url::parse(&server.uri()).unwrap(),
            ..Config::default()
        };
        WallpaperDownloader::new(config).unwrap()
    }

    /// A tiny valid PNG to serve as the image body in pipeline tests.
    fn sample_png_bytes() -> Vec<u8> {
        use image::{ImageFormat, RgbImage};
        use std::io::Cursor;

        let img = RgbImage::from_pixel(4, 4, image::Rgb([10, 120, 240]));
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        buf
    }

    #[tokio::test]
    async fn fetch_image_url_returns_first_entry_url() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/HPImageArchive.aspx"))
            .and(query_param("format", "xml"))
            .and(query_param("idx", "0"))
            .and(query_param("n", "1"))
            .and(query_param("mkt", "en-US"))
            .respond_with(ResponseTemplate::new(200).set_body_string(ARCHIVE_XML))
            .mount(&server)
            .await;

        let downloader = downloader_for(&server);
        let url = downloader.fetch_image_url().await.unwrap();

        assert_eq!(url, "/th/daily.jpg");
    }

    #[tokio::test]
    async fn fetch_image_list_http_500_carries_status() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/HPImageArchive.aspx"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let downloader = downloader_for(&server);
        let err = downloader.fetch_image_list().await.unwrap_err();

        match err {
            Error::HttpStatus { call, status } => {
                assert_eq!(call, ApiCall::ImageList);
                assert_eq!(status, 500);
            }
            other => panic!("expected HttpStatus, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn fetch_image_url_without_url_element_is_missing_url() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/HPImageArchive.aspx"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("<images><image><title>no url</title></image></images>"),
            )
            .mount(&server)
            .await;

        let downloader = downloader_for(&server);
        let err = downloader.fetch_image_url().await.unwrap_err();

        assert!(matches!(err, Error::MissingImageUrl));
    }

    #[tokio::test]
    async fn fetch_image_list_malformed_body_is_parse_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/HPImageArchive.aspx"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not an xml document <<<"))
            .mount(&server)
            .await;

        let downloader = downloader_for(&server);
        let err = downloader.fetch_image_list().await.unwrap_err();

        assert!(matches!(err, Error::Parse(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn fetch_image_returns_body_bytes() {
        let server = MockServer::start().await;
        let body = sample_png_bytes();

        Mock::given(method("GET"))
            .and(path("/th/daily.jpg"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(body.clone()))
            .mount(&server)
            .await;

        let downloader = downloader_for(&server);
        let bytes = downloader.fetch_image("/th/daily.jpg").await.unwrap();

        assert_eq!(bytes, body);
    }

    #[tokio::test]
    async fn fetch_image_http_404_carries_status() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/th/missing.jpg"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let downloader = downloader_for(&server);
        let err = downloader.fetch_image("/th/missing.jpg").await.unwrap_err();

        match err {
            Error::HttpStatus { call, status } => {
                assert_eq!(call, ApiCall::ImageDownload);
                assert_eq!(status, 404);
            }
            other => panic!("expected HttpStatus, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn download_to_directory_uses_default_filename() {
        let server = MockServer::start().await;
        let temp_dir = tempfile::tempdir().unwrap();

        Mock::given(method("GET"))
            .and(path("/HPImageArchive.aspx"))
            .respond_with(ResponseTemplate::new(200).set_body_string(ARCHIVE_XML))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/th/daily.jpg"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(sample_png_bytes()))
            .mount(&server)
            .await;

        let downloader = downloader_for(&server);
        let dest = downloader.download_to(Some(temp_dir.path())).await.unwrap();

        assert_eq!(
            dest.file_name().unwrap().to_str().unwrap(),
            crate::config::DEFAULT_FILENAME
        );
        assert!(dest.is_file());
    }

    #[tokio::test]
    async fn download_to_file_path_saves_in_extension_format() {
        let server = MockServer::start().await;
        let temp_dir = tempfile::tempdir().unwrap();
        let target = temp_dir.path().join("my_wall.jpg");

        Mock::given(method("GET"))
            .and(path("/HPImageArchive.aspx"))
            .respond_with(ResponseTemplate::new(200).set_body_string(ARCHIVE_XML))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/th/daily.jpg"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(sample_png_bytes()))
            .mount(&server)
            .await;

        let downloader = downloader_for(&server);
        let dest = downloader.download_to(Some(&target)).await.unwrap();

        assert_eq!(dest.file_name().unwrap().to_str().unwrap(), "my_wall.jpg");
        let format = image::ImageReader::open(&dest)
            .unwrap()
            .with_guessed_format()
            .unwrap()
            .format();
        assert_eq!(format, Some(image::ImageFormat::Jpeg));
    }

    #[tokio::test]
    async fn download_to_aborts_before_asset_fetch_on_metadata_failure() {
        let server = MockServer::start().await;
        let temp_dir = tempfile::tempdir().unwrap();

        Mock::given(method("GET"))
            .and(path("/HPImageArchive.aspx"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        // The image mock is deliberately absent; a stray asset request would
        // 404 against the mock server rather than match anything.

        let downloader = downloader_for(&server);
        let err = downloader
            .download_to(Some(temp_dir.path()))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("500"), "got: {err}");
        assert_eq!(
            std::fs::read_dir(temp_dir.path()).unwrap().count(),
            0,
            "no file may be written when the metadata fetch fails"
        );

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1, "only the metadata call may be issued");
    }
}
