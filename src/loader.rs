use std::future::Future;
use std::path::{Path, PathBuf};

use reqwest::header::{ACCESS_CONTROL_ALLOW_ORIGIN, HeaderMap, ORIGIN};
use reqwest::{Client, Response, Url};
use tracing::{debug, warn};

use crate::config::AnalyzerConfig;
use crate::error::LoadError;
use crate::resource::ImageResource;

/// Turns a URL into a decoded, pixel-readable image.
///
/// The analyzer only sees this boundary: fetching, decoding and the
/// cross-origin decision all live behind it.
pub trait ImageLoader: Send + Sync {
    fn load(&self, url: &str) -> impl Future<Output = Result<ImageResource, LoadError>> + Send;
}

/// Where a request string points.
#[derive(Debug, PartialEq, Eq)]
enum Source {
    Remote(Url),
    Local(PathBuf),
}

fn classify(url: &str) -> Result<Source, LoadError> {
    match Url::parse(url) {
        Ok(parsed) => match parsed.scheme() {
            "http" | "https" => Ok(Source::Remote(parsed)),
            "file" => parsed
                .to_file_path()
                .map(Source::Local)
                .map_err(|_| LoadError::InvalidUrl(url.to_string())),
            _ => Err(LoadError::InvalidUrl(url.to_string())),
        },
        // no scheme at all: a plain filesystem path
        Err(_) if !url.contains("://") => Ok(Source::Local(PathBuf::from(url))),
        Err(_) => Err(LoadError::InvalidUrl(url.to_string())),
    }
}

/// Whether the response grants `origin` access to the image pixels.
fn allows_origin(headers: &HeaderMap, origin: &str) -> bool {
    headers
        .get(ACCESS_CONTROL_ALLOW_ORIGIN)
        .and_then(|v| v.to_str().ok())
        .map(|v| {
            let v = v.trim();
            v == "*" || v.eq_ignore_ascii_case(origin)
        })
        .unwrap_or(false)
}

/// Loads `http(s)://` URLs with reqwest and `file://` URLs or plain paths
/// from disk.
///
/// With an origin configured, remote images are decoded first and then
/// withheld unless the host allows that origin, mirroring how a browser
/// lets an image render but refuses canvas reads of its pixels.
#[derive(Clone, Debug)]
pub struct UrlImageLoader {
    client: Client,
    origin: Option<String>,
    max_body_bytes: u64,
}

impl UrlImageLoader {
    pub fn new(config: &AnalyzerConfig) -> Result<Self, LoadError> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.fetch_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self::with_client(builder.build()?, config))
    }

    /// Uses a prebuilt client; only the origin and body limit are read from
    /// `config`.
    pub fn with_client(client: Client, config: &AnalyzerConfig) -> Self {
        Self {
            client,
            origin: config.origin.clone(),
            max_body_bytes: config.max_body_bytes,
        }
    }

    async fn load_remote(&self, url: Url) -> Result<ImageResource, LoadError> {
        let mut request = self.client.get(url.clone());
        if let Some(origin) = &self.origin {
            request = request.header(ORIGIN, origin.as_str());
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let readable = self
            .origin
            .as_deref()
            .is_none_or(|origin| allows_origin(response.headers(), origin));
        let bytes = self.read_body(&url, response).await?;
        debug!(%url, len = bytes.len(), "fetched image");

        let resource = ImageResource::decode(&bytes)?;
        if !readable {
            let origin = self.origin.clone().unwrap_or_default();
            warn!(%url, %origin, "host does not allow pixel access");
            return Err(LoadError::PixelAccessDenied {
                url: url.to_string(),
                origin,
            });
        }
        Ok(resource)
    }

    /// Reads the response body, refusing anything over `max_body_bytes`.
    async fn read_body(&self, url: &Url, mut response: Response) -> Result<Vec<u8>, LoadError> {
        let too_large = || LoadError::TooLarge {
            url: url.to_string(),
            limit: self.max_body_bytes,
        };
        if response
            .content_length()
            .is_some_and(|len| len > self.max_body_bytes)
        {
            return Err(too_large());
        }

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            if (body.len() + chunk.len()) as u64 > self.max_body_bytes {
                return Err(too_large());
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body)
    }

    async fn load_local(&self, path: &Path) -> Result<ImageResource, LoadError> {
        let bytes = tokio::fs::read(path).await.map_err(|source| LoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        debug!(path = %path.display(), len = bytes.len(), "read image");
        Ok(ImageResource::decode(&bytes)?)
    }
}

impl ImageLoader for UrlImageLoader {
    async fn load(&self, url: &str) -> Result<ImageResource, LoadError> {
        match classify(url)? {
            Source::Remote(url) => self.load_remote(url).await,
            Source::Local(path) => self.load_local(&path).await,
        }
    }
}
