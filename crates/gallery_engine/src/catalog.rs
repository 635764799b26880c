use std::time::Duration;

use futures_util::StreamExt;
use gallery_core::{Artwork, ArtworkId, ArtworkPage};
use gallery_logging::{gallery_info, gallery_warn};
use url::Url;

use crate::decode::{decode_artwork, decode_search_page};
use crate::{FailureKind, FetchError};

pub const DEFAULT_BASE_URL: &str = "https://api.artic.edu/api/v1/";
pub const DEFAULT_PAGE_SIZE: u32 = 15;

/// Field selector sent with every request; covers everything the detail view shows.
pub const ARTWORK_FIELDS: &str = "id,title,artist_display,image_id,date_display,medium_display,\
dimensions,artwork_type_title,department_title,gallery_title,gallery_id,credit_line,\
place_of_origin,api_link";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSettings {
    pub base_url: String,
    pub page_size: u32,
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            connect_timeout: Duration::from_secs(15),
            read_timeout: Duration::from_secs(15),
            request_timeout: Duration::from_secs(15),
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

/// Remote artwork catalog. Implementations must be cancel-safe: dropping the
/// returned future abandons the request without side effects.
#[async_trait::async_trait]
pub trait CatalogService: Send + Sync {
    async fn search(&self, query: &str, page: u32) -> Result<ArtworkPage, FetchError>;

    async fn artwork(&self, id: ArtworkId) -> Result<Artwork, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestCatalog {
    settings: CatalogSettings,
    base: Url,
    client: reqwest::Client,
}

impl ReqwestCatalog {
    pub fn new(settings: CatalogSettings) -> Result<Self, FetchError> {
        let base = parse_base_url(&settings.base_url)?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .read_timeout(settings.read_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self {
            settings,
            base,
            client,
        })
    }

    pub fn settings(&self) -> &CatalogSettings {
        &self.settings
    }

    pub fn search_url(&self, query: &str, page: u32) -> Result<Url, FetchError> {
        let mut url = self.endpoint("artworks/search")?;
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("fields", ARTWORK_FIELDS)
            .append_pair("limit", &self.settings.page_size.to_string())
            .append_pair("page", &page.to_string());
        Ok(url)
    }

    pub fn artwork_url(&self, id: ArtworkId) -> Result<Url, FetchError> {
        let mut url = self.endpoint(&format!("artworks/{id}"))?;
        url.query_pairs_mut().append_pair("fields", ARTWORK_FIELDS);
        Ok(url)
    }

    fn endpoint(&self, path: &str) -> Result<Url, FetchError> {
        self.base
            .join(path)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))
    }

    async fn get_bytes(&self, url: Url) -> Result<Vec<u8>, FetchError> {
        gallery_info!("GET {url}");
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            gallery_warn!("GET {url} failed with {status}");
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(self.too_large(Some(content_len)));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(self.too_large(Some(next_len)));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }

    fn too_large(&self, actual: Option<u64>) -> FetchError {
        FetchError::new(
            FailureKind::TooLarge {
                max_bytes: self.settings.max_bytes,
                actual,
            },
            "response too large",
        )
    }
}

#[async_trait::async_trait]
impl CatalogService for ReqwestCatalog {
    async fn search(&self, query: &str, page: u32) -> Result<ArtworkPage, FetchError> {
        let url = self.search_url(query, page)?;
        let bytes = self.get_bytes(url).await?;
        decode_search_page(&bytes)
    }

    async fn artwork(&self, id: ArtworkId) -> Result<Artwork, FetchError> {
        let url = self.artwork_url(id)?;
        let bytes = self.get_bytes(url).await?;
        decode_artwork(&bytes, id)
    }
}

fn parse_base_url(raw: &str) -> Result<Url, FetchError> {
    // Url::join drops the last segment unless the base ends with a slash.
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{raw}/")
    };
    Url::parse(&normalized).map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
