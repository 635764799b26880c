use std::fmt;

pub type ArtworkId = u64;

pub const DEFAULT_IIIF_BASE: &str = "https://www.artic.edu/iiif/2";
const FULL_IMAGE_SIZE: &str = "843,";
const THUMBNAIL_SIZE: &str = "200,";

/// One catalog record. Two artworks denote the same item when their ids match.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Artwork {
    pub id: ArtworkId,
    pub title: String,
    pub artist_display: String,
    pub image_id: Option<String>,
    pub date_display: String,
    pub medium_display: String,
    pub dimensions: String,
    pub artwork_type_title: String,
    pub department_title: String,
    pub gallery_title: Option<String>,
    pub gallery_id: Option<u64>,
    pub credit_line: String,
    pub place_of_origin: Option<String>,
    pub api_link: String,
}

impl Artwork {
    pub fn is_same_item(&self, other: &Artwork) -> bool {
        self.id == other.id
    }

    /// IIIF URL of the display-size image, if the artwork has one.
    pub fn full_image_url(&self, iiif_base: &str) -> Option<String> {
        self.image_url(iiif_base, FULL_IMAGE_SIZE)
    }

    pub fn thumbnail_url(&self, iiif_base: &str) -> Option<String> {
        self.image_url(iiif_base, THUMBNAIL_SIZE)
    }

    fn image_url(&self, iiif_base: &str, size: &str) -> Option<String> {
        let image_id = self.image_id.as_deref().filter(|id| !id.is_empty())?;
        Some(format!(
            "{}/{image_id}/full/{size}/0/default.jpg",
            iiif_base.trim_end_matches('/')
        ))
    }
}

/// One page of search results as reported by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArtworkPage {
    pub items: Vec<Artwork>,
    pub total_pages: u32,
    pub current_page: u32,
}

/// Why a catalog request failed, as far as the controller cares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadFailure {
    Network(String),
    Timeout,
    HttpStatus(u16),
    Decode(String),
    NotFound,
}

impl fmt::Display for LoadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadFailure::Network(detail) => write!(f, "network error: {detail}"),
            LoadFailure::Timeout => write!(f, "request timed out"),
            LoadFailure::HttpStatus(code) => write!(f, "API error: {code}"),
            LoadFailure::Decode(detail) => write!(f, "unexpected response: {detail}"),
            LoadFailure::NotFound => write!(f, "artwork not found"),
        }
    }
}
