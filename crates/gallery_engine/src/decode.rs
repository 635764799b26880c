use gallery_core::{Artwork, ArtworkId, ArtworkPage};
use serde::Deserialize;

use crate::{FailureKind, FetchError};

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<ArtworkDto>,
    #[serde(default)]
    pagination: PaginationDto,
}

#[derive(Debug, Default, Deserialize)]
struct PaginationDto {
    #[serde(default)]
    total_pages: u32,
    #[serde(default)]
    current_page: u32,
}

#[derive(Debug, Deserialize)]
struct ArtworkDetailResponse {
    #[serde(default)]
    data: Option<ArtworkDto>,
}

/// Artwork as served by the catalog; most text fields may be null or absent.
#[derive(Debug, Deserialize)]
struct ArtworkDto {
    id: ArtworkId,
    title: Option<String>,
    artist_display: Option<String>,
    image_id: Option<String>,
    date_display: Option<String>,
    medium_display: Option<String>,
    dimensions: Option<String>,
    artwork_type_title: Option<String>,
    department_title: Option<String>,
    gallery_title: Option<String>,
    gallery_id: Option<u64>,
    credit_line: Option<String>,
    place_of_origin: Option<String>,
    api_link: Option<String>,
}

impl From<ArtworkDto> for Artwork {
    fn from(dto: ArtworkDto) -> Self {
        Artwork {
            id: dto.id,
            title: dto.title.unwrap_or_default(),
            artist_display: dto.artist_display.unwrap_or_default(),
            image_id: dto.image_id,
            date_display: dto.date_display.unwrap_or_default(),
            medium_display: dto.medium_display.unwrap_or_default(),
            dimensions: dto.dimensions.unwrap_or_default(),
            artwork_type_title: dto.artwork_type_title.unwrap_or_default(),
            department_title: dto.department_title.unwrap_or_default(),
            gallery_title: dto.gallery_title,
            gallery_id: dto.gallery_id,
            credit_line: dto.credit_line.unwrap_or_default(),
            place_of_origin: dto.place_of_origin,
            api_link: dto.api_link.unwrap_or_default(),
        }
    }
}

/// Decode the body of `GET /artworks/search`.
pub fn decode_search_page(bytes: &[u8]) -> Result<ArtworkPage, FetchError> {
    let response: SearchResponse = serde_json::from_slice(bytes)
        .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))?;
    Ok(ArtworkPage {
        items: response.data.into_iter().map(Artwork::from).collect(),
        total_pages: response.pagination.total_pages,
        current_page: response.pagination.current_page,
    })
}

/// Decode the body of `GET /artworks/{id}`. A null `data` block means the id is unknown.
pub fn decode_artwork(bytes: &[u8], id: ArtworkId) -> Result<Artwork, FetchError> {
    let response: ArtworkDetailResponse = serde_json::from_slice(bytes)
        .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))?;
    response
        .data
        .map(Artwork::from)
        .ok_or_else(|| FetchError::new(FailureKind::NotFound(id), "response has no data"))
}
