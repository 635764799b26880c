//! Gallery engine: catalog client and effect execution.
mod catalog;
mod decode;
mod engine;
mod types;

pub use catalog::{
    CatalogService, CatalogSettings, ReqwestCatalog, ARTWORK_FIELDS, DEFAULT_BASE_URL,
    DEFAULT_PAGE_SIZE,
};
pub use decode::{decode_artwork, decode_search_page};
pub use engine::{ChannelEventSink, EngineHandle, EventSink};
pub use types::{EngineError, EngineEvent, FailureKind, FetchError};
