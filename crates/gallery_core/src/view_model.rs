use crate::Artwork;

/// Snapshot of the search session handed to renderers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchViewModel {
    pub query: String,
    pub page: u32,
    pub total_pages: Option<u32>,
    pub items: Vec<Artwork>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl SearchViewModel {
    /// True once the last reported page has been loaded.
    pub fn reached_end(&self) -> bool {
        self.total_pages.is_some_and(|total| self.page >= total)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DetailViewModel {
    pub artwork: Option<Artwork>,
    pub is_loading: bool,
    pub error: Option<String>,
}
