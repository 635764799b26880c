use std::time::Duration;

use crate::view_model::{DetailViewModel, SearchViewModel};
use crate::{Artwork, ArtworkId, ArtworkPage};

pub const EMPTY_QUERY_MESSAGE: &str = "empty query";
pub const NO_RESULTS_MESSAGE: &str = "no results found";

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);
pub const DEFAULT_MIN_QUERY_LEN: usize = 2;
pub const FIRST_PAGE: u32 = 1;

/// Identity of one issued fetch. Results carrying an older generation are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(u64);

impl Generation {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(self) -> u64 {
        self.0
    }

    fn advance(&mut self) -> Generation {
        self.0 += 1;
        *self
    }
}

/// Identity of one scheduled debounce timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct DebounceTicket(u64);

impl DebounceTicket {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchPolicy {
    /// Quiet period after the last edit before a search fires.
    pub debounce: Duration,
    /// Inputs with fewer characters than this never trigger a search.
    pub min_query_len: usize,
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            min_query_len: DEFAULT_MIN_QUERY_LEN,
        }
    }
}

/// Which entry point issued a page fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadKind {
    /// Page 1 of a new query; replaces the item list.
    Fresh,
    /// Next page of the current query; appends to the item list.
    Append,
}

/// Coarse phase of the search session, derived from its fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    #[default]
    Idle,
    Loading,
    Ready,
    Empty,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct InFlight {
    generation: Generation,
    kind: LoadKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchSession {
    query: String,
    current_page: u32,
    items: Vec<Artwork>,
    total_pages: Option<u32>,
    is_loading: bool,
    error: Option<String>,
    generation: Generation,
    in_flight: Option<InFlight>,
    last_attempt: Option<LoadKind>,
}

impl SearchSession {
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn items(&self) -> &[Artwork] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn last_attempt(&self) -> Option<LoadKind> {
        self.last_attempt
    }

    pub fn phase(&self) -> SessionPhase {
        if self.is_loading {
            SessionPhase::Loading
        } else if !self.items.is_empty() {
            SessionPhase::Ready
        } else if self.error.as_deref() == Some(NO_RESULTS_MESSAGE) {
            SessionPhase::Empty
        } else if self.error.is_some() {
            SessionPhase::Failed
        } else {
            SessionPhase::Idle
        }
    }

    /// Supersede whatever was in flight and begin page 1 of `query`.
    pub(crate) fn begin_fresh(&mut self, query: String) -> Generation {
        self.query = query;
        self.current_page = FIRST_PAGE;
        self.items.clear();
        self.total_pages = None;
        self.error = None;
        self.begin(LoadKind::Fresh)
    }

    /// Advance to the next page of the current query.
    pub(crate) fn begin_append(&mut self) -> Generation {
        self.current_page += 1;
        self.begin(LoadKind::Append)
    }

    fn begin(&mut self, kind: LoadKind) -> Generation {
        let generation = self.generation.advance();
        self.is_loading = true;
        self.in_flight = Some(InFlight { generation, kind });
        self.last_attempt = Some(kind);
        generation
    }

    /// Returns the load kind if `generation` is the request currently in flight.
    pub(crate) fn take_in_flight(&mut self, generation: Generation) -> Option<LoadKind> {
        match self.in_flight {
            Some(in_flight) if in_flight.generation == generation => {
                self.in_flight = None;
                self.is_loading = false;
                Some(in_flight.kind)
            }
            _ => None,
        }
    }

    pub(crate) fn apply_page(&mut self, kind: LoadKind, page: ArtworkPage) {
        self.total_pages = Some(page.total_pages);
        match kind {
            LoadKind::Fresh => {
                self.error = page
                    .items
                    .is_empty()
                    .then(|| NO_RESULTS_MESSAGE.to_string());
                self.items = page.items;
            }
            LoadKind::Append => {
                if !page.items.is_empty() {
                    self.error = None;
                    self.items.extend(page.items);
                }
            }
        }
    }

    pub(crate) fn apply_failure(&mut self, message: String) {
        self.error = Some(message);
    }

    pub(crate) fn reject_blank(&mut self) {
        self.error = Some(EMPTY_QUERY_MESSAGE.to_string());
    }

    /// Drop everything, including the in-flight request, keeping the
    /// generation counter so late results stay recognisably stale.
    pub(crate) fn reset(&mut self) {
        let generation = self.generation.advance();
        *self = Self {
            generation,
            ..Self::default()
        };
    }

    pub fn view(&self) -> SearchViewModel {
        SearchViewModel {
            query: self.query.clone(),
            page: self.current_page,
            total_pages: self.total_pages,
            items: self.items.clone(),
            is_loading: self.is_loading,
            error: self.error.clone(),
        }
    }
}

/// Coalesces keystrokes into at most one search per quiet period.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DebounceGate {
    last_ticket: DebounceTicket,
    pending: Option<(DebounceTicket, String)>,
}

impl DebounceGate {
    pub fn pending_query(&self) -> Option<&str> {
        self.pending.as_ref().map(|(_, query)| query.as_str())
    }

    /// Replace any pending trigger with one for `text`.
    pub(crate) fn arm(&mut self, text: String) -> DebounceTicket {
        self.last_ticket.0 += 1;
        self.pending = Some((self.last_ticket, text));
        self.last_ticket
    }

    /// Forget the pending trigger. Returns whether one existed.
    pub(crate) fn disarm(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Returns the query for `ticket` if it is still the pending trigger.
    pub(crate) fn fire(&mut self, ticket: DebounceTicket) -> Option<String> {
        let is_current = matches!(&self.pending, Some((pending, _)) if *pending == ticket);
        if !is_current {
            return None;
        }
        self.pending.take().map(|(_, query)| query)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DetailState {
    requested: Option<ArtworkId>,
    artwork: Option<Artwork>,
    is_loading: bool,
    error: Option<String>,
    generation: Generation,
    in_flight: Option<Generation>,
}

impl DetailState {
    pub fn requested(&self) -> Option<ArtworkId> {
        self.requested
    }

    pub fn artwork(&self) -> Option<&Artwork> {
        self.artwork.as_ref()
    }

    pub(crate) fn begin(&mut self, id: ArtworkId) -> Generation {
        let generation = self.generation.advance();
        self.requested = Some(id);
        self.is_loading = true;
        self.error = None;
        self.in_flight = Some(generation);
        generation
    }

    pub(crate) fn settle(&mut self, generation: Generation) -> bool {
        if self.in_flight != Some(generation) {
            return false;
        }
        self.in_flight = None;
        self.is_loading = false;
        true
    }

    pub(crate) fn apply(&mut self, result: Result<Artwork, String>) {
        match result {
            Ok(artwork) => {
                self.artwork = Some(artwork);
                self.error = None;
            }
            Err(message) => self.error = Some(message),
        }
    }

    pub(crate) fn reset(&mut self) {
        let generation = self.generation.advance();
        *self = Self {
            generation,
            ..Self::default()
        };
    }

    pub fn view(&self) -> DetailViewModel {
        DetailViewModel {
            artwork: self.artwork.clone(),
            is_loading: self.is_loading,
            error: self.error.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    policy: SearchPolicy,
    session: SearchSession,
    gate: DebounceGate,
    detail: DetailState,
    search_dirty: bool,
    detail_dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: SearchPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn policy(&self) -> SearchPolicy {
        self.policy
    }

    pub fn session(&self) -> &SearchSession {
        &self.session
    }

    pub fn gate(&self) -> &DebounceGate {
        &self.gate
    }

    pub fn detail(&self) -> &DetailState {
        &self.detail
    }

    pub fn view(&self) -> SearchViewModel {
        self.session.view()
    }

    pub fn detail_view(&self) -> DetailViewModel {
        self.detail.view()
    }

    pub(crate) fn session_mut(&mut self) -> &mut SearchSession {
        &mut self.session
    }

    pub(crate) fn gate_mut(&mut self) -> &mut DebounceGate {
        &mut self.gate
    }

    pub(crate) fn detail_mut(&mut self) -> &mut DetailState {
        &mut self.detail
    }

    pub(crate) fn mark_search_dirty(&mut self) {
        self.search_dirty = true;
    }

    pub(crate) fn mark_detail_dirty(&mut self) {
        self.detail_dirty = true;
    }

    /// Returns whether the search view changed since the last call.
    pub fn consume_search_dirty(&mut self) -> bool {
        std::mem::take(&mut self.search_dirty)
    }

    pub fn consume_detail_dirty(&mut self) -> bool {
        std::mem::take(&mut self.detail_dirty)
    }
}
