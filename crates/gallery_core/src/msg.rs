use crate::{Artwork, ArtworkId, ArtworkPage, DebounceTicket, Generation, LoadFailure};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the search box (raw, not yet debounced).
    InputChanged(String),
    /// A debounce timer elapsed.
    DebounceElapsed { ticket: DebounceTicket },
    /// Start a fresh search for the given query.
    SearchSubmitted(String),
    /// User scrolled to the end of the list.
    NextPageRequested,
    /// Re-issue the last attempted page load.
    RetryRequested,
    /// Drop the session and return to idle.
    ClearRequested,
    /// Engine completion for a page fetch.
    PageLoaded {
        generation: Generation,
        result: Result<ArtworkPage, LoadFailure>,
    },
    /// User opened an artwork.
    ArtworkRequested(ArtworkId),
    /// Engine completion for an artwork fetch.
    ArtworkLoaded {
        generation: Generation,
        result: Result<Artwork, LoadFailure>,
    },
    /// Re-request the artwork that was last opened.
    ArtworkRetryRequested,
    /// User left the detail view.
    ArtworkCleared,
    /// Fallback for placeholder wiring.
    NoOp,
}
