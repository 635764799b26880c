use std::time::Duration;

use crate::{ArtworkId, DebounceTicket, Generation};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Abandon the page fetch currently in flight, if any.
    CancelSearch,
    FetchPage {
        generation: Generation,
        query: String,
        page: u32,
    },
    /// Arm a timer that reports `DebounceElapsed { ticket }`, replacing any armed timer.
    ScheduleDebounce { ticket: DebounceTicket, delay: Duration },
    CancelDebounce,
    FetchArtwork {
        generation: Generation,
        id: ArtworkId,
    },
    CancelArtwork,
}
