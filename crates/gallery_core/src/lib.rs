//! Gallery core: pure search/pagination state machine and its controller.
mod controller;
mod effect;
mod model;
mod msg;
mod state;
mod update;
mod view_model;

pub use controller::{EffectSink, SearchController, SubscriptionId};
pub use effect::Effect;
pub use model::{Artwork, ArtworkId, ArtworkPage, LoadFailure, DEFAULT_IIIF_BASE};
pub use msg::Msg;
pub use state::{
    AppState, DebounceGate, DebounceTicket, DetailState, Generation, LoadKind, SearchPolicy,
    SearchSession, SessionPhase, DEFAULT_DEBOUNCE, DEFAULT_MIN_QUERY_LEN, EMPTY_QUERY_MESSAGE,
    FIRST_PAGE, NO_RESULTS_MESSAGE,
};
pub use update::update;
pub use view_model::{DetailViewModel, SearchViewModel};
