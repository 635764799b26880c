use gallery_logging::gallery_debug;

use crate::state::FIRST_PAGE;
use crate::{AppState, ArtworkId, Effect, LoadKind, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => input_changed(&mut state, text),
        Msg::DebounceElapsed { ticket } => match state.gate_mut().fire(ticket) {
            Some(query) => start_search(&mut state, query),
            None => {
                gallery_debug!("Ignoring superseded debounce ticket {}", ticket.value());
                Vec::new()
            }
        },
        Msg::SearchSubmitted(query) => start_search(&mut state, query),
        Msg::NextPageRequested => load_next_page(&mut state),
        Msg::RetryRequested => match state.session().last_attempt() {
            Some(LoadKind::Fresh) => {
                let query = state.session().query().to_owned();
                start_search(&mut state, query)
            }
            Some(LoadKind::Append) => load_next_page(&mut state),
            None => Vec::new(),
        },
        Msg::ClearRequested => {
            state.session_mut().reset();
            state.mark_search_dirty();
            let mut effects = vec![Effect::CancelSearch];
            if state.gate_mut().disarm() {
                effects.push(Effect::CancelDebounce);
            }
            effects
        }
        Msg::PageLoaded { generation, result } => {
            let Some(kind) = state.session_mut().take_in_flight(generation) else {
                gallery_debug!("Dropping stale page result for generation {}", generation.value());
                return (state, Vec::new());
            };
            let session = state.session_mut();
            match result {
                Ok(page) => {
                    gallery_debug!(
                        "Page {} of {:?} loaded with {} items ({kind:?})",
                        session.current_page(),
                        session.query(),
                        page.items.len()
                    );
                    session.apply_page(kind, page);
                }
                Err(failure) => {
                    gallery_debug!("Page {} failed: {failure}", session.current_page());
                    session.apply_failure(failure.to_string());
                }
            }
            state.mark_search_dirty();
            Vec::new()
        }
        Msg::ArtworkRequested(id) => request_artwork(&mut state, id),
        Msg::ArtworkLoaded { generation, result } => {
            if !state.detail_mut().settle(generation) {
                gallery_debug!("Dropping stale artwork result for generation {}", generation.value());
                return (state, Vec::new());
            }
            state
                .detail_mut()
                .apply(result.map_err(|failure| failure.to_string()));
            state.mark_detail_dirty();
            Vec::new()
        }
        Msg::ArtworkRetryRequested => match state.detail().requested() {
            Some(id) => request_artwork(&mut state, id),
            None => Vec::new(),
        },
        Msg::ArtworkCleared => {
            state.detail_mut().reset();
            state.mark_detail_dirty();
            vec![Effect::CancelArtwork]
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn input_changed(state: &mut AppState, text: String) -> Vec<Effect> {
    let policy = state.policy();
    if text.chars().count() < policy.min_query_len {
        // Too short: swallow it, but an older pending trigger must not fire either.
        return if state.gate_mut().disarm() {
            vec![Effect::CancelDebounce]
        } else {
            Vec::new()
        };
    }
    let ticket = state.gate_mut().arm(text);
    vec![Effect::ScheduleDebounce {
        ticket,
        delay: policy.debounce,
    }]
}

fn start_search(state: &mut AppState, query: String) -> Vec<Effect> {
    if query.trim().is_empty() {
        state.session_mut().reject_blank();
        state.mark_search_dirty();
        return Vec::new();
    }
    let generation = state.session_mut().begin_fresh(query.clone());
    state.mark_search_dirty();
    gallery_debug!("Starting search {query:?} as generation {}", generation.value());
    vec![
        Effect::CancelSearch,
        Effect::FetchPage {
            generation,
            query,
            page: FIRST_PAGE,
        },
    ]
}

fn load_next_page(state: &mut AppState) -> Vec<Effect> {
    let session = state.session();
    if session.is_loading() || session.query().trim().is_empty() {
        return Vec::new();
    }
    let session = state.session_mut();
    let generation = session.begin_append();
    let effect = Effect::FetchPage {
        generation,
        query: session.query().to_owned(),
        page: session.current_page(),
    };
    state.mark_search_dirty();
    vec![effect]
}

fn request_artwork(state: &mut AppState, id: ArtworkId) -> Vec<Effect> {
    let generation = state.detail_mut().begin(id);
    state.mark_detail_dirty();
    vec![
        Effect::CancelArtwork,
        Effect::FetchArtwork { generation, id },
    ]
}
