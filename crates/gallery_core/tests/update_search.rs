use std::sync::Once;

use gallery_core::{
    update, AppState, Artwork, ArtworkPage, Effect, Generation, LoadFailure, Msg, SessionPhase,
    EMPTY_QUERY_MESSAGE, NO_RESULTS_MESSAGE,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(gallery_logging::initialize_for_tests);
}

fn art(id: u64) -> Artwork {
    Artwork {
        id,
        title: format!("Artwork {id}"),
        ..Artwork::default()
    }
}

fn page(ids: &[u64]) -> ArtworkPage {
    ArtworkPage {
        items: ids.iter().copied().map(art).collect(),
        total_pages: 5,
        current_page: 1,
    }
}

fn ids(state: &AppState) -> Vec<u64> {
    state.view().items.iter().map(|item| item.id).collect()
}

fn fetched(effects: &[Effect]) -> (Generation, String, u32) {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::FetchPage {
                generation,
                query,
                page,
            } => Some((*generation, query.clone(), *page)),
            _ => None,
        })
        .expect("fetch page effect")
}

fn start(state: AppState, query: &str) -> (AppState, Generation) {
    let (state, effects) = update(state, Msg::SearchSubmitted(query.to_string()));
    (state, fetched(&effects).0)
}

fn next(state: AppState) -> (AppState, Generation) {
    let (state, effects) = update(state, Msg::NextPageRequested);
    (state, fetched(&effects).0)
}

fn resolve(state: AppState, generation: Generation, result: Result<ArtworkPage, LoadFailure>) -> AppState {
    let (state, effects) = update(state, Msg::PageLoaded { generation, result });
    assert!(effects.is_empty());
    state
}

fn ready_with(query: &str, items: &[u64]) -> AppState {
    let (state, generation) = start(AppState::new(), query);
    resolve(state, generation, Ok(page(items)))
}

#[test]
fn start_search_publishes_loading_then_requests_page_one() {
    init_logging();
    let (mut state, effects) = update(AppState::new(), Msg::SearchSubmitted("monet".into()));

    let generation = fetched(&effects).0;
    assert_eq!(
        effects,
        vec![
            Effect::CancelSearch,
            Effect::FetchPage {
                generation,
                query: "monet".to_string(),
                page: 1,
            },
        ]
    );
    let view = state.view();
    assert!(view.is_loading);
    assert!(view.items.is_empty());
    assert_eq!(view.error, None);
    assert_eq!(view.page, 1);
    assert_eq!(state.session().phase(), SessionPhase::Loading);
    assert!(state.consume_search_dirty());
}

#[test]
fn fresh_search_replaces_previous_items() {
    init_logging();
    let state = ready_with("monet", &[1, 2]);
    assert_eq!(ids(&state), vec![1, 2]);
    assert_eq!(state.session().phase(), SessionPhase::Ready);

    let (state, generation) = start(state, "degas");
    assert!(state.view().items.is_empty());
    let state = resolve(state, generation, Ok(page(&[7, 8, 9])));

    assert_eq!(ids(&state), vec![7, 8, 9]);
    assert_eq!(state.view().query, "degas");
    assert!(!state.view().is_loading);
}

#[test]
fn only_the_latest_search_is_reflected() {
    init_logging();
    let (state, monet) = start(AppState::new(), "monet");
    let (state, van_gogh) = start(state, "van gogh");

    let state = resolve(state, van_gogh, Ok(page(&[30, 31])));
    let (mut state, effects) = update(
        state,
        Msg::PageLoaded {
            generation: monet,
            result: Ok(page(&[10, 11])),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(ids(&state), vec![30, 31]);
    assert_eq!(state.view().query, "van gogh");
    assert!(state.consume_search_dirty());
    // The stale resolution itself must not count as a transition.
    let (mut state, _) = update(
        state,
        Msg::PageLoaded {
            generation: monet,
            result: Err(LoadFailure::Timeout),
        },
    );
    assert!(!state.consume_search_dirty());
    assert_eq!(state.view().error, None);
}

#[test]
fn stale_result_arriving_first_keeps_newer_search_loading() {
    init_logging();
    let (state, monet) = start(AppState::new(), "monet");
    let (state, van_gogh) = start(state, "van gogh");

    let state = resolve(state, monet, Ok(page(&[10])));
    assert!(state.view().is_loading);
    assert!(state.view().items.is_empty());

    let state = resolve(state, van_gogh, Ok(page(&[30])));
    assert_eq!(ids(&state), vec![30]);
}

#[test]
fn next_page_appends_in_arrival_order() {
    init_logging();
    let state = ready_with("art", &[1, 2]);

    let (state, effects) = update(state, Msg::NextPageRequested);
    let (generation, query, page_number) = fetched(&effects);
    assert_eq!(query, "art");
    assert_eq!(page_number, 2);
    assert!(state.view().is_loading);
    assert_eq!(ids(&state), vec![1, 2]);

    let state = resolve(state, generation, Ok(page(&[3, 4])));
    assert_eq!(ids(&state), vec![1, 2, 3, 4]);
    assert_eq!(state.view().page, 2);
    assert!(!state.view().is_loading);
}

#[test]
fn next_page_while_loading_is_ignored() {
    init_logging();
    let state = ready_with("art", &[1, 2]);

    let (state, first) = update(state, Msg::NextPageRequested);
    let (mut state, second) = update(state, Msg::NextPageRequested);

    assert_eq!(first.len(), 1);
    assert!(second.is_empty());
    assert_eq!(state.session().current_page(), 2);
    assert!(state.consume_search_dirty());
}

#[test]
fn next_page_without_query_is_ignored() {
    init_logging();
    let (mut state, effects) = update(AppState::new(), Msg::NextPageRequested);
    assert!(effects.is_empty());
    assert!(!state.consume_search_dirty());
    assert_eq!(state.session().current_page(), 0);
}

#[test]
fn next_page_during_fresh_load_is_ignored() {
    init_logging();
    let (state, _) = start(AppState::new(), "art");
    let (state, effects) = update(state, Msg::NextPageRequested);
    assert!(effects.is_empty());
    assert_eq!(state.session().current_page(), 1);
}

#[test]
fn empty_first_page_reports_no_results() {
    init_logging();
    let (state, generation) = start(AppState::new(), "zzzz");
    let state = resolve(state, generation, Ok(page(&[])));

    let view = state.view();
    assert!(view.items.is_empty());
    assert_eq!(view.error.as_deref(), Some(NO_RESULTS_MESSAGE));
    assert!(!view.is_loading);
    assert_eq!(state.session().phase(), SessionPhase::Empty);
}

#[test]
fn empty_tail_page_is_end_of_results_not_an_error() {
    init_logging();
    let state = ready_with("art", &[1, 2]);
    let (state, generation) = next(state);
    let state = resolve(state, generation, Ok(page(&[])));

    let view = state.view();
    assert_eq!(ids(&state), vec![1, 2]);
    assert_eq!(view.error, None);
    assert_eq!(view.page, 2);
    assert_eq!(state.session().phase(), SessionPhase::Ready);
}

#[test]
fn failed_next_page_keeps_loaded_pages_and_advanced_counter() {
    init_logging();
    let state = ready_with("art", &[1, 2]);
    let (state, generation) = next(state);
    let state = resolve(state, generation, Err(LoadFailure::HttpStatus(503)));

    let view = state.view();
    assert_eq!(ids(&state), vec![1, 2]);
    assert_eq!(view.error.as_deref(), Some("API error: 503"));
    assert!(!view.is_loading);
    assert_eq!(state.session().current_page(), 2);

    // Retrying continues from the advanced counter.
    let (state, effects) = update(state, Msg::RetryRequested);
    let (generation, query, page_number) = fetched(&effects);
    assert_eq!((query.as_str(), page_number), ("art", 3));
    // Error stays visible until a page actually lands.
    assert_eq!(state.view().error.as_deref(), Some("API error: 503"));

    let state = resolve(state, generation, Ok(page(&[5, 6])));
    assert_eq!(ids(&state), vec![1, 2, 5, 6]);
    assert_eq!(state.view().error, None);
}

#[test]
fn empty_tail_page_after_failure_keeps_the_error() {
    init_logging();
    let state = ready_with("art", &[1]);
    let (state, generation) = next(state);
    let state = resolve(state, generation, Err(LoadFailure::Timeout));
    let (state, generation) = next(state);
    let state = resolve(state, generation, Ok(page(&[])));

    assert_eq!(state.view().error.as_deref(), Some("request timed out"));
    assert_eq!(ids(&state), vec![1]);
}

#[test]
fn failed_fresh_search_leaves_items_empty() {
    init_logging();
    let (state, generation) = start(AppState::new(), "monet");
    let state = resolve(
        state,
        generation,
        Err(LoadFailure::Network("connection refused".into())),
    );

    let view = state.view();
    assert!(view.items.is_empty());
    assert_eq!(
        view.error.as_deref(),
        Some("network error: connection refused")
    );
    assert_eq!(state.session().phase(), SessionPhase::Failed);
}

#[test]
fn retry_after_failed_fresh_search_requests_page_one_again() {
    init_logging();
    let (state, generation) = start(AppState::new(), "monet");
    let state = resolve(state, generation, Err(LoadFailure::HttpStatus(500)));

    let (state, effects) = update(state, Msg::RetryRequested);
    let (retry_generation, query, page_number) = fetched(&effects);
    assert_ne!(retry_generation, generation);
    assert_eq!((query.as_str(), page_number), ("monet", 1));
    assert_eq!(effects[0], Effect::CancelSearch);
    assert_eq!(state.view().error, None);

    let state = resolve(state, retry_generation, Ok(page(&[1])));
    assert_eq!(ids(&state), vec![1]);
}

#[test]
fn retry_with_nothing_attempted_is_a_noop() {
    init_logging();
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::RetryRequested);
    assert_eq!(next, state);
    assert!(effects.is_empty());
}

#[test]
fn blank_query_is_rejected_without_contacting_the_service() {
    init_logging();
    let (mut state, effects) = update(AppState::new(), Msg::SearchSubmitted("   ".into()));

    assert!(effects.is_empty());
    assert_eq!(state.view().error.as_deref(), Some(EMPTY_QUERY_MESSAGE));
    assert!(!state.view().is_loading);
    assert!(state.consume_search_dirty());
}

#[test]
fn next_page_started_before_new_search_is_dropped() {
    init_logging();
    let state = ready_with("art", &[1, 2]);
    let (state, stale_next) = next(state);
    let (state, fresh) = start(state, "sculpture");

    let state = resolve(state, stale_next, Ok(page(&[3, 4])));
    assert!(state.view().items.is_empty());
    assert!(state.view().is_loading);

    let state = resolve(state, fresh, Ok(page(&[50])));
    assert_eq!(ids(&state), vec![50]);
    assert_eq!(state.view().page, 1);
}

#[test]
fn clear_resets_and_cancels_in_flight_request() {
    init_logging();
    let (state, generation) = start(AppState::new(), "monet");
    let (mut state, effects) = update(state, Msg::ClearRequested);

    assert_eq!(effects, vec![Effect::CancelSearch]);
    assert!(state.consume_search_dirty());
    let cleared = state.view();
    assert!(cleared.items.is_empty());
    assert!(!cleared.is_loading);
    assert_eq!(cleared.error, None);
    assert_eq!(cleared.query, "");

    let mut state = resolve(state, generation, Ok(page(&[1, 2])));
    assert!(!state.consume_search_dirty());
    assert_eq!(state.view(), cleared);
    assert_eq!(state.session().phase(), SessionPhase::Idle);
}

#[test]
fn clear_is_idempotent() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::ClearRequested);
    let (mut state, effects) = update(state, Msg::ClearRequested);

    assert_eq!(effects, vec![Effect::CancelSearch]);
    assert!(state.consume_search_dirty());
    let view = state.view();
    assert!(view.items.is_empty());
    assert!(!view.is_loading);
    assert_eq!(view.error, None);
}

#[test]
fn clear_then_retry_does_nothing() {
    init_logging();
    let state = ready_with("art", &[1]);
    let (state, _) = update(state, Msg::ClearRequested);
    let (_state, effects) = update(state, Msg::RetryRequested);
    assert!(effects.is_empty());
}

#[test]
fn total_pages_marks_the_end_of_results() {
    init_logging();
    let (state, generation) = start(AppState::new(), "art");
    let state = resolve(
        state,
        generation,
        Ok(ArtworkPage {
            items: vec![art(1)],
            total_pages: 1,
            current_page: 1,
        }),
    );
    let view = state.view();
    assert_eq!(view.total_pages, Some(1));
    assert!(view.reached_end());
}
