//! Single-writer owner of [`AppState`].
//!
//! Every mutation goes through [`SearchController::dispatch`], which runs the
//! pure [`update`] function, publishes each changed view exactly once, and
//! only then hands the resulting effects to the [`EffectSink`]. Publishing
//! before effects run keeps the "loading" snapshot ahead of any fetch result.

use gallery_logging::gallery_trace;

use crate::{
    update, AppState, ArtworkId, DetailViewModel, Effect, Msg, SearchPolicy, SearchViewModel,
};

/// Executes effects on behalf of the controller.
pub trait EffectSink {
    fn run(&mut self, effects: Vec<Effect>);
}

impl<F> EffectSink for F
where
    F: FnMut(Vec<Effect>),
{
    fn run(&mut self, effects: Vec<Effect>) {
        self(effects)
    }
}

/// Handle returned by `subscribe`, used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener<V> = Box<dyn FnMut(&V) + Send>;

struct Listeners<V> {
    next_id: u64,
    entries: Vec<(SubscriptionId, Listener<V>)>,
}

impl<V> Default for Listeners<V> {
    fn default() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }
}

impl<V> Listeners<V> {
    fn add(&mut self, listener: Listener<V>) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.entries.push((id, listener));
        id
    }

    fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    fn publish(&mut self, view: &V) {
        for (_, listener) in &mut self.entries {
            listener(view);
        }
    }
}

pub struct SearchController<S> {
    state: AppState,
    search_listeners: Listeners<SearchViewModel>,
    detail_listeners: Listeners<DetailViewModel>,
    sink: S,
}

impl<S: EffectSink> SearchController<S> {
    pub fn new(policy: SearchPolicy, sink: S) -> Self {
        Self {
            state: AppState::with_policy(policy),
            search_listeners: Listeners::default(),
            detail_listeners: Listeners::default(),
            sink,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&SearchViewModel) + Send + 'static,
    {
        self.search_listeners.add(Box::new(listener))
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.search_listeners.remove(id)
    }

    pub fn subscribe_detail<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&DetailViewModel) + Send + 'static,
    {
        self.detail_listeners.add(Box::new(listener))
    }

    pub fn unsubscribe_detail(&mut self, id: SubscriptionId) -> bool {
        self.detail_listeners.remove(id)
    }

    /// Feed raw search-box text through the debounce gate.
    pub fn on_input(&mut self, text: impl Into<String>) {
        self.dispatch(Msg::InputChanged(text.into()));
    }

    pub fn start_search(&mut self, query: impl Into<String>) {
        self.dispatch(Msg::SearchSubmitted(query.into()));
    }

    pub fn load_next_page(&mut self) {
        self.dispatch(Msg::NextPageRequested);
    }

    pub fn retry(&mut self) {
        self.dispatch(Msg::RetryRequested);
    }

    pub fn clear(&mut self) {
        self.dispatch(Msg::ClearRequested);
    }

    pub fn request_artwork(&mut self, id: ArtworkId) {
        self.dispatch(Msg::ArtworkRequested(id));
    }

    pub fn retry_artwork(&mut self) {
        self.dispatch(Msg::ArtworkRetryRequested);
    }

    pub fn clear_artwork(&mut self) {
        self.dispatch(Msg::ArtworkCleared);
    }

    pub fn dispatch(&mut self, msg: Msg) {
        gallery_trace!("dispatch {msg:?}");
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);

        if state.consume_search_dirty() {
            self.search_listeners.publish(&state.view());
        }
        if state.consume_detail_dirty() {
            self.detail_listeners.publish(&state.detail_view());
        }
        self.state = state;

        if !effects.is_empty() {
            self.sink.run(effects);
        }
    }
}
