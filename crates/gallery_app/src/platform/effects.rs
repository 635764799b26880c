use std::sync::mpsc;

use gallery_core::{Effect, EffectSink, LoadFailure, Msg};
use gallery_engine::{EngineEvent, EngineHandle, EventSink, FailureKind, FetchError};
use gallery_logging::{gallery_info, gallery_warn};

use super::app::AppEvent;

/// Hands controller effects to the engine.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }
}

impl EffectSink for EffectRunner {
    fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::CancelSearch => self.engine.cancel_search(),
                Effect::FetchPage {
                    generation,
                    query,
                    page,
                } => {
                    gallery_info!(
                        "FetchPage generation={} page={} query={:?}",
                        generation.value(),
                        page,
                        query
                    );
                    self.engine.fetch_page(generation, query, page);
                }
                Effect::ScheduleDebounce { ticket, delay } => {
                    self.engine.schedule_debounce(ticket, delay);
                }
                Effect::CancelDebounce => self.engine.cancel_debounce(),
                Effect::FetchArtwork { generation, id } => {
                    gallery_info!("FetchArtwork generation={} id={}", generation.value(), id);
                    self.engine.fetch_artwork(generation, id);
                }
                Effect::CancelArtwork => self.engine.cancel_artwork(),
            }
        }
    }
}

/// Turns engine events into controller messages on the main loop's channel.
pub struct MsgForwarder {
    tx: mpsc::Sender<AppEvent>,
}

impl MsgForwarder {
    pub fn new(tx: mpsc::Sender<AppEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for MsgForwarder {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(AppEvent::Engine(event_to_msg(event)));
    }
}

fn event_to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::PageFetched { generation, result } => Msg::PageLoaded {
            generation,
            result: result.map_err(|err| {
                gallery_warn!("Page fetch {} failed: {}", generation.value(), err);
                map_failure(err)
            }),
        },
        EngineEvent::ArtworkFetched { generation, result } => Msg::ArtworkLoaded {
            generation,
            result: result.map_err(|err| {
                gallery_warn!("Artwork fetch {} failed: {}", generation.value(), err);
                map_failure(err)
            }),
        },
        EngineEvent::DebounceElapsed { ticket } => Msg::DebounceElapsed { ticket },
    }
}

fn map_failure(err: FetchError) -> LoadFailure {
    match err.kind {
        FailureKind::HttpStatus(code) => LoadFailure::HttpStatus(code),
        FailureKind::Timeout => LoadFailure::Timeout,
        FailureKind::NotFound(_) => LoadFailure::NotFound,
        FailureKind::Decode => LoadFailure::Decode(err.message),
        FailureKind::TooLarge { .. } => LoadFailure::Decode(err.kind.to_string()),
        FailureKind::InvalidUrl | FailureKind::Network => LoadFailure::Network(err.message),
    }
}
