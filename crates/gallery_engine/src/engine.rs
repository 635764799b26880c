use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use gallery_core::{ArtworkId, DebounceTicket, Generation};
use gallery_logging::{gallery_debug, gallery_warn};
use tokio::runtime::Runtime;
use tokio_util::sync::CancellationToken;

use crate::catalog::{CatalogService, CatalogSettings, ReqwestCatalog};
use crate::{EngineError, EngineEvent};

/// Receives engine results. Called from runtime worker threads.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

enum EngineCommand {
    FetchPage {
        generation: Generation,
        query: String,
        page: u32,
    },
    CancelSearch,
    FetchArtwork {
        generation: Generation,
        id: ArtworkId,
    },
    CancelArtwork,
    ScheduleDebounce {
        ticket: DebounceTicket,
        delay: Duration,
    },
    CancelDebounce,
}

/// Owns the IO runtime. Each kind of work (page fetch, artwork fetch,
/// debounce timer) has a single slot; starting new work in a slot cancels
/// whatever occupied it.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(settings: CatalogSettings, sink: Arc<dyn EventSink>) -> Result<Self, EngineError> {
        let service = Arc::new(ReqwestCatalog::new(settings)?);
        Self::with_service(service, sink)
    }

    pub fn with_service(
        service: Arc<dyn CatalogService>,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, EngineError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("gallery-io")
            .enable_all()
            .build()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();

        thread::Builder::new()
            .name("gallery-engine".to_string())
            .spawn(move || run_commands(runtime, service, sink, cmd_rx))?;

        Ok(Self { cmd_tx })
    }

    pub fn fetch_page(&self, generation: Generation, query: impl Into<String>, page: u32) {
        self.send(EngineCommand::FetchPage {
            generation,
            query: query.into(),
            page,
        });
    }

    pub fn cancel_search(&self) {
        self.send(EngineCommand::CancelSearch);
    }

    pub fn fetch_artwork(&self, generation: Generation, id: ArtworkId) {
        self.send(EngineCommand::FetchArtwork { generation, id });
    }

    pub fn cancel_artwork(&self) {
        self.send(EngineCommand::CancelArtwork);
    }

    pub fn schedule_debounce(&self, ticket: DebounceTicket, delay: Duration) {
        self.send(EngineCommand::ScheduleDebounce { ticket, delay });
    }

    pub fn cancel_debounce(&self) {
        self.send(EngineCommand::CancelDebounce);
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            gallery_warn!("Engine thread is gone; dropping command");
        }
    }
}

#[derive(Default)]
struct Slot(Option<CancellationToken>);

impl Slot {
    fn replace(&mut self) -> CancellationToken {
        self.cancel();
        let token = CancellationToken::new();
        self.0 = Some(token.clone());
        token
    }

    fn cancel(&mut self) {
        if let Some(token) = self.0.take() {
            token.cancel();
        }
    }
}

#[derive(Default)]
struct Slots {
    search: Slot,
    artwork: Slot,
    debounce: Slot,
}

fn run_commands(
    runtime: Runtime,
    service: Arc<dyn CatalogService>,
    sink: Arc<dyn EventSink>,
    cmd_rx: mpsc::Receiver<EngineCommand>,
) {
    let mut slots = Slots::default();
    while let Ok(command) = cmd_rx.recv() {
        match command {
            EngineCommand::FetchPage {
                generation,
                query,
                page,
            } => {
                let token = slots.search.replace();
                let service = service.clone();
                let sink = sink.clone();
                runtime.spawn(async move {
                    tokio::select! {
                        _ = token.cancelled() => {
                            gallery_debug!("Page fetch {} cancelled", generation.value());
                        }
                        result = service.search(&query, page) => {
                            sink.emit(EngineEvent::PageFetched { generation, result });
                        }
                    }
                });
            }
            EngineCommand::CancelSearch => slots.search.cancel(),
            EngineCommand::FetchArtwork { generation, id } => {
                let token = slots.artwork.replace();
                let service = service.clone();
                let sink = sink.clone();
                runtime.spawn(async move {
                    tokio::select! {
                        _ = token.cancelled() => {
                            gallery_debug!("Artwork fetch {} cancelled", generation.value());
                        }
                        result = service.artwork(id) => {
                            sink.emit(EngineEvent::ArtworkFetched { generation, result });
                        }
                    }
                });
            }
            EngineCommand::CancelArtwork => slots.artwork.cancel(),
            EngineCommand::ScheduleDebounce { ticket, delay } => {
                let token = slots.debounce.replace();
                let sink = sink.clone();
                runtime.spawn(async move {
                    tokio::select! {
                        _ = token.cancelled() => {}
                        _ = tokio::time::sleep(delay) => {
                            sink.emit(EngineEvent::DebounceElapsed { ticket });
                        }
                    }
                });
            }
            EngineCommand::CancelDebounce => slots.debounce.cancel(),
        }
    }

    gallery_debug!("Engine command channel closed; shutting down runtime");
    runtime.shutdown_background();
}
