use std::sync::{mpsc, Arc, Mutex};
use std::time::Duration;

use gallery_core::{Artwork, ArtworkId, ArtworkPage, DebounceTicket, Generation};
use gallery_engine::{
    CatalogService, ChannelEventSink, EngineEvent, EngineHandle, FailureKind, FetchError,
};
use pretty_assertions::assert_eq;

const WAIT: Duration = Duration::from_secs(2);
const QUIET: Duration = Duration::from_millis(300);

/// Catalog double: every query answers after `delay` with a single item whose
/// title echoes the query, except `"boom"` which fails.
struct ScriptedCatalog {
    delay: Duration,
    calls: Mutex<Vec<String>>,
}

impl ScriptedCatalog {
    fn new(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            delay,
            calls: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl CatalogService for ScriptedCatalog {
    async fn search(&self, query: &str, page: u32) -> Result<ArtworkPage, FetchError> {
        self.calls.lock().unwrap().push(format!("search {query} {page}"));
        tokio::time::sleep(self.delay).await;
        if query == "boom" {
            return Err(FetchError::new(FailureKind::HttpStatus(500), "server error"));
        }
        Ok(ArtworkPage {
            items: vec![Artwork {
                id: 1,
                title: query.to_string(),
                ..Artwork::default()
            }],
            total_pages: 4,
            current_page: page,
        })
    }

    async fn artwork(&self, id: ArtworkId) -> Result<Artwork, FetchError> {
        self.calls.lock().unwrap().push(format!("artwork {id}"));
        tokio::time::sleep(self.delay).await;
        if id == 0 {
            return Err(FetchError::new(FailureKind::NotFound(id), "response has no data"));
        }
        Ok(Artwork {
            id,
            title: format!("Artwork {id}"),
            ..Artwork::default()
        })
    }
}

fn start(catalog: Arc<ScriptedCatalog>) -> (EngineHandle, mpsc::Receiver<EngineEvent>) {
    let (tx, rx) = mpsc::channel();
    let handle =
        EngineHandle::with_service(catalog, Arc::new(ChannelEventSink::new(tx))).expect("engine");
    (handle, rx)
}

#[test]
fn fetch_page_reports_result_with_its_generation() {
    let (engine, rx) = start(ScriptedCatalog::new(Duration::ZERO));

    engine.fetch_page(Generation::new(3), "monet", 2);

    match rx.recv_timeout(WAIT).expect("page event") {
        EngineEvent::PageFetched { generation, result } => {
            assert_eq!(generation, Generation::new(3));
            let page = result.expect("page ok");
            assert_eq!(page.current_page, 2);
            assert_eq!(page.items[0].title, "monet");
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn newer_page_fetch_cancels_the_older_one() {
    let catalog = ScriptedCatalog::new(Duration::from_millis(150));
    let (engine, rx) = start(catalog.clone());

    engine.fetch_page(Generation::new(1), "first", 1);
    std::thread::sleep(Duration::from_millis(30));
    engine.fetch_page(Generation::new(2), "second", 1);

    match rx.recv_timeout(WAIT).expect("page event") {
        EngineEvent::PageFetched { generation, .. } => assert_eq!(generation, Generation::new(2)),
        other => panic!("unexpected event {other:?}"),
    }
    assert!(rx.recv_timeout(QUIET).is_err());
    assert_eq!(catalog.calls(), vec!["search first 1", "search second 1"]);
}

#[test]
fn cancel_search_suppresses_the_result() {
    let (engine, rx) = start(ScriptedCatalog::new(Duration::from_millis(100)));

    engine.fetch_page(Generation::new(1), "monet", 1);
    engine.cancel_search();

    assert!(rx.recv_timeout(QUIET).is_err());
}

#[test]
fn failed_fetch_is_reported_as_an_error_result() {
    let (engine, rx) = start(ScriptedCatalog::new(Duration::ZERO));

    engine.fetch_page(Generation::new(5), "boom", 1);

    match rx.recv_timeout(WAIT).expect("page event") {
        EngineEvent::PageFetched { generation, result } => {
            assert_eq!(generation, Generation::new(5));
            assert_eq!(result.unwrap_err().kind, FailureKind::HttpStatus(500));
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn artwork_and_search_slots_are_independent() {
    let (engine, rx) = start(ScriptedCatalog::new(Duration::from_millis(50)));

    engine.fetch_page(Generation::new(1), "monet", 1);
    engine.fetch_artwork(Generation::new(1), 42);

    let mut saw_page = false;
    let mut saw_artwork = false;
    for _ in 0..2 {
        match rx.recv_timeout(WAIT).expect("event") {
            EngineEvent::PageFetched { .. } => saw_page = true,
            EngineEvent::ArtworkFetched { result, .. } => {
                assert_eq!(result.expect("artwork ok").title, "Artwork 42");
                saw_artwork = true;
            }
            other => panic!("unexpected event {other:?}"),
        }
    }
    assert!(saw_page && saw_artwork);
}

#[test]
fn cancel_artwork_suppresses_the_result() {
    let (engine, rx) = start(ScriptedCatalog::new(Duration::from_millis(100)));

    engine.fetch_artwork(Generation::new(1), 42);
    engine.cancel_artwork();

    assert!(rx.recv_timeout(QUIET).is_err());
}

#[test]
fn missing_artwork_is_reported_as_not_found() {
    let (engine, rx) = start(ScriptedCatalog::new(Duration::ZERO));

    engine.fetch_artwork(Generation::new(2), 0);

    match rx.recv_timeout(WAIT).expect("artwork event") {
        EngineEvent::ArtworkFetched { result, .. } => {
            assert_eq!(result.unwrap_err().kind, FailureKind::NotFound(0));
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn only_the_last_debounce_ticket_fires() {
    let (engine, rx) = start(ScriptedCatalog::new(Duration::ZERO));
    let delay = Duration::from_millis(80);

    engine.schedule_debounce(DebounceTicket::new(1), delay);
    engine.schedule_debounce(DebounceTicket::new(2), delay);
    engine.schedule_debounce(DebounceTicket::new(3), delay);

    assert_eq!(
        rx.recv_timeout(WAIT).expect("debounce event"),
        EngineEvent::DebounceElapsed {
            ticket: DebounceTicket::new(3)
        }
    );
    assert!(rx.recv_timeout(QUIET).is_err());
}

#[test]
fn cancelled_debounce_never_fires() {
    let (engine, rx) = start(ScriptedCatalog::new(Duration::ZERO));

    engine.schedule_debounce(DebounceTicket::new(1), Duration::from_millis(50));
    engine.cancel_debounce();

    assert!(rx.recv_timeout(QUIET).is_err());
}
