//! Integration tests for the page controller.
//!
//! Tests cover:
//! - Submission, typing and pagination transitions
//! - Stale response handling for searches and detail lookups
//! - Missing credential and blank query behavior
//! - End-to-end sessions against a mock OMDb server

use movie_explorer::cli::commands::browse::run_session;
use movie_explorer::core::controller::{PageController, UserEvent};
use movie_explorer::core::session::{Content, Overlay, Phase};
use movie_explorer::models::catalog::{DetailRecord, MediaKind, Query, SearchPage, SearchResultItem};
use movie_explorer::services::catalog::CatalogApi;
use movie_explorer::services::omdb::{OmdbClient, OmdbConfig};
use movie_explorer::ui::page::render_page;
use movie_explorer::{Error, Result};
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::oneshot;
use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ========== FAKE CATALOG ==========

/// Catalog whose responses are released by the test, one gate per request.
#[derive(Default)]
struct GatedCatalog {
    credential: bool,
    searches: Mutex<HashMap<u32, oneshot::Receiver<Result<SearchPage>>>>,
    details: Mutex<HashMap<String, oneshot::Receiver<Result<DetailRecord>>>>,
    issued: Mutex<Vec<Query>>,
    calls: AtomicUsize,
}

impl GatedCatalog {
    fn new(credential: bool) -> Arc<Self> {
        Arc::new(Self {
            credential,
            ..Default::default()
        })
    }

    fn gate_search(&self, page: u32) -> oneshot::Sender<Result<SearchPage>> {
        let (tx, rx) = oneshot::channel();
        self.searches.lock().unwrap().insert(page, rx);
        tx
    }

    fn gate_details(&self, id: &str) -> oneshot::Sender<Result<DetailRecord>> {
        let (tx, rx) = oneshot::channel();
        self.details.lock().unwrap().insert(id.to_string(), rx);
        tx
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn issued(&self) -> Vec<Query> {
        self.issued.lock().unwrap().clone()
    }
}

impl CatalogApi for GatedCatalog {
    fn has_credential(&self) -> bool {
        self.credential
    }

    async fn search(&self, query: &Query) -> Result<SearchPage> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.issued.lock().unwrap().push(query.clone());
        let gate = self.searches.lock().unwrap().remove(&query.page);
        match gate {
            Some(rx) => rx.await.unwrap_or_else(|_| Err(Error::other("gate dropped"))),
            None => Err(Error::other("no gate for page")),
        }
    }

    async fn fetch_details(&self, id: &str) -> Result<DetailRecord> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.details.lock().unwrap().remove(id);
        match gate {
            Some(rx) => rx.await.unwrap_or_else(|_| Err(Error::other("gate dropped"))),
            None => Err(Error::other("no gate for id")),
        }
    }
}

fn page_of(prefix: &str, count: usize, total: u32) -> SearchPage {
    SearchPage {
        items: (0..count)
            .map(|i| SearchResultItem {
                id: format!("{}-{}", prefix, i),
                title: format!("{} {}", prefix, i),
                year: "2005".to_string(),
                kind: MediaKind::Movie,
                poster_url: None,
            })
            .collect(),
        total_count: total,
    }
}

fn record(id: &str, title: &str) -> DetailRecord {
    DetailRecord {
        id: id.to_string(),
        title: title.to_string(),
        found: true,
        ..Default::default()
    }
}

/// Controller that has shown page 1 of a 3-page "batman" search.
async fn controller_on_first_page(catalog: &Arc<GatedCatalog>) -> PageController<GatedCatalog> {
    let mut controller = PageController::with_shared(Arc::clone(catalog));
    let first = catalog.gate_search(1);
    controller.handle(UserEvent::Type("batman".to_string()));
    controller.handle(UserEvent::Submit);
    first.send(Ok(page_of("p1", 10, 30))).unwrap();
    assert_eq!(controller.next_completion().await, Some(true));
    controller
}

// ========== SEARCH TESTS ==========

#[tokio::test]
async fn test_typing_does_not_fetch() {
    let catalog = GatedCatalog::new(true);
    let mut controller = PageController::with_shared(Arc::clone(&catalog));

    controller.handle(UserEvent::Type("batman".to_string()));
    tokio::task::yield_now().await;

    assert_eq!(catalog.calls(), 0);
    assert_eq!(controller.state().phase(), Phase::Idle);
}

#[tokio::test]
async fn test_submit_resets_to_first_page() {
    let catalog = GatedCatalog::new(true);
    let mut controller = controller_on_first_page(&catalog).await;

    let third = catalog.gate_search(3);
    controller.handle(UserEvent::Page(3));
    third.send(Ok(page_of("p3", 10, 30))).unwrap();
    controller.next_completion().await;
    assert_eq!(controller.state().page(), 3);

    let first = catalog.gate_search(1);
    controller.handle(UserEvent::Type("superman".to_string()));
    controller.handle(UserEvent::Submit);
    assert_eq!(controller.state().page(), 1);
    first.send(Ok(page_of("s1", 10, 12))).unwrap();
    controller.next_completion().await;

    let last = catalog.issued().pop().unwrap();
    assert_eq!(last.text, "superman");
    assert_eq!(last.page, 1);
}

#[tokio::test]
async fn test_rapid_page_changes_keep_last_page() {
    let catalog = GatedCatalog::new(true);
    let mut controller = controller_on_first_page(&catalog).await;

    let second = catalog.gate_search(2);
    let third = catalog.gate_search(3);
    controller.handle(UserEvent::NextPage);
    controller.handle(UserEvent::Page(3));

    // Page 3 answers first, then the slower page 2 response arrives.
    third.send(Ok(page_of("p3", 10, 30))).unwrap();
    assert_eq!(controller.next_completion().await, Some(true));
    second.send(Ok(page_of("p2", 10, 30))).unwrap();
    assert_eq!(controller.next_completion().await, Some(false));

    let state = controller.state();
    assert_eq!(state.page(), 3);
    assert_eq!(state.items()[0].id, "p3-0");
    assert!(!state.is_searching());
}

#[tokio::test]
async fn test_filter_change_refetches_current_page() {
    let catalog = GatedCatalog::new(true);
    let mut controller = controller_on_first_page(&catalog).await;

    let second = catalog.gate_search(2);
    controller.handle(UserEvent::NextPage);
    second.send(Ok(page_of("p2", 10, 30))).unwrap();
    controller.next_completion().await;

    let filtered = catalog.gate_search(2);
    controller.handle(UserEvent::SetKind(Some(MediaKind::Series)));
    assert!(controller.state().is_searching());
    filtered.send(Ok(page_of("series", 10, 14))).unwrap();
    controller.next_completion().await;

    let last = catalog.issued().pop().unwrap();
    assert_eq!(last.kind, Some(MediaKind::Series));
    assert_eq!(last.page, 2);
    assert_eq!(controller.state().page(), 2);
    assert_eq!(controller.state().total_pages(), 2);
}

#[tokio::test]
async fn test_search_failure_shows_empty_results() {
    let catalog = GatedCatalog::new(true);
    let mut controller = controller_on_first_page(&catalog).await;

    let second = catalog.gate_search(2);
    controller.handle(UserEvent::NextPage);
    second.send(Err(Error::TransportStatus(500))).unwrap();
    controller.next_completion().await;

    let state = controller.state();
    assert_eq!(state.content(), Content::Empty { has_searched: true });
    assert_eq!(state.total_pages(), 1);
    assert!(state.last_failure().is_some());
}

#[tokio::test]
async fn test_blank_query_never_fetches() {
    for credential in [true, false] {
        let catalog = GatedCatalog::new(credential);
        let mut controller = PageController::with_shared(Arc::clone(&catalog));

        controller.handle(UserEvent::Type("   ".to_string()));
        controller.handle(UserEvent::Submit);
        tokio::task::yield_now().await;

        assert_eq!(catalog.calls(), 0);
        assert!(!controller.state().is_searching());
    }
}

#[tokio::test]
async fn test_missing_credential_leaves_state_unchanged() {
    let catalog = GatedCatalog::new(false);
    let mut controller = PageController::with_shared(Arc::clone(&catalog));

    controller.handle(UserEvent::Type("batman".to_string()));
    controller.handle(UserEvent::Submit);
    controller.handle(UserEvent::Select("tt0111161".to_string()));
    tokio::task::yield_now().await;

    let state = controller.state();
    assert_eq!(catalog.calls(), 0);
    assert!(!state.is_searching());
    assert!(!state.is_loading_details());
    assert!(!state.has_searched());
    assert_eq!(state.overlay(), Overlay::Closed);
}

// ========== DETAILS TESTS ==========

#[tokio::test]
async fn test_last_select_wins() {
    let catalog = GatedCatalog::new(true);
    let mut controller = PageController::with_shared(Arc::clone(&catalog));

    let gate_a = catalog.gate_details("tt_a");
    let gate_b = catalog.gate_details("tt_b");
    controller.handle(UserEvent::Select("tt_a".to_string()));
    controller.handle(UserEvent::Select("tt_b".to_string()));

    gate_a.send(Ok(record("tt_a", "Alpha"))).unwrap();
    assert_eq!(controller.next_completion().await, Some(false));
    assert_eq!(controller.state().overlay(), Overlay::Loading { id: "tt_b" });

    gate_b.send(Ok(record("tt_b", "Bravo"))).unwrap();
    assert_eq!(controller.next_completion().await, Some(true));
    match controller.state().overlay() {
        Overlay::Open(details) => assert_eq!(details.title, "Bravo"),
        other => panic!("Expected open overlay, got {:?}", other),
    }
}

#[tokio::test]
async fn test_close_drops_in_flight_details() {
    let catalog = GatedCatalog::new(true);
    let mut controller = PageController::with_shared(Arc::clone(&catalog));

    let gate = catalog.gate_details("tt0111161");
    controller.handle(UserEvent::Select("tt0111161".to_string()));
    controller.handle(UserEvent::Close);
    gate.send(Ok(record("tt0111161", "The Shawshank Redemption"))).unwrap();

    assert_eq!(controller.next_completion().await, Some(false));
    assert_eq!(controller.state().overlay(), Overlay::Closed);
    assert!(controller.state().details().is_none());
}

#[tokio::test]
async fn test_details_failure_closes_overlay() {
    let catalog = GatedCatalog::new(true);
    let mut controller = PageController::with_shared(Arc::clone(&catalog));

    let gate = catalog.gate_details("tt0000000");
    controller.handle(UserEvent::Select("tt0000000".to_string()));
    gate.send(Err(Error::LookupFailed("Incorrect IMDb ID.".to_string())))
        .unwrap();
    controller.next_completion().await;

    assert_eq!(controller.state().selected(), None);
    assert!(!controller.state().is_loading_details());
}

// ========== END-TO-END TESTS ==========

fn omdb_controller(server: &MockServer) -> PageController<OmdbClient> {
    PageController::new(OmdbClient::new(
        OmdbConfig::new(Some("test-key".to_string())).with_base_url(server.uri()),
    ))
}

#[tokio::test]
async fn test_batman_scenario() {
    let server = MockServer::start().await;
    let items: Vec<_> = (0..10)
        .map(|i| {
            json!({
                "Title": format!("Batman {}", i),
                "Year": "2005",
                "imdbID": format!("tt20000{:02}", i),
                "Type": "movie",
                "Poster": "N/A"
            })
        })
        .collect();
    Mock::given(method("GET"))
        .and(query_param("s", "batman"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Search": items,
            "totalResults": "23",
            "Response": "True"
        })))
        .mount(&server)
        .await;

    let mut controller = omdb_controller(&server);
    controller.handle(UserEvent::Type("batman".to_string()));
    controller.handle(UserEvent::Submit);
    assert_eq!(controller.next_completion().await, Some(true));

    let state = controller.state();
    assert_eq!(state.total_pages(), 3);
    assert_eq!(state.items().len(), 10);
    assert_eq!(state.overlay(), Overlay::Closed);
    assert!(state.shows_pagination());
}

#[tokio::test]
async fn test_not_found_scenario_shows_no_error() {
    colored::control::set_override(false);
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "Response": "False", "Error": "Movie not found!" })),
        )
        .mount(&server)
        .await;

    let mut controller = omdb_controller(&server);
    controller.handle(UserEvent::Type("zzzNoSuchTitlezzz".to_string()));
    controller.handle(UserEvent::Submit);
    controller.next_completion().await;

    let state = controller.state();
    assert!(state.items().is_empty());
    assert_eq!(state.total_pages(), 1);

    let page = render_page(state);
    assert!(page.contains("No movies found"));
    assert!(!page.contains("Movie not found!"));
}

#[tokio::test]
async fn test_details_scenario_open_and_close() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("i", "tt0111161"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Title": "The Shawshank Redemption",
            "Year": "1994",
            "imdbID": "tt0111161",
            "Type": "movie",
            "Plot": "Two imprisoned men bond over a number of years.",
            "Response": "True"
        })))
        .mount(&server)
        .await;

    let mut controller = omdb_controller(&server);
    controller.handle(UserEvent::Select("tt0111161".to_string()));
    assert!(controller.state().is_loading_details());
    assert_eq!(controller.next_completion().await, Some(true));

    match controller.state().overlay() {
        Overlay::Open(details) => {
            assert_eq!(details.id, "tt0111161");
            assert_eq!(details.title, "The Shawshank Redemption");
        }
        other => panic!("Expected open overlay, got {:?}", other),
    }

    controller.handle(UserEvent::Close);
    assert_eq!(controller.state().selected(), None);
    assert!(controller.state().details().is_none());
}

#[tokio::test]
async fn test_browse_session_waits_for_results_at_end_of_input() {
    colored::control::set_override(false);
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("s", "alien"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Search": [{
                "Title": "Alien",
                "Year": "1979",
                "imdbID": "tt0078748",
                "Type": "movie",
                "Poster": "N/A"
            }],
            "totalResults": "1",
            "Response": "True"
        })))
        .mount(&server)
        .await;

    let input = BufReader::new(&b":year 19a7b9\n:type movie\nalien\n"[..]).lines();
    let mut out = Vec::new();
    let controller = run_session(omdb_controller(&server), None, input, &mut out)
        .await
        .unwrap();

    let state = controller.state();
    assert_eq!(state.query().year.as_deref(), Some("1979"));
    assert_eq!(state.items().len(), 1);

    let output = String::from_utf8(out).unwrap();
    assert!(output.contains("Welcome to Movie Explorer"));
    assert!(output.contains("[🎬 Alien]"));
}
