//! End-to-end search flow against a mock recommendation endpoint.

use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;
use talentlens_core::{
    Error, FileStorage, FilterValue, HttpRecommender, MemoryStorage, SearchController,
    SessionStore, FETCH_FAILED_MESSAGE,
};

fn catalogue_body() -> String {
    json!([
        {
            "name": "Core Java (Entry Level)",
            "url": "https://catalog.test/core-java-entry",
            "description": "Multi-choice test of Java fundamentals.",
            "score": 0.91,
            "duration": "30 minutes",
            "job_level": "Entry-Level, Graduate",
            "test_type": "Skill",
            "ai_insights": "Covers OOP basics\n\nGood screening filter",
            "languages": ["English (USA)"],
            "remote_testing": "Yes",
            "adaptive/irt_support": "No"
        },
        {
            "name": "Verify Numerical Reasoning",
            "url": "https://catalog.test/verify-numerical",
            "description": "Adaptive numerical reasoning.",
            "score": 0.64,
            "duration": "18 minutes",
            "job_level": "Graduate, Manager",
            "test_type": "Cognitive"
        }
    ])
    .to_string()
}

fn recommender(server: &ServerGuard) -> HttpRecommender {
    HttpRecommender::new(format!("{}/recommend", server.url())).unwrap()
}

fn controller() -> SearchController {
    SearchController::new(SessionStore::load(MemoryStorage::new(), None), true)
}

#[tokio::test]
async fn search_then_filter_by_test_type() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/recommend")
        .match_body(Matcher::Json(json!({"text": "Java Developer", "use_ai": true})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(catalogue_body())
        .expect(1)
        .create_async()
        .await;

    let mut c = controller();
    let shown = c
        .search(&recommender(&server), "Java Developer", true)
        .await
        .unwrap();
    assert_eq!(shown.len(), 2);
    assert_eq!(shown[0].match_percent(), 91);
    assert_eq!(shown[0].adaptive_support.as_deref(), Some("No"));
    assert_eq!(c.match_count_label(), "2 matches found");
    assert_eq!(c.session().history(), ["Java Developer"]);

    c.set_test_type(FilterValue::only("Skill"));
    assert_eq!(c.displayed().len(), 1);
    assert_eq!(c.displayed()[0].name, "Core Java (Entry Level)");
    assert_eq!(c.match_count_label(), "1 matches found");

    c.set_job_level(FilterValue::only("manager"));
    assert!(c.displayed().is_empty());
    assert_eq!(c.raw_results().len(), 2);

    mock.assert_async().await;
}

#[tokio::test]
async fn use_ai_flag_is_forwarded() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/recommend")
        .match_body(Matcher::Json(json!({"text": "Data Analyst", "use_ai": false})))
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let mut c = controller();
    let shown = c
        .search(&recommender(&server), "Data Analyst", false)
        .await
        .unwrap();
    assert!(shown.is_empty());
    assert_eq!(c.match_count_label(), "0 matches found");
    assert!(!c.use_ai());
    mock.assert_async().await;
}

#[tokio::test]
async fn server_error_shows_generic_message() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/recommend")
        .with_status(503)
        .with_body("overloaded")
        .create_async()
        .await;

    let mut c = controller();
    let err = c
        .search(&recommender(&server), "Java Developer", true)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Network(_)));
    assert_eq!(c.error(), Some(FETCH_FAILED_MESSAGE));
    assert!(!c.is_loading());
    assert!(c.displayed().is_empty());
    assert!(c.session().history().is_empty());
}

#[tokio::test]
async fn malformed_body_is_a_failure() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/recommend")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"results": "not a list"}"#)
        .create_async()
        .await;

    let mut c = controller();
    assert!(c
        .search(&recommender(&server), "Java Developer", true)
        .await
        .is_err());
    assert_eq!(c.error(), Some(FETCH_FAILED_MESSAGE));
}

#[tokio::test]
async fn blank_query_sends_nothing() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/recommend")
        .expect(0)
        .create_async()
        .await;

    let mut c = controller();
    let err = c
        .search(&recommender(&server), "   ", true)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::EmptyQuery));
    assert!(!c.is_loading());
    mock.assert_async().await;
}

#[tokio::test]
async fn history_and_theme_survive_restart() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/recommend")
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");

    {
        let session = SessionStore::load(FileStorage::open(&path), Some(true));
        let mut c = SearchController::new(session, true);
        let api = recommender(&server);
        c.search(&api, "Java Developer", true).await.unwrap();
        c.search(&api, "Sales Manager", true).await.unwrap();
        c.session_mut().toggle_theme();
    }

    let session = SessionStore::load(FileStorage::open(&path), Some(true));
    assert_eq!(session.history(), ["Sales Manager", "Java Developer"]);
    assert_eq!(session.theme().as_str(), "light");
}
