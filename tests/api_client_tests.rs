use std::time::Duration;

use flashdeck::api::{ApiClient, ApiError};
use flashdeck::deck::Card;
use flashdeck::study::{HandoffStore, StudyHandoff, StudySession};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, body_partial_json, header, method, path},
};

// ============================================================================
// Helper Functions
// ============================================================================

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(server.uri(), Duration::from_secs(5)).unwrap().with_token("tok")
}

fn saved_set_json(id: i64, topic: &str, cards: &[(&str, &str)]) -> serde_json::Value {
    let content: Vec<_> =
        cards.iter().map(|(q, a)| json!({ "question": q, "answer": a })).collect();
    json!({
        "id": id,
        "topic": topic,
        "content_json": serde_json::to_string(&content).unwrap(),
        "created_at": "2024-03-09T08:15:00",
        "user_id": 7
    })
}

// ============================================================================
// Authentication
// ============================================================================

#[tokio::test]
async fn login_returns_access_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_json(json!({ "email": "ada@example.com", "password": "pw" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "access_token": "abc123", "token_type": "bearer" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri(), Duration::from_secs(5)).unwrap();
    let token = client.login("ada@example.com", "pw").await.unwrap();

    assert_eq!(token.access_token, "abc123");
    assert_eq!(token.token_type, "bearer");
}

#[tokio::test]
async fn signup_rejection_surfaces_detail() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/signup"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "detail": "Email already registered" })),
        )
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri(), Duration::from_secs(5)).unwrap();
    let err = client.signup("ada@example.com", "ada", "pw").await.unwrap_err();

    match err {
        ApiError::ServiceError { status, detail } => {
            assert_eq!(status, 400);
            assert_eq!(detail, "Email already registered");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn expired_token_requires_reauth() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/my-flashcards/"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "detail": "Could not validate credentials" })),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).list_sets().await.unwrap_err();

    assert!(matches!(err, ApiError::Unauthorized(ref d) if d == "Could not validate credentials"));
    assert!(err.requires_reauth());
}

// ============================================================================
// Generation and saving
// ============================================================================

#[tokio::test]
async fn generate_sends_bearer_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/generate"))
        .and(header("authorization", "Bearer tok"))
        .and(body_json(json!({ "text": "Mitochondria produce ATP for the cell." })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "flashcards": [
                { "question": "What produces ATP?", "answer": "Mitochondria" },
                { "question": "What is ATP for?", "answer": "Energy" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let cards = client_for(&server).generate("Mitochondria produce ATP for the cell.").await.unwrap();

    assert_eq!(
        cards,
        vec![Card::new("What produces ATP?", "Mitochondria"), Card::new("What is ATP for?", "Energy")]
    );
}

#[tokio::test]
async fn generate_server_failure_is_recoverable() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/generate"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "detail": "model overloaded" })))
        .mount(&server)
        .await;

    let err = client_for(&server).generate("Some long enough text here").await.unwrap_err();

    assert!(err.is_recoverable());
    assert!(!err.requires_reauth());
}

#[tokio::test]
async fn save_set_sends_cards_as_json_string() {
    let server = MockServer::start().await;
    let cards = vec![Card::new("Q1", "A1")];
    let encoded = serde_json::to_string(&cards).unwrap();

    Mock::given(method("POST"))
        .and(path("/save-flashcards/"))
        .and(header("authorization", "Bearer tok"))
        .and(body_partial_json(json!({ "topic": "Biology", "flashcards_json": encoded })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "message": "Flashcards saved successfully", "id": 42 })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let saved = client_for(&server).save_set("Biology", &cards).await.unwrap();

    assert_eq!(saved.id, 42);
    assert_eq!(saved.message, "Flashcards saved successfully");
}

// ============================================================================
// Saved sets
// ============================================================================

#[tokio::test]
async fn list_sets_decodes_saved_cards() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/my-flashcards/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            saved_set_json(1, "Biology", &[("Q1", "A1"), ("Q2", "A2")]),
            saved_set_json(2, "History", &[("When?", "1066")]),
        ])))
        .mount(&server)
        .await;

    let sets = client_for(&server).list_sets().await.unwrap();

    assert_eq!(sets.len(), 2);
    assert_eq!(sets[0].topic, "Biology");
    assert_eq!(sets[0].cards[1], Card::new("Q2", "A2"));
    assert_eq!(sets[0].user_id, Some(7));
    assert_eq!(sets[1].summary(), "1 flashcard · Mar 9, 2024");
}

#[tokio::test]
async fn list_sets_rejects_corrupt_content() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/my-flashcards/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 3,
            "topic": "Broken",
            "content_json": "not json",
            "created_at": "2024-03-09T08:15:00"
        }])))
        .mount(&server)
        .await;

    let err = client_for(&server).list_sets().await.unwrap_err();

    assert!(matches!(err, ApiError::Deck(_)));
}

#[tokio::test]
async fn saved_set_studies_through_handoff() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/my-flashcards/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            saved_set_json(5, "Capitals", &[("Capital of France?", "Paris"), ("Capital of Peru?", "Lima")]),
        ])))
        .mount(&server)
        .await;

    let set = client_for(&server).get_set(5).await.unwrap().unwrap();
    let dir = tempfile::TempDir::new().unwrap();
    let store = HandoffStore::new(dir.path().join("study_handoff.json"));
    store.put(&StudyHandoff::new(set.cards, set.topic)).unwrap();

    let mut session = StudySession::from_handoff(&store).unwrap();
    assert_eq!(session.topic(), "Capitals");
    assert!(!store.is_pending());

    session.next();
    session.toggle_reveal();
    let view = session.current();
    assert_eq!(view.progress(), "Flashcard 2 of 2");
    assert_eq!(view.body(), "Lima");
}

#[tokio::test]
async fn missing_set_id_is_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/my-flashcards/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    assert!(client_for(&server).get_set(99).await.unwrap().is_none());
}

#[tokio::test]
async fn health_check_reports_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "status": "ok", "message": "Flashcard API is running" })),
        )
        .mount(&server)
        .await;

    let health = ApiClient::new(server.uri(), Duration::from_secs(5)).unwrap().health().await.unwrap();

    assert_eq!(health.status, "ok");
}
