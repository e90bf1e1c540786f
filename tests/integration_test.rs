//! End-to-end tests for the chat client against a mock MedBot service.
//!
//! These tests exercise the public API only; no test touches a real
//! network endpoint.

use medbot::chat::{fallback, Author};
use medbot::{ChatController, LoggingConfig, SendOutcome, ServiceConfig, Settings, UploadCandidate};
use serde_json::json;
use std::path::{Path, PathBuf};
use wiremock::matchers::{body_json, body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings_for(base_url: &str) -> Settings {
    Settings {
        service: ServiceConfig {
            base_url: base_url.to_string(),
            session_id: "default_session".to_string(),
        },
        logging: LoggingConfig {
            level: "debug".to_string(),
        },
    }
}

fn write_pdf(dir: &Path, name: &str) -> PathBuf {
    let file = dir.join(name);
    std::fs::write(&file, b"%PDF-1.4 integration fixture").unwrap();
    file
}

#[tokio::test]
async fn successful_round_trips_alternate_user_and_assistant() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": "Of course."})))
        .expect(3)
        .mount(&server)
        .await;

    let mut controller = ChatController::new(&settings_for(&server.uri()));

    for turn in ["first", "second", "third"] {
        controller.send_message(turn).await.unwrap();
        assert!(!controller.is_pending());
    }

    let messages = controller.messages();
    assert_eq!(messages.len(), 6);
    for pair in messages.chunks(2) {
        assert_eq!(pair[0].author, Author::User);
        assert_eq!(pair[1].author, Author::Assistant);
    }

    // Ids are unique and strictly increasing across the conversation.
    for window in messages.windows(2) {
        assert!(window[0].id < window[1].id);
    }
}

#[tokio::test]
async fn chat_request_carries_message_and_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(body_json(json!({
            "message": "What are the symptoms of hypertension?",
            "session_id": "default_session"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": "Symptoms include headaches, dizziness, and nosebleeds."
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut controller = ChatController::new(&settings_for(&server.uri()));
    let outcome = controller
        .send_message("What are the symptoms of hypertension?")
        .await
        .unwrap();

    let messages = controller.messages();
    assert_eq!(messages[0].text, "What are the symptoms of hypertension?");
    assert_eq!(
        messages[1].text,
        "Symptoms include headaches, dizziness, and nosebleeds."
    );
    assert!(matches!(outcome, SendOutcome::Completed(_)));
}

#[tokio::test]
async fn server_failure_resolves_to_the_fixed_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "Chat failed"})))
        .mount(&server)
        .await;

    let mut controller = ChatController::new(&settings_for(&server.uri()));
    controller.send_message("anything").await.unwrap();

    let messages = controller.messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1].author, Author::Assistant);
    assert_eq!(messages[1].text, fallback::FALLBACK_REPLY);
    assert!(!controller.is_pending());
}

#[tokio::test]
async fn unreachable_service_resolves_to_the_fixed_fallback() {
    // Nothing listens on port 1: the request fails at the transport level.
    let mut controller = ChatController::new(&settings_for("http://127.0.0.1:1"));
    controller.send_message("anything").await.unwrap();

    let messages = controller.messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1].text, fallback::FALLBACK_REPLY);
    assert!(!controller.is_pending());
}

#[tokio::test]
async fn upload_batch_filters_to_pdfs_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let a = write_pdf(dir.path(), "a.pdf");
    let b = dir.path().join("b.txt");
    std::fs::write(&b, b"not a document").unwrap();
    let c = write_pdf(dir.path(), "c.pdf");

    let mut controller = ChatController::new(&settings_for(&server.uri()));
    let outcomes = controller
        .upload_files(vec![
            UploadCandidate::from_path(a),
            UploadCandidate::from_path(b),
            UploadCandidate::from_path(c),
        ])
        .await;

    let names: Vec<&str> = outcomes.iter().map(|o| o.name.as_str()).collect();
    assert_eq!(names, ["a.pdf", "c.pdf"]);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    assert!(String::from_utf8_lossy(&requests[0].body).contains("a.pdf"));
    assert!(String::from_utf8_lossy(&requests[1].body).contains("c.pdf"));
}

#[tokio::test]
async fn failed_upload_leaves_only_the_successful_file_in_the_registry() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .and(body_string_contains("a.pdf"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let a = write_pdf(dir.path(), "a.pdf");
    let c = write_pdf(dir.path(), "c.pdf");

    let mut controller = ChatController::new(&settings_for(&server.uri()));
    controller
        .upload_files(vec![
            UploadCandidate::from_path(a),
            UploadCandidate::from_path(c),
        ])
        .await;

    let names: Vec<&str> = controller
        .documents()
        .iter()
        .map(|d| d.name.as_str())
        .collect();
    assert_eq!(names, ["c.pdf"]);
}

#[tokio::test]
async fn new_chat_empties_the_conversation_and_clears_pending() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": "Hello!"})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/clear_session"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut controller = ChatController::new(&settings_for(&server.uri()));
    controller.send_message("hi").await.unwrap();
    assert_eq!(controller.messages().len(), 2);

    controller.start_new_chat().await;

    assert!(controller.messages().is_empty());
    assert!(!controller.is_pending());

    // The conversation is usable again after the reset.
    controller.send_message("hi again").await.unwrap();
    assert_eq!(controller.messages().len(), 2);
}
