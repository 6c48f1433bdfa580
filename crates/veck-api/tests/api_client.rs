//! Contract tests for the backend HTTP client, against a wiremock server.

use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use veck_api::client::RestoreRequest;
use veck_api::{ApiClient, Config, Message, Sender, Session};

fn client_for(server: &MockServer) -> ApiClient {
    let config = Config {
        base_url: server.uri(),
        model: "llama2".to_string(),
    };
    ApiClient::new(&config).expect("client builds")
}

#[tokio::test]
async fn list_sessions_parses_array() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sessions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "s1", "title": "First", "created_at": "2026-08-30T10:00:00"},
            {"id": 2, "title": null}
        ])))
        .mount(&server)
        .await;

    let sessions = client_for(&server).list_sessions().await.unwrap();
    assert_eq!(sessions.len(), 2);
    assert_eq!(sessions[0].id, "s1");
    assert_eq!(sessions[1].id, "2");
    assert_eq!(sessions[1].title, None);
}

#[tokio::test]
async fn create_session_sends_null_title_for_untitled() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/sessions"))
        .and(body_json(json!({"title": null})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": "new", "title": null, "created_at": null})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let session = client_for(&server).create_session(None).await.unwrap();
    assert_eq!(session.id, "new");
}

#[tokio::test]
async fn delete_session_passes_remove_vectors_flag() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/sessions/s1"))
        .and(query_param("remove_vectors", "false"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server).delete_session("s1", false).await.unwrap();
}

#[tokio::test]
async fn restore_sends_snapshot_and_negated_flag() {
    let server = MockServer::start().await;
    let request = RestoreRequest {
        session: Session {
            id: "s1".to_string(),
            title: Some("First".to_string()),
            created_at: Some("2026-08-30T10:00:00".to_string()),
        },
        messages: vec![Message {
            id: "m1".to_string(),
            sender: Sender::User,
            text: "hello".to_string(),
            timestamp: Some("2026-08-30T10:00:01".to_string()),
        }],
        restore_vectors: true,
    };
    Mock::given(method("POST"))
        .and(path("/sessions/restore"))
        .and(body_json(json!({
            "session": {"id": "s1", "title": "First", "created_at": "2026-08-30T10:00:00"},
            "messages": [
                {"id": "m1", "sender": "user", "text": "hello", "timestamp": "2026-08-30T10:00:01"}
            ],
            "restore_vectors": true
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server).restore_session(&request).await.unwrap();
}

#[tokio::test]
async fn list_messages_passes_limit_and_offset() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sessions/s1/messages"))
        .and(query_param("limit", "20"))
        .and(query_param("offset", "40"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "m1", "sender": "user", "text": "hi", "timestamp": "2026-08-30T10:00:00"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let messages = client_for(&server).list_messages("s1", 20, 40).await.unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].sender, Sender::User);
}

#[tokio::test]
async fn post_message_serializes_lowercase_sender() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/sessions/s1/message"))
        .and(body_json(json!({"sender": "assistant", "text": "reply"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({"id": "m2", "sender": "assistant", "text": "reply", "timestamp": null}),
        ))
        .expect(1)
        .mount(&server)
        .await;

    let message = client_for(&server)
        .post_message("s1", Sender::Assistant, "reply")
        .await
        .unwrap();
    assert_eq!(message.id, "m2");
}

#[tokio::test]
async fn generate_sends_configured_model() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(body_json(json!({"prompt": "hi", "model": "llama2"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": "hello"})))
        .expect(1)
        .mount(&server)
        .await;

    let reply = client_for(&server).generate("hi").await.unwrap();
    assert_eq!(reply, "hello");
}

#[tokio::test]
async fn search_passes_threshold_bounds() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/query"))
        .and(body_json(json!({"query": "q", "score_threshold": 0.0})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"prompt": "p", "response": "r", "score": 0.91}]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/query"))
        .and(body_json(json!({"query": "q", "score_threshold": 1.0})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let results = client.search("q", 0.0).await.unwrap();
    assert_eq!(results.len(), 1);
    assert!((results[0].score - 0.91).abs() < f64::EPSILON);

    let results = client.search("q", 1.0).await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn search_tolerates_missing_results_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let results = client_for(&server).search("q", 0.5).await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn error_detail_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sessions"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"detail": "Session not found"})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).list_sessions().await.unwrap_err();
    let text = format!("{err:#}");
    assert!(text.contains("404"), "{text}");
    assert!(text.contains("Session not found"), "{text}");
}
