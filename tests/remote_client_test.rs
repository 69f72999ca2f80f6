use call_triage::{
    classifier::{Classifier, RemoteClassifier},
    models::IncomingEvent,
    telephony::CallInitiator,
};
use serde_json::json;

fn chest_pain_event() -> IncomingEvent {
    IncomingEvent::from_json(json!({
        "transcript": "chest pain",
        "extracted_data": {"location": "Main St", "issues": "chest pain"},
        "context_details": {"recipient_phone_number": "555-1111"}
    }))
    .unwrap()
}

fn classifier_for(endpoint: String) -> RemoteClassifier {
    RemoteClassifier::new(
        endpoint,
        "llama-3.3-70b-versatile".to_string(),
        "test-key".to_string(),
        0.5,
        1024,
        5,
    )
    .unwrap()
}

/// A well-formed oracle reply comes back as the raw answer text
#[tokio::test]
async fn test_classify_returns_answer_content() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .match_header("authorization", "Bearer test-key")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "choices": [
                    {"index": 0, "message": {"role": "assistant", "content": "{\"status\": \"emergency\", \"location\": \"Main St\"}"}}
                ]
            }"#,
        )
        .create_async()
        .await;

    let classifier = classifier_for(format!("{}/v1/chat/completions", server.url()));
    let answer = classifier.classify(&chest_pain_event()).await.unwrap();

    assert_eq!(answer, r#"{"status": "emergency", "location": "Main St"}"#);
    mock.assert_async().await;
}

/// The request carries the role-tagged conversation and sampling parameters
#[tokio::test]
async fn test_classify_sends_expected_request_shape() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .match_body(mockito::Matcher::PartialJson(json!({
            "model": "llama-3.3-70b-versatile",
            "messages": [
                {"role": "system", "content": "You are an emergency evaluation assistant."},
                {"role": "user"}
            ],
            "temperature": 0.5,
            "max_tokens": 1024,
            "stream": false
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"choices": [{"index": 0, "message": {"role": "assistant", "content": "ok"}}]}"#)
        .create_async()
        .await;

    let classifier = classifier_for(format!("{}/v1/chat/completions", server.url()));
    classifier.classify(&chest_pain_event()).await.unwrap();

    mock.assert_async().await;
}

/// Non-success oracle status is an unavailability, not a fatal error shape
#[tokio::test]
async fn test_classify_maps_server_error_to_unavailable() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/v1/chat/completions")
        .with_status(503)
        .with_body("overloaded")
        .create_async()
        .await;

    let classifier = classifier_for(format!("{}/v1/chat/completions", server.url()));
    let err = classifier.classify(&chest_pain_event()).await.unwrap_err();

    assert_eq!(err.error_code(), "CLASSIFIER_UNAVAILABLE");
}

/// A reply without choices is treated like an unavailable oracle
#[tokio::test]
async fn test_classify_rejects_empty_choices() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"choices": []}"#)
        .create_async()
        .await;

    let classifier = classifier_for(format!("{}/v1/chat/completions", server.url()));
    let err = classifier.classify(&chest_pain_event()).await.unwrap_err();

    assert_eq!(err.error_code(), "CLASSIFIER_UNAVAILABLE");
}

/// An unreachable endpoint is an unavailability
#[tokio::test]
async fn test_classify_maps_connection_failure_to_unavailable() {
    // Port 9 (discard) is not listening.
    let classifier = classifier_for("http://127.0.0.1:9/v1/chat/completions".to_string());
    let err = classifier.classify(&chest_pain_event()).await.unwrap_err();

    assert_eq!(err.error_code(), "CLASSIFIER_UNAVAILABLE");
}

/// Vendor call success returns the vendor's JSON body
#[tokio::test]
async fn test_initiate_call_success() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/call")
        .match_header("authorization", "Bearer vendor-token")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"call_id": "c-42", "state": "queued"}"#)
        .create_async()
        .await;

    let initiator = CallInitiator::new(
        format!("{}/call", server.url()),
        "agent-1".to_string(),
        "vendor-token".to_string(),
        5,
    )
    .unwrap();

    let result = initiator.initiate_call("555-1111").await.unwrap();

    assert_eq!(result["call_id"], "c-42");
    mock.assert_async().await;
}

/// Vendor failure surfaces as a telephony error
#[tokio::test]
async fn test_initiate_call_vendor_failure() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/call")
        .with_status(500)
        .with_body("vendor exploded")
        .create_async()
        .await;

    let initiator = CallInitiator::new(
        format!("{}/call", server.url()),
        "agent-1".to_string(),
        "vendor-token".to_string(),
        5,
    )
    .unwrap();

    let err = initiator.initiate_call("555-1111").await.unwrap_err();
    assert_eq!(err.error_code(), "TELEPHONY_ERROR");
}
