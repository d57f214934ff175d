//! Integration tests for docsign-client using mockito

use std::time::Duration;

use docsign_client::{
    Error, HttpClient, NotificationKind, RetryPolicy, SignatureRequest, SigningConnector,
    ViewerClient, WizardStep,
};
use lopdf::{dictionary, Document, Object, ObjectId};
use mockito::Matcher;
use serde_json::json;

fn pdf_with_pages(page_count: usize) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id: ObjectId = doc.new_object_id();

    let kids: Vec<Object> = (0..page_count)
        .map(|_| {
            doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            })
            .into()
        })
        .collect();

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count as i64,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).expect("failed to save test PDF");
    buf
}

fn http_client(server: &mockito::ServerGuard) -> HttpClient {
    HttpClient::new(server.url().parse().expect("Valid url"))
}

async fn mock_status(server: &mut mockito::ServerGuard) -> mockito::Mock {
    server
        .mock("GET", "/api/status")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"status":"ok"}"#)
        .create_async()
        .await
}

// === HttpClient tests ===

#[tokio::test]
async fn test_post_sign_success() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/api/sign")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({"name": "Alice", "pin": "1337"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message":"Document signed successfully"}"#)
        .create_async()
        .await;

    let response = http_client(&server)
        .post_sign(&SignatureRequest::new("Alice", "1337"))
        .await
        .expect("Sign should succeed");

    assert_eq!(response.message, "Document signed successfully");

    mock.assert_async().await;
}

#[tokio::test]
async fn test_post_sign_invalid_pin() {
    let mut server = mockito::Server::new_async().await;

    let _mock = server
        .mock("POST", "/api/sign")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error":"Invalid PIN"}"#)
        .create_async()
        .await;

    let err = http_client(&server)
        .post_sign(&SignatureRequest::new("Bob", "0000"))
        .await
        .expect_err("Wrong PIN");

    match err {
        Error::Auth(message) => assert_eq!(message, "Invalid PIN"),
        other => panic!("Expected Auth error, got {other}"),
    }
}

#[tokio::test]
async fn test_post_sign_bad_request() {
    let mut server = mockito::Server::new_async().await;

    let _mock = server
        .mock("POST", "/api/sign")
        .with_status(400)
        .with_body(r#"{"error":"Name is required"}"#)
        .create_async()
        .await;

    let err = http_client(&server)
        .post_sign(&SignatureRequest::new("", "1337"))
        .await
        .expect_err("Empty name");

    assert!(matches!(err, Error::Validation(message) if message == "Name is required"));
}

#[tokio::test]
async fn test_non_json_error_body() {
    let mut server = mockito::Server::new_async().await;

    let _mock = server
        .mock("GET", "/api/status")
        .with_status(502)
        .with_body("Bad Gateway")
        .create_async()
        .await;

    let err = http_client(&server)
        .get_status()
        .await
        .expect_err("Proxy error");

    assert!(matches!(
        err,
        Error::Server { status: 502, message } if message == "Bad Gateway"
    ));
}

#[tokio::test]
async fn test_fetch_document() {
    let mut server = mockito::Server::new_async().await;
    let pdf = pdf_with_pages(2);

    let mock = server
        .mock("GET", "/api/pdf")
        .with_status(200)
        .with_header("content-type", "application/pdf")
        .with_body(&pdf)
        .create_async()
        .await;

    let client = http_client(&server);
    let url = client.document_url().expect("Valid url");
    let bytes = client.fetch_document(&url).await.expect("Document");

    assert_eq!(bytes, pdf);

    mock.assert_async().await;
}

#[tokio::test]
async fn test_connection_refused() {
    let client = HttpClient::builder("http://127.0.0.1:1".parse().expect("Valid url"))
        .timeout(Duration::from_secs(2))
        .build()
        .expect("Client builds");

    let err = client.get_status().await.expect_err("Nothing listens");

    assert!(matches!(err, Error::Network(_)));
}

// === ViewerClient tests ===

#[tokio::test]
async fn test_viewer_signs_once() {
    let mut server = mockito::Server::new_async().await;

    let status = mock_status(&mut server).await;
    let sign = server
        .mock("POST", "/api/sign")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message":"Document signed successfully"}"#)
        .expect(1)
        .create_async()
        .await;

    let mut client = ViewerClient::new(http_client(&server)).expect("Client");

    let wizard = client.open_wizard();
    wizard.set_name("Alice");
    wizard.next().expect("name");
    wizard.set_pin("1337");
    wizard.next().expect("pin");

    let result = client
        .advance_wizard()
        .await
        .expect("Review")
        .expect("Submitted");

    assert!(result.success);
    assert!(client.signature_complete());
    assert!(client.wizard().is_none());
    assert_eq!(
        client.notification().map(|n| n.kind),
        Some(NotificationKind::Success)
    );

    status.assert_async().await;
    sign.assert_async().await;
}

#[tokio::test]
async fn test_viewer_wrong_pin() {
    let mut server = mockito::Server::new_async().await;

    let _status = mock_status(&mut server).await;
    let sign = server
        .mock("POST", "/api/sign")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error":"Invalid PIN"}"#)
        .expect(1)
        .create_async()
        .await;

    let mut client = ViewerClient::new(http_client(&server)).expect("Client");

    let wizard = client.open_wizard();
    wizard.set_name("Bob");
    wizard.next().expect("name");
    wizard.set_pin("0000");
    wizard.next().expect("pin");

    let result = client
        .advance_wizard()
        .await
        .expect("Review")
        .expect("Submitted");

    assert!(!result.success);
    assert_eq!(result.message, "Invalid PIN");
    assert!(!client.signature_complete());
    assert_eq!(
        client.wizard().map(|wizard| wizard.step()),
        Some(WizardStep::Review)
    );

    sign.assert_async().await;
}

#[tokio::test]
async fn test_viewer_probe_failure_skips_sign() {
    let mut server = mockito::Server::new_async().await;

    let status = server
        .mock("GET", "/api/status")
        .with_status(503)
        .with_body(r#"{"error":"Unavailable"}"#)
        .expect(2)
        .create_async()
        .await;
    let sign = server
        .mock("POST", "/api/sign")
        .expect(0)
        .create_async()
        .await;

    let policy = RetryPolicy {
        max_attempts: 2,
        initial_backoff: Duration::from_millis(10),
        max_backoff: Duration::from_millis(10),
    };
    let mut client = ViewerClient::new(http_client(&server))
        .expect("Client")
        .with_retry_policy(policy);

    let result = client
        .submit_signature(SignatureRequest::new("Alice", "1337"))
        .await;

    assert!(!result.success);
    assert_eq!(result.message, "Unavailable");
    assert!(!client.signature_complete());

    status.assert_async().await;
    sign.assert_async().await;
}

#[tokio::test]
async fn test_viewer_loads_page_count() {
    let mut server = mockito::Server::new_async().await;

    let _pdf = server
        .mock("GET", "/api/pdf")
        .with_status(200)
        .with_header("content-type", "application/pdf")
        .with_body(pdf_with_pages(5))
        .create_async()
        .await;

    let mut client = ViewerClient::new(http_client(&server)).expect("Client");
    client.load_document().await.expect("Document");

    let viewer = client.viewer_mut();
    assert_eq!(viewer.page_count(), Some(5));
    for _ in 0..6 {
        viewer.next_page();
    }
    assert_eq!(viewer.current_page(), 5);
}
