//! Viewer client against a running signing service

use std::io::Write;
use std::net::SocketAddr;

use docsign_client::{HttpClient, NotificationKind, SignatureResult, ViewerClient};
use docsignd::config::Settings;
use docsignd::serve;
use lopdf::{dictionary, Document, Object, ObjectId};
use tempfile::NamedTempFile;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use url::Url;

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

struct TestServer {
    addr: SocketAddr,
    shutdown: oneshot::Sender<()>,
    handle: JoinHandle<anyhow::Result<()>>,
    _document: NamedTempFile,
}

impl TestServer {
    async fn start() -> Self {
        let mut document = NamedTempFile::new().expect("temp file");
        document.write_all(&pdf_with_pages(3)).expect("write pdf");

        let mut settings = Settings::default();
        settings.signing.document_path = document.path().to_path_buf();

        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");

        let (shutdown, rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            serve(listener, &settings, async move {
                let _ = rx.await;
            })
            .await
        });

        Self {
            addr,
            shutdown,
            handle,
            _document: document,
        }
    }

    fn client(&self) -> ViewerClient {
        let url: Url = format!("http://{}", self.addr).parse().expect("Valid url");
        ViewerClient::new(HttpClient::new(url)).expect("Client")
    }

    async fn stop(self) {
        let _ = self.shutdown.send(());
        self.handle
            .await
            .expect("server task")
            .expect("server exits cleanly");
    }
}

async fn sign(client: &mut ViewerClient, name: &str, pin: &str) -> SignatureResult {
    let wizard = client.open_wizard();
    wizard.set_name(name);
    wizard.next().expect("name");
    wizard.set_pin(pin);
    wizard.next().expect("pin");

    client
        .advance_wizard()
        .await
        .expect("review")
        .expect("submitted")
}

#[tokio::test]
async fn test_alice_signs() {
    let server = TestServer::start().await;
    let mut client = server.client();

    let result = sign(&mut client, "Alice", "1337").await;

    assert_eq!(result, SignatureResult::signed("Document signed successfully"));
    assert!(client.signature_complete());
    assert!(client.wizard().is_none());
    assert_eq!(
        client.notification().map(|n| (n.kind, n.message.as_str())),
        Some((NotificationKind::Success, "Document signed successfully"))
    );

    server.stop().await;
}

#[tokio::test]
async fn test_bob_wrong_pin() {
    let server = TestServer::start().await;
    let mut client = server.client();

    let result = sign(&mut client, "Bob", "0000").await;

    assert_eq!(result, SignatureResult::failed("Invalid PIN"));
    assert!(!client.signature_complete());
    assert!(client.wizard().is_some());
    assert_eq!(
        client.notification().map(|n| (n.kind, n.message.as_str())),
        Some((NotificationKind::Error, "Invalid PIN"))
    );

    server.stop().await;
}

#[tokio::test]
async fn test_whitespace_name_rejected_by_service() {
    let server = TestServer::start().await;
    let mut client = server.client();

    let result = sign(&mut client, "   ", "1337").await;

    assert_eq!(result, SignatureResult::failed("Name is required"));
    assert!(!client.signature_complete());

    server.stop().await;
}

#[tokio::test]
async fn test_document_is_served() {
    let server = TestServer::start().await;
    let mut client = server.client();

    let bytes = client.load_document().await.expect("document");

    assert_eq!(bytes, pdf_with_pages(3));
    assert_eq!(client.viewer().page_count(), Some(3));

    server.stop().await;
}
