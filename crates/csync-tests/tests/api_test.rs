//! End-to-end tests for the browser-facing API
//!
//! Full stack: CsyncClient -> HTTP -> router -> ContentSyncProxy -> MemoryStore.

use std::sync::Arc;

use csync_api::{create_router, AppState};
use csync_client::testing::TestServer;
use csync_client::CsyncClientError;
use csync_core::encoding;
use csync_core::testing::MemoryStore;
use pretty_assertions::assert_eq;
use serde_json::json;

async fn start_server(store: Arc<MemoryStore>) -> TestServer {
    let state = AppState::new(store);
    TestServer::start(create_router(state))
        .await
        .expect("test server")
}

#[tokio::test]
async fn health_reports_ok() {
    let store = Arc::new(MemoryStore::new());
    let server = start_server(store).await;

    assert!(server.client().health().await.unwrap());
}

#[tokio::test]
async fn first_upload_creates_without_revision() {
    let store = Arc::new(MemoryStore::new());
    let server = start_server(store.clone()).await;

    server
        .client()
        .upload("contrato.pdf", b"%PDF-1.4 contrato", None)
        .await
        .unwrap();

    let puts = store.recorded_puts();
    assert_eq!(puts.len(), 1);
    assert_eq!(puts[0].path, "contratos/contratos-assinados/contrato.pdf");
    assert_eq!(puts[0].revision, None);
    assert_eq!(puts[0].message, "Upload: contrato.pdf");
}

#[tokio::test]
async fn second_upload_carries_exact_revision() {
    let store = Arc::new(MemoryStore::new());
    let server = start_server(store.clone()).await;

    server
        .client()
        .upload("ficha-ana.pdf", b"v1", Some("ficha"))
        .await
        .unwrap();
    let revision = store.revision_of("dados/fichas/ficha-ana.pdf").unwrap();

    server
        .client()
        .upload("ficha-ana.pdf", b"v2", Some("ficha"))
        .await
        .unwrap();

    let puts = store.recorded_puts();
    assert_eq!(puts.len(), 2);
    assert_eq!(puts[1].revision.as_deref(), Some(revision.as_str()));
    // and the store moved the file to a fresh revision
    assert_ne!(
        store.revision_of("dados/fichas/ficha-ana.pdf").unwrap(),
        revision
    );
}

#[tokio::test]
async fn lookup_failure_still_writes() {
    let store = Arc::new(MemoryStore::new());
    store.fail_reads();
    let server = start_server(store.clone()).await;

    server
        .client()
        .upload("contrato.pdf", b"data", None)
        .await
        .unwrap();

    let puts = store.recorded_puts();
    assert_eq!(puts.len(), 1);
    assert_eq!(puts[0].revision, None);
}

#[tokio::test]
async fn write_failure_surfaces_store_details() {
    let store = Arc::new(MemoryStore::new());
    store.reject_writes(422, json!({"message": "Invalid request"}));
    let server = start_server(store.clone()).await;

    let err = server
        .client()
        .upload("contrato.pdf", b"data", None)
        .await
        .unwrap_err();

    match err {
        CsyncClientError::ServerError {
            status, details, ..
        } => {
            assert_eq!(status, 502);
            assert_eq!(details.unwrap()["message"], "Invalid request");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn missing_fields_rejected_before_any_outbound_call() {
    let store = Arc::new(MemoryStore::new());
    let server = start_server(store.clone()).await;

    let response = server
        .client()
        .http_client()
        .post(format!("{}/upload", server.base_url()))
        .json(&json!({"conteudoBase64": "Zm9v"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("nomeArquivo"));
    assert!(store.recorded_puts().is_empty());
}

#[tokio::test]
async fn empty_file_name_rejected() {
    let store = Arc::new(MemoryStore::new());
    let server = start_server(store.clone()).await;

    let err = server
        .client()
        .upload_base64("", "Zm9v", None)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        CsyncClientError::ServerError { status: 400, .. }
    ));
    assert!(store.recorded_puts().is_empty());
}

#[tokio::test]
async fn undecodable_base64_rejected() {
    let store = Arc::new(MemoryStore::new());
    let server = start_server(store.clone()).await;

    let err = server
        .client()
        .upload_base64("a.pdf", "not*base64!!", None)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        CsyncClientError::ServerError { status: 400, .. }
    ));
    assert!(store.recorded_puts().is_empty());
}

#[tokio::test]
async fn traversal_file_name_rejected() {
    let store = Arc::new(MemoryStore::new());
    let server = start_server(store.clone()).await;

    for name in ["../segredo.pdf", "a/b.pdf", ".."] {
        let err = server
            .client()
            .upload_base64(name, "Zm9v", None)
            .await
            .unwrap_err();
        assert!(
            matches!(err, CsyncClientError::ServerError { status: 400, .. }),
            "name {:?} should be rejected",
            name
        );
    }
    assert!(store.recorded_puts().is_empty());
}

#[tokio::test]
async fn schedule_saved_pretty_printed() {
    let store = Arc::new(MemoryStore::new());
    let server = start_server(store.clone()).await;

    let schedule = json!({"eventos": [{"dia": "2026-09-01", "cliente": "Maria"}]});
    server.client().save_schedule(&schedule).await.unwrap();

    let puts = store.recorded_puts();
    assert_eq!(puts.len(), 1);
    assert_eq!(puts[0].path, "dados/agendamento.json");
    assert_eq!(puts[0].message, "Sincronização de agenda");

    let stored = encoding::from_base64(&puts[0].content_base64).unwrap();
    let text = String::from_utf8(stored).unwrap();
    assert!(text.contains('\n'), "schedule should be pretty-printed");
    let round_trip: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(round_trip, schedule);
}

#[tokio::test]
async fn schedule_update_reuses_current_revision() {
    let store = Arc::new(MemoryStore::new());
    let server = start_server(store.clone()).await;

    server
        .client()
        .save_schedule(&json!({"eventos": []}))
        .await
        .unwrap();
    let revision = store.revision_of("dados/agendamento.json").unwrap();

    server
        .client()
        .save_schedule(&json!({"eventos": [1]}))
        .await
        .unwrap();

    let puts = store.recorded_puts();
    assert_eq!(puts.len(), 2);
    assert_eq!(puts[1].revision.as_deref(), Some(revision.as_str()));
}

#[tokio::test]
async fn uploaded_ficha_reads_back_identical() {
    let store = Arc::new(MemoryStore::new());
    let server = start_server(store.clone()).await;

    let payload = b"%PDF-1.4 ficha da Ana".to_vec();
    server
        .client()
        .upload("ficha-ana.pdf", &payload, Some("ficha"))
        .await
        .unwrap();

    let bytes = server.client().get_ficha_bytes("ficha-ana.pdf").await.unwrap();
    assert_eq!(bytes, payload);

    let listing = server.client().list_fichas().await.unwrap();
    assert_eq!(listing.files.len(), 1);
    assert_eq!(listing.files[0].name, "ficha-ana.pdf");
}

#[tokio::test]
async fn missing_ficha_is_404() {
    let store = Arc::new(MemoryStore::new());
    let server = start_server(store).await;

    let err = server.client().get_ficha("nope.pdf").await.unwrap_err();
    assert!(matches!(err, CsyncClientError::NotFound(_)));
}
