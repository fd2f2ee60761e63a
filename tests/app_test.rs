mod common;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use common::{
    binary, client, document_success, ocr_success, MemoryWriter, MockTransport, Recorded,
    VecSource, BASE_URL,
};
use ocr_orchestrator::{App, Config, ImageInput, ProcessingStats};
use serde_json::json;
use std::time::Duration;

fn app(transport: MockTransport, timeout_secs: Option<u64>) -> App<MockTransport, MemoryWriter> {
    let config = Config {
        api_base_url: BASE_URL.to_string(),
        save_image: true,
        download_stem: "scan".to_string(),
        workflow_timeout_secs: timeout_secs,
        ..Default::default()
    };
    App::with_client(config, client(transport))
}

#[tokio::test]
async fn test_run_counts_success_and_failure() {
    let image = b"\x89PNG".to_vec();
    let encoded = STANDARD.encode(&image);
    let mut app = app(
        MockTransport::new()
            .respond(200, ocr_success("doc-1"))
            .respond(200, document_success("doc-1", "image/png", Some(&encoded)))
            .respond_raw(500, "internal error"),
        None,
    );

    let stats = tokio_test::assert_ok!(
        app.run(VecSource(vec![
            binary("brain_mri.png", &image),
            binary("chest.jpg", b"jpeg"),
        ]))
        .await
    );

    assert_eq!(
        stats,
        ProcessingStats {
            success: 1,
            failed: 1,
            total: 2
        }
    );
    assert_eq!(
        app.client().writer().files(),
        vec![("scan_brain_mri.png".to_string(), image)]
    );
    assert_eq!(app.client().current_document_id(), Some("doc-1"));
}

#[tokio::test]
async fn test_run_without_inputs() {
    let mut app = app(MockTransport::new(), None);

    let stats = tokio_test::assert_ok!(app.run(VecSource(Vec::new())).await);

    assert_eq!(stats, ProcessingStats::default());
    assert!(app.client().transport().requests().is_empty());
}

#[tokio::test]
async fn test_run_routes_base64_input_to_base64_endpoint() {
    let mut app = app(MockTransport::new().respond(200, ocr_success("doc-b64")), None);

    let stats = tokio_test::assert_ok!(
        app.run(VecSource(vec![ImageInput::Base64 {
            label: "sample.b64".to_string(),
            data: "data:image/png;base64,iVBORw0KGgo=".to_string(),
        }]))
        .await
    );

    assert_eq!(stats.success, 1);
    assert_eq!(
        app.client().transport().requests(),
        vec![Recorded::Json {
            url: format!("{}/ocr/base64", BASE_URL),
            body: json!({ "image": "iVBORw0KGgo=" }),
        }]
    );
    assert_eq!(app.client().current_document_id(), Some("doc-b64"));
    assert!(app.client().writer().files().is_empty());
}

#[tokio::test]
async fn test_run_counts_rejected_base64_as_failure() {
    let mut app = app(
        MockTransport::new().respond(200, json!({ "success": false, "error": "bad image" })),
        None,
    );

    let stats = tokio_test::assert_ok!(
        app.run(VecSource(vec![ImageInput::Base64 {
            label: "broken.b64".to_string(),
            data: "AAAA".to_string(),
        }]))
        .await
    );

    assert_eq!(stats.failed, 1);
    assert_eq!(app.client().current_document_id(), None);
}

#[tokio::test(start_paused = true)]
async fn test_slow_workflow_times_out_and_next_input_proceeds() {
    let mut app = app(
        MockTransport::new()
            .respond_after(Duration::from_secs(30), 200, ocr_success("doc-slow"))
            .respond(200, ocr_success("doc-fast"))
            .respond(200, document_success("doc-fast", "image/png", None)),
        Some(5),
    );

    let stats = tokio_test::assert_ok!(
        app.run(VecSource(vec![
            binary("slow.png", b"slow"),
            binary("fast.png", b"fast"),
        ]))
        .await
    );

    assert_eq!(
        stats,
        ProcessingStats {
            success: 1,
            failed: 1,
            total: 2
        }
    );
    // 超时的提交结果被丢弃，不会写入会话
    assert_eq!(app.client().current_document_id(), Some("doc-fast"));
    assert_eq!(app.client().transport().requests().len(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_workflow_within_timeout_succeeds() {
    let mut app = app(
        MockTransport::new()
            .respond_after(Duration::from_secs(1), 200, ocr_success("doc-1"))
            .respond(200, document_success("doc-1", "image/png", None)),
        Some(5),
    );

    let stats = tokio_test::assert_ok!(app.run(VecSource(vec![binary("a.png", b"a")])).await);

    assert_eq!(stats.success, 1);
    assert_eq!(app.client().current_document_id(), Some("doc-1"));
}
