//! End-to-end test: gateway server + client over a Unix socket.
//!
//! Starts a real gateway, places orders through the client, resumes the
//! paused ones, and checks the decision log.
//!
//! The GatewayClient uses blocking I/O, so client calls run inside
//! `spawn_blocking` to keep the server's runtime free.

use shipgate::audit::{AuditLogger, AuditReader, AuditSink};
use shipgate::gate::{config, ApprovalGate, Decision, Status};
use shipgate::gateway::protocol::GatewayResponse;
use shipgate::gateway::{GatewayClient, GatewayServer};
use shipgate::workflow::ShippingWorkflow;
use std::sync::Arc;
use tempfile::TempDir;

/// Helper: start a gateway server and return the client + log dir.
async fn setup_gateway() -> (Arc<GatewayClient>, TempDir, tokio::task::JoinHandle<()>) {
    let log_dir = TempDir::new().unwrap();

    let yaml = include_str!("fixtures/test_gate.yaml");
    let gate = ApprovalGate::new(config::parse_config_str(yaml).unwrap());

    let logger = AuditLogger::with_path(log_dir.path().join("test-session.jsonl")).unwrap();
    let workflow = ShippingWorkflow::new(gate, Arc::new(AuditSink::new(logger)), "test-session");

    let socket_path = format!("/tmp/shipgate-test-{}.sock", uuid::Uuid::new_v4());
    let gateway = GatewayServer::new(&socket_path, workflow);
    let client = Arc::new(GatewayClient::new(&socket_path));

    let handle = tokio::spawn(async move {
        gateway.run().await.ok();
    });

    // Give the server a moment to bind the socket
    tokio::time::sleep(tokio::time::Duration::from_millis(200)).await;

    (client, log_dir, handle)
}

async fn blocking_place(client: &Arc<GatewayClient>, quantity: i64, destination: &str) -> GatewayResponse {
    let c = client.clone();
    let d = destination.to_string();
    tokio::task::spawn_blocking(move || c.place(quantity, &d).unwrap())
        .await
        .unwrap()
}

async fn blocking_resume(client: &Arc<GatewayClient>, token: &str, confirmed: bool) -> GatewayResponse {
    let c = client.clone();
    let t = token.to_string();
    tokio::task::spawn_blocking(move || c.resume(&t, confirmed).unwrap())
        .await
        .unwrap()
}

async fn blocking_pending(client: &Arc<GatewayClient>) -> GatewayResponse {
    let c = client.clone();
    tokio::task::spawn_blocking(move || c.pending().unwrap())
        .await
        .unwrap()
}

#[tokio::test]
async fn test_e2e_small_order_auto_approved() {
    let (client, _log_dir, handle) = setup_gateway().await;

    let response = blocking_place(&client, 3, "Singapore").await;
    assert!(response.ok, "{:?}", response.error);
    assert!(!response.is_paused());

    let result = response.result.unwrap();
    assert_eq!(result.status, Status::Approved);
    assert_eq!(result.order_id.as_deref(), Some("ORD-3-AUTO"));

    handle.abort();
}

#[tokio::test]
async fn test_e2e_large_order_pause_and_approve() {
    let (client, _log_dir, handle) = setup_gateway().await;

    let response = blocking_place(&client, 10, "Rotterdam").await;
    assert!(response.ok);
    assert_eq!(response.result.as_ref().unwrap().status, Status::Pending);
    let hint = response.hint.clone().unwrap();
    assert!(hint.contains("10") && hint.contains("Rotterdam"));
    let token = response.pause_token.unwrap();

    let pending = blocking_pending(&client).await;
    let pending = pending.pending.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].token.as_str(), token);

    let response = blocking_resume(&client, &token, true).await;
    assert!(response.ok, "{:?}", response.error);
    assert_eq!(
        response.result.unwrap().order_id.as_deref(),
        Some("ORD-10-HUMAN")
    );

    assert!(blocking_pending(&client).await.pending.unwrap().is_empty());

    handle.abort();
}

#[tokio::test]
async fn test_e2e_large_order_rejected() {
    let (client, _log_dir, handle) = setup_gateway().await;

    let response = blocking_place(&client, 8, "Los Angeles").await;
    let token = response.pause_token.unwrap();

    let response = blocking_resume(&client, &token, false).await;
    assert!(response.ok);
    let result = response.result.unwrap();
    assert_eq!(result.status, Status::Rejected);
    assert!(result.order_id.is_none());

    handle.abort();
}

#[tokio::test]
async fn test_e2e_resume_only_once() {
    let (client, _log_dir, handle) = setup_gateway().await;

    let token = blocking_place(&client, 12, "Busan").await.pause_token.unwrap();

    assert!(blocking_resume(&client, &token, true).await.ok);
    let second = blocking_resume(&client, &token, true).await;
    assert!(!second.ok);
    assert!(second.error.is_some());

    let bogus = blocking_resume(&client, "never-issued", true).await;
    assert!(!bogus.ok);

    handle.abort();
}

#[tokio::test]
async fn test_e2e_strict_validation_refuses() {
    let (client, _log_dir, handle) = setup_gateway().await;

    let response = blocking_place(&client, -1, "Oslo").await;
    assert!(!response.ok);
    assert!(response.error.unwrap().contains("non-negative"));

    handle.abort();
}

#[tokio::test]
async fn test_e2e_decision_log_written() {
    let (client, log_dir, handle) = setup_gateway().await;

    blocking_place(&client, 3, "Singapore").await;
    let token = blocking_place(&client, 10, "Rotterdam").await.pause_token.unwrap();
    blocking_resume(&client, &token, true).await;

    let reader = AuditReader::with_dir(log_dir.path());
    let events = reader.read_session("test-session").unwrap();
    assert_eq!(events.len(), 3);

    let decisions: Vec<Decision> = events.iter().map(|e| e.decision).collect();
    assert_eq!(
        decisions,
        vec![Decision::AutoApproved, Decision::PendingApproval, Decision::Approved]
    );
    assert_eq!(events[2].pause_token.as_deref(), Some(token.as_str()));
    assert!(events[2].decided_by.is_some());

    let summary = AuditReader::summarize(&events);
    assert_eq!(summary.containers_shipped, 13);
    assert_eq!(summary.still_pending, 0);

    handle.abort();
}

#[tokio::test]
async fn test_e2e_invalid_json_keeps_connection() {
    use std::io::{BufRead, BufReader, Write};
    use std::os::unix::net::UnixStream;

    let log_dir = TempDir::new().unwrap();
    let logger = AuditLogger::with_path(log_dir.path().join("s.jsonl")).unwrap();
    let workflow = ShippingWorkflow::new(ApprovalGate::default(), Arc::new(AuditSink::new(logger)), "s");
    let socket_path = format!("/tmp/shipgate-test-{}.sock", uuid::Uuid::new_v4());
    let gateway = GatewayServer::new(&socket_path, workflow);
    let handle = tokio::spawn(async move {
        gateway.run().await.ok();
    });
    tokio::time::sleep(tokio::time::Duration::from_millis(200)).await;

    let lines = tokio::task::spawn_blocking(move || {
        let mut stream = UnixStream::connect(&socket_path).unwrap();
        stream.write_all(b"not json\n").unwrap();
        stream
            .write_all(b"{\"op\":\"place\",\"request_id\":\"r1\",\"quantity\":2,\"destination\":\"Oslo\"}\n")
            .unwrap();
        stream.flush().unwrap();

        let mut reader = BufReader::new(stream);
        let mut out = Vec::new();
        for _ in 0..2 {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            out.push(line);
        }
        out
    })
    .await
    .unwrap();

    let first: GatewayResponse = serde_json::from_str(lines[0].trim()).unwrap();
    assert!(!first.ok);
    assert_eq!(first.request_id, "unknown");

    let second: GatewayResponse = serde_json::from_str(lines[1].trim()).unwrap();
    assert!(second.ok);
    assert_eq!(second.request_id, "r1");

    handle.abort();
}

#[tokio::test]
async fn test_e2e_oversized_line_is_refused() {
    use shipgate::gateway::server::MAX_LINE_BYTES;
    use std::io::{BufRead, BufReader, Write};
    use std::os::unix::net::UnixStream;

    let workflow = ShippingWorkflow::new(
        ApprovalGate::default(),
        Arc::new(shipgate::audit::NullSink),
        "s",
    );
    let socket_path = format!("/tmp/shipgate-test-{}.sock", uuid::Uuid::new_v4());
    let gateway = GatewayServer::new(&socket_path, workflow);
    let handle = tokio::spawn(async move {
        gateway.run().await.ok();
    });
    tokio::time::sleep(tokio::time::Duration::from_millis(200)).await;

    let line = tokio::task::spawn_blocking(move || {
        let mut stream = UnixStream::connect(&socket_path).unwrap();
        // Never terminated with a newline
        stream.write_all(&vec![b'a'; MAX_LINE_BYTES]).unwrap();
        stream.flush().unwrap();

        let mut reader = BufReader::new(stream);
        let mut line = String::new();
        reader.read_line(&mut line).unwrap();

        // The server hung up after answering
        let mut rest = String::new();
        assert_eq!(reader.read_line(&mut rest).unwrap(), 0);
        line
    })
    .await
    .unwrap();

    let response: GatewayResponse = serde_json::from_str(line.trim()).unwrap();
    assert!(!response.ok);
    assert!(response.error.unwrap().contains("exceeds"));

    handle.abort();
}
