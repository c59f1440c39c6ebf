//! Integration tests for the gateway protocol.
//! Tests the JSON shape of gateway messages.

use shipgate::gate::{Status, ToolResult};
use shipgate::gateway::protocol::{GatewayRequest, GatewayResponse};

#[test]
fn test_place_request_wire_format() {
    let line = r#"{"op":"place","request_id":"req-001","quantity":10,"destination":"Rotterdam"}"#;
    let parsed: GatewayRequest = serde_json::from_str(line).unwrap();

    match parsed {
        GatewayRequest::Place {
            ref request_id,
            quantity,
            ref destination,
        } => {
            assert_eq!(request_id, "req-001");
            assert_eq!(quantity, 10);
            assert_eq!(destination, "Rotterdam");
        }
        other => panic!("expected place, got {:?}", other),
    }
    assert_eq!(parsed.request_id(), "req-001");
}

#[test]
fn test_resume_request_optional_decider() {
    let line = r#"{"op":"resume","request_id":"r","pause_token":"tok","confirmed":false}"#;
    let parsed: GatewayRequest = serde_json::from_str(line).unwrap();
    assert!(matches!(
        parsed,
        GatewayRequest::Resume {
            confirmed: false,
            decided_by: None,
            ..
        }
    ));
}

#[test]
fn test_negative_quantity_reaches_gate() {
    let line = r#"{"op":"place","request_id":"r","quantity":-4,"destination":""}"#;
    assert!(serde_json::from_str::<GatewayRequest>(line).is_ok());
}

#[test]
fn test_unknown_op_rejected() {
    let line = r#"{"op":"cancel","request_id":"r"}"#;
    assert!(serde_json::from_str::<GatewayRequest>(line).is_err());
}

#[test]
fn test_paused_response() {
    let result = ToolResult {
        status: Status::Pending,
        message: "Order for 10 containers requires approval".to_string(),
        order_id: None,
        quantity: None,
        destination: None,
    };
    let response = GatewayResponse::paused(
        "req-002".to_string(),
        result,
        "tok-1",
        "Large order: 10 containers to Rotterdam. Approve?",
    );
    let json = serde_json::to_value(&response).unwrap();

    assert_eq!(json["ok"], true);
    assert_eq!(json["pause_token"], "tok-1");
    assert_eq!(json["result"]["status"], "pending");
    assert!(json.get("error").is_none());
    assert!(json.get("pending").is_none());
}

#[test]
fn test_error_response() {
    let response = GatewayResponse::error("req-003".to_string(), "unknown or already resumed pause token: x");
    let json = serde_json::to_string(&response).unwrap();
    let parsed: GatewayResponse = serde_json::from_str(&json).unwrap();

    assert!(!parsed.ok);
    assert!(parsed.result.is_none());
    assert!(!parsed.is_paused());
    assert!(parsed.error.unwrap().contains("pause token"));
}
