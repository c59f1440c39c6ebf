//! Integration tests for the approval gate.
//! Tests the full flow: YAML parsing → gate creation → evaluation.

use shipgate::gate::{config, defaults, ApprovalGate, ConfirmationAnswer, Decision, ShipmentRequest, Status};

/// Helper: load the test fixture config and create a gate.
fn test_gate() -> ApprovalGate {
    let yaml = include_str!("fixtures/test_gate.yaml");
    let config = config::parse_config_str(yaml).expect("Failed to parse test config");
    ApprovalGate::new(config)
}

#[test]
fn test_builtin_templates() {
    let gate = ApprovalGate::new(config::parse_config_str(defaults::DEFAULT_YAML).unwrap());
    assert_eq!(gate.gate_name(), "shipping-v1");
    assert_eq!(gate.threshold(), 5);

    let gate = ApprovalGate::new(config::parse_config_str(defaults::STRICT_YAML).unwrap());
    assert_eq!(gate.gate_name(), "shipping-strict-v1");
}

#[test]
fn test_scenario_small_order() {
    let outcome = test_gate().evaluate(&ShipmentRequest::new(3, "Singapore"), None);
    assert!(outcome.result.is_approved());
    assert_eq!(outcome.result.status, Status::Approved);
    assert_eq!(outcome.result.order_id.as_deref(), Some("ORD-3-AUTO"));
}

#[test]
fn test_scenario_large_order_approved() {
    let gate = test_gate();
    let request = ShipmentRequest::new(10, "Rotterdam");

    let first = gate.evaluate(&request, None);
    assert_eq!(first.result.status, Status::Pending);
    let confirmation = first.confirmation.unwrap();
    assert!(confirmation.hint.contains("10"));
    assert!(confirmation.hint.contains("Rotterdam"));

    // The caller re-presents the request it was paused with
    let resumed = gate.evaluate(&confirmation.payload, Some(&ConfirmationAnswer::approve("ops")));
    assert_eq!(resumed.result.status, Status::Approved);
    assert_eq!(resumed.result.order_id.as_deref(), Some("ORD-10-HUMAN"));
}

#[test]
fn test_scenario_large_order_rejected() {
    let gate = test_gate();
    let request = ShipmentRequest::new(8, "Los Angeles");

    assert_eq!(gate.evaluate(&request, None).decision, Decision::PendingApproval);

    let resumed = gate.evaluate(&request, Some(&ConfirmationAnswer::reject()));
    assert!(!resumed.result.is_approved());
    assert_eq!(resumed.result.status, Status::Rejected);
    assert!(resumed.result.order_id.is_none());
}

#[test]
fn test_every_quantity_up_to_threshold_auto_approves() {
    let gate = test_gate();
    for quantity in 0..=gate.threshold() {
        let outcome = gate.evaluate(&ShipmentRequest::new(quantity, "Busan"), None);
        assert_eq!(outcome.decision, Decision::AutoApproved, "quantity {}", quantity);
        assert_eq!(outcome.result.order_id, Some(format!("ORD-{}-AUTO", quantity)));
    }
}

#[test]
fn test_every_large_quantity_pauses_with_payload() {
    let gate = test_gate();
    for quantity in [6, 7, 50, 10_000] {
        let request = ShipmentRequest::new(quantity, "Valparaíso");
        let outcome = gate.evaluate(&request, None);
        assert_eq!(outcome.decision, Decision::PendingApproval, "quantity {}", quantity);
        assert_eq!(outcome.confirmation.unwrap().payload, request);
    }
}

#[test]
fn test_tool_result_json_shape() {
    let outcome = test_gate().evaluate(&ShipmentRequest::new(3, "Singapore"), None);
    let json = serde_json::to_value(&outcome.result).unwrap();
    assert_eq!(json["status"], "approved");
    assert_eq!(json["order_id"], "ORD-3-AUTO");
    assert_eq!(json["quantity"], 3);
    assert_eq!(json["destination"], "Singapore");
    assert_eq!(json["message"], "Order auto-approved: 3 containers to Singapore");

    let outcome = test_gate().evaluate(&ShipmentRequest::new(10, "Rotterdam"), None);
    let json = serde_json::to_value(&outcome.result).unwrap();
    assert_eq!(json["status"], "pending");
    assert_eq!(json["message"], "Order for 10 containers requires approval");
    assert!(json.get("order_id").is_none());
}

#[test]
fn test_strict_fixture_validates() {
    let gate = test_gate();
    assert!(gate.validate(&ShipmentRequest::new(-1, "Oslo")).is_err());
    assert!(gate.validate(&ShipmentRequest::new(1, "")).is_err());
    assert!(gate.validate(&ShipmentRequest::new(1, "Oslo")).is_ok());
}
