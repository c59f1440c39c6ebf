//! Built-in gate config templates.
//!
//! - `default`: five containers or fewer ship without review
//! - `strict`: same threshold, but malformed orders are refused outright
//! - `manual-review`: every non-empty order waits for a human

pub const DEFAULT_YAML: &str = r#"# shipgate config: default
# Small orders ship immediately. Anything larger waits for a human.

gate: shipping-v1

description: >
  Orders of five containers or fewer are auto-approved. Larger orders
  pause until an operator approves or rejects them.

threshold: 5
validation: permissive
"#;

pub const STRICT_YAML: &str = r#"# shipgate config: strict
# Same threshold as the default, but negative quantities and blank
# destinations are refused before any decision is made.

gate: shipping-strict-v1

description: >
  Auto-approve up to five containers, pause above that, and refuse
  malformed orders.

threshold: 5
validation: strict
"#;

pub const MANUAL_REVIEW_YAML: &str = r#"# shipgate config: manual-review
# Every order with at least one container needs a human.

gate: shipping-manual-v1

description: >
  No automatic approvals. Every shipment pauses for review.

threshold: 0
validation: strict
"#;

/// Get a template by name.
pub fn get_default_config(name: &str) -> Option<&'static str> {
    match name {
        "default" | "shipping" => Some(DEFAULT_YAML),
        "strict" => Some(STRICT_YAML),
        "manual-review" | "manual" => Some(MANUAL_REVIEW_YAML),
        _ => None,
    }
}

/// List available templates with descriptions.
pub fn available_templates() -> Vec<(&'static str, &'static str)> {
    vec![
        ("default", "Auto-approve up to 5 containers, pause above"),
        ("strict", "Like default, and refuse malformed orders"),
        ("manual-review", "Every order waits for a human"),
    ]
}
