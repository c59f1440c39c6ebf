//! Core types for the approval gate.
//!
//! A shipping request comes in, the gate decides. Either it is approved on the
//! spot, or it is parked behind a confirmation request until a human answers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Orders at or below this many containers never need a human.
pub const DEFAULT_THRESHOLD: i64 = 5;

/// What the agent asked for: ship `quantity` containers to `destination`.
///
/// `quantity` is signed on purpose so that whatever arrives on the wire reaches
/// the gate. Only strict validation refuses negative values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentRequest {
    pub quantity: i64,
    pub destination: String,
}

impl ShipmentRequest {
    pub fn new(quantity: i64, destination: impl Into<String>) -> Self {
        Self {
            quantity,
            destination: destination.into(),
        }
    }
}

impl fmt::Display for ShipmentRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} containers to {}", self.quantity, self.destination)
    }
}

/// The gate's verdict for one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// Small order, approved without a human.
    AutoApproved,
    /// Large order on its first call. Not final: the caller must resume it.
    PendingApproval,
    /// Large order, a human said yes.
    Approved,
    /// Large order, a human said no.
    Rejected,
}

impl Decision {
    /// The `status` value the agent sees.
    pub fn status(&self) -> Status {
        match self {
            Decision::AutoApproved | Decision::Approved => Status::Approved,
            Decision::PendingApproval => Status::Pending,
            Decision::Rejected => Status::Rejected,
        }
    }

    /// Whether this decision ends the request's lifecycle.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Decision::PendingApproval)
    }

    /// Parse a decision from user input (log filters, mostly).
    pub fn from_str_loose(s: &str) -> Option<Decision> {
        match s.to_lowercase().trim() {
            "auto" | "auto_approved" | "auto-approved" => Some(Decision::AutoApproved),
            "pending" | "pending_approval" | "paused" => Some(Decision::PendingApproval),
            "approved" | "human" | "approve" => Some(Decision::Approved),
            "rejected" | "reject" | "denied" => Some(Decision::Rejected),
            _ => None,
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::AutoApproved => write!(f, "auto_approved"),
            Decision::PendingApproval => write!(f, "pending_approval"),
            Decision::Approved => write!(f, "approved"),
            Decision::Rejected => write!(f, "rejected"),
        }
    }
}

/// Tri-state status reported back to the agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Approved,
    Pending,
    Rejected,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Approved => write!(f, "approved"),
            Status::Pending => write!(f, "pending"),
            Status::Rejected => write!(f, "rejected"),
        }
    }
}

/// Emitted when an order needs a human. Carries everything needed to show
/// the operator what they are signing off on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmationRequest {
    pub hint: String,
    pub payload: ShipmentRequest,
}

/// The human's answer, handed back to the gate on the resumed call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmationAnswer {
    pub confirmed: bool,
    /// Who decided (e.g. "terminal", "auto", "remote")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decided_by: Option<String>,
}

impl ConfirmationAnswer {
    pub fn approve(by: impl Into<String>) -> Self {
        Self {
            confirmed: true,
            decided_by: Some(by.into()),
        }
    }

    pub fn reject() -> Self {
        Self {
            confirmed: false,
            decided_by: None,
        }
    }
}

/// The mapping returned to the agent as the tool's result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolResult {
    pub status: Status,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
}

impl ToolResult {
    pub fn is_approved(&self) -> bool {
        self.status == Status::Approved
    }

    pub fn is_pending(&self) -> bool {
        self.status == Status::Pending
    }

    pub fn is_rejected(&self) -> bool {
        self.status == Status::Rejected
    }
}

/// Everything one gate call produces.
///
/// `confirmation` is `Some` exactly when `decision` is `PendingApproval`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateOutcome {
    pub decision: Decision,
    pub result: ToolResult,
    pub confirmation: Option<ConfirmationRequest>,
}

impl GateOutcome {
    pub fn order_id(&self) -> Option<&str> {
        self.result.order_id.as_deref()
    }
}

/// How much the gate trusts its input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    /// Threshold comparison only; any quantity and destination is accepted.
    #[default]
    Permissive,
    /// Refuse negative quantities and blank destinations before deciding.
    Strict,
}

impl fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationMode::Permissive => write!(f, "permissive"),
            ValidationMode::Strict => write!(f, "strict"),
        }
    }
}

/// A gate configuration — a named threshold and validation mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateConfig {
    /// Config name (e.g., "shipping-v1")
    pub gate: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Largest quantity approved without a human.
    pub threshold: i64,

    #[serde(default)]
    pub validation: ValidationMode,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            gate: "shipping-v1".to_string(),
            description: None,
            threshold: DEFAULT_THRESHOLD,
            validation: ValidationMode::Permissive,
        }
    }
}

/// Input the gate refused to decide on (strict validation only).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GateError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}
