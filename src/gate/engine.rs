//! The approval gate — decides a shipping order in one or two calls.
//!
//! First call (no resume state): small orders are approved immediately,
//! large ones come back as `PendingApproval` with a confirmation request.
//! Resumed call: the human's answer is final, approved or rejected.
//!
//! The gate keeps nothing between calls. Whoever pauses the order must hand
//! back the same request together with the answer.

use crate::gate::types::*;

/// A configured gate. Cheap to share; every call is a pure function of its
/// arguments.
#[derive(Debug, Clone)]
pub struct ApprovalGate {
    config: GateConfig,
}

impl ApprovalGate {
    pub fn new(config: GateConfig) -> Self {
        Self { config }
    }

    /// A gate with an explicit threshold and default everything else.
    pub fn with_threshold(threshold: i64) -> Self {
        Self::new(GateConfig {
            threshold,
            ..Default::default()
        })
    }

    /// Decide one call for `request`.
    ///
    /// `resume` is `None` on the first call and carries the human's answer
    /// on the resumed call. When it is present the threshold is not looked
    /// at again: the caller is trusted to resume only what was paused.
    pub fn evaluate(
        &self,
        request: &ShipmentRequest,
        resume: Option<&ConfirmationAnswer>,
    ) -> GateOutcome {
        match resume {
            None if request.quantity <= self.config.threshold => GateOutcome {
                decision: Decision::AutoApproved,
                result: approved_result(
                    request,
                    "AUTO",
                    format!("Order auto-approved: {}", request),
                ),
                confirmation: None,
            },
            None => GateOutcome {
                decision: Decision::PendingApproval,
                result: ToolResult {
                    status: Status::Pending,
                    message: format!(
                        "Order for {} containers requires approval",
                        request.quantity
                    ),
                    order_id: None,
                    quantity: None,
                    destination: None,
                },
                confirmation: Some(ConfirmationRequest {
                    hint: format!("Large order: {}. Approve?", request),
                    payload: request.clone(),
                }),
            },
            Some(answer) if answer.confirmed => GateOutcome {
                decision: Decision::Approved,
                result: approved_result(request, "HUMAN", format!("Order approved: {}", request)),
                confirmation: None,
            },
            Some(_) => GateOutcome {
                decision: Decision::Rejected,
                result: ToolResult {
                    status: Status::Rejected,
                    message: format!("Order rejected: {}", request),
                    order_id: None,
                    quantity: None,
                    destination: None,
                },
                confirmation: None,
            },
        }
    }

    /// Optional hardening: refuse input the threshold check would happily
    /// accept. Only consulted when the config asks for strict validation.
    pub fn validate(&self, request: &ShipmentRequest) -> Result<(), GateError> {
        if request.quantity < 0 {
            return Err(GateError::InvalidRequest(format!(
                "quantity must be non-negative, got {}",
                request.quantity
            )));
        }
        if request.destination.trim().is_empty() {
            return Err(GateError::InvalidRequest(
                "destination must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn threshold(&self) -> i64 {
        self.config.threshold
    }

    pub fn validation(&self) -> ValidationMode {
        self.config.validation
    }

    /// Get the config name.
    pub fn gate_name(&self) -> &str {
        &self.config.gate
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }
}

impl Default for ApprovalGate {
    fn default() -> Self {
        Self::new(GateConfig::default())
    }
}

/// Order ids look like `ORD-10-HUMAN`; downstream consumers match on it.
pub fn order_id(quantity: i64, tag: &str) -> String {
    format!("ORD-{}-{}", quantity, tag)
}

fn approved_result(request: &ShipmentRequest, tag: &str, message: String) -> ToolResult {
    ToolResult {
        status: Status::Approved,
        message,
        order_id: Some(order_id(request.quantity, tag)),
        quantity: Some(request.quantity),
        destination: Some(request.destination.clone()),
    }
}
