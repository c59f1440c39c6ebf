//! Shipping workflow — runs an order through the gate, parks it when a human
//! is needed, and resumes it with their answer.

use crate::approval::ApprovalHandler;
use crate::audit::{DecisionEvent, EventSink};
use crate::gate::types::*;
use crate::gate::ApprovalGate;
use crate::workflow::store::{PauseStore, PauseToken, PendingOrder};
use crate::workflow::WorkflowError;
use anyhow::Result;
use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

/// Returned to whoever placed or resumed an order.
#[derive(Debug, Clone)]
pub struct WorkflowReply {
    pub decision: Decision,
    pub result: ToolResult,
    /// Present when the order is now waiting for a human.
    pub pause: Option<PauseInfo>,
}

#[derive(Debug, Clone)]
pub struct PauseInfo {
    pub token: PauseToken,
    pub confirmation: ConfirmationRequest,
}

/// Gate + pause store + event sink for one session.
pub struct ShippingWorkflow {
    gate: ApprovalGate,
    store: PauseStore,
    events: Arc<dyn EventSink>,
    session_id: String,
}

impl ShippingWorkflow {
    pub fn new(gate: ApprovalGate, events: Arc<dyn EventSink>, session_id: impl Into<String>) -> Self {
        Self {
            gate,
            store: PauseStore::new(),
            events,
            session_id: session_id.into(),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn gate(&self) -> &ApprovalGate {
        &self.gate
    }

    /// Orders still waiting for a human, oldest first.
    pub async fn pending(&self) -> Vec<PendingOrder> {
        self.store.pending().await
    }

    /// First call for an order.
    ///
    /// Small orders come back approved. Large ones are parked and the reply
    /// carries the pause token plus the confirmation to show a human.
    pub async fn place(
        &self,
        request_id: &str,
        request: ShipmentRequest,
    ) -> Result<WorkflowReply, WorkflowError> {
        if self.gate.validation() == ValidationMode::Strict {
            if let Err(e) = self.gate.validate(&request) {
                tracing::warn!(request_id, "Refusing order: {}", e);
                return Err(e.into());
            }
        }

        let start = Instant::now();
        let outcome = self.gate.evaluate(&request, None);
        let elapsed = start.elapsed().as_micros() as u64;

        let pause = match outcome.confirmation {
            Some(ref confirmation) => {
                let token = self.store.suspend(request_id, confirmation.clone()).await;
                tracing::info!(request_id, token = %token, "Order paused for approval: {}", request);
                Some(PauseInfo {
                    token,
                    confirmation: confirmation.clone(),
                })
            }
            None => {
                tracing::info!(request_id, "Order {}: {}", outcome.decision, request);
                None
            }
        };

        self.publish(DecisionEvent {
            timestamp: Utc::now(),
            session_id: self.session_id.clone(),
            request_id: request_id.to_string(),
            pause_token: pause.as_ref().map(|p| p.token.to_string()),
            quantity: request.quantity,
            destination: request.destination.clone(),
            decision: outcome.decision,
            order_id: outcome.result.order_id.clone(),
            decided_by: None,
            eval_duration_us: Some(elapsed),
        })
        .await;

        Ok(WorkflowReply {
            decision: outcome.decision,
            result: outcome.result,
            pause,
        })
    }

    /// Resumed call: finish a paused order with the human's answer.
    ///
    /// The request is taken from the store, not from the caller, so the gate
    /// always sees exactly what was paused.
    pub async fn resume(
        &self,
        token: &PauseToken,
        answer: ConfirmationAnswer,
    ) -> Result<WorkflowReply, WorkflowError> {
        let order = match self.store.take(token).await {
            Ok(order) => order,
            Err(e) => {
                tracing::warn!(token = %token, "Resume refused: {}", e);
                return Err(e);
            }
        };

        let start = Instant::now();
        let outcome = self.gate.evaluate(&order.request, Some(&answer));
        let elapsed = start.elapsed().as_micros() as u64;

        tracing::info!(
            request_id = %order.request_id,
            token = %token,
            "Order {} after review: {}",
            outcome.decision,
            order.request
        );

        self.publish(DecisionEvent {
            timestamp: Utc::now(),
            session_id: self.session_id.clone(),
            request_id: order.request_id.clone(),
            pause_token: Some(token.to_string()),
            quantity: order.request.quantity,
            destination: order.request.destination.clone(),
            decision: outcome.decision,
            order_id: outcome.result.order_id.clone(),
            decided_by: answer.decided_by.clone(),
            eval_duration_us: Some(elapsed),
        })
        .await;

        Ok(WorkflowReply {
            decision: outcome.decision,
            result: outcome.result,
            pause: None,
        })
    }

    /// Place an order and, if it pauses, ask `handler` and resume it.
    /// Always ends in a terminal result.
    pub async fn run_to_completion(
        &self,
        request: ShipmentRequest,
        handler: &(dyn ApprovalHandler + Send + Sync),
    ) -> Result<ToolResult> {
        let request_id = Uuid::new_v4().to_string();
        let reply = self.place(&request_id, request).await?;

        let Some(pause) = reply.pause else {
            return Ok(reply.result);
        };

        // A broken approval flow counts as a rejection; the order must not
        // stay parked forever.
        let answer = match handler.request_approval(&pause.confirmation).await {
            Ok(answer) => answer,
            Err(e) => {
                tracing::error!(request_id, "Approval flow error, rejecting: {}", e);
                ConfirmationAnswer::reject()
            }
        };

        let reply = self.resume(&pause.token, answer).await?;
        Ok(reply.result)
    }

    async fn publish(&self, event: DecisionEvent) {
        if let Err(e) = self.events.publish(&event).await {
            tracing::error!("Failed to publish decision event: {}", e);
        }
    }
}
