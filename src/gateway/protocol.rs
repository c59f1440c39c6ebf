//! Gateway IPC protocol types.
//!
//! Defines the JSON messages exchanged between an agent and the shipgate
//! gateway over a Unix domain socket, one JSON object per line.
//!
//! The agent places an order. If it pauses, the response carries a pause
//! token; a later `resume` with that token and the human's answer finishes it.

use crate::gate::types::ToolResult;
use crate::workflow::PendingOrder;
use serde::{Deserialize, Serialize};

/// A request from the agent (or an operator) to the gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum GatewayRequest {
    /// First call for an order.
    Place {
        request_id: String,
        quantity: i64,
        destination: String,
    },
    /// Resumed call: the human's answer for a paused order.
    Resume {
        request_id: String,
        pause_token: String,
        confirmed: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        decided_by: Option<String>,
    },
    /// List orders waiting for a human.
    Pending { request_id: String },
}

impl GatewayRequest {
    pub fn request_id(&self) -> &str {
        match self {
            GatewayRequest::Place { request_id, .. } => request_id,
            GatewayRequest::Resume { request_id, .. } => request_id,
            GatewayRequest::Pending { request_id } => request_id,
        }
    }
}

/// A response from the gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayResponse {
    /// Matches the request_id from the request
    pub request_id: String,

    /// False only when the request itself could not be served
    pub ok: bool,

    /// The tool result for place/resume
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<ToolResult>,

    /// Set when the order paused; needed to resume it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pause_token: Option<String>,

    /// What to ask the human
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending: Option<Vec<PendingOrder>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GatewayResponse {
    fn empty(request_id: String, ok: bool) -> Self {
        Self {
            request_id,
            ok,
            result: None,
            pause_token: None,
            hint: None,
            pending: None,
            error: None,
        }
    }

    /// A terminal place/resume result.
    pub fn completed(request_id: String, result: ToolResult) -> Self {
        Self {
            result: Some(result),
            ..Self::empty(request_id, true)
        }
    }

    /// The order paused and waits for a `resume`.
    pub fn paused(
        request_id: String,
        result: ToolResult,
        pause_token: impl Into<String>,
        hint: impl Into<String>,
    ) -> Self {
        Self {
            result: Some(result),
            pause_token: Some(pause_token.into()),
            hint: Some(hint.into()),
            ..Self::empty(request_id, true)
        }
    }

    pub fn pending_list(request_id: String, pending: Vec<PendingOrder>) -> Self {
        Self {
            pending: Some(pending),
            ..Self::empty(request_id, true)
        }
    }

    /// The request was refused (bad token, invalid order, bad JSON).
    pub fn error(request_id: String, error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::empty(request_id, false)
        }
    }

    pub fn is_paused(&self) -> bool {
        self.pause_token.is_some()
    }
}
