//! Pause store — where suspended orders wait for a human.
//!
//! Each suspended order gets an opaque pause token. Taking an order out of the
//! store is the only way to resume it, so a token resumes at most once.

use crate::gate::types::{ConfirmationRequest, ShipmentRequest};
use crate::workflow::WorkflowError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Correlates a paused order with its later resume.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PauseToken(String);

impl PauseToken {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for PauseToken {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for PauseToken {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for PauseToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A suspended order, kept until someone answers it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingOrder {
    pub token: PauseToken,
    pub request_id: String,
    pub request: ShipmentRequest,
    pub confirmation: ConfirmationRequest,
    pub paused_at: DateTime<Utc>,
}

/// In-memory map of pause tokens to suspended orders.
#[derive(Default)]
pub struct PauseStore {
    pending: Mutex<HashMap<PauseToken, PendingOrder>>,
}

impl PauseStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Park an order and hand back the token that resumes it.
    pub async fn suspend(&self, request_id: &str, confirmation: ConfirmationRequest) -> PauseToken {
        let token = PauseToken::generate();
        let order = PendingOrder {
            token: token.clone(),
            request_id: request_id.to_string(),
            request: confirmation.payload.clone(),
            confirmation,
            paused_at: Utc::now(),
        };
        self.pending.lock().await.insert(token.clone(), order);
        token
    }

    /// Remove and return the order behind `token`.
    /// A second call with the same token fails.
    pub async fn take(&self, token: &PauseToken) -> Result<PendingOrder, WorkflowError> {
        self.pending
            .lock()
            .await
            .remove(token)
            .ok_or_else(|| WorkflowError::UnknownPauseToken(token.clone()))
    }

    /// Snapshot of everything still waiting, oldest first.
    pub async fn pending(&self) -> Vec<PendingOrder> {
        let mut orders: Vec<PendingOrder> = self.pending.lock().await.values().cloned().collect();
        orders.sort_by_key(|o| o.paused_at);
        orders
    }

    pub async fn len(&self) -> usize {
        self.pending.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.pending.lock().await.is_empty()
    }
}
