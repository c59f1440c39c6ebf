pub mod terminal;

use crate::gate::types::{ConfirmationAnswer, ConfirmationRequest};
use anyhow::{bail, Result};
use async_trait::async_trait;
use std::sync::Arc;

pub use terminal::{AutoApproval, AutoDeny, TerminalApproval};

/// Trait for approval handlers — whoever answers a paused order.
/// Implementations can be terminal-based, remote, auto-approve, etc.
#[async_trait]
pub trait ApprovalHandler {
    async fn request_approval(&self, request: &ConfirmationRequest) -> Result<ConfirmationAnswer>;
}

/// Build a handler from a mode string: "terminal", "auto", "deny".
pub fn handler_for_mode(mode: &str) -> Result<Arc<dyn ApprovalHandler + Send + Sync>> {
    match mode.to_lowercase().trim() {
        "terminal" | "tty" | "prompt" => Ok(Arc::new(TerminalApproval::new())),
        "auto" | "auto-approve" | "approve" => Ok(Arc::new(AutoApproval)),
        "deny" | "auto-deny" | "reject" => Ok(Arc::new(AutoDeny)),
        other => bail!(
            "Unknown approval mode '{}'. Use one of: terminal, auto, deny",
            other
        ),
    }
}
