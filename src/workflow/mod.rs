//! The pause/resume runtime around the approval gate.
//!
//! The gate only decides. This module holds paused orders, hands out pause
//! tokens, resumes them with a human's answer, and publishes a decision event
//! for every gate call.

pub mod runner;
pub mod store;

pub use runner::{PauseInfo, ShippingWorkflow, WorkflowReply};
pub use store::{PauseStore, PauseToken, PendingOrder};

use crate::gate::types::GateError;

#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    /// Never issued, or already resumed.
    #[error("unknown or already resumed pause token: {0}")]
    UnknownPauseToken(PauseToken),

    #[error(transparent)]
    Rejected(#[from] GateError),
}
