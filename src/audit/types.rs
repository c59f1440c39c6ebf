//! Types for the decision event log.
//!
//! Every gate call publishes one event: auto-approved, paused, approved or
//! rejected. Replaying a session's events tells you what happened to every
//! order and who signed off on it.

use crate::gate::types::Decision;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One gate decision, as persisted in the log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionEvent {
    pub timestamp: DateTime<Utc>,

    /// Session identifier (UUID, generated when the workflow starts)
    pub session_id: String,

    /// Caller-supplied id of the order request
    pub request_id: String,

    /// Set on the pausing event and on the event that resumed it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pause_token: Option<String>,

    pub quantity: i64,
    pub destination: String,

    pub decision: Decision,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,

    /// For human decisions: who answered
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decided_by: Option<String>,

    /// How long the gate took (microseconds)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eval_duration_us: Option<u64>,
}

/// Summary statistics for a session's log.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session_id: String,
    pub total_events: usize,
    pub auto_approved: usize,
    pub human_approved: usize,
    pub rejected: usize,
    /// Paused and never resumed within this session
    pub still_pending: usize,
    pub containers_shipped: i64,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

impl SessionSummary {
    /// Format as a human-readable one-liner for terminal output.
    pub fn one_line(&self) -> String {
        format!(
            "{} decisions | {} auto | {} approved | {} rejected | {} pending",
            self.total_events,
            self.auto_approved,
            self.human_approved,
            self.rejected,
            self.still_pending
        )
    }
}

/// Filter criteria for querying the log.
#[derive(Debug, Clone, Default)]
pub struct LogFilter {
    pub decision: Option<Decision>,
    /// Case-insensitive substring match on the destination
    pub destination: Option<String>,
    pub limit: Option<usize>,
}
