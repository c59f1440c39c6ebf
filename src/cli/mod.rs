pub mod demo;
pub mod init;
pub mod log;
pub mod order;
pub mod remote;
pub mod serve;

use crate::audit::{AuditLogger, AuditReader, AuditSink};
use crate::gate::types::{GateConfig, Status, ToolResult};
use crate::gate::ApprovalGate;
use crate::workflow::ShippingWorkflow;
use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;

/// A workflow that logs to `~/.shipgate/logs/{session_id}.jsonl`.
/// Returns the workflow and the log path.
pub(crate) fn logged_workflow(
    config: GateConfig,
    session_id: &str,
) -> Result<(ShippingWorkflow, PathBuf)> {
    let logger = AuditLogger::new(session_id)?;
    let log_path = logger.log_path().to_path_buf();
    let workflow = ShippingWorkflow::new(
        ApprovalGate::new(config),
        Arc::new(AuditSink::new(logger)),
        session_id,
    );
    Ok((workflow, log_path))
}

/// Print a tool result the way the agent would receive it.
pub(crate) fn print_result(result: &ToolResult) {
    let status = match result.status {
        Status::Approved => "APPROVED".green().bold(),
        Status::Pending => "PENDING".yellow().bold(),
        Status::Rejected => "REJECTED".red().bold(),
    };
    println!("  {} {}", status, result.message);
    if let Some(ref order_id) = result.order_id {
        println!("  Order ID: {}", order_id.cyan());
    }
}

/// Print the summary for a finished session.
pub(crate) fn print_session_summary(session_id: &str) -> Result<()> {
    let reader = AuditReader::new()?;
    let entries = reader.read_session(session_id).unwrap_or_default();

    if entries.is_empty() {
        println!("\n  {} No decisions were logged this session.", "ℹ".blue());
        return Ok(());
    }

    let summary = AuditReader::summarize(&entries);

    println!();
    println!("  {} Session complete", "─".repeat(40).dimmed());
    println!();
    println!(
        "  {} decisions | {} auto | {} approved | {} rejected",
        summary.total_events.to_string().bold(),
        summary.auto_approved.to_string().green().bold(),
        summary.human_approved.to_string().green().bold(),
        summary.rejected.to_string().red().bold(),
    );
    println!();
    println!(
        "  View full log: {}",
        format!("shipgate log --session {}", session_id).dimmed()
    );
    println!();

    Ok(())
}
