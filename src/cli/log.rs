//! `shipgate log` — browse decision logs.
//!
//! Shows every order a session saw, what the gate decided, and who approved
//! or rejected the paused ones.

use crate::audit::{AuditReader, LogFilter};
use crate::gate::types::Decision;
use anyhow::{bail, Context, Result};
use colored::Colorize;

/// Run the `shipgate log` command.
pub fn run_log(
    session_id: Option<&str>,
    decision_filter: Option<&str>,
    destination_filter: Option<&str>,
    limit: Option<usize>,
    summary_only: bool,
) -> Result<()> {
    let reader = AuditReader::new().context("Failed to initialize log reader")?;

    let entries = if let Some(sid) = session_id {
        reader
            .read_session(sid)
            .with_context(|| format!("Failed to read session: {}", sid))?
    } else {
        let entries = reader.read_latest_session()?;
        if entries.is_empty() {
            println!();
            println!("  {} No decision logs found.", "ℹ".blue());
            println!("  Place an order first:");
            println!("    {}", "shipgate order 3 Singapore".dimmed());
            println!();
            return Ok(());
        }
        entries
    };

    let decision = match decision_filter {
        Some(d) => match Decision::from_str_loose(d) {
            Some(decision) => Some(decision),
            None => bail!(
                "Unknown decision filter '{}'. Use one of: auto, pending, approved, rejected",
                d
            ),
        },
        None => None,
    };

    let filter = LogFilter {
        decision,
        destination: destination_filter.map(|s| s.to_string()),
        limit,
    };

    let summary = AuditReader::summarize(&entries);

    if summary_only {
        println!();
        println!("  {} Session: {}", "📋".bold(), summary.session_id.cyan());
        println!();
        println!(
            "  {} decisions | {} auto | {} approved | {} rejected | {} pending",
            summary.total_events.to_string().bold(),
            summary.auto_approved.to_string().green().bold(),
            summary.human_approved.to_string().green().bold(),
            summary.rejected.to_string().red().bold(),
            summary.still_pending.to_string().yellow().bold(),
        );
        println!(
            "  Containers shipped: {}",
            summary.containers_shipped.to_string().bold()
        );

        if let (Some(start), Some(end)) = (summary.start_time, summary.end_time) {
            let duration = end - start;
            println!("  Duration: {}", format_duration(duration.num_seconds()));
        }
        println!();
    } else {
        let filtered = AuditReader::filter_entries(&entries, &filter);

        println!();
        println!("  Session: {}", summary.session_id.cyan());
        println!();

        for entry in &filtered {
            println!("  {}", AuditReader::format_entry(entry));
        }

        println!();
        println!(
            "  {} {}",
            "─".repeat(40).dimmed(),
            summary.one_line().dimmed()
        );
        println!();
    }

    Ok(())
}

/// List available sessions.
pub fn run_log_list() -> Result<()> {
    let reader = AuditReader::new()?;
    let sessions = reader.list_sessions()?;

    if sessions.is_empty() {
        println!();
        println!("  {} No sessions found.", "ℹ".blue());
        println!();
        return Ok(());
    }

    println!();
    println!("  {} Available sessions:", "📋".bold());
    println!();
    for session in &sessions {
        println!("  • {}", session);
    }
    println!();
    println!(
        "  View a session: {}",
        "shipgate log --session <id>".dimmed()
    );
    println!();

    Ok(())
}

fn format_duration(seconds: i64) -> String {
    if seconds < 60 {
        format!("{}s", seconds)
    } else if seconds < 3600 {
        format!("{}m {}s", seconds / 60, seconds % 60)
    } else {
        format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60)
    }
}
