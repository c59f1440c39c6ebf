//! Decision log reader — filter and display session logs.
//!
//! Reads JSONL log files and provides filtering, summarization, and
//! pretty-printing for the `shipgate log` command.

use crate::audit::types::*;
use crate::gate::types::Decision;
use anyhow::{Context, Result};
use colored::Colorize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Reads and queries decision log files.
pub struct AuditReader {
    log_dir: PathBuf,
}

impl AuditReader {
    /// Create a reader using the default log directory.
    pub fn new() -> Result<Self> {
        let log_dir = crate::audit::logger::AuditLogger::log_directory()?;
        Ok(Self { log_dir })
    }

    /// Create a reader for a specific directory (for testing).
    pub fn with_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            log_dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Read all events from a session log file.
    pub fn read_session(&self, session_id: &str) -> Result<Vec<DecisionEvent>> {
        let path = self.log_dir.join(format!("{}.jsonl", session_id));
        self.read_file(&path)
    }

    fn read_file(&self, path: &Path) -> Result<Vec<DecisionEvent>> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read log file: {}", path.display()))?;

        content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .enumerate()
            .map(|(i, line)| {
                serde_json::from_str(line)
                    .with_context(|| format!("Failed to parse log entry at line {}", i + 1))
            })
            .collect()
    }

    /// Read events from the most recent session.
    pub fn read_latest_session(&self) -> Result<Vec<DecisionEvent>> {
        match self.find_latest_session()? {
            Some(path) => self.read_file(&path),
            None => Ok(Vec::new()),
        }
    }

    fn find_latest_session(&self) -> Result<Option<PathBuf>> {
        if !self.log_dir.exists() {
            return Ok(None);
        }

        let mut entries: Vec<PathBuf> = fs::read_dir(&self.log_dir)?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.extension().is_some_and(|e| e == "jsonl"))
            .collect();

        // Most recently modified first
        entries.sort_by(|a, b| {
            let a_time = fs::metadata(a).and_then(|m| m.modified()).ok();
            let b_time = fs::metadata(b).and_then(|m| m.modified()).ok();
            b_time.cmp(&a_time)
        });

        Ok(entries.into_iter().next())
    }

    /// List all available session IDs.
    pub fn list_sessions(&self) -> Result<Vec<String>> {
        if !self.log_dir.exists() {
            return Ok(Vec::new());
        }

        let mut sessions: Vec<String> = fs::read_dir(&self.log_dir)?
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "jsonl"))
            .filter_map(|e| {
                e.path()
                    .file_stem()
                    .map(|s| s.to_string_lossy().to_string())
            })
            .collect();

        sessions.sort();
        Ok(sessions)
    }

    /// Filter events based on criteria.
    pub fn filter_entries(events: &[DecisionEvent], filter: &LogFilter) -> Vec<DecisionEvent> {
        let destination = filter.destination.as_ref().map(|d| d.to_lowercase());
        events
            .iter()
            .filter(|e| filter.decision.map_or(true, |d| e.decision == d))
            .filter(|e| {
                destination
                    .as_ref()
                    .map_or(true, |d| e.destination.to_lowercase().contains(d.as_str()))
            })
            .take(filter.limit.unwrap_or(usize::MAX))
            .cloned()
            .collect()
    }

    /// Generate a summary for a set of events.
    pub fn summarize(events: &[DecisionEvent]) -> SessionSummary {
        let mut summary = SessionSummary::default();

        if let Some(first) = events.first() {
            summary.session_id = first.session_id.clone();
            summary.start_time = Some(first.timestamp);
        }
        if let Some(last) = events.last() {
            summary.end_time = Some(last.timestamp);
        }

        summary.total_events = events.len();

        let mut paused: HashSet<&str> = HashSet::new();
        let mut resumed: HashSet<&str> = HashSet::new();

        for event in events {
            match event.decision {
                Decision::AutoApproved => {
                    summary.auto_approved += 1;
                    summary.containers_shipped += event.quantity;
                }
                Decision::Approved => {
                    summary.human_approved += 1;
                    summary.containers_shipped += event.quantity;
                }
                Decision::Rejected => summary.rejected += 1,
                Decision::PendingApproval => {}
            }

            if let Some(ref token) = event.pause_token {
                if event.decision.is_terminal() {
                    resumed.insert(token.as_str());
                } else {
                    paused.insert(token.as_str());
                }
            }
        }

        summary.still_pending = paused.difference(&resumed).count();
        summary
    }

    /// Pretty-print an event for terminal display.
    pub fn format_entry(event: &DecisionEvent) -> String {
        let timestamp = event.timestamp.format("%H:%M:%S").to_string();
        let decision_str = match event.decision {
            Decision::AutoApproved => "AUTO".green().to_string(),
            Decision::Approved => "APPROVED".green().bold().to_string(),
            Decision::PendingApproval => "PAUSED".yellow().to_string(),
            Decision::Rejected => "REJECTED".red().to_string(),
        };

        let mut line = format!(
            "[{}] {} {} containers -> {}",
            timestamp.dimmed(),
            decision_str,
            event.quantity.to_string().bold(),
            event.destination
        );

        if let Some(ref order_id) = event.order_id {
            line.push_str(&format!(" {}", order_id.cyan()));
        }
        if let Some(ref by) = event.decided_by {
            line.push_str(&format!(" ({})", format!("by {}", by).dimmed()));
        }

        line
    }
}
