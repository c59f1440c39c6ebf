//! Decision log writer — append-only JSONL files.
//!
//! Writes to `~/.shipgate/logs/{session_id}.jsonl`, one JSON object per line,
//! flushed after every write so a crash never loses a decision.

use crate::audit::types::DecisionEvent;
use anyhow::{Context, Result};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Append-only logger that writes JSONL files.
pub struct AuditLogger {
    log_path: PathBuf,
    /// Kept open for the session lifetime
    file: File,
    entry_count: usize,
}

impl AuditLogger {
    /// Create a new logger for a session.
    /// Creates the log directory and file if they don't exist.
    pub fn new(session_id: &str) -> Result<Self> {
        let log_dir = Self::log_directory()?;
        fs::create_dir_all(&log_dir)
            .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

        Self::open(log_dir.join(format!("{}.jsonl", session_id)))
    }

    /// Create a logger writing to a specific path (for testing).
    pub fn with_path(path: impl AsRef<Path>) -> Result<Self> {
        let log_path = path.as_ref().to_path_buf();
        if let Some(parent) = log_path.parent() {
            fs::create_dir_all(parent)?;
        }
        Self::open(log_path)
    }

    fn open(log_path: PathBuf) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .with_context(|| format!("Failed to open log file: {}", log_path.display()))?;

        Ok(Self {
            log_path,
            file,
            entry_count: 0,
        })
    }

    /// Serialize an event and append it to the file.
    pub fn log(&mut self, event: &DecisionEvent) -> Result<()> {
        let json = serde_json::to_string(event).context("Failed to serialize decision event")?;
        writeln!(self.file, "{}", json).context("Failed to write decision event")?;
        self.file.flush().context("Failed to flush log file")?;
        self.entry_count += 1;
        Ok(())
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Number of events written this session.
    pub fn entry_count(&self) -> usize {
        self.entry_count
    }

    /// Get the default log directory (~/.shipgate/logs/).
    pub fn log_directory() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home.join(".shipgate").join("logs"))
    }
}
