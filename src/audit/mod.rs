pub mod logger;
pub mod reader;
pub mod types;

pub use logger::AuditLogger;
pub use reader::AuditReader;
pub use types::*;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::Mutex;

/// Receives one event per gate decision.
/// The workflow publishes after deciding; a failed publish never changes
/// the decision.
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn publish(&self, event: &DecisionEvent) -> Result<()>;
}

/// Persists events to a JSONL log file.
pub struct AuditSink {
    logger: Mutex<AuditLogger>,
}

impl AuditSink {
    pub fn new(logger: AuditLogger) -> Self {
        Self {
            logger: Mutex::new(logger),
        }
    }
}

#[async_trait]
impl EventSink for AuditSink {
    async fn publish(&self, event: &DecisionEvent) -> Result<()> {
        self.logger.lock().await.log(event)
    }
}

/// Keeps events in memory. Handy when embedding the workflow.
#[derive(Default)]
pub struct MemorySink {
    events: Mutex<Vec<DecisionEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn events(&self) -> Vec<DecisionEvent> {
        self.events.lock().await.clone()
    }
}

#[async_trait]
impl EventSink for MemorySink {
    async fn publish(&self, event: &DecisionEvent) -> Result<()> {
        self.events.lock().await.push(event.clone());
        Ok(())
    }
}

/// Discards events.
pub struct NullSink;

#[async_trait]
impl EventSink for NullSink {
    async fn publish(&self, _event: &DecisionEvent) -> Result<()> {
        Ok(())
    }
}
