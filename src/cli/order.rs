//! `shipgate order` — place one order in-process and see it through.
//!
//! 1. Load the gate config
//! 2. Run the order through the gate
//! 3. If it pauses, ask the approval handler and resume
//! 4. Print the result and the session summary

use crate::approval::handler_for_mode;
use crate::cli::{logged_workflow, print_result, print_session_summary};
use crate::gate::config::load_config;
use crate::gate::types::ShipmentRequest;
use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;

/// Options for the `shipgate order` command.
#[derive(Debug)]
pub struct OrderOptions {
    pub quantity: i64,
    pub destination: String,
    /// Approval mode: "terminal", "auto", "deny"
    pub approval_mode: String,
    pub config_path: Option<PathBuf>,
    pub threshold: Option<i64>,
    /// Session ID override (default: auto-generated UUID)
    pub session_id: Option<String>,
}

impl Default for OrderOptions {
    fn default() -> Self {
        Self {
            quantity: 0,
            destination: String::new(),
            approval_mode: "terminal".to_string(),
            config_path: None,
            threshold: None,
            session_id: None,
        }
    }
}

/// Run the `shipgate order` command.
pub async fn run_order(options: OrderOptions) -> Result<()> {
    let config = load_config(options.config_path.as_deref(), options.threshold)?;
    let handler = handler_for_mode(&options.approval_mode)?;

    let session_id = options
        .session_id
        .clone()
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    let (workflow, log_path) = logged_workflow(config, &session_id)?;

    println!();
    println!("  Gate:      {}", workflow.gate().gate_name().cyan());
    println!(
        "  Threshold: {} containers",
        workflow.gate().threshold().to_string().cyan()
    );
    println!("  Log:       {}", log_path.display().to_string().dimmed());
    println!();

    let request = ShipmentRequest::new(options.quantity, options.destination);
    println!("  {} Ship {}", "▶".green(), request);

    let result = workflow.run_to_completion(request, handler.as_ref()).await?;

    println!();
    print_result(&result);

    print_session_summary(&session_id)
}
