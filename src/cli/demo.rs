//! `shipgate demo` — the three classic scenarios, in-process.
//!
//! 1. 3 containers to Singapore: auto-approved, no pause
//! 2. 10 containers to Rotterdam: paused, then approved
//! 3. 8 containers to Los Angeles: paused, then rejected
//!
//! `--reject` makes the simulated operator refuse both large orders.

use crate::approval::{ApprovalHandler, AutoApproval, AutoDeny, TerminalApproval};
use crate::cli::{logged_workflow, print_result, print_session_summary};
use crate::gate::types::{GateConfig, ShipmentRequest};
use anyhow::Result;
use colored::Colorize;

struct Scenario {
    title: &'static str,
    request: ShipmentRequest,
    approve: bool,
}

fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            title: "Small order (auto-approve)",
            request: ShipmentRequest::new(3, "Singapore"),
            approve: true,
        },
        Scenario {
            title: "Large order, operator says yes",
            request: ShipmentRequest::new(10, "Rotterdam"),
            approve: true,
        },
        Scenario {
            title: "Large order, operator says no",
            request: ShipmentRequest::new(8, "Los Angeles"),
            approve: false,
        },
    ]
}

/// Who answers the paused demo orders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DemoOperator {
    /// Each scenario's scripted answer.
    #[default]
    Scripted,
    /// Reject every paused order.
    RejectAll,
    /// Ask in the terminal.
    Interactive,
}

/// Run the `shipgate demo` command.
pub async fn run_demo(config: GateConfig, operator: DemoOperator) -> Result<()> {
    let session_id = uuid::Uuid::new_v4().to_string();
    let threshold = config.threshold;
    let (workflow, _log_path) = logged_workflow(config, &session_id)?;

    println!();
    println!("  {}", "Long-running orders: human-in-the-loop approval".bold());
    println!("  {}", "━".repeat(48).dimmed());
    println!("  Large order threshold: >{} containers", threshold);

    let terminal = TerminalApproval::new();

    for (i, scenario) in scenarios().into_iter().enumerate() {
        println!();
        println!("  {} {}", format!("Demo {}:", i + 1).bold(), scenario.title);
        println!("  User > Ship {}", scenario.request);

        let approve = scenario.approve && operator == DemoOperator::Scripted;
        let handler: &(dyn ApprovalHandler + Send + Sync) = if operator == DemoOperator::Interactive {
            &terminal
        } else if approve {
            println!("  {}", "(simulated operator: approve)".dimmed());
            &AutoApproval
        } else {
            println!("  {}", "(simulated operator: reject)".dimmed());
            &AutoDeny
        };

        let result = workflow.run_to_completion(scenario.request, handler).await?;
        print_result(&result);
    }

    print_session_summary(&session_id)
}
