//! `shipgate submit`, `shipgate resume`, `shipgate pending` — talk to a
//! running gateway.

use crate::cli::print_result;
use crate::gateway::protocol::GatewayResponse;
use crate::gateway::GatewayClient;
use anyhow::{bail, Result};
use colored::Colorize;
use std::path::Path;

fn client(socket: Option<&Path>) -> Result<GatewayClient> {
    match socket {
        Some(path) => Ok(GatewayClient::new(path)),
        None => GatewayClient::from_env(),
    }
}

fn ensure_ok(response: &GatewayResponse) -> Result<()> {
    if !response.ok {
        bail!(
            "Gateway refused the request: {}",
            response.error.as_deref().unwrap_or("no reason given")
        );
    }
    Ok(())
}

/// Run `shipgate submit`: place an order with the gateway.
pub fn run_submit(socket: Option<&Path>, quantity: i64, destination: &str) -> Result<()> {
    let response = client(socket)?.place(quantity, destination)?;
    ensure_ok(&response)?;

    println!();
    if let Some(ref result) = response.result {
        print_result(result);
    }
    if let Some(ref token) = response.pause_token {
        if let Some(ref hint) = response.hint {
            println!("  {}", hint.yellow());
        }
        println!("  Pause token: {}", token.cyan());
        println!();
        println!(
            "  Resume with: {}",
            format!("shipgate resume {} --approve", token).dimmed()
        );
    }
    println!();
    Ok(())
}

/// Run `shipgate resume`: answer a paused order.
pub fn run_resume(socket: Option<&Path>, token: &str, approve: bool) -> Result<()> {
    let response = client(socket)?.resume(token, approve)?;
    ensure_ok(&response)?;

    println!();
    if let Some(ref result) = response.result {
        print_result(result);
    }
    println!();
    Ok(())
}

/// Run `shipgate pending`: list paused orders.
pub fn run_pending(socket: Option<&Path>) -> Result<()> {
    let response = client(socket)?.pending()?;
    ensure_ok(&response)?;

    let pending = response.pending.unwrap_or_default();

    println!();
    if pending.is_empty() {
        println!("  {} No orders waiting for approval.", "ℹ".blue());
        println!();
        return Ok(());
    }

    println!("  {} Waiting for approval:", "⏸".bold());
    println!();
    for order in &pending {
        println!(
            "  • {} {} {}",
            order.paused_at.format("%H:%M:%S").to_string().dimmed(),
            order.request,
            order.token.to_string().cyan()
        );
    }
    println!();
    Ok(())
}
