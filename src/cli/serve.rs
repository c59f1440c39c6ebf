//! `shipgate serve` — run the gateway so agents can place and resume orders
//! over a Unix socket.

use crate::cli::{logged_workflow, print_session_summary};
use crate::gate::config::load_config;
use crate::gateway::client::SOCKET_ENV;
use crate::gateway::GatewayServer;
use crate::workflow::ShippingWorkflow;
use anyhow::Result;
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Options for the `shipgate serve` command.
#[derive(Debug, Default)]
pub struct ServeOptions {
    /// Socket path (default: /tmp/shipgate-{session}.sock)
    pub socket_path: Option<PathBuf>,
    pub config_path: Option<PathBuf>,
    pub threshold: Option<i64>,
    pub session_id: Option<String>,
}

/// Run the `shipgate serve` command until Ctrl-C.
pub async fn run_serve(options: ServeOptions) -> Result<()> {
    let config = load_config(options.config_path.as_deref(), options.threshold)?;

    let session_id = options
        .session_id
        .clone()
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    let short_id: String = session_id.chars().take(8).collect();

    let socket_path = options
        .socket_path
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("/tmp/shipgate-{}.sock", short_id)));

    let (workflow, log_path) = logged_workflow(config, &session_id)?;

    println!();
    println!(
        "  {} shipgate v{}",
        "⚓".bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!("  Session:   {}", short_id.cyan());
    println!("  Gate:      {}", workflow.gate().gate_name().cyan());
    println!(
        "  Threshold: {} containers",
        workflow.gate().threshold().to_string().cyan()
    );
    println!("  Log:       {}", log_path.display().to_string().dimmed());
    println!("  Socket:    {}", socket_path.display().to_string().dimmed());
    println!();
    println!(
        "  {}",
        format!("export {}={}", SOCKET_ENV, socket_path.display()).dimmed()
    );
    println!("  {} Waiting for orders (Ctrl-C to stop)", "→".blue());

    let server = GatewayServer::new(&socket_path, workflow);
    let workflow = server.workflow();

    let outcome = tokio::select! {
        result = server.run() => result,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutting down gateway");
            Ok(())
        }
    };

    wind_down(&workflow, server.socket_path()).await;
    outcome?;

    print_session_summary(&session_id)
}

/// Report pauses nobody resumed and remove the socket.
/// Runs whether the server stopped on Ctrl-C or failed.
async fn wind_down(workflow: &ShippingWorkflow, socket_path: &Path) -> usize {
    let abandoned = workflow.pending().await;
    if !abandoned.is_empty() {
        println!();
        println!(
            "  {} {} paused order(s) were never resumed",
            "⚠".yellow(),
            abandoned.len()
        );
    }

    match std::fs::remove_file(socket_path) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!("Failed to remove socket {}: {}", socket_path.display(), e),
    }

    abandoned.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::NullSink;
    use crate::gate::types::ShipmentRequest;
    use crate::gate::ApprovalGate;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_wind_down_reports_and_removes_socket() {
        let dir = tempfile::TempDir::new().unwrap();
        let socket_path = dir.path().join("gate.sock");
        std::fs::write(&socket_path, b"").unwrap();

        let workflow = ShippingWorkflow::new(ApprovalGate::default(), Arc::new(NullSink), "s");
        workflow
            .place("r1", ShipmentRequest::new(10, "Rotterdam"))
            .await
            .unwrap();

        assert_eq!(wind_down(&workflow, &socket_path).await, 1);
        assert!(!socket_path.exists());

        // Nothing left to remove the second time
        assert_eq!(wind_down(&workflow, &socket_path).await, 1);
    }
}
