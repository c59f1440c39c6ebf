//! Gateway server — lets out-of-process agents use the approval gate.
//!
//! Listens on a Unix domain socket. For each JSON line it receives:
//! 1. `place` runs the order through the gate; large orders are parked
//! 2. `resume` finishes a parked order with the human's answer
//! 3. `pending` lists parked orders
//!
//! Paused orders live in the server's workflow, so a pause can last as long
//! as the server runs.

use crate::gate::types::{ConfirmationAnswer, ShipmentRequest};
use crate::gateway::protocol::{GatewayRequest, GatewayResponse};
use crate::workflow::{PauseToken, ShippingWorkflow};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::UnixListener;

pub struct GatewayServer {
    socket_path: PathBuf,
    workflow: Arc<ShippingWorkflow>,
}

impl GatewayServer {
    pub fn new(socket_path: impl AsRef<Path>, workflow: ShippingWorkflow) -> Self {
        Self {
            socket_path: socket_path.as_ref().to_path_buf(),
            workflow: Arc::new(workflow),
        }
    }

    pub fn socket_path(&self) -> &Path {
        &self.socket_path
    }

    pub fn workflow(&self) -> Arc<ShippingWorkflow> {
        self.workflow.clone()
    }

    /// Start the gateway server. Listens for connections and handles requests.
    pub async fn run(&self) -> Result<()> {
        // Stale socket from a previous run
        if self.socket_path.exists() {
            std::fs::remove_file(&self.socket_path)?;
        }

        let listener = UnixListener::bind(&self.socket_path)
            .with_context(|| format!("Failed to bind socket: {}", self.socket_path.display()))?;

        tracing::info!("Gateway listening on {}", self.socket_path.display());

        loop {
            match listener.accept().await {
                Ok((stream, _addr)) => {
                    let workflow = self.workflow.clone();
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(stream, workflow).await {
                            tracing::error!("Connection handler error: {}", e);
                        }
                    });
                }
                Err(e) => {
                    tracing::error!("Failed to accept connection: {}", e);
                }
            }
        }
    }
}

/// Longest request line the server will buffer, newline included.
pub const MAX_LINE_BYTES: usize = 64 * 1024;

/// Handle a single connection. Serves requests until the peer hangs up.
async fn handle_connection(
    stream: tokio::net::UnixStream,
    workflow: Arc<ShippingWorkflow>,
) -> Result<()> {
    let (reader, mut writer) = stream.into_split();
    let mut reader = BufReader::new(reader);
    let mut line = Vec::new();

    loop {
        line.clear();
        let bytes_read = (&mut reader)
            .take(MAX_LINE_BYTES as u64)
            .read_until(b'\n', &mut line)
            .await?;
        if bytes_read == 0 {
            break;
        }
        if bytes_read == MAX_LINE_BYTES && line.last() != Some(&b'\n') {
            // The rest of the line is still unread; no way to resync
            tracing::warn!("Dropping connection: request line over {} bytes", MAX_LINE_BYTES);
            let response = GatewayResponse::error(
                "unknown".to_string(),
                format!("Request line exceeds {} bytes", MAX_LINE_BYTES),
            );
            write_response(&mut writer, &response).await?;
            break;
        }
        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }

        let response = match serde_json::from_slice::<GatewayRequest>(&line) {
            Ok(request) => process_request(request, &workflow).await,
            Err(e) => GatewayResponse::error(
                "unknown".to_string(),
                format!("Invalid request JSON: {}", e),
            ),
        };
        write_response(&mut writer, &response).await?;
    }

    Ok(())
}

async fn write_response(
    writer: &mut tokio::net::unix::OwnedWriteHalf,
    response: &GatewayResponse,
) -> Result<()> {
    let json = serde_json::to_string(response)?;
    writer.write_all(json.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}

/// Process a single gateway request.
pub async fn process_request(
    request: GatewayRequest,
    workflow: &ShippingWorkflow,
) -> GatewayResponse {
    match request {
        GatewayRequest::Place {
            request_id,
            quantity,
            destination,
        } => {
            let order = ShipmentRequest::new(quantity, destination);
            match workflow.place(&request_id, order).await {
                Ok(reply) => match reply.pause {
                    Some(pause) => GatewayResponse::paused(
                        request_id,
                        reply.result,
                        pause.token.to_string(),
                        pause.confirmation.hint,
                    ),
                    None => GatewayResponse::completed(request_id, reply.result),
                },
                Err(e) => GatewayResponse::error(request_id, e.to_string()),
            }
        }
        GatewayRequest::Resume {
            request_id,
            pause_token,
            confirmed,
            decided_by,
        } => {
            let answer = ConfirmationAnswer {
                confirmed,
                decided_by: decided_by.or_else(|| Some("remote".to_string())),
            };
            match workflow.resume(&PauseToken::from(pause_token), answer).await {
                Ok(reply) => GatewayResponse::completed(request_id, reply.result),
                Err(e) => GatewayResponse::error(request_id, e.to_string()),
            }
        }
        GatewayRequest::Pending { request_id } => {
            GatewayResponse::pending_list(request_id, workflow.pending().await)
        }
    }
}
