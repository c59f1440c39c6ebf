//! Gateway client — sends requests to the shipgate gateway over a Unix socket.
//!
//! Used by the `submit`, `resume` and `pending` commands and by the
//! end-to-end tests.

use crate::gateway::protocol::{GatewayRequest, GatewayResponse};
use anyhow::{Context, Result};
use std::io::{BufRead, BufReader, Write};
use std::os::unix::net::UnixStream;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Environment variable holding the gateway socket path.
pub const SOCKET_ENV: &str = "SHIPGATE_SOCKET";

/// Client for communicating with the shipgate gateway.
pub struct GatewayClient {
    socket_path: PathBuf,
}

impl GatewayClient {
    pub fn new(socket_path: impl AsRef<Path>) -> Self {
        Self {
            socket_path: socket_path.as_ref().to_path_buf(),
        }
    }

    /// Create a client using the SHIPGATE_SOCKET environment variable.
    pub fn from_env() -> Result<Self> {
        let socket_path = std::env::var(SOCKET_ENV).with_context(|| {
            format!(
                "{} environment variable not set. Pass --socket or start `shipgate serve`.",
                SOCKET_ENV
            )
        })?;
        Ok(Self::new(socket_path))
    }

    /// Send a request and receive a response (synchronous).
    /// Each call opens a new connection.
    pub fn send(&self, request: &GatewayRequest) -> Result<GatewayResponse> {
        let mut stream = UnixStream::connect(&self.socket_path).with_context(|| {
            format!(
                "Failed to connect to shipgate gateway at {}. Is `shipgate serve` running?",
                self.socket_path.display()
            )
        })?;

        let json = serde_json::to_string(request)?;
        stream.write_all(json.as_bytes())?;
        stream.write_all(b"\n")?;
        stream.flush()?;

        let mut reader = BufReader::new(stream);
        let mut response_line = String::new();
        reader.read_line(&mut response_line)?;

        let response: GatewayResponse = serde_json::from_str(response_line.trim())
            .context("Failed to parse gateway response")?;

        Ok(response)
    }

    /// Place an order (first call).
    pub fn place(&self, quantity: i64, destination: &str) -> Result<GatewayResponse> {
        self.send(&GatewayRequest::Place {
            request_id: Uuid::new_v4().to_string(),
            quantity,
            destination: destination.to_string(),
        })
    }

    /// Resume a paused order with a decision.
    pub fn resume(&self, pause_token: &str, confirmed: bool) -> Result<GatewayResponse> {
        self.send(&GatewayRequest::Resume {
            request_id: Uuid::new_v4().to_string(),
            pause_token: pause_token.to_string(),
            confirmed,
            decided_by: Some(whoami()),
        })
    }

    /// List orders waiting for a human.
    pub fn pending(&self) -> Result<GatewayResponse> {
        self.send(&GatewayRequest::Pending {
            request_id: Uuid::new_v4().to_string(),
        })
    }
}

/// Who resumes from this machine, for the decision log.
fn whoami() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .map(|u| format!("remote:{}", u))
        .unwrap_or_else(|_| "remote".to_string())
}
