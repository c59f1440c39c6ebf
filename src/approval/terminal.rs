//! Terminal-based approval prompt using crossterm.
//!
//! When an order pauses, this module shows the operator what the agent wants
//! to ship and waits for a single keystroke: approve or reject.

use crate::approval::ApprovalHandler;
use crate::gate::types::{ConfirmationAnswer, ConfirmationRequest};
use anyhow::Result;
use async_trait::async_trait;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent},
    execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal,
};
use std::io::Write;
use std::time::{Duration, Instant};

/// Terminal-based approval handler.
/// Shows a prompt in the terminal and waits for the user to press A/R.
pub struct TerminalApproval {
    /// How long to wait before rejecting (default: 5 minutes)
    timeout: Duration,
}

impl TerminalApproval {
    pub fn new() -> Self {
        Self {
            timeout: Duration::from_secs(300),
        }
    }
}

impl Default for TerminalApproval {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ApprovalHandler for TerminalApproval {
    async fn request_approval(&self, request: &ConfirmationRequest) -> Result<ConfirmationAnswer> {
        // crossterm reads are blocking
        let request = request.clone();
        let timeout = self.timeout;

        tokio::task::spawn_blocking(move || show_approval_prompt(&request, timeout)).await?
    }
}

/// Display the approval prompt and wait for user input.
fn show_approval_prompt(
    request: &ConfirmationRequest,
    timeout: Duration,
) -> Result<ConfirmationAnswer> {
    let mut stdout = std::io::stdout();

    execute!(
        stdout,
        Print("\n"),
        SetForegroundColor(Color::Yellow),
        Print("╔══════════════════════════════════════════════════════════╗\n"),
        Print("║              ⚠  APPROVAL REQUIRED                        ║\n"),
        Print("╠══════════════════════════════════════════════════════════╣\n"),
        ResetColor,
    )?;

    execute!(
        stdout,
        SetForegroundColor(Color::White),
        Print(format!(
            "║  Containers:  {:<43}║\n",
            request.payload.quantity
        )),
        Print(format!(
            "║  Destination: {:<43}║\n",
            truncate(&request.payload.destination, 43)
        )),
    )?;

    execute!(
        stdout,
        SetForegroundColor(Color::Yellow),
        Print("║                                                          ║\n"),
        Print(format!("║  {:<56}║\n", truncate(&request.hint, 56))),
        Print("║                                                          ║\n"),
        SetForegroundColor(Color::Green),
        Print("║  [A] Approve    "),
        SetForegroundColor(Color::Red),
        Print("[R/D] Reject                             "),
        SetForegroundColor(Color::Yellow),
        Print("║\n"),
        Print("╚══════════════════════════════════════════════════════════╝\n"),
        ResetColor,
    )?;
    stdout.flush()?;

    terminal::enable_raw_mode()?;

    let answer = wait_for_key(timeout);

    // Restore the terminal even if reading failed
    terminal::disable_raw_mode()?;
    let answer = answer?;

    if answer.confirmed {
        execute!(
            stdout,
            SetForegroundColor(Color::Green),
            Print("\n  ✓ Approved\n\n"),
            ResetColor,
        )?;
    } else {
        execute!(
            stdout,
            SetForegroundColor(Color::Red),
            Print("\n  ✗ Rejected\n\n"),
            ResetColor,
        )?;
    }
    stdout.flush()?;

    Ok(answer)
}

fn wait_for_key(timeout: Duration) -> Result<ConfirmationAnswer> {
    // Ignored keys do not restart the clock
    let deadline = Instant::now() + timeout;
    loop {
        let ready = match time_left(deadline) {
            Some(remaining) => event::poll(remaining)?,
            None => false,
        };
        if !ready {
            tracing::warn!("Approval prompt timed out after {:?}, rejecting", timeout);
            return Ok(ConfirmationAnswer::reject());
        }
        if let Event::Key(KeyEvent { code, .. }) = event::read()? {
            if let Some(answer) = answer_for_key(code) {
                return Ok(answer);
            }
        }
    }
}

fn time_left(deadline: Instant) -> Option<Duration> {
    let remaining = deadline.saturating_duration_since(Instant::now());
    (!remaining.is_zero()).then_some(remaining)
}

/// A/Y approve; R/D/N/Esc reject, either case. Anything else is ignored.
fn answer_for_key(code: KeyCode) -> Option<ConfirmationAnswer> {
    match code {
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'a' | 'y' => Some(ConfirmationAnswer::approve("terminal")),
            'r' | 'd' | 'n' => Some(ConfirmationAnswer::reject()),
            _ => None,
        },
        KeyCode::Esc => Some(ConfirmationAnswer::reject()),
        _ => None,
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

/// Auto-approve handler (for demos and CI).
/// Approves everything without prompting.
pub struct AutoApproval;

#[async_trait]
impl ApprovalHandler for AutoApproval {
    async fn request_approval(&self, _request: &ConfirmationRequest) -> Result<ConfirmationAnswer> {
        Ok(ConfirmationAnswer::approve("auto"))
    }
}

/// Auto-deny handler (for strict CI mode).
/// Rejects every order that reaches a human.
pub struct AutoDeny;

#[async_trait]
impl ApprovalHandler for AutoDeny {
    async fn request_approval(&self, _request: &ConfirmationRequest) -> Result<ConfirmationAnswer> {
        Ok(ConfirmationAnswer::reject())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::approval::handler_for_mode;
    use crate::gate::types::ShipmentRequest;

    fn confirmation() -> ConfirmationRequest {
        ConfirmationRequest {
            hint: "Large order: 10 containers to Rotterdam. Approve?".to_string(),
            payload: ShipmentRequest::new(10, "Rotterdam"),
        }
    }

    #[test]
    fn test_auto_handlers() {
        let approved = tokio_test::block_on(AutoApproval.request_approval(&confirmation())).unwrap();
        assert!(approved.confirmed);
        assert_eq!(approved.decided_by.as_deref(), Some("auto"));

        let denied = tokio_test::block_on(AutoDeny.request_approval(&confirmation())).unwrap();
        assert!(!denied.confirmed);
        assert!(denied.decided_by.is_none());
    }

    #[test]
    fn test_handler_for_mode() {
        assert!(handler_for_mode("auto").is_ok());
        assert!(handler_for_mode("DENY").is_ok());
        assert!(handler_for_mode("terminal").is_ok());
        assert!(handler_for_mode("coin-flip").is_err());
    }

    #[test]
    fn test_answer_keys() {
        for key in ['a', 'A', 'y', 'Y'] {
            assert!(answer_for_key(KeyCode::Char(key)).unwrap().confirmed, "key {}", key);
        }
        for key in ['r', 'R', 'd', 'D', 'n', 'N'] {
            assert!(!answer_for_key(KeyCode::Char(key)).unwrap().confirmed, "key {}", key);
        }
        assert!(!answer_for_key(KeyCode::Esc).unwrap().confirmed);
        assert!(answer_for_key(KeyCode::Char('x')).is_none());
        assert!(answer_for_key(KeyCode::Enter).is_none());
    }

    #[test]
    fn test_deadline_does_not_extend() {
        let deadline = Instant::now() + Duration::from_secs(60);
        let left = time_left(deadline).unwrap();
        assert!(left <= Duration::from_secs(60));

        // A deadline of "now" has already passed by the time it is checked
        assert!(time_left(Instant::now()).is_none());
    }

    #[test]
    fn test_truncate_is_char_safe() {
        assert_eq!(truncate("Rotterdam", 20), "Rotterdam");
        assert_eq!(truncate("Ålesund-Ålesund-Ålesund", 10), "Ålesund...");
    }
}
