//! shipgate — human-in-the-loop approval for agent shipping orders.
//!
//! Small orders are approved on the spot. Large orders pause until a human
//! approves or rejects them, then resume with that answer. The binary
//! entrypoint is in `main.rs`.

pub mod approval;
pub mod audit;
pub mod cli;
pub mod gate;
pub mod gateway;
pub mod workflow;
