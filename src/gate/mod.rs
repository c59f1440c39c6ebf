pub mod config;
pub mod defaults;
pub mod engine;
pub mod linter;
pub mod types;

pub use engine::ApprovalGate;
pub use types::*;
