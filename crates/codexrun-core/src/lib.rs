//! Codexrun Core Domain Types
//!
//! This crate contains pure domain types with no dependencies on:
//! - Network/HTTP
//! - Subprocess handling
//! - Runtime specifics
//!
//! All types here represent the core business domain of Codexrun: one task
//! brokered to one Codex process, summarized into one immutable report.

pub mod error;
pub mod ids;
pub mod report;
pub mod status;
pub mod task;

// Re-export commonly used types
pub use error::CoreError;
pub use ids::TaskId;
pub use report::{CommandRecord, TaskReport};
pub use status::{Outcome, TestsStatus};
pub use task::TaskInvocation;
