//! Codex CLI SDK for Codexrun
//!
//! This crate runs a single Codex task via subprocess (`codex exec`) and
//! distills the streamed JSONL event trace into one [`TaskReport`]:
//! final agent message, changed files, executed commands, and an inferred
//! test status.
//!
//! # Example
//!
//! ```rust,no_run
//! use codexrun_codex_sdk::CodexExecutor;
//! use codexrun_core::TaskInvocation;
//!
//! async fn run_task() -> Result<(), Box<dyn std::error::Error>> {
//!     let executor = CodexExecutor::new("codex").with_workspace("/path/to/repo");
//!
//!     let invocation = TaskInvocation::new("task-3", "add a test")?;
//!     let report = executor.run(&invocation).await?;
//!
//!     println!("Summary: {}", report.summary);
//!     println!("Tests: {}", report.tests_status);
//!     Ok(())
//! }
//! ```

mod error;
mod event;
mod executor;
mod framing;
mod report;

// Re-export main types
pub use error::CodexError;
pub use event::CodexEvent;
pub use executor::CodexExecutor;
pub use framing::LineFramer;
pub use report::EventAccumulator;

pub use codexrun_core::{CommandRecord, TaskInvocation, TaskReport, TestsStatus};
