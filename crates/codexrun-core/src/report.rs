//! Task report types.

use serde::{Deserialize, Serialize};

use crate::{Outcome, TaskId, TestsStatus};

/// One command the agent executed, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRecord {
    /// Command text as reported by the agent.
    pub command: String,

    /// Exit code if the agent reported one.
    pub exit_code: Option<i64>,
}

/// Immutable summary of one completed Codex run.
///
/// Built exactly once, after the child process has exited. Always
/// constructible: an agent that emitted nothing parseable still yields a
/// report with default/empty fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskReport {
    /// The task this run executed.
    pub task_id: TaskId,

    /// Final agent message, or a fixed fallback sentence; annotated with the
    /// process exit code when that code is known and non-zero.
    pub summary: String,

    /// Deduplicated paths the agent reported changing.
    pub files_changed: Vec<String>,

    /// Commands in the order the agent ran them.
    pub commands: Vec<CommandRecord>,

    /// Test status inferred from the command records.
    pub tests_status: TestsStatus,

    /// Total number of successfully decoded events, classified or not.
    pub raw_events_count: usize,
}

impl TaskReport {
    /// Caller-facing outcome derived from the tests status.
    pub fn outcome(&self) -> Outcome {
        self.tests_status.into()
    }
}
