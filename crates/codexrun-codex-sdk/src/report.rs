//! Event accumulation and report synthesis.

use std::collections::BTreeSet;

use serde_json::Value;

use codexrun_core::{CommandRecord, TaskId, TaskReport, TestsStatus};

use crate::event::CodexEvent;

/// Fallback summary when the agent never emitted a final message.
const NO_SUMMARY_FALLBACK: &str =
    "Codex run completed but no final agent summary message was found.";

/// In-flight accumulator state for one Codex run.
///
/// Owned by exactly one executor invocation, mutated as events arrive, and
/// consumed exactly once by [`EventAccumulator::into_report`] after the
/// process exits. Never shared across invocations.
#[derive(Debug, Default)]
pub struct EventAccumulator {
    final_message: Option<String>,
    commands: Vec<CommandRecord>,
    files_changed: BTreeSet<String>,
    raw_events: usize,
}

impl EventAccumulator {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one decoded event into the accumulator state.
    ///
    /// Every decoded record counts towards the raw event total, including
    /// ones that match no category.
    pub fn observe(&mut self, value: &Value) {
        self.raw_events += 1;

        match CodexEvent::classify(value) {
            CodexEvent::AgentMessage { text } => {
                self.final_message = Some(text);
            }
            CodexEvent::CommandExecution { command, exit_code } => {
                self.commands.push(CommandRecord { command, exit_code });
            }
            CodexEvent::FileChange { path } => {
                self.files_changed.insert(path);
            }
            CodexEvent::Unknown => {}
        }
    }

    /// Number of successfully decoded events observed so far.
    pub fn raw_events(&self) -> usize {
        self.raw_events
    }

    /// Reduce the accumulated state plus the process exit code into the
    /// final report.
    ///
    /// Never fails: missing data degrades the report's content, not its
    /// construction. A known non-zero exit code is appended to the summary
    /// whichever branch produced the base text.
    pub fn into_report(self, task_id: TaskId, exit_code: Option<i32>) -> TaskReport {
        let tests_status = TestsStatus::infer(&self.commands);

        let mut summary = self
            .final_message
            .unwrap_or_else(|| NO_SUMMARY_FALLBACK.to_string());
        if let Some(code) = exit_code {
            if code != 0 {
                summary.push_str(&format!(" (codex exited with code {code})"));
            }
        }

        TaskReport {
            task_id,
            summary,
            files_changed: self.files_changed.into_iter().collect(),
            commands: self.commands,
            tests_status,
            raw_events_count: self.raw_events,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codexrun_core::Outcome;
    use serde_json::json;

    fn file_change(path: &str) -> Value {
        json!({ "item": { "type": "file_change", "path": path } })
    }

    #[test]
    fn test_files_deduplicated() {
        let mut acc = EventAccumulator::new();
        acc.observe(&file_change("a.txt"));
        acc.observe(&file_change("b.txt"));
        acc.observe(&file_change("a.txt"));

        let report = acc.into_report(TaskId::new("t"), Some(0));
        assert_eq!(report.files_changed, vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn test_later_message_overwrites_earlier() {
        let mut acc = EventAccumulator::new();
        acc.observe(&json!({
            "type": "item.completed",
            "item": { "type": "agent_message", "text": "first" }
        }));
        acc.observe(&json!({
            "type": "item.completed",
            "item": { "type": "agent_message", "text": "second" }
        }));

        let report = acc.into_report(TaskId::new("t"), Some(0));
        assert_eq!(report.summary, "second");
    }

    #[test]
    fn test_commands_preserve_arrival_order() {
        let mut acc = EventAccumulator::new();
        for cmd in ["ls", "cargo build", "cargo test"] {
            acc.observe(&json!({
                "item": { "type": "command_execution", "command": cmd, "exit_code": 0 }
            }));
        }

        let report = acc.into_report(TaskId::new("t"), Some(0));
        let commands: Vec<&str> = report.commands.iter().map(|c| c.command.as_str()).collect();
        assert_eq!(commands, vec!["ls", "cargo build", "cargo test"]);
        assert_eq!(report.tests_status, TestsStatus::AllPassed);
    }

    #[test]
    fn test_unknown_events_count_but_do_not_accumulate() {
        let mut acc = EventAccumulator::new();
        acc.observe(&json!({ "type": "turn.started" }));
        acc.observe(&json!({ "item": { "type": "reasoning", "text": "hmm" } }));
        acc.observe(&file_change("a.txt"));

        let report = acc.into_report(TaskId::new("t"), Some(0));
        assert_eq!(report.raw_events_count, 3);
        assert_eq!(report.files_changed, vec!["a.txt"]);
        assert!(report.commands.is_empty());
    }

    #[test]
    fn test_fallback_summary() {
        let acc = EventAccumulator::new();
        let report = acc.into_report(TaskId::new("t"), Some(0));
        assert_eq!(report.summary, NO_SUMMARY_FALLBACK);
        assert_eq!(report.tests_status, TestsStatus::NotRun);
        assert_eq!(report.outcome(), Outcome::Unknown);
        assert_eq!(report.raw_events_count, 0);
    }

    #[test]
    fn test_nonzero_exit_annotates_summary() {
        let acc = EventAccumulator::new();
        let report = acc.into_report(TaskId::new("t"), Some(2));
        assert!(report.summary.starts_with(NO_SUMMARY_FALLBACK));
        assert!(report.summary.ends_with("(codex exited with code 2)"));
    }

    #[test]
    fn test_nonzero_exit_annotates_agent_summary_too() {
        let mut acc = EventAccumulator::new();
        acc.observe(&json!({
            "type": "item.completed",
            "item": { "type": "agent_message", "text": "Done." }
        }));

        let report = acc.into_report(TaskId::new("t"), Some(1));
        assert_eq!(report.summary, "Done. (codex exited with code 1)");
    }

    #[test]
    fn test_unknown_exit_code_leaves_summary_unannotated() {
        let acc = EventAccumulator::new();
        let report = acc.into_report(TaskId::new("t"), None);
        assert_eq!(report.summary, NO_SUMMARY_FALLBACK);
    }
}
