//! Codex executor for running tasks via subprocess.
//!
//! This module provides the main `CodexExecutor` type for executing one task
//! with `codex exec` in full-auto mode with streaming JSON output.

use std::path::PathBuf;
use std::process::Stdio;

use serde_json::Value;
use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tracing::{debug, error, info};

use codexrun_core::{TaskInvocation, TaskReport};

use crate::error::CodexError;
use crate::framing::LineFramer;
use crate::report::EventAccumulator;

/// Executor for Codex tasks.
///
/// One call to [`CodexExecutor::run`] spawns one Codex process, streams its
/// stdout through the line framer and event accumulator, and resolves with
/// exactly one [`TaskReport`] once the process exits. The executor never
/// retries, imposes no timeout, and never kills the child; a non-zero exit
/// code is reported as data, not as an error.
///
/// # Example
///
/// ```rust,no_run
/// use codexrun_codex_sdk::CodexExecutor;
/// use codexrun_core::TaskInvocation;
///
/// async fn run() -> Result<(), Box<dyn std::error::Error>> {
///     let executor = CodexExecutor::new("codex");
///     let invocation = TaskInvocation::new("task-1", "fix the flaky test")?;
///     let report = executor.run(&invocation).await?;
///     println!("{}", report.summary);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CodexExecutor {
    /// Path to the Codex CLI executable.
    codex_path: String,

    /// Working directory for the spawned process; current directory if unset.
    workspace: Option<PathBuf>,
}

impl CodexExecutor {
    /// Create a new executor with the given path to the Codex CLI.
    ///
    /// The path can be just "codex" to use PATH lookup, or a full path.
    pub fn new(codex_path: impl Into<String>) -> Self {
        Self {
            codex_path: codex_path.into(),
            workspace: None,
        }
    }

    /// Set the workspace directory Codex runs in.
    pub fn with_workspace(mut self, workspace: impl Into<PathBuf>) -> Self {
        self.workspace = Some(workspace.into());
        self
    }

    /// Execute one task and synthesize its report.
    ///
    /// Resolves once the Codex process exits; fails only when the process
    /// cannot be spawned or its output channel breaks. Concurrent calls are
    /// independent: each owns its child process and accumulator state.
    pub async fn run(&self, invocation: &TaskInvocation) -> Result<TaskReport, CodexError> {
        let prompt = format!(
            "{}\n\n(You are executing task {}.)",
            invocation.prompt, invocation.id
        );

        info!(
            codex_path = %self.codex_path,
            task_id = %invocation.id,
            prompt_len = prompt.len(),
            "Preparing codex execution"
        );

        let mut cmd = Command::new(&self.codex_path);
        cmd.arg("exec")
            .arg("--full-auto")
            .arg("--json")
            .arg(&prompt);

        // stdout carries the JSONL event stream; stderr stays on the host's
        // stderr for live operator visibility and is never parsed.
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit());

        if let Some(workspace) = &self.workspace {
            cmd.current_dir(workspace);
            info!(workspace = %workspace.display(), "Using configured workspace");
        }

        let mut child = cmd.spawn().map_err(|e| {
            error!(error = %e, codex_path = %self.codex_path, "Failed to spawn codex process");
            CodexError::Spawn(e)
        })?;

        debug!("Codex process spawned, streaming stdout");

        let mut accumulator = EventAccumulator::new();
        if let Some(mut stdout) = child.stdout.take() {
            let mut framer = LineFramer::new();
            let mut chunk = [0u8; 8192];
            loop {
                let n = stdout.read(&mut chunk).await?;
                if n == 0 {
                    break;
                }
                for line in framer.push(&chunk[..n]) {
                    match serde_json::from_str::<Value>(&line) {
                        Ok(event) => accumulator.observe(&event),
                        Err(_) => {
                            // Non-JSON noise on the same channel is expected.
                            debug!(line_len = line.len(), "Dropping non-JSON stdout line");
                        }
                    }
                }
            }
        }

        let status = child.wait().await?;
        let exit_code = status.code();

        info!(
            task_id = %invocation.id,
            exit_code = ?exit_code,
            raw_events = accumulator.raw_events(),
            "Codex process exited"
        );

        Ok(accumulator.into_report(invocation.id.clone(), exit_code))
    }
}

impl Default for CodexExecutor {
    fn default() -> Self {
        Self::new("codex")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codexrun_core::{Outcome, TestsStatus};

    #[test]
    fn test_executor_builder() {
        let executor = CodexExecutor::new("/usr/local/bin/codex").with_workspace("/tmp/repo");
        assert_eq!(executor.codex_path, "/usr/local/bin/codex");
        assert_eq!(executor.workspace, Some(PathBuf::from("/tmp/repo")));

        let executor = CodexExecutor::default();
        assert_eq!(executor.codex_path, "codex");
        assert!(executor.workspace.is_none());
    }

    #[tokio::test]
    async fn test_spawn_failure_is_an_error() {
        let executor = CodexExecutor::new("/nonexistent/codex-binary");
        let invocation = TaskInvocation::new("task-1", "do something").unwrap();

        let result = executor.run(&invocation).await;
        assert!(matches!(result, Err(CodexError::Spawn(_))));
    }

    /// Write an executable stub that plays back a canned Codex event stream.
    #[cfg(unix)]
    fn stub_agent(dir: &tempfile::TempDir, script_body: &str) -> String {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.path().join("fake-codex");
        std::fs::write(&path, format!("#!/bin/sh\n{script_body}")).unwrap();
        let mut perms = std::fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).unwrap();
        path.to_str().unwrap().to_string()
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_end_to_end_report() {
        let dir = tempfile::tempdir().unwrap();
        let stub = stub_agent(
            &dir,
            concat!(
                r#"echo '{"type":"item.completed","item":{"type":"agent_message","text":"Added test."}}'"#,
                "\n",
                r#"echo '{"item":{"type":"command_execution","command":"npm test","exit_code":0}}'"#,
                "\n",
                r#"echo '{"item":{"type":"file_change","path":"tests/a.test.ts"}}'"#,
                "\n",
                "exit 0\n",
            ),
        );

        let executor = CodexExecutor::new(stub);
        let invocation = TaskInvocation::new("task-3", "add a test").unwrap();
        let report = executor.run(&invocation).await.unwrap();

        assert_eq!(report.task_id.as_str(), "task-3");
        assert_eq!(report.summary, "Added test.");
        assert_eq!(report.files_changed, vec!["tests/a.test.ts"]);
        assert_eq!(report.tests_status, TestsStatus::AllPassed);
        assert_eq!(report.outcome(), Outcome::Success);
        assert_eq!(report.raw_events_count, 3);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_noise_lines_and_nonzero_exit() {
        let dir = tempfile::tempdir().unwrap();
        let stub = stub_agent(
            &dir,
            concat!(
                "echo 'plain text noise'\n",
                r#"echo '{"item":{"type":"command_execution","command":"cargo test","exit_code":101}}'"#,
                "\n",
                "echo '{not json'\n",
                "exit 2\n",
            ),
        );

        let executor = CodexExecutor::new(stub);
        let invocation = TaskInvocation::new("task-9", "run the suite").unwrap();
        let report = executor.run(&invocation).await.unwrap();

        // Only the valid JSON line counts; noise is dropped silently.
        assert_eq!(report.raw_events_count, 1);
        assert_eq!(report.tests_status, TestsStatus::SomeFailed);
        assert!(report.summary.contains("(codex exited with code 2)"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_empty_stream_still_yields_report() {
        let dir = tempfile::tempdir().unwrap();
        let stub = stub_agent(&dir, "exit 0\n");

        let executor = CodexExecutor::new(stub);
        let invocation = TaskInvocation::new("task-0", "noop").unwrap();
        let report = executor.run(&invocation).await.unwrap();

        assert_eq!(report.raw_events_count, 0);
        assert!(report.files_changed.is_empty());
        assert!(report.commands.is_empty());
        assert_eq!(report.tests_status, TestsStatus::NotRun);
    }
}
