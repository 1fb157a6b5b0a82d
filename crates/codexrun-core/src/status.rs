//! Status enums for test results and caller-facing outcomes.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::report::CommandRecord;

/// Inferred status of the tests a Codex run executed.
///
/// Never set directly: always derived from the observed command records via
/// [`TestsStatus::infer`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestsStatus {
    /// Every test-like command finished with a known exit code of zero.
    AllPassed,
    /// At least one test-like command finished with a known non-zero exit code.
    SomeFailed,
    /// No test-like command ran, or every candidate's exit code is unknown.
    #[default]
    NotRun,
}

impl TestsStatus {
    /// Derive the tests status from the ordered command records of a run.
    ///
    /// A command counts as test-like when its text contains the substring
    /// `"test"` case-insensitively. The match is deliberately coarse (it also
    /// catches `"latest"`); this mirrors the observable behavior callers
    /// depend on. An unknown exit code never upgrades the status to
    /// `AllPassed`.
    pub fn infer(commands: &[CommandRecord]) -> Self {
        let test_commands: Vec<&CommandRecord> = commands
            .iter()
            .filter(|c| c.command.to_lowercase().contains("test"))
            .collect();

        if test_commands.is_empty() {
            return Self::NotRun;
        }

        let any_failed = test_commands
            .iter()
            .any(|c| matches!(c.exit_code, Some(code) if code != 0));
        let any_unknown = test_commands.iter().any(|c| c.exit_code.is_none());

        if any_failed {
            Self::SomeFailed
        } else if any_unknown {
            Self::NotRun
        } else {
            Self::AllPassed
        }
    }

    /// Wire representation (`all_passed`, `some_failed`, `not_run`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AllPassed => "all_passed",
            Self::SomeFailed => "some_failed",
            Self::NotRun => "not_run",
        }
    }
}

impl fmt::Display for TestsStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller-facing classification of a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// All observed tests passed.
    Success,
    /// At least one observed test failed.
    Failed,
    /// Tests did not run or their result could not be determined.
    Unknown,
}

impl From<TestsStatus> for Outcome {
    fn from(status: TestsStatus) -> Self {
        match status {
            TestsStatus::AllPassed => Self::Success,
            TestsStatus::SomeFailed => Self::Failed,
            TestsStatus::NotRun => Self::Unknown,
        }
    }
}

impl Outcome {
    /// Wire representation (`success`, `failed`, `unknown`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failed => "failed",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
