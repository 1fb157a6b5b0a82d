//! Task invocation type.

use crate::{CoreError, TaskId};

/// One unit of work handed to a Codex process.
///
/// Owned by exactly one executor call, never mutated, discarded once the
/// run resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskInvocation {
    /// Opaque caller-supplied task identifier.
    pub id: TaskId,

    /// Full natural-language instructions for Codex.
    pub prompt: String,
}

impl TaskInvocation {
    /// Create a new invocation, rejecting empty id or prompt.
    pub fn new(id: impl Into<String>, prompt: impl Into<String>) -> Result<Self, CoreError> {
        let id = id.into();
        let prompt = prompt.into();

        if id.trim().is_empty() {
            return Err(CoreError::InvalidInput("task id must not be empty".into()));
        }
        if prompt.trim().is_empty() {
            return Err(CoreError::InvalidInput("prompt must not be empty".into()));
        }

        Ok(Self {
            id: TaskId::new(id),
            prompt,
        })
    }
}
