//! Structural classification of decoded Codex events.

use serde_json::Value;

/// One decoded event from the Codex stream, classified by shape.
///
/// The wire protocol is loosely typed: instead of failing on schema
/// mismatches, classification duck-types each record with optional-field
/// lookups and falls back to [`CodexEvent::Unknown`] for every shape it does
/// not recognize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodexEvent {
    /// Final agent message; later occurrences overwrite earlier ones.
    AgentMessage { text: String },

    /// A command the agent executed, with its exit code when reported.
    CommandExecution {
        command: String,
        exit_code: Option<i64>,
    },

    /// A file the agent reported changing.
    FileChange { path: String },

    /// A validly decoded record matching no known category.
    Unknown,
}

impl CodexEvent {
    /// Classify one decoded record by structural shape.
    ///
    /// A record matches at most one category. Categories are checked against
    /// the record as a whole, so a malformed candidate (e.g. a `file_change`
    /// whose path is not a string) classifies as `Unknown` rather than
    /// falling through to another category.
    pub fn classify(value: &Value) -> Self {
        let item = value.get("item");
        let item_type = item
            .and_then(|i| i.get("type"))
            .and_then(Value::as_str)
            .unwrap_or_default();

        if value.get("type").and_then(Value::as_str) == Some("item.completed")
            && item_type == "agent_message"
        {
            if let Some(text) = item.and_then(|i| i.get("text")).and_then(Value::as_str) {
                return Self::AgentMessage {
                    text: text.to_string(),
                };
            }
            return Self::Unknown;
        }

        if item_type == "command_execution" {
            let command = match item.and_then(|i| i.get("command")) {
                Some(Value::String(s)) => s.clone(),
                None | Some(Value::Null) => String::new(),
                Some(other) => other.to_string(),
            };
            let exit_code = item
                .and_then(|i| i.get("exit_code"))
                .and_then(Value::as_i64);
            return Self::CommandExecution { command, exit_code };
        }

        if item_type == "file_change" {
            // First present non-null alias wins; a non-string winner means
            // no path at all, not a fall-through to the next alias.
            let path = ["path", "file", "filename"]
                .iter()
                .filter_map(|key| item.and_then(|i| i.get(*key)))
                .find(|v| !v.is_null())
                .and_then(Value::as_str);
            if let Some(path) = path {
                return Self::FileChange {
                    path: path.to_string(),
                };
            }
            return Self::Unknown;
        }

        Self::Unknown
    }
}
