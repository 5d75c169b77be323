use serde::{Deserialize, Serialize};

use crate::model::tool::ToolId;

/// Backend-assigned identifier of a saved command.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommandId(String);

impl CommandId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CommandId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A persisted (tool, command, explanation) triple, as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedCommand {
    pub id: CommandId,
    pub tool_name: ToolId,
    pub command_text: String,
    #[serde(default)]
    pub explanation: String,
}

impl SavedCommand {
    #[must_use]
    pub fn new(
        id: CommandId,
        tool_name: ToolId,
        command_text: impl Into<String>,
        explanation: impl Into<String>,
    ) -> Self {
        Self {
            id,
            tool_name,
            command_text: command_text.into(),
            explanation: explanation.into(),
        }
    }
}

/// Case-insensitive substring match against command text or explanation.
///
/// `needle` must already be lower-cased; an empty needle matches everything.
#[must_use]
pub fn command_matches(command: &SavedCommand, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    command.command_text.to_lowercase().contains(needle)
        || command.explanation.to_lowercase().contains(needle)
}
