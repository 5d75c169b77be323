use async_trait::async_trait;

use buddy_core::model::{Feedback, QuizQuestion, SavedCommand, ToolId, command_matches};

use crate::error::ApiError;

/// Backend capabilities consumed by the client.
///
/// Question generation and answer checking live behind this trait; the client
/// never embeds a generation algorithm of its own.
#[async_trait]
pub trait QuizApi: Send + Sync {
    /// Generate a fresh question. Implementations must bypass any HTTP cache.
    async fn fetch_question(&self, tool: &ToolId) -> Result<QuizQuestion, ApiError>;

    async fn submit_answer(
        &self,
        tool: &ToolId,
        question: &str,
        answer: &str,
    ) -> Result<Feedback, ApiError>;

    async fn explain_command(&self, tool: &ToolId, command: &str) -> Result<String, ApiError>;

    async fn save_command(
        &self,
        tool: &ToolId,
        command: &str,
        explanation: &str,
    ) -> Result<SavedCommand, ApiError>;

    /// All saved commands for `tool`. "No content" and "not found" are an empty list.
    async fn list_saved_commands(&self, tool: &ToolId) -> Result<Vec<SavedCommand>, ApiError>;

    /// Saved commands for `tool` matching `text`.
    ///
    /// The default lists everything and filters locally.
    async fn search_saved_commands(
        &self,
        tool: &ToolId,
        text: &str,
    ) -> Result<Vec<SavedCommand>, ApiError> {
        let needle = text.trim().to_lowercase();
        let commands = self.list_saved_commands(tool).await?;
        Ok(commands
            .into_iter()
            .filter(|command| command_matches(command, &needle))
            .collect())
    }
}
