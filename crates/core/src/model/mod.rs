mod cache;
mod catalog;
mod command;
mod quiz;
mod tool;

pub use cache::ToolCommandCache;
pub use catalog::ToolCatalog;
pub use command::{CommandId, SavedCommand, command_matches};
pub use quiz::{Feedback, FeedbackVerdict, QuizQuestion};
pub use tool::{Tool, ToolError, ToolId};
