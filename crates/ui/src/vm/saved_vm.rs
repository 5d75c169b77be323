use buddy_core::model::SavedCommand;

use crate::vm::markdown_vm::markdown_to_html;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SavedCommandCardVm {
    pub id: String,
    pub command_text: String,
    pub explanation_html: Option<String>,
}

impl From<&SavedCommand> for SavedCommandCardVm {
    fn from(command: &SavedCommand) -> Self {
        let explanation = command.explanation.trim();
        Self {
            id: command.id.as_str().to_string(),
            command_text: command.command_text.clone(),
            explanation_html: (!explanation.is_empty()).then(|| markdown_to_html(explanation)),
        }
    }
}

#[must_use]
pub fn map_saved_command_cards(commands: &[SavedCommand]) -> Vec<SavedCommandCardVm> {
    commands.iter().map(SavedCommandCardVm::from).collect()
}

/// Message shown when the selected tool lists nothing.
#[must_use]
pub fn empty_commands_message(search: &str) -> &'static str {
    if search.trim().is_empty() {
        "No saved commands for this tool yet."
    } else {
        "No saved commands match that search."
    }
}

#[cfg(test)]
mod tests {
    use buddy_core::model::{CommandId, ToolId};

    use super::*;

    #[test]
    fn cards_render_explanations_and_skip_blank_ones() {
        let git = ToolId::new("git").unwrap();
        let commands = vec![
            SavedCommand::new(CommandId::new("1"), git.clone(), "git status", "Shows `state`"),
            SavedCommand::new(CommandId::new("2"), git, "git log", "  "),
        ];
        let cards = map_saved_command_cards(&commands);
        assert_eq!(cards.len(), 2);
        assert!(cards[0]
            .explanation_html
            .as_deref()
            .is_some_and(|html| html.contains("<code>state</code>")));
        assert_eq!(cards[1].explanation_html, None);
        assert_eq!(cards[1].id, "2");
    }

    #[test]
    fn empty_message_depends_on_search() {
        assert_eq!(empty_commands_message(""), "No saved commands for this tool yet.");
        assert_eq!(
            empty_commands_message("rebase"),
            "No saved commands match that search."
        );
    }
}
