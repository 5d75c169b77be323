mod markdown_vm;
mod quiz_vm;
mod saved_vm;
mod selector_vm;
mod tool_vm;

pub use markdown_vm::{markdown_to_html, sanitize_html};
pub use quiz_vm::{NoticeTone, NoticeVm, QuizScreenVm, feedback_class, map_quiz_screen};
pub use saved_vm::{SavedCommandCardVm, empty_commands_message, map_saved_command_cards};
pub use selector_vm::{HighlightMove, SelectorItem, SelectorKey, SelectorVm};
pub use tool_vm::{AppMode, mode_items, saved_tool_items, tool_items};
