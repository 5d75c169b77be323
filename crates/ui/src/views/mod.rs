mod quiz;
mod saved;
mod selector;
mod state;

pub use quiz::{QuizIntent, QuizView};
pub use saved::{SavedCommandsView, SavedIntent};
pub use selector::Selector;
pub use state::{ViewError, ViewState, view_state_from_resource};

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;
