use buddy_core::model::{ToolCatalog, ToolId};

use crate::vm::selector_vm::SelectorItem;

/// Top-level screen picked from the mode list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppMode {
    Quiz,
    Saved,
}

impl AppMode {
    pub const ALL: [AppMode; 2] = [AppMode::Quiz, AppMode::Saved];

    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            AppMode::Quiz => "quiz",
            AppMode::Saved => "saved",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            AppMode::Quiz => "Quiz",
            AppMode::Saved => "Saved Commands",
        }
    }

    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.id() == id)
    }
}

#[must_use]
pub fn mode_items() -> Vec<SelectorItem> {
    AppMode::ALL
        .into_iter()
        .map(|mode| SelectorItem::new(mode.id(), mode.label(), ""))
        .collect()
}

/// One selector entry per catalog tool, in catalog order.
#[must_use]
pub fn tool_items(catalog: &ToolCatalog) -> Vec<SelectorItem> {
    catalog
        .iter()
        .map(|tool| {
            SelectorItem::new(
                tool.id().as_str(),
                format!("{} {}", tool.icon(), tool.id()),
                tool.description(),
            )
        })
        .collect()
}

/// Selector entries for the tools that currently have saved commands.
#[must_use]
pub fn saved_tool_items(catalog: &ToolCatalog, visible: &[ToolId]) -> Vec<SelectorItem> {
    visible
        .iter()
        .filter_map(|id| catalog.get(id))
        .map(|tool| {
            SelectorItem::new(
                tool.id().as_str(),
                format!("{} {}", tool.icon(), tool.id()),
                tool.description(),
            )
        })
        .collect()
}
