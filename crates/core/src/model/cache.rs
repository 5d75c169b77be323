use std::collections::HashMap;

use crate::model::catalog::ToolCatalog;
use crate::model::command::SavedCommand;
use crate::model::tool::ToolId;

/// Per-tool saved commands, populated lazily.
///
/// Entries are only ever replaced wholesale; the backend list is authoritative,
/// so nothing is merged or deduplicated here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolCommandCache {
    entries: HashMap<ToolId, Vec<SavedCommand>>,
}

impl ToolCommandCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, tool: &ToolId) -> Option<&[SavedCommand]> {
        self.entries.get(tool).map(Vec::as_slice)
    }

    #[must_use]
    pub fn contains(&self, tool: &ToolId) -> bool {
        self.entries.contains_key(tool)
    }

    /// Replace the entry for `tool`, returning the previous one.
    pub fn replace(
        &mut self,
        tool: ToolId,
        commands: Vec<SavedCommand>,
    ) -> Option<Vec<SavedCommand>> {
        self.entries.insert(tool, commands)
    }

    /// Tools holding an entry, in catalog order. Tools outside the catalog sort last.
    #[must_use]
    pub fn tools_in_order(&self, catalog: &ToolCatalog) -> Vec<ToolId> {
        let mut tools: Vec<ToolId> = self.entries.keys().cloned().collect();
        tools.sort_by(|left, right| {
            let left_pos = catalog.position(left).unwrap_or(usize::MAX);
            let right_pos = catalog.position(right).unwrap_or(usize::MAX);
            left_pos.cmp(&right_pos).then_with(|| left.cmp(right))
        });
        tools
    }
}
