use std::sync::Arc;

use tracing::{debug, warn};

use buddy_core::model::{SavedCommand, ToolCatalog, ToolCommandCache, ToolId, command_matches};

use crate::api::QuizApi;

/// Where saved-command searches are filtered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SearchStrategy {
    /// Re-fetch the full list and filter locally over command text and explanation.
    #[default]
    ClientSide,
    /// Ask the backend search endpoint (matches command text only).
    ServerSide,
}

/// How `SavedCommandBrowser::select_tool` obtained its entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CacheLookup {
    Hit,
    Fetched,
    /// The fetch failed; the tool shows no commands and will be retried next time.
    Failed,
}

/// Read-only browser over saved commands, cached per tool.
#[derive(Clone)]
pub struct SavedCommandBrowser {
    api: Arc<dyn QuizApi>,
    catalog: ToolCatalog,
    cache: ToolCommandCache,
    selected: Option<ToolId>,
    failed: Vec<ToolId>,
    strategy: SearchStrategy,
}

impl SavedCommandBrowser {
    #[must_use]
    pub fn new(api: Arc<dyn QuizApi>, catalog: ToolCatalog) -> Self {
        Self {
            api,
            catalog,
            cache: ToolCommandCache::new(),
            selected: None,
            failed: Vec::new(),
            strategy: SearchStrategy::default(),
        }
    }

    #[must_use]
    pub fn with_search_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    #[must_use]
    pub fn cache(&self) -> &ToolCommandCache {
        &self.cache
    }

    #[must_use]
    pub fn selected(&self) -> Option<&ToolId> {
        self.selected.as_ref()
    }

    /// Tools whose list could not be fetched during the last `load_all_tools`.
    #[must_use]
    pub fn failed_tools(&self) -> &[ToolId] {
        &self.failed
    }

    /// True when the last load reached no tool at all.
    #[must_use]
    pub fn load_failed(&self) -> bool {
        !self.failed.is_empty() && self.failed.len() == self.catalog.len()
    }

    /// Tools that currently have a cache entry, in catalog order.
    #[must_use]
    pub fn visible_tools(&self) -> Vec<ToolId> {
        self.cache.tools_in_order(&self.catalog)
    }

    #[must_use]
    pub fn commands(&self, tool: &ToolId) -> &[SavedCommand] {
        self.cache.get(tool).unwrap_or(&[])
    }

    #[must_use]
    pub fn selected_commands(&self) -> &[SavedCommand] {
        match &self.selected {
            Some(tool) => self.commands(tool),
            None => &[],
        }
    }

    /// Fetch every catalog tool. Only tools with at least one command become visible.
    ///
    /// Per-tool failures are logged and treated as "no commands". Returns the
    /// number of visible tools.
    pub async fn load_all_tools(&mut self) -> usize {
        let mut cache = ToolCommandCache::new();
        let mut failed = Vec::new();
        for tool in self.catalog.ids() {
            match self.api.list_saved_commands(tool).await {
                Ok(commands) if !commands.is_empty() => {
                    cache.replace(tool.clone(), commands);
                }
                Ok(_) => debug!(%tool, "no saved commands"),
                Err(err) => {
                    warn!(%tool, error = %err, "failed to load saved commands");
                    failed.push(tool.clone());
                }
            }
        }
        self.cache = cache;
        self.failed = failed;

        let visible = self.visible_tools();
        let keep_selection = self
            .selected
            .as_ref()
            .is_some_and(|tool| visible.contains(tool));
        if !keep_selection {
            self.selected = visible.first().cloned();
        }
        visible.len()
    }

    /// Switch to `tool`, fetching only when nothing is cached for it.
    pub async fn select_tool(&mut self, tool: ToolId) -> CacheLookup {
        self.selected = Some(tool.clone());
        if self.cache.contains(&tool) {
            return CacheLookup::Hit;
        }
        match self.api.list_saved_commands(&tool).await {
            Ok(commands) => {
                self.cache.replace(tool, commands);
                CacheLookup::Fetched
            }
            Err(err) => {
                warn!(%tool, error = %err, "failed to load saved commands");
                CacheLookup::Failed
            }
        }
    }

    /// Re-fetch `tool` and keep only matches for `text`.
    ///
    /// The cached entry is overwritten with the filtered result, so clearing the
    /// search means searching again with empty text. Returns the match count.
    pub async fn search(&mut self, tool: ToolId, text: &str) -> usize {
        self.selected = Some(tool.clone());
        let result = match self.strategy {
            SearchStrategy::ClientSide => {
                let needle = text.trim().to_lowercase();
                self.api.list_saved_commands(&tool).await.map(|commands| {
                    commands
                        .into_iter()
                        .filter(|command| command_matches(command, &needle))
                        .collect::<Vec<_>>()
                })
            }
            SearchStrategy::ServerSide => self.api.search_saved_commands(&tool, text).await,
        };

        let commands = result.unwrap_or_else(|err| {
            warn!(%tool, error = %err, "saved command search failed");
            Vec::new()
        });
        let count = commands.len();
        self.cache.replace(tool, commands);
        count
    }
}
