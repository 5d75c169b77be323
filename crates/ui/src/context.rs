use std::sync::Arc;

use buddy_core::model::ToolCatalog;
use services::{QuizApi, QuizLoopService, SavedCommandBrowser, SearchStrategy};

pub trait UiApp: Send + Sync {
    fn quiz_api(&self) -> Arc<dyn QuizApi>;
    fn tool_catalog(&self) -> ToolCatalog;

    fn search_strategy(&self) -> SearchStrategy {
        SearchStrategy::default()
    }
}

#[derive(Clone)]
pub struct AppContext {
    catalog: ToolCatalog,
    search_strategy: SearchStrategy,

    api: Arc<dyn QuizApi>,
    quiz_loop: Arc<QuizLoopService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        let api = app.quiz_api();
        let quiz_loop = Arc::new(QuizLoopService::new(Arc::clone(&api)));

        Self {
            catalog: app.tool_catalog(),
            search_strategy: app.search_strategy(),
            api,
            quiz_loop,
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &ToolCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }

    /// A fresh browser with an empty cache. Each saved-commands view owns one.
    #[must_use]
    pub fn saved_command_browser(&self) -> SavedCommandBrowser {
        SavedCommandBrowser::new(Arc::clone(&self.api), self.catalog.clone())
            .with_search_strategy(self.search_strategy)
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
