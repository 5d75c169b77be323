use dioxus::prelude::*;
use tracing::debug;

use buddy_core::model::ToolId;

use crate::context::AppContext;
use crate::views::{Selector, ViewError, ViewState, view_state_from_resource};
use crate::vm::{empty_commands_message, map_saved_command_cards, saved_tool_items};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SavedIntent {
    SelectTool(String),
    SetSearch(String),
    Search,
}

#[component]
pub fn SavedCommandsView() -> Element {
    let ctx = use_context::<AppContext>();
    let catalog = ctx.catalog().clone();
    let browser = use_signal(|| ctx.saved_command_browser());
    let search = use_signal(String::new);
    let busy = use_signal(|| false);

    let resource = use_resource(move || {
        let mut browser = browser;
        async move {
            let mut loaded = browser.peek().clone();
            let visible = loaded.load_all_tools().await;
            let failed = loaded.load_failed();
            browser.set(loaded);
            if failed {
                return Err(ViewError::Unknown);
            }
            Ok(visible)
        }
    });

    let dispatch_intent = use_callback(move |intent: SavedIntent| {
        let mut browser = browser;
        let mut search = search;
        let mut busy = busy;

        // One saved-command fetch at a time.
        if *busy.peek() && !matches!(intent, SavedIntent::SetSearch(_)) {
            debug!(?intent, "saved command fetch in flight, ignoring");
            return;
        }

        match intent {
            SavedIntent::SelectTool(raw) => {
                let Ok(tool) = ToolId::new(raw) else {
                    return;
                };
                search.set(String::new());
                busy.set(true);
                spawn(async move {
                    let mut next = browser.peek().clone();
                    let lookup = next.select_tool(tool.clone()).await;
                    debug!(%tool, ?lookup, "saved command tool selected");
                    browser.set(next);
                    busy.set(false);
                });
            }
            SavedIntent::SetSearch(text) => search.set(text),
            SavedIntent::Search => {
                let Some(tool) = browser.peek().selected().cloned() else {
                    return;
                };
                let text = search.peek().clone();
                busy.set(true);
                spawn(async move {
                    let mut next = browser.peek().clone();
                    let matches = next.search(tool.clone(), &text).await;
                    debug!(%tool, matches, "saved command search finished");
                    browser.set(next);
                    busy.set(false);
                });
            }
        }
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<SavedTestHandles>() {
                handles.register(dispatch_intent);
            }
        }
    }

    let state = view_state_from_resource(&resource);
    let browser_read = browser.read();
    let visible = browser_read.visible_tools();
    let items = saved_tool_items(&catalog, &visible);
    let selected = browser_read.selected().map(|tool| tool.as_str().to_string());
    let selector_key = format!(
        "{}:{}",
        visible
            .iter()
            .map(ToolId::as_str)
            .collect::<Vec<_>>()
            .join(","),
        selected.clone().unwrap_or_default()
    );
    let cards = map_saved_command_cards(browser_read.selected_commands());
    drop(browser_read);
    let search_value = search();
    let empty_message = empty_commands_message(&search_value);

    rsx! {
        div { class: "page saved-page",
            header { class: "view-header",
                h2 { class: "view-title", "Saved Commands" }
                p { class: "view-subtitle", "Commands you saved from quiz answers, grouped by tool." }
            }
            div { class: "view-divider" }
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| {
                            let mut resource = resource;
                            resource.restart();
                        },
                        "Retry"
                    }
                },
                ViewState::Ready(_) if items.is_empty() => rsx! {
                    p { class: "saved-empty", "No saved commands yet. Save an answer from the quiz to see it here." }
                },
                ViewState::Ready(_) => rsx! {
                    Selector {
                        key: "{selector_key}",
                        label: "Tool".to_string(),
                        items,
                        selected,
                        disabled: busy(),
                        on_select: move |id: String| dispatch_intent.call(SavedIntent::SelectTool(id)),
                    }
                    div { class: "saved-search",
                        input {
                            class: "saved-search-input",
                            r#type: "text",
                            placeholder: "Search commands...",
                            value: "{search_value}",
                            oninput: move |evt| dispatch_intent.call(SavedIntent::SetSearch(evt.value())),
                            onkeydown: move |evt| {
                                if evt.data.key() == Key::Enter && !busy() {
                                    evt.prevent_default();
                                    dispatch_intent.call(SavedIntent::Search);
                                }
                            },
                        }
                        button {
                            class: "btn btn-secondary",
                            r#type: "button",
                            disabled: busy(),
                            onclick: move |_| dispatch_intent.call(SavedIntent::Search),
                            "Search"
                        }
                    }
                    if busy() {
                        p { class: "saved-loading", "Loading..." }
                    } else if cards.is_empty() {
                        p { class: "saved-empty", "{empty_message}" }
                    } else {
                        ul { class: "saved-list",
                            for card in cards {
                                li { key: "{card.id}", class: "saved-card",
                                    code { class: "saved-command", "{card.command_text}" }
                                    if let Some(html) = card.explanation_html.as_ref() {
                                        div { class: "saved-explanation", dangerous_inner_html: "{html}" }
                                    }
                                }
                            }
                        }
                    }
                },
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct SavedTestHandles {
    dispatch: Rc<RefCell<Option<Callback<SavedIntent>>>>,
}

#[cfg(test)]
impl SavedTestHandles {
    pub(crate) fn register(&self, dispatch: Callback<SavedIntent>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
    }

    pub(crate) fn dispatch(&self) -> Callback<SavedIntent> {
        (*self.dispatch.borrow()).expect("saved dispatch registered")
    }
}
