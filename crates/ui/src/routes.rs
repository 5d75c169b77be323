use dioxus::prelude::*;
use dioxus_router::{Outlet, Routable, use_navigator, use_route};

use crate::views::{QuizView, SavedCommandsView, Selector};
use crate::vm::{AppMode, mode_items};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", QuizView)] Quiz {},
        #[route("/saved", SavedCommandsView)] Saved {},
}

impl Route {
    #[must_use]
    pub fn mode(&self) -> AppMode {
        match self {
            Route::Quiz {} => AppMode::Quiz,
            Route::Saved {} => AppMode::Saved,
        }
    }

    #[must_use]
    pub fn for_mode(mode: AppMode) -> Self {
        match mode {
            AppMode::Quiz => Route::Quiz {},
            AppMode::Saved => Route::Saved {},
        }
    }
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    let navigator = use_navigator();
    let mode = use_route::<Route>().mode();
    let mode_id = mode.id();

    rsx! {
        nav { class: "sidebar",
            h1 { "Command Buddy" }
            Selector {
                key: "{mode_id}",
                label: "Mode".to_string(),
                items: mode_items(),
                selected: Some(mode_id.to_string()),
                on_select: move |id: String| {
                    if let Some(next) = AppMode::from_id(&id) {
                        navigator.push(Route::for_mode(next));
                    }
                },
            }
        }
    }
}
