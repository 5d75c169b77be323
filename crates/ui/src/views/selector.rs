use dioxus::prelude::*;

use crate::vm::{SelectorItem, SelectorKey, SelectorVm};

fn selector_key(key: &Key) -> Option<SelectorKey> {
    match key {
        Key::ArrowUp => Some(SelectorKey::Up),
        Key::ArrowDown => Some(SelectorKey::Down),
        Key::Enter => Some(SelectorKey::Commit),
        Key::Character(value) if value == " " => Some(SelectorKey::Commit),
        Key::Escape => Some(SelectorKey::Cancel),
        _ => None,
    }
}

/// Keyboard-navigable single-select list.
///
/// Local state is seeded from `items`/`selected` on mount; callers give the
/// component a `key` derived from both so an external change remounts it.
#[component]
pub fn Selector(
    label: String,
    items: Vec<SelectorItem>,
    selected: Option<String>,
    placeholder: Option<String>,
    #[props(default)] disabled: bool,
    on_select: Callback<String>,
) -> Element {
    let mut vm = use_signal(|| SelectorVm::new(items.clone(), selected.as_deref()));

    let on_key = move |evt: KeyboardEvent| {
        if disabled {
            return;
        }
        let Some(key) = selector_key(&evt.data.key()) else {
            return;
        };
        evt.prevent_default();
        let committed = vm.write().handle_key(key);
        if let Some(id) = committed {
            on_select.call(id);
        }
    };

    let vm_read = vm.read();
    let is_open = vm_read.is_open();
    let highlighted = vm_read.highlighted();
    let current_label = vm_read.selected_item().map_or_else(
        || placeholder.clone().unwrap_or_else(|| "Select...".to_string()),
        |item| item.label.clone(),
    );
    let options = vm_read
        .items()
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let is_selected = vm_read.selected_index() == Some(index);
            let class = match (index == highlighted, is_selected) {
                (true, true) => "selector-option selector-option--highlighted selector-option--selected",
                (true, false) => "selector-option selector-option--highlighted",
                (false, true) => "selector-option selector-option--selected",
                (false, false) => "selector-option",
            };
            let label = item.label.clone();
            let description = item.description.clone();
            rsx! {
                li {
                    key: "{item.id}",
                    class: "{class}",
                    role: "option",
                    aria_selected: "{is_selected}",
                    onmouseenter: move |_| vm.write().highlight(index),
                    onclick: move |_| {
                        let committed = vm.write().commit_index(index);
                        if let Some(id) = committed {
                            on_select.call(id);
                        }
                    },
                    span { class: "selector-option-label", "{label}" }
                    if !description.is_empty() {
                        span { class: "selector-option-description", "{description}" }
                    }
                }
            }
        })
        .collect::<Vec<_>>();
    drop(vm_read);

    rsx! {
        div { class: "selector", onkeydown: on_key,
            span { class: "selector-label", "{label}" }
            button {
                class: "selector-trigger",
                r#type: "button",
                aria_haspopup: "listbox",
                aria_expanded: "{is_open}",
                disabled: disabled,
                onclick: move |_| vm.write().toggle(),
                span { class: "selector-current", "{current_label}" }
                span { class: "selector-caret" }
            }
            if is_open && !disabled {
                ul { class: "selector-options", role: "listbox", {options.into_iter()} }
                div {
                    class: "selector-overlay",
                    onclick: move |_| vm.write().close(),
                }
            }
        }
    }
}
