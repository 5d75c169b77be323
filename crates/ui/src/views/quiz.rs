use std::time::Duration;

use dioxus::prelude::*;

use buddy_core::model::ToolId;
use services::QuizSession;

use crate::context::AppContext;
use crate::views::Selector;
use crate::vm::{NoticeTone, map_quiz_screen, tool_items};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

const NOTICE_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    SelectTool(String),
    NewQuestion,
    SetAnswer(String),
    Submit,
    Save,
    Explain,
}

#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let quiz_loop = ctx.quiz_loop();
    let items = tool_items(ctx.catalog());
    let session = use_signal(QuizSession::new);

    let dispatch_intent = use_callback(move |intent: QuizIntent| {
        let mut session = session;
        let quiz_loop = quiz_loop.clone();

        match intent {
            QuizIntent::SelectTool(raw) => {
                let Ok(tool) = ToolId::new(raw) else {
                    return;
                };
                let ticket = session.write().select_tool(tool);
                spawn(async move {
                    let result = quiz_loop.fetch_question(&ticket).await;
                    session.write().resolve_question(&ticket, result);
                });
            }
            QuizIntent::NewQuestion => {
                let Some(ticket) = session.write().request_new_question() else {
                    return;
                };
                spawn(async move {
                    let result = quiz_loop.fetch_question(&ticket).await;
                    session.write().resolve_question(&ticket, result);
                });
            }
            QuizIntent::SetAnswer(answer) => {
                session.write().set_answer(answer);
            }
            QuizIntent::Submit => {
                let Some(ticket) = session.write().begin_submit() else {
                    return;
                };
                spawn(async move {
                    let result = quiz_loop.check_answer(&ticket).await;
                    session.write().resolve_feedback(&ticket, result);
                });
            }
            QuizIntent::Save => {
                let Some(request) = session.write().begin_save() else {
                    return;
                };
                spawn(async move {
                    let result = quiz_loop.save(&request).await;
                    session.write().resolve_save(result);
                    let shown = session.read().notice().cloned();
                    tokio::time::sleep(NOTICE_TIMEOUT).await;
                    if shown.is_some() && session.read().notice() == shown.as_ref() {
                        session.write().dismiss_notice();
                    }
                });
            }
            QuizIntent::Explain => {
                let Some(ticket) = session.write().begin_explain() else {
                    return;
                };
                spawn(async move {
                    let result = quiz_loop.explain(&ticket).await;
                    session.write().resolve_explanation(&ticket, result);
                });
            }
        }
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<QuizTestHandles>() {
                handles.register(dispatch_intent, session);
            }
        }
    }

    let vm = map_quiz_screen(&session.read());
    let selected = vm.tool_id.clone();
    let selector_key = selected.clone().unwrap_or_default();
    let prompt_class = if vm.prompt_is_error {
        "quiz-prompt quiz-prompt--error"
    } else {
        "quiz-prompt"
    };
    let notice_class = vm.notice.as_ref().map(|notice| match notice.tone {
        NoticeTone::Success => "notice notice--success",
        NoticeTone::Error => "notice notice--error",
    });

    rsx! {
        div { class: "page quiz-page",
            header { class: "view-header",
                h2 { class: "view-title", "Quiz" }
                p { class: "view-subtitle", "Pick a tool and answer with the command you would run." }
            }
            div { class: "view-divider" }
            Selector {
                key: "{selector_key}",
                label: "Tool".to_string(),
                items,
                selected,
                placeholder: "Choose a tool".to_string(),
                on_select: move |id: String| dispatch_intent.call(QuizIntent::SelectTool(id)),
            }
            section { class: "quiz-question",
                p { class: "{prompt_class}", "{vm.prompt}" }
            }
            div { class: "quiz-answer",
                input {
                    class: "quiz-answer-input",
                    r#type: "text",
                    placeholder: "Type the command...",
                    value: "{vm.answer}",
                    disabled: !vm.answer_enabled,
                    oninput: move |evt| dispatch_intent.call(QuizIntent::SetAnswer(evt.value())),
                    onkeydown: move |evt| {
                        if evt.data.key() == Key::Enter {
                            evt.prevent_default();
                            dispatch_intent.call(QuizIntent::Submit);
                        }
                    },
                }
            }
            div { class: "quiz-actions",
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    disabled: !vm.can_submit,
                    onclick: move |_| dispatch_intent.call(QuizIntent::Submit),
                    "{vm.submit_label}"
                }
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    disabled: !vm.can_request_new_question,
                    onclick: move |_| dispatch_intent.call(QuizIntent::NewQuestion),
                    "New Question"
                }
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    disabled: !vm.can_explain,
                    onclick: move |_| dispatch_intent.call(QuizIntent::Explain),
                    "{vm.explain_label}"
                }
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    disabled: !vm.can_save,
                    onclick: move |_| dispatch_intent.call(QuizIntent::Save),
                    "{vm.save_label}"
                }
            }
            if let Some(html) = vm.feedback_html.as_ref() {
                div { class: "{vm.feedback_class}", dangerous_inner_html: "{html}" }
            }
            if let Some(html) = vm.explanation_html.as_ref() {
                div { class: "quiz-explanation",
                    h4 { "Explanation" }
                    div { dangerous_inner_html: "{html}" }
                }
            }
            if let (Some(notice), Some(class)) = (vm.notice.as_ref(), notice_class) {
                div { class: "{class}", "{notice.message}" }
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct QuizTestHandles {
    dispatch: Rc<RefCell<Option<Callback<QuizIntent>>>>,
    session: Rc<RefCell<Option<Signal<QuizSession>>>>,
}

#[cfg(test)]
impl QuizTestHandles {
    pub(crate) fn register(&self, dispatch: Callback<QuizIntent>, session: Signal<QuizSession>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.session.borrow_mut() = Some(session);
    }

    pub(crate) fn dispatch(&self) -> Callback<QuizIntent> {
        (*self.dispatch.borrow()).expect("quiz dispatch registered")
    }

    pub(crate) fn session(&self) -> Signal<QuizSession> {
        (*self.session.borrow()).expect("quiz session registered")
    }
}
