use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use buddy_core::model::{
    CommandId, Feedback, QuizQuestion, SavedCommand, ToolCatalog, ToolId,
};
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use services::{ApiError, ApiOperation, QuizApi, StatusCode};
use tokio::sync::Notify;

use crate::context::{UiApp, build_app_context};
use crate::views::quiz::QuizTestHandles;
use crate::views::saved::SavedTestHandles;
use crate::views::{QuizView, SavedCommandsView};

#[derive(Default)]
struct FakeState {
    questions: VecDeque<Result<String, StatusCode>>,
    feedback: VecDeque<Result<String, StatusCode>>,
    saved: HashMap<ToolId, Vec<SavedCommand>>,
    held_lists: HashMap<ToolId, Arc<Notify>>,
    failing_lists: bool,
    next_id: u32,
    calls: Vec<String>,
}

/// Scripted backend for view tests.
#[derive(Clone, Default)]
pub struct FakeQuizApi {
    state: Arc<Mutex<FakeState>>,
}

impl FakeQuizApi {
    pub fn push_question(&self, text: &str) {
        self.state
            .lock()
            .unwrap()
            .questions
            .push_back(Ok(text.to_string()));
    }

    pub fn push_question_failure(&self) {
        self.state
            .lock()
            .unwrap()
            .questions
            .push_back(Err(StatusCode::INTERNAL_SERVER_ERROR));
    }

    pub fn push_feedback(&self, text: &str) {
        self.state
            .lock()
            .unwrap()
            .feedback
            .push_back(Ok(text.to_string()));
    }

    pub fn seed_command(&self, tool_name: &str, command: &str, explanation: &str) {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let tool = ToolId::new(tool_name).unwrap();
        let saved = SavedCommand::new(
            CommandId::new(state.next_id.to_string()),
            tool.clone(),
            command,
            explanation,
        );
        state.saved.entry(tool).or_default().push(saved);
    }

    /// Make the next list for `tool_name` wait until the returned gate is notified.
    pub fn hold_next_list(&self, tool_name: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.state
            .lock()
            .unwrap()
            .held_lists
            .insert(ToolId::new(tool_name).unwrap(), Arc::clone(&gate));
        gate
    }

    pub fn fail_lists(&self) {
        self.state.lock().unwrap().failing_lists = true;
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }
}

#[async_trait]
impl QuizApi for FakeQuizApi {
    async fn fetch_question(&self, tool: &ToolId) -> Result<QuizQuestion, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("question:{tool}"));
        match state.questions.pop_front() {
            Some(Ok(text)) => Ok(QuizQuestion::new(tool.clone(), text)),
            Some(Err(status)) => Err(ApiError::status(ApiOperation::FetchQuestion, status)),
            None => Err(ApiError::status(ApiOperation::FetchQuestion, StatusCode::NOT_FOUND)),
        }
    }

    async fn submit_answer(
        &self,
        tool: &ToolId,
        _question: &str,
        answer: &str,
    ) -> Result<Feedback, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("check:{tool}:{answer}"));
        match state.feedback.pop_front() {
            Some(Ok(text)) => Ok(Feedback::from_backend(text, None)),
            Some(Err(status)) => Err(ApiError::status(ApiOperation::SubmitAnswer, status)),
            None => Err(ApiError::status(ApiOperation::SubmitAnswer, StatusCode::NOT_FOUND)),
        }
    }

    async fn explain_command(&self, tool: &ToolId, command: &str) -> Result<String, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("explain:{tool}:{command}"));
        Ok(format!("`{command}` explained"))
    }

    async fn save_command(
        &self,
        tool: &ToolId,
        command: &str,
        explanation: &str,
    ) -> Result<SavedCommand, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("save:{tool}:{command}"));
        state.next_id += 1;
        let saved = SavedCommand::new(
            CommandId::new(state.next_id.to_string()),
            tool.clone(),
            command,
            explanation,
        );
        state.saved.entry(tool.clone()).or_default().push(saved.clone());
        Ok(saved)
    }

    async fn list_saved_commands(&self, tool: &ToolId) -> Result<Vec<SavedCommand>, ApiError> {
        let (gate, result) = {
            let mut state = self.state.lock().unwrap();
            state.calls.push(format!("list:{tool}"));
            let result = if state.failing_lists {
                Err(ApiError::status(
                    ApiOperation::ListSavedCommands,
                    StatusCode::INTERNAL_SERVER_ERROR,
                ))
            } else {
                Ok(state.saved.get(tool).cloned().unwrap_or_default())
            };
            (state.held_lists.remove(tool), result)
        };
        if let Some(gate) = gate {
            gate.notified().await;
        }
        result
    }
}

struct TestApp {
    api: Arc<FakeQuizApi>,
}

impl UiApp for TestApp {
    fn quiz_api(&self) -> Arc<dyn QuizApi> {
        self.api.clone()
    }

    fn tool_catalog(&self) -> ToolCatalog {
        ToolCatalog::default()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Quiz,
    Saved,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    api: Arc<FakeQuizApi>,
    view: ViewKind,
    quiz_handles: QuizTestHandles,
    saved_handles: SavedTestHandles,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = Arc::new(TestApp {
        api: Arc::clone(&props.api),
    });
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    use_context_provider(|| props.quiz_handles.clone());
    use_context_provider(|| props.saved_handles.clone());
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Quiz => rsx! { QuizView {} },
        ViewKind::Saved => rsx! { SavedCommandsView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub api: Arc<FakeQuizApi>,
    pub quiz_handles: QuizTestHandles,
    pub saved_handles: SavedTestHandles,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    /// Let spawned tasks and resources finish, then re-render.
    pub async fn drive_async(&mut self) {
        for _ in 0..4 {
            let _ = tokio::time::timeout(
                std::time::Duration::from_millis(50),
                self.dom.wait_for_work(),
            )
            .await;
            self.dom.render_immediate(&mut NoOpMutations);
            self.dom.process_events();
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }

    pub fn quiz(&self, intent: crate::views::QuizIntent) {
        let dispatch = self.quiz_handles.dispatch();
        self.dom.in_runtime(|| dispatch.call(intent));
    }

    pub fn saved(&self, intent: crate::views::SavedIntent) {
        let dispatch = self.saved_handles.dispatch();
        self.dom.in_runtime(|| dispatch.call(intent));
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(view: ViewKind, api: FakeQuizApi) -> ViewHarness {
    let api = Arc::new(api);
    let quiz_handles = QuizTestHandles::default();
    let saved_handles = SavedTestHandles::default();
    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            api: Arc::clone(&api),
            view,
            quiz_handles: quiz_handles.clone(),
            saved_handles: saved_handles.clone(),
        },
    );
    ViewHarness {
        dom,
        api,
        quiz_handles,
        saved_handles,
    }
}
