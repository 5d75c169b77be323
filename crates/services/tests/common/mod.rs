#![allow(dead_code)]

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use buddy_core::model::{CommandId, Feedback, QuizQuestion, SavedCommand, ToolId};
use reqwest::StatusCode;
use services::{ApiError, ApiOperation, QuizApi};
use tokio::sync::Notify;

#[derive(Default)]
struct FakeState {
    questions: HashMap<ToolId, VecDeque<Result<String, StatusCode>>>,
    feedback: VecDeque<Result<Feedback, StatusCode>>,
    explanations: VecDeque<Result<String, StatusCode>>,
    saved: Vec<SavedCommand>,
    next_id: u32,
    failing_saves: bool,
    failing_lists: HashSet<ToolId>,
    question_gates: HashMap<ToolId, Arc<Notify>>,
    calls: Vec<String>,
}

/// In-memory backend with scripted responses and a call log.
#[derive(Clone, Default)]
pub struct FakeQuizApi {
    state: Arc<Mutex<FakeState>>,
}

pub fn tool(raw: &str) -> ToolId {
    ToolId::new(raw).expect("valid tool id")
}

impl FakeQuizApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_question(&self, tool_name: &str, text: &str) {
        self.with_state(|state| {
            state
                .questions
                .entry(tool(tool_name))
                .or_default()
                .push_back(Ok(text.to_string()));
        });
    }

    pub fn push_question_failure(&self, tool_name: &str, status: StatusCode) {
        self.with_state(|state| {
            state
                .questions
                .entry(tool(tool_name))
                .or_default()
                .push_back(Err(status));
        });
    }

    pub fn push_feedback(&self, text: &str) {
        self.with_state(|state| {
            state
                .feedback
                .push_back(Ok(Feedback::from_backend(text, None)));
        });
    }

    pub fn push_feedback_failure(&self, status: StatusCode) {
        self.with_state(|state| state.feedback.push_back(Err(status)));
    }

    pub fn push_explanation(&self, text: &str) {
        self.with_state(|state| state.explanations.push_back(Ok(text.to_string())));
    }

    pub fn fail_saves(&self) {
        self.with_state(|state| state.failing_saves = true);
    }

    pub fn fail_lists_for(&self, tool_name: &str) {
        self.with_state(|state| {
            state.failing_lists.insert(tool(tool_name));
        });
    }

    pub fn clear_list_failures(&self) {
        self.with_state(|state| state.failing_lists.clear());
    }

    pub fn seed_command(&self, tool_name: &str, command: &str, explanation: &str) {
        self.with_state(|state| {
            state.next_id += 1;
            let id = CommandId::new(format!("cmd-{}", state.next_id));
            state
                .saved
                .push(SavedCommand::new(id, tool(tool_name), command, explanation));
        });
    }

    /// Hold question fetches for `tool_name` until the returned gate is notified.
    pub fn gate_questions(&self, tool_name: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.with_state(|state| {
            state.question_gates.insert(tool(tool_name), Arc::clone(&gate));
        });
        gate
    }

    pub fn calls(&self) -> Vec<String> {
        self.with_state(|state| state.calls.clone())
    }

    pub fn count_calls(&self, prefix: &str) -> usize {
        self.with_state(|state| {
            state
                .calls
                .iter()
                .filter(|call| call.starts_with(prefix))
                .count()
        })
    }

    pub fn saved(&self) -> Vec<SavedCommand> {
        self.with_state(|state| state.saved.clone())
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut FakeState) -> T) -> T {
        let mut state = self.state.lock().expect("fake state lock");
        f(&mut state)
    }
}

fn failure(operation: ApiOperation, status: StatusCode) -> ApiError {
    ApiError::status(operation, status)
}

#[async_trait]
impl QuizApi for FakeQuizApi {
    async fn fetch_question(&self, tool: &ToolId) -> Result<QuizQuestion, ApiError> {
        let gate = self.with_state(|state| {
            state.calls.push(format!("question:{tool}"));
            state.question_gates.get(tool).cloned()
        });
        if let Some(gate) = gate {
            gate.notified().await;
        }
        let next = self.with_state(|state| {
            state
                .questions
                .get_mut(tool)
                .and_then(VecDeque::pop_front)
        });
        match next {
            Some(Ok(text)) => Ok(QuizQuestion::new(tool.clone(), text)),
            Some(Err(status)) => Err(failure(ApiOperation::FetchQuestion, status)),
            None => Ok(QuizQuestion::new(
                tool.clone(),
                format!("Generic {tool} question"),
            )),
        }
    }

    async fn submit_answer(
        &self,
        tool: &ToolId,
        _question: &str,
        answer: &str,
    ) -> Result<Feedback, ApiError> {
        let next = self.with_state(|state| {
            state.calls.push(format!("check:{tool}:{answer}"));
            state.feedback.pop_front()
        });
        match next {
            Some(Ok(feedback)) => Ok(feedback),
            Some(Err(status)) => Err(failure(ApiOperation::SubmitAnswer, status)),
            None => Ok(Feedback::from_backend("Looks fine.", None)),
        }
    }

    async fn explain_command(&self, tool: &ToolId, command: &str) -> Result<String, ApiError> {
        let next = self.with_state(|state| {
            state.calls.push(format!("explain:{tool}:{command}"));
            state.explanations.pop_front()
        });
        match next {
            Some(Ok(text)) => Ok(text),
            Some(Err(status)) => Err(failure(ApiOperation::ExplainCommand, status)),
            None => Ok(format!("{command} explained")),
        }
    }

    async fn save_command(
        &self,
        tool: &ToolId,
        command: &str,
        explanation: &str,
    ) -> Result<SavedCommand, ApiError> {
        self.with_state(|state| {
            state.calls.push(format!("save:{tool}:{command}"));
            if state.failing_saves {
                return Err(failure(
                    ApiOperation::SaveCommand,
                    StatusCode::INTERNAL_SERVER_ERROR,
                ));
            }
            state.next_id += 1;
            let saved = SavedCommand::new(
                CommandId::new(format!("cmd-{}", state.next_id)),
                tool.clone(),
                command,
                explanation,
            );
            state.saved.push(saved.clone());
            Ok(saved)
        })
    }

    async fn list_saved_commands(&self, tool: &ToolId) -> Result<Vec<SavedCommand>, ApiError> {
        self.with_state(|state| {
            state.calls.push(format!("list:{tool}"));
            if state.failing_lists.contains(tool) {
                return Err(failure(
                    ApiOperation::ListSavedCommands,
                    StatusCode::BAD_GATEWAY,
                ));
            }
            Ok(state
                .saved
                .iter()
                .filter(|command| &command.tool_name == tool)
                .cloned()
                .collect())
        })
    }
}
