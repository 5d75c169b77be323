use std::sync::Arc;

use buddy_core::model::{Feedback, QuizQuestion, SavedCommand, ToolId};

use crate::api::QuizApi;
use crate::error::ApiError;
use super::session::{
    ExplainTicket, QuestionTicket, QuizSession, Resolution, SaveNotice, SaveRequest, SubmitTicket,
};

/// Performs the network half of quiz session transitions.
///
/// The `fetch_*`/`check_*` methods only talk to the API; callers that keep the
/// session behind a UI signal issue a ticket, await the call, then resolve.
/// The session-taking methods run the whole transition for sequential callers.
#[derive(Clone)]
pub struct QuizLoopService {
    api: Arc<dyn QuizApi>,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(api: Arc<dyn QuizApi>) -> Self {
        Self { api }
    }

    #[must_use]
    pub fn api(&self) -> Arc<dyn QuizApi> {
        Arc::clone(&self.api)
    }

    /// # Errors
    ///
    /// Returns `ApiError::RequestFailed` if the backend call fails.
    pub async fn fetch_question(&self, ticket: &QuestionTicket) -> Result<QuizQuestion, ApiError> {
        self.api.fetch_question(ticket.tool()).await
    }

    /// # Errors
    ///
    /// Returns `ApiError::RequestFailed` if the backend call fails.
    pub async fn check_answer(&self, ticket: &SubmitTicket) -> Result<Feedback, ApiError> {
        self.api
            .submit_answer(ticket.tool(), ticket.question(), ticket.answer())
            .await
    }

    /// # Errors
    ///
    /// Returns `ApiError::RequestFailed` if the backend call fails.
    pub async fn explain(&self, ticket: &ExplainTicket) -> Result<String, ApiError> {
        self.api
            .explain_command(ticket.tool(), ticket.command())
            .await
    }

    /// # Errors
    ///
    /// Returns `ApiError::RequestFailed` if the backend call fails.
    pub async fn save(&self, request: &SaveRequest) -> Result<SavedCommand, ApiError> {
        self.api
            .save_command(&request.tool, &request.command, &request.explanation)
            .await
    }

    /// Select `tool` and load its first question.
    pub async fn select_tool(&self, session: &mut QuizSession, tool: ToolId) -> Resolution {
        let ticket = session.select_tool(tool);
        let result = self.fetch_question(&ticket).await;
        session.resolve_question(&ticket, result)
    }

    /// Load another question for the current tool. `None` if not allowed right now.
    pub async fn next_question(&self, session: &mut QuizSession) -> Option<Resolution> {
        let ticket = session.request_new_question()?;
        let result = self.fetch_question(&ticket).await;
        Some(session.resolve_question(&ticket, result))
    }

    /// Check the current answer. `None` if there is nothing to submit.
    pub async fn submit_answer(&self, session: &mut QuizSession) -> Option<Resolution> {
        let ticket = session.begin_submit()?;
        let result = self.check_answer(&ticket).await;
        Some(session.resolve_feedback(&ticket, result))
    }

    /// Explain the current answer. `None` if there is nothing to explain.
    pub async fn explain_answer(&self, session: &mut QuizSession) -> Option<Resolution> {
        let ticket = session.begin_explain()?;
        let result = self.explain(&ticket).await;
        Some(session.resolve_explanation(&ticket, result))
    }

    /// Persist the checked answer. `None` (and no request) unless a save is allowed.
    pub async fn save_current(&self, session: &mut QuizSession) -> Option<SaveNotice> {
        let request = session.begin_save()?;
        let result = self.save(&request).await;
        session.resolve_save(result);
        session.notice().cloned()
    }
}
