use tracing::{debug, warn};

use buddy_core::model::{Feedback, QuizQuestion, SavedCommand, ToolId};

use crate::error::ApiError;

pub const QUESTION_ERROR_MESSAGE: &str = "Error generating question. Please try again.";
pub const FEEDBACK_ERROR_MESSAGE: &str = "Error checking answer. Please try again.";
pub const EXPLAIN_ERROR_MESSAGE: &str = "Error getting explanation. Please try again.";
pub const SAVE_ERROR_MESSAGE: &str = "Error saving command. Please try again.";

//
// ─── PHASES ────────────────────────────────────────────────────────────────────
//

/// Where a quiz session is in its question round-trip.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum QuizPhase {
    /// No tool chosen yet.
    #[default]
    Idle,
    AwaitingQuestion,
    QuestionReady,
    /// The last question fetch failed; a retry message stands in for the question.
    QuestionUnavailable,
    AwaitingFeedback,
    FeedbackReady,
}

//
// ─── TICKETS ───────────────────────────────────────────────────────────────────
//

/// Tag for an in-flight question fetch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionTicket {
    tool: ToolId,
    generation: u64,
}

impl QuestionTicket {
    #[must_use]
    pub fn tool(&self) -> &ToolId {
        &self.tool
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Tag and payload for an in-flight answer check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmitTicket {
    tool: ToolId,
    generation: u64,
    question: String,
    answer: String,
}

impl SubmitTicket {
    #[must_use]
    pub fn tool(&self) -> &ToolId {
        &self.tool
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }
}

/// Tag and payload for an in-flight command explanation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExplainTicket {
    tool: ToolId,
    generation: u64,
    command: String,
}

impl ExplainTicket {
    #[must_use]
    pub fn tool(&self) -> &ToolId {
        &self.tool
    }

    #[must_use]
    pub fn command(&self) -> &str {
        &self.command
    }
}

/// Payload for persisting the current answer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SaveRequest {
    pub tool: ToolId,
    pub command: String,
    pub explanation: String,
}

/// Whether a completed request changed the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    Applied,
    /// The request was superseded by a newer selection and its result dropped.
    Discarded,
}

/// Transient outcome of a save.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SaveNotice {
    Saved(SavedCommand),
    Failed(String),
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// State of one quiz attempt.
///
/// Every network-bound transition hands out a ticket carrying the generation it
/// was issued for. Results are applied through the matching `resolve_*` method,
/// which drops them when a newer question has been requested in the meantime.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QuizSession {
    tool: Option<ToolId>,
    phase: QuizPhase,
    generation: u64,
    question: Option<QuizQuestion>,
    question_error: Option<String>,
    answer: String,
    feedback: Option<Feedback>,
    explanation: Option<String>,
    explaining: bool,
    saving: bool,
    notice: Option<SaveNotice>,
}

impl QuizSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn tool(&self) -> Option<&ToolId> {
        self.tool.as_ref()
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    #[must_use]
    pub fn question(&self) -> Option<&QuizQuestion> {
        self.question.as_ref()
    }

    /// Retry message shown in place of a question after a failed fetch.
    #[must_use]
    pub fn question_error(&self) -> Option<&str> {
        self.question_error.as_deref()
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    #[must_use]
    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    #[must_use]
    pub fn explanation(&self) -> Option<&str> {
        self.explanation.as_deref()
    }

    #[must_use]
    pub fn notice(&self) -> Option<&SaveNotice> {
        self.notice.as_ref()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(
            self.phase,
            QuizPhase::AwaitingQuestion | QuizPhase::AwaitingFeedback
        )
    }

    #[must_use]
    pub fn is_saving(&self) -> bool {
        self.saving
    }

    #[must_use]
    pub fn is_explaining(&self) -> bool {
        self.explaining
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.phase == QuizPhase::QuestionReady && !self.answer.trim().is_empty()
    }

    #[must_use]
    pub fn can_request_new_question(&self) -> bool {
        matches!(
            self.phase,
            QuizPhase::QuestionReady | QuizPhase::FeedbackReady | QuizPhase::QuestionUnavailable
        )
    }

    #[must_use]
    pub fn can_save(&self) -> bool {
        self.phase == QuizPhase::FeedbackReady
            && !self.saving
            && !self.answer.trim().is_empty()
            && self.feedback.as_ref().is_some_and(|feedback| !feedback.is_empty())
    }

    #[must_use]
    pub fn can_explain(&self) -> bool {
        matches!(
            self.phase,
            QuizPhase::QuestionReady | QuizPhase::FeedbackReady
        ) && !self.explaining
            && !self.answer.trim().is_empty()
    }

    /// Switch to `tool` and start a fresh question. Allowed from any phase.
    pub fn select_tool(&mut self, tool: ToolId) -> QuestionTicket {
        self.start_question(tool)
    }

    /// Ask for another question for the current tool.
    ///
    /// Returns `None` unless a question round has settled (ready, answered or failed).
    pub fn request_new_question(&mut self) -> Option<QuestionTicket> {
        if !self.can_request_new_question() {
            return None;
        }
        let tool = self.tool.clone()?;
        Some(self.start_question(tool))
    }

    fn start_question(&mut self, tool: ToolId) -> QuestionTicket {
        self.generation += 1;
        self.clear_round();
        self.question = None;
        self.question_error = None;
        self.tool = Some(tool.clone());
        self.phase = QuizPhase::AwaitingQuestion;
        QuestionTicket {
            tool,
            generation: self.generation,
        }
    }

    fn clear_round(&mut self) {
        self.answer.clear();
        self.feedback = None;
        self.explanation = None;
        self.explaining = false;
        self.notice = None;
    }

    fn is_current(&self, generation: u64, tool: &ToolId) -> bool {
        generation == self.generation && self.tool.as_ref() == Some(tool)
    }

    /// Apply the outcome of a question fetch.
    pub fn resolve_question(
        &mut self,
        ticket: &QuestionTicket,
        result: Result<QuizQuestion, ApiError>,
    ) -> Resolution {
        if !self.is_current(ticket.generation, &ticket.tool)
            || self.phase != QuizPhase::AwaitingQuestion
        {
            debug!(tool = %ticket.tool, generation = ticket.generation, "discarding stale question");
            return Resolution::Discarded;
        }

        match result {
            Ok(question) => {
                self.question = Some(QuizQuestion::new(ticket.tool.clone(), question.text()));
                self.phase = QuizPhase::QuestionReady;
            }
            Err(err) => {
                warn!(tool = %ticket.tool, error = %err, "question fetch failed");
                self.question_error = Some(QUESTION_ERROR_MESSAGE.to_string());
                self.phase = QuizPhase::QuestionUnavailable;
            }
        }
        Resolution::Applied
    }

    /// Edit the answer. Editing after feedback starts a fresh attempt at the same question.
    ///
    /// Returns `false` when no question is available to answer.
    pub fn set_answer(&mut self, answer: impl Into<String>) -> bool {
        match self.phase {
            QuizPhase::QuestionReady => {
                self.answer = answer.into();
                true
            }
            QuizPhase::FeedbackReady => {
                self.answer = answer.into();
                self.feedback = None;
                self.explanation = None;
                self.notice = None;
                self.phase = QuizPhase::QuestionReady;
                true
            }
            _ => false,
        }
    }

    /// Start checking the current answer.
    ///
    /// Returns `None` outside `QuestionReady` or when the trimmed answer is empty.
    pub fn begin_submit(&mut self) -> Option<SubmitTicket> {
        if !self.can_submit() {
            return None;
        }
        let tool = self.tool.clone()?;
        let question = self.question.as_ref()?.text().to_string();
        self.feedback = None;
        self.notice = None;
        self.phase = QuizPhase::AwaitingFeedback;
        Some(SubmitTicket {
            tool,
            generation: self.generation,
            question,
            answer: self.answer.trim().to_string(),
        })
    }

    /// Apply the outcome of an answer check.
    ///
    /// A failed check returns to `QuestionReady` with error feedback so the user can retry.
    pub fn resolve_feedback(
        &mut self,
        ticket: &SubmitTicket,
        result: Result<Feedback, ApiError>,
    ) -> Resolution {
        if !self.is_current(ticket.generation, &ticket.tool)
            || self.phase != QuizPhase::AwaitingFeedback
        {
            debug!(tool = %ticket.tool, generation = ticket.generation, "discarding stale feedback");
            return Resolution::Discarded;
        }

        match result {
            Ok(feedback) => {
                self.feedback = Some(feedback);
                self.phase = QuizPhase::FeedbackReady;
            }
            Err(err) => {
                warn!(tool = %ticket.tool, error = %err, "answer check failed");
                self.feedback = Some(Feedback::error(FEEDBACK_ERROR_MESSAGE));
                self.phase = QuizPhase::QuestionReady;
            }
        }
        Resolution::Applied
    }

    /// Start persisting the checked answer. Does not change the phase.
    ///
    /// Returns `None` unless both answer and feedback are present.
    pub fn begin_save(&mut self) -> Option<SaveRequest> {
        if !self.can_save() {
            return None;
        }
        let tool = self.tool.clone()?;
        let explanation = self.feedback.as_ref()?.text().to_string();
        self.saving = true;
        self.notice = None;
        Some(SaveRequest {
            tool,
            command: self.answer.trim().to_string(),
            explanation,
        })
    }

    /// Record the outcome of a save. Displayed feedback is never rolled back.
    pub fn resolve_save(&mut self, result: Result<SavedCommand, ApiError>) {
        self.saving = false;
        self.notice = Some(match result {
            Ok(saved) => SaveNotice::Saved(saved),
            Err(err) => {
                warn!(error = %err, "save failed");
                SaveNotice::Failed(SAVE_ERROR_MESSAGE.to_string())
            }
        });
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Start explaining the command currently typed as the answer.
    pub fn begin_explain(&mut self) -> Option<ExplainTicket> {
        if !self.can_explain() {
            return None;
        }
        let tool = self.tool.clone()?;
        self.explaining = true;
        self.explanation = None;
        Some(ExplainTicket {
            tool,
            generation: self.generation,
            command: self.answer.trim().to_string(),
        })
    }

    pub fn resolve_explanation(
        &mut self,
        ticket: &ExplainTicket,
        result: Result<String, ApiError>,
    ) -> Resolution {
        if !self.is_current(ticket.generation, &ticket.tool) || !self.explaining {
            debug!(tool = %ticket.tool, generation = ticket.generation, "discarding stale explanation");
            return Resolution::Discarded;
        }

        self.explaining = false;
        self.explanation = Some(match result {
            Ok(text) => text,
            Err(err) => {
                warn!(tool = %ticket.tool, error = %err, "explain failed");
                EXPLAIN_ERROR_MESSAGE.to_string()
            }
        });
        Resolution::Applied
    }
}
