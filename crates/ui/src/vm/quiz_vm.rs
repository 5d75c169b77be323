use buddy_core::model::FeedbackVerdict;
use services::{QuizPhase, QuizSession, SaveNotice};

use crate::vm::markdown_vm::markdown_to_html;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeTone {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NoticeVm {
    pub message: String,
    pub tone: NoticeTone,
}

/// Everything the quiz screen renders, derived from a `QuizSession`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizScreenVm {
    pub tool_id: Option<String>,
    pub phase: QuizPhase,
    pub prompt: String,
    pub prompt_is_error: bool,
    pub answer: String,
    pub answer_enabled: bool,
    pub feedback_html: Option<String>,
    pub feedback_class: &'static str,
    pub explanation_html: Option<String>,
    pub notice: Option<NoticeVm>,
    pub can_submit: bool,
    pub can_request_new_question: bool,
    pub can_save: bool,
    pub can_explain: bool,
    pub submit_label: &'static str,
    pub save_label: &'static str,
    pub explain_label: &'static str,
}

#[must_use]
pub fn feedback_class(verdict: FeedbackVerdict) -> &'static str {
    match verdict {
        FeedbackVerdict::LooksCorrect => "feedback feedback--correct",
        FeedbackVerdict::NeedsReview => "feedback feedback--review",
        FeedbackVerdict::Error => "feedback feedback--error",
    }
}

#[must_use]
pub fn map_quiz_screen(session: &QuizSession) -> QuizScreenVm {
    let phase = session.phase();
    let (prompt, prompt_is_error) = match phase {
        QuizPhase::Idle => ("Select a tool to start.".to_string(), false),
        QuizPhase::AwaitingQuestion => ("Loading question...".to_string(), false),
        QuizPhase::QuestionUnavailable => (
            session.question_error().unwrap_or_default().to_string(),
            true,
        ),
        QuizPhase::QuestionReady | QuizPhase::AwaitingFeedback | QuizPhase::FeedbackReady => (
            session
                .question()
                .map(|question| question.text().to_string())
                .unwrap_or_default(),
            false,
        ),
    };

    let feedback = session.feedback().filter(|feedback| !feedback.is_empty());
    let feedback_html = feedback.map(|feedback| markdown_to_html(feedback.text()));
    let feedback_class = feedback.map_or("feedback", |feedback| feedback_class(feedback.verdict()));

    let notice = session.notice().map(|notice| match notice {
        SaveNotice::Saved(saved) => NoticeVm {
            message: format!("Saved \"{}\"", saved.command_text),
            tone: NoticeTone::Success,
        },
        SaveNotice::Failed(message) => NoticeVm {
            message: message.clone(),
            tone: NoticeTone::Error,
        },
    });

    QuizScreenVm {
        tool_id: session.tool().map(|tool| tool.as_str().to_string()),
        phase,
        prompt,
        prompt_is_error,
        answer: session.answer().to_string(),
        answer_enabled: matches!(phase, QuizPhase::QuestionReady | QuizPhase::FeedbackReady),
        feedback_html,
        feedback_class,
        explanation_html: session.explanation().map(markdown_to_html),
        notice,
        can_submit: session.can_submit(),
        can_request_new_question: session.can_request_new_question(),
        can_save: session.can_save(),
        can_explain: session.can_explain(),
        submit_label: if phase == QuizPhase::AwaitingFeedback {
            "Checking..."
        } else {
            "Submit"
        },
        save_label: if session.is_saving() { "Saving..." } else { "Save" },
        explain_label: if session.is_explaining() {
            "Explaining..."
        } else {
            "Explain"
        },
    }
}
