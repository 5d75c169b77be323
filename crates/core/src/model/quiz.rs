use crate::model::tool::ToolId;

/// A generated question for one tool. Questions are never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizQuestion {
    tool: ToolId,
    text: String,
}

impl QuizQuestion {
    #[must_use]
    pub fn new(tool: ToolId, text: impl Into<String>) -> Self {
        Self {
            tool,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn tool(&self) -> &ToolId {
        &self.tool
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// How the client classifies a piece of feedback for display.
///
/// Only informational: the backend text is the source of truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackVerdict {
    LooksCorrect,
    NeedsReview,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FeedbackSource {
    Backend { correct: Option<bool> },
    Local,
}

/// Feedback shown for an answer: backend text, or a locally produced error message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    text: String,
    source: FeedbackSource,
}

impl Feedback {
    /// Feedback returned by the backend, with its structured verdict when it sent one.
    #[must_use]
    pub fn from_backend(text: impl Into<String>, correct: Option<bool>) -> Self {
        Self {
            text: text.into(),
            source: FeedbackSource::Backend { correct },
        }
    }

    /// Error-flavoured feedback produced by the client after a failed check.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            text: message.into(),
            source: FeedbackSource::Local,
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self.source, FeedbackSource::Local)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Structured verdict if present, otherwise a case-insensitive search for "correct".
    #[must_use]
    pub fn verdict(&self) -> FeedbackVerdict {
        match self.source {
            FeedbackSource::Local => FeedbackVerdict::Error,
            FeedbackSource::Backend { correct: Some(true) } => FeedbackVerdict::LooksCorrect,
            FeedbackSource::Backend { correct: Some(false) } => FeedbackVerdict::NeedsReview,
            FeedbackSource::Backend { correct: None } => {
                if self.text.to_lowercase().contains("correct") {
                    FeedbackVerdict::LooksCorrect
                } else {
                    FeedbackVerdict::NeedsReview
                }
            }
        }
    }
}
