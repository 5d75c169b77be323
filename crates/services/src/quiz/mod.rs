mod session;
mod workflow;

// Public API of the quiz subsystem.
pub use session::{
    EXPLAIN_ERROR_MESSAGE, ExplainTicket, FEEDBACK_ERROR_MESSAGE, QUESTION_ERROR_MESSAGE,
    QuestionTicket, QuizPhase, QuizSession, Resolution, SAVE_ERROR_MESSAGE, SaveNotice,
    SaveRequest, SubmitTicket,
};
pub use workflow::QuizLoopService;
