#![forbid(unsafe_code)]

pub mod api;
pub mod command_browser;
pub mod config;
pub mod error;
pub mod http_api;
pub mod quiz;

pub use api::QuizApi;
pub use command_browser::{CacheLookup, SavedCommandBrowser, SearchStrategy};
pub use config::{ApiConfig, DEFAULT_API_URL};
pub use error::{ApiError, ApiOperation, ConfigError, RequestFailure};
pub use http_api::HttpQuizApi;
pub use quiz::{
    ExplainTicket, QuestionTicket, QuizLoopService, QuizPhase, QuizSession, Resolution,
    SaveNotice, SaveRequest, SubmitTicket,
};
pub use reqwest::StatusCode;
