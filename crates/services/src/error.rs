//! Shared error types for the services crate.

use std::fmt;

use thiserror::Error;

use buddy_core::model::ToolError;

/// The backend capability a request was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiOperation {
    FetchQuestion,
    SubmitAnswer,
    ExplainCommand,
    SaveCommand,
    ListSavedCommands,
    SearchSavedCommands,
}

impl ApiOperation {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FetchQuestion => "fetch question",
            Self::SubmitAnswer => "submit answer",
            Self::ExplainCommand => "explain command",
            Self::SaveCommand => "save command",
            Self::ListSavedCommands => "list saved commands",
            Self::SearchSavedCommands => "search saved commands",
        }
    }
}

impl fmt::Display for ApiOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a request failed.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RequestFailure {
    #[error("unexpected status {0}")]
    Status(reqwest::StatusCode),
    #[error("transport error: {0}")]
    Transport(reqwest::Error),
    #[error("invalid response body: {0}")]
    Decode(serde_json::Error),
}

/// Errors emitted by `QuizApi` implementations.
///
/// Every failure, whatever its cause, surfaces as `RequestFailed` tagged with the
/// operation that was attempted.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("{operation} request failed: {cause}")]
    RequestFailed {
        operation: ApiOperation,
        cause: RequestFailure,
    },
}

impl ApiError {
    #[must_use]
    pub fn status(operation: ApiOperation, status: reqwest::StatusCode) -> Self {
        Self::RequestFailed {
            operation,
            cause: RequestFailure::Status(status),
        }
    }

    #[must_use]
    pub fn transport(operation: ApiOperation, err: reqwest::Error) -> Self {
        Self::RequestFailed {
            operation,
            cause: RequestFailure::Transport(err),
        }
    }

    #[must_use]
    pub fn decode(operation: ApiOperation, err: serde_json::Error) -> Self {
        Self::RequestFailed {
            operation,
            cause: RequestFailure::Decode(err),
        }
    }

    #[must_use]
    pub fn operation(&self) -> ApiOperation {
        match self {
            Self::RequestFailed { operation, .. } => *operation,
        }
    }

    /// HTTP status of the failed response, if the server answered at all.
    #[must_use]
    pub fn http_status(&self) -> Option<reqwest::StatusCode> {
        match self {
            Self::RequestFailed {
                cause: RequestFailure::Status(status),
                ..
            } => Some(*status),
            Self::RequestFailed { .. } => None,
        }
    }
}

/// Errors emitted while building `ApiConfig` or the HTTP client.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid API url {raw:?}: {reason}")]
    InvalidUrl { raw: String, reason: String },
    #[error("invalid timeout {raw:?}: expected a positive number of seconds")]
    InvalidTimeout { raw: String },
    #[error("invalid tool list: {0}")]
    Tools(#[from] ToolError),
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}
