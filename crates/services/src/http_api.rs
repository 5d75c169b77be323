use async_trait::async_trait;
use reqwest::header::{ACCEPT, CACHE_CONTROL, EXPIRES, HeaderMap, HeaderValue, PRAGMA};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use buddy_core::model::{Feedback, QuizQuestion, SavedCommand, ToolId};

use crate::api::QuizApi;
use crate::config::ApiConfig;
use crate::error::{ApiError, ApiOperation, ConfigError};

/// `QuizApi` over the backend's JSON HTTP surface.
#[derive(Clone)]
pub struct HttpQuizApi {
    client: Client,
    config: ApiConfig,
}

impl HttpQuizApi {
    /// # Errors
    ///
    /// Returns `ConfigError::Client` if the HTTP client cannot be built.
    pub fn new(config: ApiConfig) -> Result<Self, ConfigError> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self { client, config })
    }

    /// Use a preconfigured client; the config timeout is not applied.
    #[must_use]
    pub fn with_client(config: ApiConfig, client: Client) -> Self {
        Self { client, config }
    }

    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    async fn send(
        &self,
        operation: ApiOperation,
        request: RequestBuilder,
    ) -> Result<Response, ApiError> {
        debug!(%operation, "sending request");
        request
            .send()
            .await
            .map_err(|err| ApiError::transport(operation, err))
    }

    async fn send_ok(
        &self,
        operation: ApiOperation,
        request: RequestBuilder,
    ) -> Result<Response, ApiError> {
        let response = self.send(operation, request).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::status(operation, status));
        }
        Ok(response)
    }

    async fn fetch_command_list(
        &self,
        operation: ApiOperation,
        request: RequestBuilder,
    ) -> Result<Vec<SavedCommand>, ApiError> {
        let response = self.send(operation, request).await?;
        match response.status() {
            StatusCode::NO_CONTENT | StatusCode::NOT_FOUND => return Ok(Vec::new()),
            status if !status.is_success() => return Err(ApiError::status(operation, status)),
            _ => {}
        }
        let body = response
            .bytes()
            .await
            .map_err(|err| ApiError::transport(operation, err))?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        serde_json::from_slice(&body).map_err(|err| ApiError::decode(operation, err))
    }
}

async fn decode<T: DeserializeOwned>(
    operation: ApiOperation,
    response: Response,
) -> Result<T, ApiError> {
    let body = response
        .bytes()
        .await
        .map_err(|err| ApiError::transport(operation, err))?;
    serde_json::from_slice(&body).map_err(|err| ApiError::decode(operation, err))
}

fn no_cache_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(
        CACHE_CONTROL,
        HeaderValue::from_static("no-cache, no-store, must-revalidate"),
    );
    headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
    headers.insert(EXPIRES, HeaderValue::from_static("0"));
    headers
}

#[async_trait]
impl QuizApi for HttpQuizApi {
    async fn fetch_question(&self, tool: &ToolId) -> Result<QuizQuestion, ApiError> {
        let operation = ApiOperation::FetchQuestion;
        let cache_buster = chrono::Utc::now().timestamp_millis().to_string();
        let request = self
            .client
            .get(self.config.endpoint(&format!("quiz/{tool}")))
            .headers(no_cache_headers())
            .query(&[("t", cache_buster)]);
        let response = self.send_ok(operation, request).await?;
        let body: QuestionResponse = decode(operation, response).await?;
        if body.tool_name.as_deref().is_some_and(|name| name != tool.as_str()) {
            debug!(%tool, returned = ?body.tool_name, "question tagged with a different tool");
        }
        Ok(QuizQuestion::new(tool.clone(), body.question))
    }

    async fn submit_answer(
        &self,
        tool: &ToolId,
        question: &str,
        answer: &str,
    ) -> Result<Feedback, ApiError> {
        let operation = ApiOperation::SubmitAnswer;
        let request = self
            .client
            .post(self.config.endpoint("quiz/check"))
            .json(&CheckRequest {
                tool_name: tool.as_str(),
                question,
                answer,
            });
        let response = self.send_ok(operation, request).await?;
        let body: CheckResponse = decode(operation, response).await?;
        Ok(Feedback::from_backend(body.feedback, body.correct))
    }

    async fn explain_command(&self, tool: &ToolId, command: &str) -> Result<String, ApiError> {
        let operation = ApiOperation::ExplainCommand;
        let request = self
            .client
            .post(self.config.endpoint("quiz/explain"))
            .json(&ExplainRequest {
                tool_name: tool.as_str(),
                command,
            });
        let response = self.send_ok(operation, request).await?;
        let body: ExplainResponse = decode(operation, response).await?;
        Ok(body.explanation)
    }

    async fn save_command(
        &self,
        tool: &ToolId,
        command: &str,
        explanation: &str,
    ) -> Result<SavedCommand, ApiError> {
        let operation = ApiOperation::SaveCommand;
        let request = self
            .client
            .post(self.config.endpoint("quiz/save"))
            .json(&SaveRequestBody {
                tool_name: tool.as_str(),
                command,
                explanation,
            });
        let response = self.send_ok(operation, request).await?;
        decode(operation, response).await
    }

    async fn list_saved_commands(&self, tool: &ToolId) -> Result<Vec<SavedCommand>, ApiError> {
        let request = self
            .client
            .get(self.config.endpoint(&format!("commands/{tool}")))
            .header(ACCEPT, "application/json");
        self.fetch_command_list(ApiOperation::ListSavedCommands, request)
            .await
    }

    async fn search_saved_commands(
        &self,
        tool: &ToolId,
        text: &str,
    ) -> Result<Vec<SavedCommand>, ApiError> {
        let text = text.trim();
        // The backend rejects blank search text; a blank search is a full listing.
        if text.is_empty() {
            return self.list_saved_commands(tool).await;
        }
        let request = self
            .client
            .get(self.config.endpoint(&format!("commands/{tool}/search")))
            .header(ACCEPT, "application/json")
            .query(&[("searchText", text)]);
        self.fetch_command_list(ApiOperation::SearchSavedCommands, request)
            .await
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuestionResponse {
    question: String,
    #[serde(default)]
    tool_name: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckRequest<'a> {
    tool_name: &'a str,
    question: &'a str,
    answer: &'a str,
}

#[derive(Debug, Deserialize)]
struct CheckResponse {
    feedback: String,
    #[serde(default)]
    correct: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExplainRequest<'a> {
    tool_name: &'a str,
    command: &'a str,
}

#[derive(Debug, Deserialize)]
struct ExplainResponse {
    explanation: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SaveRequestBody<'a> {
    tool_name: &'a str,
    command: &'a str,
    explanation: &'a str,
}
