use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ToolError {
    #[error("tool identifier cannot be empty")]
    EmptyId,

    #[error("tool identifier contains invalid character {ch:?}: {raw}")]
    InvalidCharacter { raw: String, ch: char },

    #[error("unknown tool: {0}")]
    Unknown(String),
}

/// Validated tool identifier (trimmed, lower-case, URL path safe).
///
/// Identifiers are used verbatim as a path segment (`/quiz/{tool}`), so only
/// ASCII alphanumerics, `-`, `_` and `.` are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ToolId(String);

impl ToolId {
    /// Create a validated tool identifier.
    ///
    /// # Errors
    ///
    /// Returns `ToolError::EmptyId` if the value is empty after trimming, or
    /// `ToolError::InvalidCharacter` if it contains anything besides
    /// ASCII alphanumerics, `-`, `_` and `.`.
    pub fn new(value: impl Into<String>) -> Result<Self, ToolError> {
        let raw = value.into();
        let normalized = raw.trim().to_ascii_lowercase();
        if normalized.is_empty() {
            return Err(ToolError::EmptyId);
        }
        if let Some(ch) = normalized
            .chars()
            .find(|ch| !(ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.')))
        {
            return Err(ToolError::InvalidCharacter { raw, ch });
        }
        Ok(Self(normalized))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ToolId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ToolId {
    type Error = ToolError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ToolId> for String {
    fn from(id: ToolId) -> Self {
        id.0
    }
}

impl std::str::FromStr for ToolId {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// A CLI program covered by the quiz, with its display metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tool {
    id: ToolId,
    icon: String,
    description: String,
}

impl Tool {
    #[must_use]
    pub fn new(id: ToolId, icon: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            icon: icon.into(),
            description: description.into(),
        }
    }

    #[must_use]
    pub fn id(&self) -> &ToolId {
        &self.id
    }

    #[must_use]
    pub fn icon(&self) -> &str {
        &self.icon
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}
