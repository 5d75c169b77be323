use crate::model::tool::{Tool, ToolError, ToolId};

/// Canonical tool set: identifier, icon, description.
const CANONICAL_TOOLS: &[(&str, &str, &str)] = &[
    ("git", "🔄", "Version control: branches, commits, history"),
    ("docker", "🐳", "Containers: images, volumes, networks"),
    ("kubernetes", "☸️", "Orchestration with kubectl"),
    ("bash", "💻", "Shell built-ins, pipes and redirection"),
    ("npm", "📦", "Node package manager"),
    ("yarn", "🧶", "Alternative Node package manager"),
    ("mvn", "🏗️", "Maven builds and dependency management"),
    ("gradle", "🐘", "Gradle builds and tasks"),
    ("terraform", "🌍", "Infrastructure as code"),
    ("aws", "☁️", "AWS command line interface"),
    ("gcloud", "🌐", "Google Cloud command line interface"),
];

/// The one authoritative, ordered list of tools the client offers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCatalog {
    tools: Vec<Tool>,
}

impl Default for ToolCatalog {
    fn default() -> Self {
        let tools = CANONICAL_TOOLS
            .iter()
            .filter_map(|(id, icon, description)| {
                ToolId::new(*id)
                    .ok()
                    .map(|id| Tool::new(id, *icon, *description))
            })
            .collect();
        Self { tools }
    }
}

impl ToolCatalog {
    /// Build a catalog from explicit tools. Later duplicates are dropped.
    #[must_use]
    pub fn from_tools(tools: impl IntoIterator<Item = Tool>) -> Self {
        let mut unique: Vec<Tool> = Vec::new();
        for tool in tools {
            if !unique.iter().any(|existing| existing.id() == tool.id()) {
                unique.push(tool);
            }
        }
        Self { tools: unique }
    }

    /// Narrow the catalog to the given identifiers, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns `ToolError::Unknown` if an identifier is not part of this catalog.
    pub fn restricted_to(&self, ids: &[ToolId]) -> Result<Self, ToolError> {
        let mut tools = Vec::with_capacity(ids.len());
        for id in ids {
            let tool = self
                .get(id)
                .ok_or_else(|| ToolError::Unknown(id.to_string()))?;
            tools.push(tool.clone());
        }
        Ok(Self::from_tools(tools))
    }

    /// Parse a comma separated tool list (`"git, docker"`) against this catalog.
    ///
    /// # Errors
    ///
    /// Returns `ToolError` for malformed or unknown identifiers, or
    /// `ToolError::EmptyId` when the list holds no identifiers at all.
    pub fn restricted_to_list(&self, raw: &str) -> Result<Self, ToolError> {
        let ids = raw
            .split(',')
            .filter(|part| !part.trim().is_empty())
            .map(ToolId::new)
            .collect::<Result<Vec<_>, _>>()?;
        if ids.is_empty() {
            return Err(ToolError::EmptyId);
        }
        self.restricted_to(&ids)
    }

    #[must_use]
    pub fn get(&self, id: &ToolId) -> Option<&Tool> {
        self.tools.iter().find(|tool| tool.id() == id)
    }

    #[must_use]
    pub fn contains(&self, id: &ToolId) -> bool {
        self.get(id).is_some()
    }

    /// Position of the tool in catalog order.
    #[must_use]
    pub fn position(&self, id: &ToolId) -> Option<usize> {
        self.tools.iter().position(|tool| tool.id() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tool> {
        self.tools.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &ToolId> {
        self.tools.iter().map(Tool::id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
