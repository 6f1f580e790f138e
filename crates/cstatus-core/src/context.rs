//! Host input and the render context built from it
//!
//! Claude Code pipes a JSON object to the statusline command on every
//! refresh. See <https://docs.anthropic.com/en/docs/claude-code/statusline>.

use crate::error::{CstatusError, Result};
use crate::types::TranscriptMetrics;
use serde::Deserialize;
use std::path::Path;

const UNKNOWN_MODEL_NAME: &str = "Unknown Model";
const UNKNOWN: &str = "unknown";
const DEFAULT_OUTPUT_STYLE: &str = "default";

/// Input structure from Claude Code
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StatuslineInput {
    pub hook_event_name: String,
    pub session_id: String,
    pub transcript_path: String,
    pub cwd: String,
    pub model: ModelInfo,
    pub workspace: WorkspaceInfo,
    pub version: String,
    pub output_style: OutputStyle,
    pub cost: CostInfo,
}

/// Model information from Claude Code
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ModelInfo {
    pub id: String,
    pub display_name: String,
}

/// Workspace information from Claude Code
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WorkspaceInfo {
    pub current_dir: String,
    pub project_dir: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputStyle {
    pub name: String,
}

/// Session cost summary computed by Claude Code
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CostInfo {
    pub total_cost_usd: f64,
    pub total_duration_ms: u64,
    pub total_api_duration_ms: u64,
    pub total_lines_added: u64,
    pub total_lines_removed: u64,
}

impl StatuslineInput {
    /// Decode the host's JSON and fill in defaults for missing fields
    ///
    /// # Errors
    ///
    /// Returns `NoInput` for blank input, `InvalidInput` when the payload is
    /// not a JSON object and `Json` for malformed input
    pub fn from_json(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(CstatusError::NoInput);
        }
        // serde would accept an array for a struct with defaults
        if !raw.starts_with('{') {
            return Err(CstatusError::InvalidInput("expected a JSON object".to_string()));
        }
        let input: Self = serde_json::from_str(raw)?;
        Ok(input.with_defaults())
    }

    fn with_defaults(mut self) -> Self {
        if self.model.display_name.is_empty() {
            self.model.display_name = UNKNOWN_MODEL_NAME.to_string();
        }
        if self.model.id.is_empty() {
            self.model.id = UNKNOWN.to_string();
        }
        if self.cwd.is_empty()
            && let Ok(cwd) = std::env::current_dir()
        {
            self.cwd = cwd.to_string_lossy().into_owned();
        }
        if self.version.is_empty() {
            self.version = UNKNOWN.to_string();
        }
        if self.output_style.name.is_empty() {
            self.output_style.name = DEFAULT_OUTPUT_STYLE.to_string();
        }
        self
    }

    /// The workspace's current directory, falling back to `cwd`
    pub fn working_dir(&self) -> &str {
        if self.workspace.current_dir.is_empty() {
            &self.cwd
        } else {
            &self.workspace.current_dir
        }
    }

    /// Final path component of the project directory, empty when unknown
    pub fn project_name(&self) -> String {
        Path::new(&self.workspace.project_dir)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Whether the host reported a real version
    pub fn has_version(&self) -> bool {
        !self.version.is_empty() && self.version != UNKNOWN
    }
}

/// Branch and dirty state of the working directory's repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitStatus {
    pub branch: String,
    pub has_changes: bool,
}

/// Everything the widgets need to render one statusline
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    pub input: StatuslineInput,
    pub metrics: TranscriptMetrics,
    pub git: Option<GitStatus>,
    pub working_dir: String,
    pub project_name: String,
}

impl RenderContext {
    /// Assemble a context from decoded input and derived data
    pub fn new(input: StatuslineInput, metrics: TranscriptMetrics, git: Option<GitStatus>) -> Self {
        let working_dir = input.working_dir().to_string();
        let project_name = input.project_name();
        Self {
            input,
            metrics,
            git,
            working_dir,
            project_name,
        }
    }
}
