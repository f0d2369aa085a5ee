//! List directory capability — directories first, dotfiles skipped.

use async_trait::async_trait;
use actuator_core::ActionResult;
use actuator_core::error::ToolError;
use actuator_core::tool::{ParameterType, Tool, ToolParameter};
use serde_json::{Map, Value, json};
use std::path::PathBuf;

pub struct ListDirectoryTool {
    workspace: PathBuf,
}

impl ListDirectoryTool {
    pub fn new(workspace: impl Into<PathBuf>) -> Self {
        Self {
            workspace: workspace.into(),
        }
    }
}

#[async_trait]
impl Tool for ListDirectoryTool {
    fn name(&self) -> &str {
        "list_directory"
    }

    fn description(&self) -> &str {
        "List files and directories in a given path"
    }

    fn parameters(&self) -> Vec<ToolParameter> {
        vec![
            ToolParameter::optional(
                "directory_path",
                ParameterType::String,
                "Path to the directory to list",
            )
            .with_default(json!(".")),
            ToolParameter::optional(
                "ignore_patterns",
                ParameterType::Array,
                "Glob patterns to ignore (e.g., ['*.log', 'target'])",
            ),
        ]
    }

    async fn execute(&self, arguments: &Map<String, Value>) -> Result<ActionResult, ToolError> {
        let directory_path = arguments
            .get("directory_path")
            .and_then(|v| v.as_str())
            .unwrap_or(".");
        let ignore_patterns: Vec<glob::Pattern> = arguments
            .get("ignore_patterns")
            .and_then(|v| v.as_array())
            .map(|arr| {
                arr.iter()
                    .filter_map(|v| v.as_str())
                    .filter_map(|p| glob::Pattern::new(p).ok())
                    .collect()
            })
            .unwrap_or_default();

        let path = crate::workspace::resolve(&self.workspace, directory_path);

        if !path.exists() {
            return Ok(ActionResult::error_result(format!(
                "Directory not found: {directory_path}"
            )));
        }
        if !path.is_dir() {
            return Ok(ActionResult::error_result(format!(
                "Path is not a directory: {directory_path}"
            )));
        }

        let entries = std::fs::read_dir(&path).map_err(|e| ToolError::ExecutionFailed {
            tool_name: "list_directory".into(),
            reason: format!("Failed to list directory: {e}"),
        })?;

        let mut items: Vec<Value> = Vec::new();
        for entry in entries.flatten() {
            let name = entry.file_name().to_string_lossy().to_string();

            // Hidden files/dirs are skipped by default
            if name.starts_with('.') {
                continue;
            }
            if ignore_patterns.iter().any(|p| p.matches(&name)) {
                continue;
            }

            let kind = if entry.path().is_dir() {
                "directory"
            } else {
                "file"
            };
            items.push(json!({
                "name": name,
                "type": kind,
                "path": entry.path().display().to_string(),
            }));
        }

        // Directories first, then by name
        items.sort_by_key(|item| {
            (
                item["type"] == "file",
                item["name"].as_str().unwrap_or_default().to_string(),
            )
        });

        Ok(ActionResult::success_result(json!({
            "directory": path.display().to_string(),
            "items": items,
        })))
    }
}
