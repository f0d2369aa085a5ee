//! Edit file capability — exact-string replacement with ambiguity checks.

use async_trait::async_trait;
use actuator_core::ActionResult;
use actuator_core::error::ToolError;
use actuator_core::tool::{ParameterType, Tool, ToolParameter};
use serde_json::{Map, Value, json};
use std::path::PathBuf;

pub struct EditFileTool {
    workspace: PathBuf,
}

impl EditFileTool {
    pub fn new(workspace: impl Into<PathBuf>) -> Self {
        Self {
            workspace: workspace.into(),
        }
    }
}

#[async_trait]
impl Tool for EditFileTool {
    fn name(&self) -> &str {
        "edit_file"
    }

    fn description(&self) -> &str {
        "Edit a file by replacing old_string with new_string. Supports replace_all flag."
    }

    fn parameters(&self) -> Vec<ToolParameter> {
        vec![
            ToolParameter::required(
                "file_path",
                ParameterType::String,
                "Path to the file to edit",
            ),
            ToolParameter::required(
                "old_string",
                ParameterType::String,
                "The text to replace (must match exactly including whitespace)",
            ),
            ToolParameter::required(
                "new_string",
                ParameterType::String,
                "The replacement text",
            ),
            ToolParameter::optional(
                "replace_all",
                ParameterType::Boolean,
                "If true, replace all occurrences; if false, replace only the first",
            )
            .with_default(json!(false)),
        ]
    }

    async fn execute(&self, arguments: &Map<String, Value>) -> Result<ActionResult, ToolError> {
        let file_path = arguments
            .get("file_path")
            .and_then(|v| v.as_str())
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'file_path' argument".into()))?;
        let old_string = arguments
            .get("old_string")
            .and_then(|v| v.as_str())
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'old_string' argument".into()))?;
        let new_string = arguments
            .get("new_string")
            .and_then(|v| v.as_str())
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'new_string' argument".into()))?;
        let replace_all = arguments
            .get("replace_all")
            .and_then(|v| v.as_bool())
            .unwrap_or(false);

        let path = crate::workspace::resolve(&self.workspace, file_path);

        if !path.exists() {
            return Ok(ActionResult::error_result(format!(
                "File not found: {file_path}"
            )));
        }

        let content = tokio::fs::read_to_string(&path).await.map_err(|e| {
            ToolError::ExecutionFailed {
                tool_name: "edit_file".into(),
                reason: format!("Failed to read file: {e}"),
            }
        })?;

        if !content.contains(old_string) {
            return Ok(ActionResult::error_result("old_string not found in file"));
        }

        let (new_content, count) = if replace_all {
            let count = content.matches(old_string).count();
            (content.replace(old_string, new_string), count)
        } else {
            if content.matches(old_string).count() > 1 {
                return Ok(ActionResult::error_result(
                    "old_string appears multiple times. Use replace_all=true or provide more context",
                ));
            }
            (content.replacen(old_string, new_string, 1), 1)
        };

        match tokio::fs::write(&path, new_content).await {
            Ok(()) => Ok(ActionResult::success_result(json!({
                "file_path": path.display().to_string(),
                "replacements": count,
            }))),
            Err(e) => Ok(ActionResult::error_result(format!(
                "Failed to write file: {e}"
            ))),
        }
    }
}
