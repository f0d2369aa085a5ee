//! Read file capability — whole-file or line-windowed reads.

use async_trait::async_trait;
use actuator_core::ActionResult;
use actuator_core::error::ToolError;
use actuator_core::tool::{ParameterType, Tool, ToolParameter};
use serde_json::{Map, Value, json};
use std::path::PathBuf;

pub struct ReadFileTool {
    workspace: PathBuf,
}

impl ReadFileTool {
    pub fn new(workspace: impl Into<PathBuf>) -> Self {
        Self {
            workspace: workspace.into(),
        }
    }
}

#[async_trait]
impl Tool for ReadFileTool {
    fn name(&self) -> &str {
        "read_file"
    }

    fn description(&self) -> &str {
        "Read the contents of a file. Returns the file content as text."
    }

    fn parameters(&self) -> Vec<ToolParameter> {
        vec![
            ToolParameter::required(
                "file_path",
                ParameterType::String,
                "Path to the file to read (relative to workspace or absolute)",
            ),
            ToolParameter::optional(
                "offset",
                ParameterType::Integer,
                "Line number to start reading from (1-indexed, optional)",
            ),
            ToolParameter::optional(
                "limit",
                ParameterType::Integer,
                "Maximum number of lines to read (optional)",
            ),
        ]
    }

    async fn execute(&self, arguments: &Map<String, Value>) -> Result<ActionResult, ToolError> {
        let file_path = arguments
            .get("file_path")
            .and_then(|v| v.as_str())
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'file_path' argument".into()))?;
        let offset = arguments
            .get("offset")
            .and_then(|v| v.as_u64())
            .map(|v| v as usize);
        let limit = arguments
            .get("limit")
            .and_then(|v| v.as_u64())
            .map(|v| v as usize);

        let path = crate::workspace::resolve(&self.workspace, file_path);

        if !path.exists() {
            return Ok(ActionResult::error_result(format!(
                "File not found: {file_path}"
            )));
        }
        if !path.is_file() {
            return Ok(ActionResult::error_result(format!(
                "Path is not a file: {file_path}"
            )));
        }

        let text = tokio::fs::read_to_string(&path).await.map_err(|e| {
            ToolError::ExecutionFailed {
                tool_name: "read_file".into(),
                reason: format!("Failed to read file: {e}"),
            }
        })?;

        let content = if offset.is_some() || limit.is_some() {
            // Line terminators stay attached, matching a window of raw lines
            let lines: Vec<&str> = text.split_inclusive('\n').collect();
            let start = offset.unwrap_or(0).saturating_sub(1).min(lines.len());
            let end = match limit {
                Some(l) if l > 0 => (start + l).min(lines.len()),
                _ => lines.len(),
            };
            lines[start..end].concat()
        } else {
            text
        };

        let line_count = if content.is_empty() {
            0
        } else {
            content.matches('\n').count() + 1
        };

        Ok(ActionResult::success_result(json!({
            "content": content,
            "file_path": path.display().to_string(),
            "lines": line_count,
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(pairs: &[(&str, Value)]) -> Map<String, Value> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    #[test]
    fn tool_definition() {
        let tool = ReadFileTool::new(".");
        assert_eq!(tool.name(), "read_file");
        let schema = tool.schema();
        assert_eq!(schema["parameters"]["required"], json!(["file_path"]));
        assert!(schema["parameters"]["properties"]["offset"].is_object());
    }

    #[tokio::test]
    async fn read_relative_to_workspace() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("notes.txt"), "alpha\nbeta\ngamma\n").unwrap();

        let tool = ReadFileTool::new(dir.path());
        let result = tool
            .execute(&args(&[("file_path", json!("notes.txt"))]))
            .await
            .unwrap();

        assert!(result.success);
        let payload = result.result.unwrap();
        assert_eq!(payload["content"], "alpha\nbeta\ngamma\n");
        assert_eq!(payload["lines"], 4);
    }

    #[tokio::test]
    async fn windowed_read_with_offset_and_limit() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("notes.txt"), "alpha\nbeta\ngamma\n").unwrap();

        let tool = ReadFileTool::new(dir.path());
        let result = tool
            .execute(&args(&[
                ("file_path", json!("notes.txt")),
                ("offset", json!(2)),
                ("limit", json!(1)),
            ]))
            .await
            .unwrap();

        assert!(result.success);
        let payload = result.result.unwrap();
        assert_eq!(payload["content"], "beta\n");
    }

    #[tokio::test]
    async fn window_past_end_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("short.txt"), "only\n").unwrap();

        let tool = ReadFileTool::new(dir.path());
        let result = tool
            .execute(&args(&[
                ("file_path", json!("short.txt")),
                ("offset", json!(10)),
            ]))
            .await
            .unwrap();

        assert!(result.success);
        let payload = result.result.unwrap();
        assert_eq!(payload["content"], "");
        assert_eq!(payload["lines"], 0);
    }

    #[tokio::test]
    async fn missing_file_reports_original_argument() {
        let dir = tempfile::tempdir().unwrap();
        let tool = ReadFileTool::new(dir.path());
        let result = tool
            .execute(&args(&[("file_path", json!("nope.txt"))]))
            .await
            .unwrap();

        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("File not found: nope.txt"));
    }

    #[tokio::test]
    async fn directory_is_not_a_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();

        let tool = ReadFileTool::new(dir.path());
        let result = tool
            .execute(&args(&[("file_path", json!("sub"))]))
            .await
            .unwrap();

        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("Path is not a file: sub"));
    }

    #[tokio::test]
    async fn absolute_path_bypasses_workspace() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("abs.txt");
        std::fs::write(&file_path, "direct").unwrap();

        let tool = ReadFileTool::new("/somewhere/else");
        let result = tool
            .execute(&args(&[("file_path", json!(file_path.to_str().unwrap()))]))
            .await
            .unwrap();

        assert!(result.success);
        assert_eq!(result.result.unwrap()["content"], "direct");
    }

    #[tokio::test]
    async fn missing_file_path_argument() {
        let tool = ReadFileTool::new(".");
        let result = tool.execute(&Map::new()).await;
        assert!(result.is_err());
    }
}
