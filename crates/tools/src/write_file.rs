//! Write file capability — create or overwrite files.

use async_trait::async_trait;
use actuator_core::ActionResult;
use actuator_core::error::ToolError;
use actuator_core::tool::{ParameterType, Tool, ToolParameter};
use serde_json::{Map, Value, json};
use std::path::PathBuf;

pub struct WriteFileTool {
    workspace: PathBuf,
}

impl WriteFileTool {
    pub fn new(workspace: impl Into<PathBuf>) -> Self {
        Self {
            workspace: workspace.into(),
        }
    }
}

#[async_trait]
impl Tool for WriteFileTool {
    fn name(&self) -> &str {
        "write_file"
    }

    fn description(&self) -> &str {
        "Write content to a file. Creates the file if it doesn't exist, overwrites if it does."
    }

    fn parameters(&self) -> Vec<ToolParameter> {
        vec![
            ToolParameter::required(
                "file_path",
                ParameterType::String,
                "Path to the file to write",
            ),
            ToolParameter::required(
                "content",
                ParameterType::String,
                "Content to write to the file",
            ),
        ]
    }

    async fn execute(&self, arguments: &Map<String, Value>) -> Result<ActionResult, ToolError> {
        let file_path = arguments
            .get("file_path")
            .and_then(|v| v.as_str())
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'file_path' argument".into()))?;
        let content = arguments
            .get("content")
            .and_then(|v| v.as_str())
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'content' argument".into()))?;

        let path = crate::workspace::resolve(&self.workspace, file_path);

        if let Some(parent) = path.parent()
            && let Err(e) = tokio::fs::create_dir_all(parent).await
        {
            return Ok(ActionResult::error_result(format!(
                "Failed to create directory: {e}"
            )));
        }

        match tokio::fs::write(&path, content).await {
            Ok(()) => Ok(ActionResult::success_result(json!({
                "file_path": path.display().to_string(),
                "bytes_written": content.len(),
            }))),
            Err(e) => Ok(ActionResult::error_result(format!(
                "Failed to write file: {e}"
            ))),
        }
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
        let tool = WriteFileTool::new(".");
        assert_eq!(tool.name(), "write_file");
        let schema = tool.schema();
        assert_eq!(
            schema["parameters"]["required"],
            json!(["file_path", "content"])
        );
    }

    #[tokio::test]
    async fn write_and_verify() {
        let dir = tempfile::tempdir().unwrap();

        let tool = WriteFileTool::new(dir.path());
        let result = tool
            .execute(&args(&[
                ("file_path", json!("output.txt")),
                ("content", json!("Hello from test!")),
            ]))
            .await
            .unwrap();

        assert!(result.success);
        let payload = result.result.unwrap();
        assert_eq!(payload["bytes_written"], 16);

        let content = std::fs::read_to_string(dir.path().join("output.txt")).unwrap();
        assert_eq!(content, "Hello from test!");
    }

    #[tokio::test]
    async fn write_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();

        let tool = WriteFileTool::new(dir.path());
        let result = tool
            .execute(&args(&[
                ("file_path", json!("nested/dir/file.txt")),
                ("content", json!("nested content")),
            ]))
            .await
            .unwrap();

        assert!(result.success);
        let written = dir.path().join("nested").join("dir").join("file.txt");
        assert_eq!(std::fs::read_to_string(written).unwrap(), "nested content");
    }

    #[tokio::test]
    async fn overwrite_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("overwrite.txt"), "old content").unwrap();

        let tool = WriteFileTool::new(dir.path());
        let result = tool
            .execute(&args(&[
                ("file_path", json!("overwrite.txt")),
                ("content", json!("new content")),
            ]))
            .await
            .unwrap();

        assert!(result.success);
        let content = std::fs::read_to_string(dir.path().join("overwrite.txt")).unwrap();
        assert_eq!(content, "new content");
    }

    #[tokio::test]
    async fn missing_content_argument() {
        let tool = WriteFileTool::new(".");
        let result = tool
            .execute(&args(&[("file_path", json!("x.txt"))]))
            .await;
        assert!(result.is_err());
    }
}
