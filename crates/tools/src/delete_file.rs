//! Delete file capability.

use async_trait::async_trait;
use actuator_core::ActionResult;
use actuator_core::error::ToolError;
use actuator_core::tool::{ParameterType, Tool, ToolParameter};
use serde_json::{Map, Value, json};
use std::path::PathBuf;

pub struct DeleteFileTool {
    workspace: PathBuf,
}

impl DeleteFileTool {
    pub fn new(workspace: impl Into<PathBuf>) -> Self {
        Self {
            workspace: workspace.into(),
        }
    }
}

#[async_trait]
impl Tool for DeleteFileTool {
    fn name(&self) -> &str {
        "delete_file"
    }

    fn description(&self) -> &str {
        "Delete a file from the filesystem"
    }

    fn parameters(&self) -> Vec<ToolParameter> {
        vec![ToolParameter::required(
            "file_path",
            ParameterType::String,
            "Path to the file to delete",
        )]
    }

    async fn execute(&self, arguments: &Map<String, Value>) -> Result<ActionResult, ToolError> {
        let file_path = arguments
            .get("file_path")
            .and_then(|v| v.as_str())
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'file_path' argument".into()))?;

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

        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(ActionResult::success_result(json!({
                "file_path": path.display().to_string(),
                "deleted": true,
            }))),
            Err(e) => Ok(ActionResult::error_result(format!(
                "Failed to delete file: {e}"
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
        let tool = DeleteFileTool::new(".");
        assert_eq!(tool.name(), "delete_file");
        assert_eq!(tool.schema()["parameters"]["required"], json!(["file_path"]));
    }

    #[tokio::test]
    async fn delete_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("junk.txt");
        std::fs::write(&target, "bye").unwrap();

        let tool = DeleteFileTool::new(dir.path());
        let result = tool
            .execute(&args(&[("file_path", json!("junk.txt"))]))
            .await
            .unwrap();

        assert!(result.success);
        assert_eq!(result.result.unwrap()["deleted"], true);
        assert!(!target.exists());
    }

    #[tokio::test]
    async fn delete_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let tool = DeleteFileTool::new(dir.path());
        let result = tool
            .execute(&args(&[("file_path", json!("ghost.txt"))]))
            .await
            .unwrap();

        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("File not found: ghost.txt"));
    }

    #[tokio::test]
    async fn directories_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();

        let tool = DeleteFileTool::new(dir.path());
        let result = tool
            .execute(&args(&[("file_path", json!("sub"))]))
            .await
            .unwrap();

        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("Path is not a file: sub"));
        assert!(dir.path().join("sub").exists());
    }
}
