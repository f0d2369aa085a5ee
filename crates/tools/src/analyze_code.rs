//! Analyze code capability — lightweight structure extraction by extension.

use async_trait::async_trait;
use actuator_core::ActionResult;
use actuator_core::error::ToolError;
use actuator_core::tool::{ParameterType, Tool, ToolParameter};
use regex::Regex;
use serde_json::{Map, Value, json};
use std::path::PathBuf;

pub struct AnalyzeCodeTool {
    workspace: PathBuf,
}

impl AnalyzeCodeTool {
    pub fn new(workspace: impl Into<PathBuf>) -> Self {
        Self {
            workspace: workspace.into(),
        }
    }
}

/// Capture group 1 of each match together with its 1-indexed line number.
fn named_matches(content: &str, pattern: &str) -> Vec<Value> {
    let Ok(re) = Regex::new(pattern) else {
        return Vec::new();
    };
    let mut out = Vec::new();
    for caps in re.captures_iter(content) {
        if let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) {
            let line = content[..whole.start()].matches('\n').count() + 1;
            out.push(json!({ "name": name.as_str(), "line": line }));
        }
    }
    out
}

/// Capture group 1 of each match, trimmed.
fn captured_list(content: &str, pattern: &str) -> Vec<String> {
    let Ok(re) = Regex::new(pattern) else {
        return Vec::new();
    };
    re.captures_iter(content)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().trim().to_string()))
        .collect()
}

#[async_trait]
impl Tool for AnalyzeCodeTool {
    fn name(&self) -> &str {
        "analyze_code"
    }

    fn description(&self) -> &str {
        "Analyze code file structure: functions, classes, imports, etc."
    }

    fn parameters(&self) -> Vec<ToolParameter> {
        vec![ToolParameter::required(
            "file_path",
            ParameterType::String,
            "Path to the code file to analyze",
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

        let content = tokio::fs::read_to_string(&path).await.map_err(|e| {
            ToolError::ExecutionFailed {
                tool_name: "analyze_code".into(),
                reason: format!("Failed to read file: {e}"),
            }
        })?;

        let language = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("unknown")
            .to_string();
        let lines = content.lines().count();

        let (functions, classes, imports) = match language.as_str() {
            "rs" => (
                named_matches(
                    &content,
                    r"(?m)^\s*(?:pub(?:\([^)]*\))?\s+)?(?:async\s+)?fn\s+(\w+)",
                ),
                named_matches(
                    &content,
                    r"(?m)^\s*(?:pub(?:\([^)]*\))?\s+)?(?:struct|enum|trait)\s+(\w+)",
                ),
                captured_list(&content, r"(?m)^\s*use\s+([^;]+);"),
            ),
            "py" => (
                named_matches(&content, r"(?m)^\s*(?:async\s+)?def\s+(\w+)\s*\("),
                named_matches(&content, r"(?m)^\s*class\s+(\w+)"),
                captured_list(&content, r"(?m)^\s*(?:from\s+[\w.]+\s+)?import\s+(.+)"),
            ),
            _ => (Vec::new(), Vec::new(), Vec::new()),
        };

        Ok(ActionResult::success_result(json!({
            "file_path": path.display().to_string(),
            "language": language,
            "lines": lines,
            "functions": functions,
            "classes": classes,
            "imports": imports,
        })))
    }
}
