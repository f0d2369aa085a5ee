//! Search code capability — recursive regex search over the workspace.

use async_trait::async_trait;
use actuator_core::ActionResult;
use actuator_core::error::ToolError;
use actuator_core::tool::{ParameterType, Tool, ToolParameter};
use regex::RegexBuilder;
use serde_json::{Map, Value, json};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub struct SearchCodeTool {
    workspace: PathBuf,
}

impl SearchCodeTool {
    pub fn new(workspace: impl Into<PathBuf>) -> Self {
        Self {
            workspace: workspace.into(),
        }
    }

    /// Collect the files to search under `root`, honoring the optional
    /// extension filter. Hidden directories, `target`, and `node_modules`
    /// are skipped.
    fn collect_files(root: &Path, file_type: Option<&str>) -> Vec<PathBuf> {
        let mut files = Vec::new();
        for entry in WalkDir::new(root)
            .max_depth(10)
            .into_iter()
            .filter_entry(|e| {
                if e.depth() == 0 {
                    return true;
                }
                let name = e.file_name().to_string_lossy();
                !name.starts_with('.') && name != "target" && name != "node_modules"
            })
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_file() {
                continue;
            }
            if let Some(ext) = file_type
                && entry.path().extension().and_then(|e| e.to_str()) != Some(ext)
            {
                continue;
            }
            files.push(entry.into_path());
        }
        files
    }
}

#[async_trait]
impl Tool for SearchCodeTool {
    fn name(&self) -> &str {
        "search_code"
    }

    fn description(&self) -> &str {
        "Search for code patterns in files using regular expressions"
    }

    fn parameters(&self) -> Vec<ToolParameter> {
        vec![
            ToolParameter::required(
                "pattern",
                ParameterType::String,
                "Regular expression pattern to search for",
            ),
            ToolParameter::optional(
                "file_path",
                ParameterType::String,
                "File or directory to search in (default: workspace root)",
            ),
            ToolParameter::optional(
                "file_type",
                ParameterType::String,
                "File extension filter (e.g., 'rs', 'py', 'toml')",
            ),
            ToolParameter::optional(
                "case_sensitive",
                ParameterType::Boolean,
                "Whether search is case sensitive",
            )
            .with_default(json!(false)),
        ]
    }

    async fn execute(&self, arguments: &Map<String, Value>) -> Result<ActionResult, ToolError> {
        let pattern = arguments
            .get("pattern")
            .and_then(|v| v.as_str())
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'pattern' argument".into()))?;
        let file_path = arguments.get("file_path").and_then(|v| v.as_str());
        let file_type = arguments.get("file_type").and_then(|v| v.as_str());
        let case_sensitive = arguments
            .get("case_sensitive")
            .and_then(|v| v.as_bool())
            .unwrap_or(false);

        let search_path = match file_path {
            Some(p) => crate::workspace::resolve(&self.workspace, p),
            None => self.workspace.clone(),
        };

        if !search_path.exists() {
            return Ok(ActionResult::error_result(format!(
                "Path not found: {}",
                search_path.display()
            )));
        }

        let regex = match RegexBuilder::new(pattern)
            .case_insensitive(!case_sensitive)
            .build()
        {
            Ok(re) => re,
            Err(e) => {
                return Ok(ActionResult::error_result(format!(
                    "Invalid regex pattern: {e}"
                )));
            }
        };

        let files = if search_path.is_file() {
            vec![search_path]
        } else {
            Self::collect_files(&search_path, file_type)
        };

        let mut matches: Vec<Value> = Vec::new();
        for file in files {
            // Unreadable (e.g. binary) files are skipped
            let Ok(content) = std::fs::read_to_string(&file) else {
                continue;
            };
            let rel = file.strip_prefix(&self.workspace).unwrap_or(&file);
            for (line_num, line) in content.lines().enumerate() {
                if regex.is_match(line) {
                    matches.push(json!({
                        "file": rel.display().to_string(),
                        "line": line_num + 1,
                        "content": line.trim(),
                    }));
                }
            }
        }

        Ok(ActionResult::success_result(json!({
            "pattern": pattern,
            "matches": matches,
            "count": matches.len(),
        })))
    }
}
