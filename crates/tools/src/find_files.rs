//! Find files capability — glob matching over the workspace tree.

use async_trait::async_trait;
use actuator_core::ActionResult;
use actuator_core::error::ToolError;
use actuator_core::tool::{ParameterType, Tool, ToolParameter};
use serde_json::{Map, Value, json};
use std::path::PathBuf;
use walkdir::WalkDir;

pub struct FindFilesTool {
    workspace: PathBuf,
}

impl FindFilesTool {
    pub fn new(workspace: impl Into<PathBuf>) -> Self {
        Self {
            workspace: workspace.into(),
        }
    }
}

#[async_trait]
impl Tool for FindFilesTool {
    fn name(&self) -> &str {
        "find_files"
    }

    fn description(&self) -> &str {
        "Find files matching a glob pattern"
    }

    fn parameters(&self) -> Vec<ToolParameter> {
        vec![
            ToolParameter::required(
                "pattern",
                ParameterType::String,
                "Glob pattern (e.g., '*.rs', '**/test_*.py')",
            ),
            ToolParameter::optional(
                "directory",
                ParameterType::String,
                "Directory to search in (default: workspace root)",
            ),
        ]
    }

    async fn execute(&self, arguments: &Map<String, Value>) -> Result<ActionResult, ToolError> {
        let pattern = arguments
            .get("pattern")
            .and_then(|v| v.as_str())
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'pattern' argument".into()))?;
        let directory = arguments.get("directory").and_then(|v| v.as_str());

        let search_dir = match directory {
            Some(d) => crate::workspace::resolve(&self.workspace, d),
            None => self.workspace.clone(),
        };

        if !search_dir.exists() {
            return Ok(ActionResult::error_result(format!(
                "Directory not found: {}",
                search_dir.display()
            )));
        }

        let glob_pattern = match glob::Pattern::new(pattern) {
            Ok(p) => p,
            Err(e) => {
                return Ok(ActionResult::error_result(format!(
                    "Invalid glob pattern: {e}"
                )));
            }
        };

        let mut files: Vec<String> = Vec::new();
        for entry in WalkDir::new(&search_dir)
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
            // Match against the path relative to the search directory, so
            // patterns with directory components work.
            let candidate = entry.path().strip_prefix(&search_dir).unwrap_or(entry.path());
            if !glob_pattern.matches_path(candidate) {
                continue;
            }
            let rel = entry.path().strip_prefix(&self.workspace).unwrap_or(entry.path());
            files.push(rel.display().to_string());
        }

        files.sort();

        Ok(ActionResult::success_result(json!({
            "pattern": pattern,
            "files": files,
            "count": files.len(),
        })))
    }
}
