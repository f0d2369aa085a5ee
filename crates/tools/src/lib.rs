//! Built-in capability implementations for Actuator.
//!
//! Capabilities give the agent the ability to work on a codebase:
//! read, write, edit and delete files, list directories, search code
//! with regex, find files by glob, and summarize source structure.
//!
//! Every tool resolves relative paths against a workspace root, so an
//! agent pointed at a project directory stays inside it by default.

pub mod analyze_code;
pub mod delete_file;
pub mod edit_file;
pub mod find_files;
pub mod list_directory;
pub mod read_file;
pub mod search_code;
pub mod workspace;
pub mod write_file;

use std::path::PathBuf;

use actuator_core::tool::ToolRegistry;

pub use analyze_code::AnalyzeCodeTool;
pub use delete_file::DeleteFileTool;
pub use edit_file::EditFileTool;
pub use find_files::FindFilesTool;
pub use list_directory::ListDirectoryTool;
pub use read_file::ReadFileTool;
pub use search_code::SearchCodeTool;
pub use write_file::WriteFileTool;

/// Create a tool registry with all built-in tools rooted at `workspace`.
///
/// Registration order is file tools first, then code tools, then file
/// discovery, which is the order the tools are listed in prompts.
pub fn default_registry(workspace: impl Into<PathBuf>) -> ToolRegistry {
    let workspace = workspace.into();
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(ReadFileTool::new(&workspace)));
    registry.register(Box::new(WriteFileTool::new(&workspace)));
    registry.register(Box::new(EditFileTool::new(&workspace)));
    registry.register(Box::new(ListDirectoryTool::new(&workspace)));
    registry.register(Box::new(DeleteFileTool::new(&workspace)));
    registry.register(Box::new(SearchCodeTool::new(&workspace)));
    registry.register(Box::new(AnalyzeCodeTool::new(&workspace)));
    registry.register(Box::new(FindFilesTool::new(&workspace)));
    registry
}
