//! Workspace-relative path resolution shared by all capabilities.

use std::path::{Path, PathBuf};

/// Resolve a path argument against the workspace root.
///
/// Absolute paths pass through untouched; relative paths are joined onto
/// the workspace.
pub fn resolve(workspace: &Path, raw: &str) -> PathBuf {
    let path = Path::new(raw);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        workspace.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_paths_join_the_workspace() {
        let resolved = resolve(Path::new("/work"), "src/main.rs");
        assert_eq!(resolved, PathBuf::from("/work/src/main.rs"));
    }

    #[test]
    fn absolute_paths_pass_through() {
        let resolved = resolve(Path::new("/work"), "/etc/hosts");
        assert_eq!(resolved, PathBuf::from("/etc/hosts"));
    }
}
