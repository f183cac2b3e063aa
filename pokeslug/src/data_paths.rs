use std::env;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Environment variable that overrides resource root detection.
pub const RESOURCES_ENV: &str = "POKESLUG_RESOURCES";

/// Cached path to the directory containing the reference files.
static RESOURCE_ROOT: LazyLock<PathBuf> = LazyLock::new(detect_resource_root);

/// Resource root to use: an explicit directory wins over detection.
pub fn resource_root(explicit: Option<&Path>) -> PathBuf {
    explicit.map_or_else(|| RESOURCE_ROOT.clone(), Path::to_path_buf)
}

/// Resolve the most likely location of the reference files.
fn detect_resource_root() -> PathBuf {
    if let Some(dir) = env::var_os(RESOURCES_ENV) {
        return PathBuf::from(dir);
    }

    let mut candidates = Vec::new();

    // Common layouts: the resource tree of the main project and the bundled sample data.
    candidates.push(PathBuf::from("Resources/Pokemon"));
    candidates.push(PathBuf::from("pokeslug/data"));
    candidates.push(PathBuf::from("data"));

    if let Ok(exe_path) = env::current_exe()
        && let Some(dir) = exe_path.parent()
    {
        candidates.push(dir.join("Resources/Pokemon"));
        candidates.push(dir.join("data"));

        if let Some(parent) = dir.parent() {
            candidates.push(parent.join("Resources/Pokemon"));
            candidates.push(parent.join("data"));
        }
    }

    candidates
        .into_iter()
        .find(|candidate| candidate.is_dir())
        .unwrap_or_else(|| PathBuf::from("Resources/Pokemon"))
}
