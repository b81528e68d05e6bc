use crate::env::{EnvLookup, Platform};
use crate::error::{TaskError, TaskResult};
use crate::fs::FileSystem;
use std::path::{Path, PathBuf};

/// File name of the CMake executable on Windows.
pub const CMAKE_EXE: &str = "cmake.exe";

/// Locate `file_name` the way the Windows toolchain lookup does.
///
/// Behavior:
/// - Non-Windows platform: fails with [`TaskError::UnsupportedPlatform`] without
///   probing the filesystem.
/// - Each `;`-separated PATH entry is tried in order; the first directory that
///   exists and contains `file_name` wins and `fallback` is never probed.
/// - Otherwise `fallback` is returned if it exists.
/// - Otherwise [`TaskError::ToolNotFound`].
pub fn find_tool(
    platform: &Platform,
    env: &dyn EnvLookup,
    fs: &dyn FileSystem,
    file_name: &str,
    fallback: Option<&Path>,
) -> TaskResult<PathBuf> {
    if !platform.is_windows() {
        return Err(TaskError::UnsupportedPlatform {
            os: platform.to_string(),
        });
    }

    let search_paths = env.get_var("PATH").unwrap_or_default();
    if let Some(found) = find_in_path(fs, &search_paths, file_name) {
        tracing::debug!(tool = file_name, path = %found.display(), "found on PATH");
        return Ok(found);
    }

    if let Some(fallback) = fallback {
        if fs.exists(fallback) {
            tracing::debug!(
                tool = file_name,
                path = %fallback.display(),
                "using fallback location"
            );
            return Ok(fallback.to_path_buf());
        }
    }

    Err(TaskError::ToolNotFound {
        tool: file_name.to_string(),
    })
}

/// Locate `cmake.exe`, falling back to `fallback` (usually the configured install path).
pub fn find_cmake(
    platform: &Platform,
    env: &dyn EnvLookup,
    fs: &dyn FileSystem,
    fallback: &Path,
) -> TaskResult<PathBuf> {
    find_tool(platform, env, fs, CMAKE_EXE, Some(fallback))
}

/// Windows PATH entries. Splits on `;` independently of the host so that a
/// Windows-style PATH can be examined anywhere.
fn split_search_path(search_paths: &str) -> impl Iterator<Item = &Path> {
    search_paths
        .split(';')
        .filter(|entry| !entry.is_empty())
        .map(Path::new)
}

fn find_in_path(fs: &dyn FileSystem, search_paths: &str, file_name: &str) -> Option<PathBuf> {
    for dir in split_search_path(search_paths) {
        if !fs.exists(dir) {
            continue;
        }
        let path = dir.join(file_name);
        if fs.exists(&path) {
            return Some(path);
        }
    }
    None
}
