//! Task configuration file support.
//!
//! Paths that used to be Windows-version-specific literals live here. They are
//! read from `luajit-tasks.toml` and can be overridden per variable through the
//! environment.

use crate::env::EnvLookup;
use crate::error::{TaskError, TaskResult};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the config file looked up in the current directory.
pub const CONFIG_FILE_NAME: &str = "luajit-tasks.toml";

pub const DIR_VAR: &str = "LUAJIT_TASKS_DIR";
pub const VCVARS_VAR: &str = "LUAJIT_TASKS_VCVARS";
pub const CMAKE_FALLBACK_VAR: &str = "LUAJIT_TASKS_CMAKE_FALLBACK";

const DEFAULT_VCVARS: &str = r"C:\Program Files (x86)\Microsoft Visual Studio\2019\BuildTools\VC\Auxiliary\Build\vcvars64.bat";
const DEFAULT_CMAKE_FALLBACK: &str = "C:/Program Files/CMake/bin/cmake.exe";

/// Settings shared by all tasks.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TaskConfig {
    /// LuaJIT source directory holding the vendor build script.
    pub luajit_dir: PathBuf,
    /// Compiler-environment script run before the build.
    pub vcvars: PathBuf,
    /// Where to look for `cmake.exe` when it's not on PATH.
    pub cmake_fallback: PathBuf,
    /// Vendor build script, run inside the prepared shell.
    pub build_script: String,
    /// Extra arguments passed to `build_script` (e.g. `static`, `debug`).
    pub build_args: Vec<String>,
}

impl Default for TaskConfig {
    fn default() -> Self {
        Self {
            luajit_dir: PathBuf::from("LuaJIT").join("src"),
            vcvars: PathBuf::from(DEFAULT_VCVARS),
            cmake_fallback: PathBuf::from(DEFAULT_CMAKE_FALLBACK),
            build_script: "msvcbuild.bat".to_string(),
            build_args: Vec::new(),
        }
    }
}

impl TaskConfig {
    /// Parse a config from TOML text. Missing keys take their defaults.
    pub fn from_toml(content: &str) -> TaskResult<Self> {
        toml::from_str(content)
            .map_err(|e| TaskError::Config(format!("failed to parse config: {}", e)))
    }

    /// Load a config file. A relative `luajit_dir` is resolved against the
    /// directory holding the file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> TaskResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            TaskError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        let mut config = Self::from_toml(&content)?;
        if let Some(base) = path.parent() {
            config.luajit_dir = base.join(&config.luajit_dir);
        }
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Load `explicit` if given, else `luajit-tasks.toml` from `base_dir` if it
    /// exists, else the defaults rooted at `base_dir`. Environment overrides are
    /// applied last.
    pub fn load(
        explicit: Option<&Path>,
        base_dir: &Path,
        env: &dyn EnvLookup,
    ) -> TaskResult<Self> {
        let candidate = base_dir.join(CONFIG_FILE_NAME);
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None if candidate.is_file() => Self::from_file(&candidate)?,
            None => {
                let mut config = Self::default();
                config.luajit_dir = base_dir.join(&config.luajit_dir);
                config
            }
        };
        config.apply_env(env);
        Ok(config)
    }

    /// Apply `LUAJIT_TASKS_*` overrides. Empty values are ignored.
    pub fn apply_env(&mut self, env: &dyn EnvLookup) {
        let var = |key: &str| env.get_var(key).filter(|v| !v.is_empty());
        if let Some(dir) = var(DIR_VAR) {
            self.luajit_dir = PathBuf::from(dir);
        }
        if let Some(vcvars) = var(VCVARS_VAR) {
            self.vcvars = PathBuf::from(vcvars);
        }
        if let Some(cmake) = var(CMAKE_FALLBACK_VAR) {
            self.cmake_fallback = PathBuf::from(cmake);
        }
    }

    /// Expected build artifact.
    pub fn luajit_exe(&self) -> PathBuf {
        self.luajit_dir.join("luajit.exe")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::Environment;
    use std::io::Write;

    #[test]
    fn empty_file_gives_defaults() {
        let config = TaskConfig::from_toml("").unwrap();
        assert_eq!(config, TaskConfig::default());
        assert_eq!(config.build_script, "msvcbuild.bat");
        assert!(config.vcvars.to_string_lossy().ends_with("vcvars64.bat"));
    }

    #[test]
    fn partial_file_overrides_some_keys() {
        let toml = r#"
            vcvars = 'D:\VS\2022\vcvars64.bat'
            build_args = ["static", "debug"]
        "#;
        let config = TaskConfig::from_toml(toml).unwrap();
        assert_eq!(config.vcvars, PathBuf::from(r"D:\VS\2022\vcvars64.bat"));
        assert_eq!(config.build_args, vec!["static", "debug"]);
        assert_eq!(config.cmake_fallback, TaskConfig::default().cmake_fallback);
    }

    #[test]
    fn unknown_key_is_rejected() {
        let err = TaskConfig::from_toml("vcvar = 'typo'").unwrap_err();
        assert!(matches!(err, TaskError::Config(_)));
    }

    #[test]
    fn env_overrides_file_values() {
        let mut config = TaskConfig::default();
        let env = Environment::from_vars([
            (VCVARS_VAR, "E:/vcvars64.bat"),
            (DIR_VAR, ""),
            (CMAKE_FALLBACK_VAR, "E:/cmake.exe"),
        ]);
        config.apply_env(&env);
        assert_eq!(config.vcvars, PathBuf::from("E:/vcvars64.bat"));
        assert_eq!(config.cmake_fallback, PathBuf::from("E:/cmake.exe"));
        assert_eq!(config.luajit_dir, TaskConfig::default().luajit_dir);
    }

    #[test]
    fn load_resolves_dir_against_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = fs::File::create(dir.path().join(CONFIG_FILE_NAME)).unwrap();
        writeln!(file, "luajit_dir = 'vendor/luajit/src'").unwrap();

        let config = TaskConfig::load(None, dir.path(), &Environment::default()).unwrap();
        assert_eq!(config.luajit_dir, dir.path().join("vendor/luajit/src"));
    }

    #[test]
    fn load_without_file_uses_defaults_under_base() {
        let dir = tempfile::tempdir().unwrap();
        let config = TaskConfig::load(None, dir.path(), &Environment::default()).unwrap();
        assert_eq!(config.luajit_dir, dir.path().join("LuaJIT").join("src"));
        assert_eq!(config.luajit_exe(), config.luajit_dir.join("luajit.exe"));
    }

    #[test]
    fn load_missing_explicit_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = TaskConfig::load(Some(&missing), dir.path(), &Environment::default());
        assert!(matches!(err, Err(TaskError::Config(_))));
    }
}
