use std::collections::HashMap;
use std::env as stdenv;
use std::ffi::OsString;
use std::fmt;

/// Read access to environment variables.
///
/// Tasks never call [`std::env::var`] directly; they go through this trait so
/// that lookups can be driven from a fixed map in tests.
pub trait EnvLookup {
    fn get_var(&self, key: &str) -> Option<String>;
}

/// Snapshot of the process environment handed to tasks.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    /// Key-value store of environment variables (e.g., PATH, COMSPEC).
    pub vars: HashMap<String, String>,
}

impl Environment {
    /// Capture the current process variables into a new `Environment`.
    pub fn new() -> Self {
        Self::from_os_vars(stdenv::vars_os())
    }

    /// Build an environment from raw OS pairs, skipping any key or value
    /// that is not valid Unicode.
    pub fn from_os_vars(vars: impl IntoIterator<Item = (OsString, OsString)>) -> Self {
        let mut env = Self::default();
        for (k, v) in vars {
            match (k.into_string(), v.into_string()) {
                (Ok(k), Ok(v)) => {
                    env.vars.insert(k, v);
                }
                (k, _) => {
                    let key = k.unwrap_or_else(|k| k.to_string_lossy().into_owned());
                    tracing::debug!(key = %key, "skipping non-unicode environment variable");
                }
            }
        }
        env
    }

    /// Build an environment from explicit key-value pairs.
    pub fn from_vars<K, V>(vars: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    /// Set or override an environment variable.
    pub fn set_var(&mut self, key: impl Into<String>, val: impl Into<String>) {
        self.vars.insert(key.into(), val.into());
    }
}

impl EnvLookup for Environment {
    fn get_var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

/// Operating system family the toolchain lookup is running on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Other(String),
}

impl Platform {
    /// Platform of the running process.
    pub fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Other(stdenv::consts::OS.to_string())
        }
    }

    pub fn is_windows(&self) -> bool {
        matches!(self, Platform::Windows)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Windows => f.write_str("windows"),
            Platform::Other(os) => f.write_str(os),
        }
    }
}
