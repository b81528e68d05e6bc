use std::path::PathBuf;

/// Result alias used by every task in this crate.
pub type TaskResult<T> = Result<T, TaskError>;

/// Fatal conditions that abort a task.
///
/// None of these are retried. A child process that runs and fails is not an
/// error: it surfaces as a non-zero [`ExitCode`](crate::command::ExitCode).
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    #[error("unsupported platform: {os} (only Windows toolchains can be located)")]
    UnsupportedPlatform { os: String },

    #[error("tool not found: {tool}")]
    ToolNotFound { tool: String },

    #[error("missing prerequisite: {}", path.display())]
    MissingPrerequisite { path: PathBuf },

    #[error("task not found: {0}")]
    UnknownTask(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Launch(#[from] anyhow::Error),
}

impl TaskError {
    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        TaskError::Io {
            context: context.into(),
            source,
        }
    }
}
