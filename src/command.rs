use crate::config::TaskConfig;
use crate::env::{Environment, Platform};
use crate::error::TaskResult;
use crate::fs::FileSystem;
use crate::process::Launcher;
use std::io::Write;

/// Conventional process exit code type used by this crate.
///
/// A value of 0 indicates success; any non-zero value indicates failure.
pub type ExitCode = i32;

/// Everything a task may observe or act upon.
///
/// Host state (variables, filesystem, process spawning) is passed in rather
/// than read from globals, so tasks run the same against fakes in tests.
pub struct TaskContext<'a> {
    pub platform: Platform,
    pub env: Environment,
    pub config: TaskConfig,
    pub fs: &'a dyn FileSystem,
    pub launcher: &'a mut dyn Launcher,
}

/// Object-safe trait for any task the runner can execute.
pub trait ExecutableTask {
    /// Executes the task, writing its report (if any) to `stdout`.
    fn execute(
        self: Box<Self>,
        stdout: &mut dyn Write,
        ctx: &mut TaskContext<'_>,
    ) -> TaskResult<ExitCode>;
}

/// Factory that tries to create a task from a name and its arguments.
///
/// Returns `None` when the factory doesn't recognize the `name`.
pub trait TaskFactory {
    /// Name the task is invoked by.
    fn name(&self) -> &'static str;

    /// One-line summary shown by `--list`.
    fn description(&self) -> &'static str;

    /// Attempt to create a task instance for the provided name and arguments.
    fn try_create(&self, name: &str, args: &[&str]) -> Option<Box<dyn ExecutableTask>>;
}
