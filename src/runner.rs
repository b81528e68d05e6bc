use crate::command::{ExitCode, TaskContext, TaskFactory};
use crate::error::{TaskError, TaskResult};
use std::io::Write;

/// Factory allows creating instances of ExecutableTask.
///
/// Only supports tasks defined in this crate.
pub(crate) struct Factory<T> {
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Default for Factory<T> {
    fn default() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

/// Dispatches task names to the registered task factories.
///
/// Example
/// ```no_run
/// use luajit_tasks::{
///     Environment, HostFileSystem, Platform, ProcessLauncher, TaskConfig, TaskContext, TaskRunner,
/// };
/// let fs = HostFileSystem;
/// let mut launcher = ProcessLauncher;
/// let mut ctx = TaskContext {
///     platform: Platform::current(),
///     env: Environment::new(),
///     config: TaskConfig::default(),
///     fs: &fs,
///     launcher: &mut launcher,
/// };
/// let code = TaskRunner::default()
///     .run("locate", &[], &mut std::io::stdout(), &mut ctx)
///     .unwrap();
/// assert_eq!(code, 0);
/// ```
pub struct TaskRunner {
    tasks: Vec<Box<dyn TaskFactory>>,
}

impl TaskRunner {
    /// Create a runner with a custom set of task factories.
    pub fn new(tasks: Vec<Box<dyn TaskFactory>>) -> Self {
        Self { tasks }
    }

    /// Run a single task by name with arguments.
    pub fn run(
        &self,
        name: &str,
        args: &[&str],
        stdout: &mut dyn Write,
        ctx: &mut TaskContext<'_>,
    ) -> TaskResult<ExitCode> {
        for factory in &self.tasks {
            if let Some(task) = factory.try_create(name, args) {
                tracing::debug!(task = name, "running task");
                return task.execute(stdout, ctx);
            }
        }
        Err(TaskError::UnknownTask(name.to_string()))
    }

    /// Write one `name  description` line per registered task.
    pub fn list(&self, stdout: &mut dyn Write) -> std::io::Result<()> {
        let width = self.tasks.iter().map(|t| t.name().len()).max().unwrap_or(0);
        for task in &self.tasks {
            writeln!(stdout, "{:width$}  {}", task.name(), task.description(), width = width)?;
        }
        Ok(())
    }
}

impl Default for TaskRunner {
    /// Create a runner with every task of this crate: `build`, `locate`.
    fn default() -> Self {
        use crate::tasks::*;
        Self::new(vec![
            Box::new(Factory::<Build>::default()),
            Box::new(Factory::<Locate>::default()),
        ])
    }
}
