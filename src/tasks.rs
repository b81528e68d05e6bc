use crate::build;
use crate::command::{ExecutableTask, ExitCode, TaskContext, TaskFactory};
use crate::error::TaskResult;
use crate::runner::Factory;
use argh::{EarlyExit, FromArgs};
use std::io::Write;

/// Tasks known to the runner at compile time.
///
/// Arguments are parsed with [`argh`] (`FromArgs`), the same way for every task.
pub(crate) trait BuiltinTask: Sized + FromArgs {
    /// Canonical name of the task, e.g. "build".
    fn name() -> &'static str;

    /// One-line summary for the task listing.
    fn description() -> &'static str;

    fn execute(self, stdout: &mut dyn Write, ctx: &mut TaskContext<'_>) -> TaskResult<ExitCode>;
}

impl<T: BuiltinTask> ExecutableTask for T {
    fn execute(
        self: Box<Self>,
        stdout: &mut dyn Write,
        ctx: &mut TaskContext<'_>,
    ) -> TaskResult<ExitCode> {
        <T as BuiltinTask>::execute(*self, stdout, ctx)
    }
}

/// `--help` output or an argument error from argh.
struct InvalidArgs {
    output: String,
    is_error: bool,
}

impl ExecutableTask for InvalidArgs {
    fn execute(
        self: Box<Self>,
        stdout: &mut dyn Write,
        _ctx: &mut TaskContext<'_>,
    ) -> TaskResult<ExitCode> {
        writeln!(stdout, "{}", self.output)
            .map_err(|e| crate::error::TaskError::io("can't write usage", e))?;
        Ok(if self.is_error { 1 } else { 0 })
    }
}

impl<T: BuiltinTask + 'static> TaskFactory for Factory<T> {
    fn name(&self) -> &'static str {
        T::name()
    }

    fn description(&self) -> &'static str {
        T::description()
    }

    fn try_create(&self, name: &str, args: &[&str]) -> Option<Box<dyn ExecutableTask>> {
        if name == T::name() {
            Some(match T::from_args(&[name], args) {
                Ok(task) => Box::new(task),
                Err(EarlyExit { output, status }) => Box::new(InvalidArgs {
                    output,
                    is_error: status.is_err(),
                }),
            })
        } else {
            None
        }
    }
}

#[derive(FromArgs)]
/// Build LuaJIT with msvcbuild.bat inside a vcvars64 developer shell.
pub struct Build {}

impl BuiltinTask for Build {
    fn name() -> &'static str {
        "build"
    }

    fn description() -> &'static str {
        "build luajit with the MSVC toolchain"
    }

    fn execute(self, _stdout: &mut dyn Write, ctx: &mut TaskContext<'_>) -> TaskResult<ExitCode> {
        build::run_build(ctx)
    }
}

#[derive(FromArgs)]
/// Print where cmake.exe and vcvars64.bat were found.
pub struct Locate {}

impl BuiltinTask for Locate {
    fn name() -> &'static str {
        "locate"
    }

    fn description() -> &'static str {
        "show the toolchain paths the build would use"
    }

    fn execute(self, stdout: &mut dyn Write, ctx: &mut TaskContext<'_>) -> TaskResult<ExitCode> {
        build::run_locate(ctx, stdout)
    }
}
