use crate::command::ExitCode;
use anyhow::{Context, Result};
use std::ffi::OsString;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};

/// One child process to run: program, arguments and the bytes fed to its stdin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<OsString>,
    pub input: Vec<u8>,
}

/// Spawns child processes and waits for them.
pub trait Launcher {
    /// Run `invocation` to completion and return its exit code.
    ///
    /// Errors are reserved for failures to start or wait on the child; a child
    /// that runs and fails is reported through the exit code.
    fn launch(&mut self, invocation: &Invocation) -> Result<ExitCode>;
}

/// [`Launcher`] that starts real processes with inherited stdout and stderr.
#[derive(Debug, Default)]
pub struct ProcessLauncher;

impl Launcher for ProcessLauncher {
    fn launch(&mut self, invocation: &Invocation) -> Result<ExitCode> {
        let mut child = std::process::Command::new(&invocation.program)
            .args(&invocation.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .with_context(|| format!("failed to spawn {}", invocation.program.display()))?;

        // Feed the whole script up front, then close stdin so the child sees EOF.
        // A child that exits early is still waited on so its status is reported.
        if let Some(mut child_stdin) = child.stdin.take() {
            match child_stdin.write_all(&invocation.input) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
                    tracing::debug!("child stopped reading stdin");
                }
                Err(e) => {
                    tracing::warn!(error = %e, "failed to write child stdin");
                }
            }
        }

        let exit_status = child.wait().context("failed to wait for child")?;
        match exit_status.code() {
            Some(x) => Ok(x),
            None => Ok(terminated_by_signal(exit_status)),
        }
    }
}

#[cfg(unix)]
fn terminated_by_signal(exit_status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    if let Some(signal) = ExitStatusExt::signal(&exit_status) {
        128 + signal
    } else if ExitStatusExt::core_dumped(&exit_status) {
        255
    } else {
        -1
    }
}

#[cfg(not(unix))]
fn terminated_by_signal(_exit_status: ExitStatus) -> i32 {
    -1
}
