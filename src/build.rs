//! The `build` and `locate` task bodies.

use crate::cmdline::commandline;
use crate::command::{ExitCode, TaskContext};
use crate::env::EnvLookup;
use crate::error::{TaskError, TaskResult};
use crate::fs::DirGuard;
use crate::locator::{self, CMAKE_EXE};
use crate::process::Invocation;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Interpreter used when `COMSPEC` is not set.
pub const DEFAULT_COMSPEC: &str = "cmd.exe";

/// Keystrokes fed to the interpreter: run the vendor build, then leave the shell.
pub fn build_script_input(script: &str, args: &[String]) -> String {
    let mut line = script.to_string();
    for arg in args {
        line.push(' ');
        line.push_str(arg);
    }
    format!("{}\r\nexit\r\n", line)
}

/// `<comspec> /K <vcvars>` with the build keystrokes on stdin.
///
/// `/K` keeps the shell open after `vcvars` so the piped commands run inside
/// the prepared environment.
pub fn build_invocation(
    comspec: &Path,
    vcvars: &Path,
    script: &str,
    args: &[String],
) -> Invocation {
    Invocation {
        program: comspec.to_path_buf(),
        args: vec!["/K".into(), vcvars.as_os_str().to_owned()],
        input: build_script_input(script, args).into_bytes(),
    }
}

fn comspec(env: &dyn EnvLookup) -> PathBuf {
    env.get_var("COMSPEC")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_COMSPEC))
}

/// Build LuaJIT with the vendor batch script.
///
/// Fails with [`TaskError::MissingPrerequisite`] before spawning anything when
/// the compiler-environment script is absent. Otherwise spawns exactly one
/// interpreter inside `luajit_dir` and returns its exit code; the previous
/// working directory is restored whatever the outcome.
pub fn run_build(ctx: &mut TaskContext<'_>) -> TaskResult<ExitCode> {
    let config = &ctx.config;
    if !ctx.fs.exists(&config.vcvars) {
        return Err(TaskError::MissingPrerequisite {
            path: config.vcvars.clone(),
        });
    }

    let comspec = comspec(&ctx.env);
    let invocation = build_invocation(
        &comspec,
        &config.vcvars,
        &config.build_script,
        &config.build_args,
    );
    let quoted_vcvars = format!("\"{}\"", config.vcvars.display());
    tracing::info!(
        dir = %config.luajit_dir.display(),
        command = %commandline(&comspec, &["/K", &quoted_vcvars]),
        "building LuaJIT"
    );

    let guard = DirGuard::enter(ctx.fs, &config.luajit_dir)?;
    let launched = ctx.launcher.launch(&invocation);
    let restored = guard.restore();
    let code = match (launched, restored) {
        (Ok(code), restored) => {
            restored?;
            code
        }
        (Err(e), Err(restore_err)) => {
            tracing::warn!(error = %restore_err, "failed to restore directory after launch error");
            return Err(e.into());
        }
        (Err(e), Ok(())) => return Err(e.into()),
    };

    if code == 0 {
        let artifact = config.luajit_exe();
        if ctx.fs.exists(&artifact) {
            tracing::info!(artifact = %artifact.display(), "build finished");
        } else {
            tracing::warn!(
                artifact = %artifact.display(),
                "build reported success but artifact is missing"
            );
        }
    } else {
        tracing::error!(code, "build failed");
    }
    Ok(code)
}

/// Report where the toolchain pieces are. Exit code 1 if any is missing.
pub fn run_locate(ctx: &mut TaskContext<'_>, stdout: &mut dyn Write) -> TaskResult<ExitCode> {
    let config = &ctx.config;
    let mut missing = false;

    let found = locator::find_cmake(&ctx.platform, &ctx.env, ctx.fs, &config.cmake_fallback);
    let cmake_line = match found {
        Ok(path) => format!("cmake: {}", path.display()),
        Err(TaskError::ToolNotFound { .. }) => {
            missing = true;
            format!("cmake: {} not found", CMAKE_EXE)
        }
        Err(e) => return Err(e),
    };

    let vcvars_line = if ctx.fs.exists(&config.vcvars) {
        format!("vcvars: {}", config.vcvars.display())
    } else {
        missing = true;
        format!("vcvars: {} not found", config.vcvars.display())
    };

    writeln!(stdout, "{}\n{}", cmake_line, vcvars_line)
        .map_err(|e| TaskError::io("can't write report", e))?;

    Ok(if missing { 1 } else { 0 })
}
