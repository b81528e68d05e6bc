//! Task runner that builds the bundled LuaJIT with the MSVC toolchain.
//!
//! The crate locates the compiler-environment script (`vcvars64.bat`) and
//! `cmake.exe` on a Windows host, then drives `cmd.exe` with a scripted input
//! stream that runs LuaJIT's `msvcbuild.bat`.
//!
//! Host state is injected through [`EnvLookup`], [`FileSystem`] and
//! [`Launcher`], so the lookup and build logic can run against fakes. The
//! entry point is [`TaskRunner`], which dispatches task names (`build`,
//! `locate`) to their implementations.

mod build;
pub mod cmdline;
pub mod command;
pub mod config;
pub mod env;
pub mod error;
pub mod fs;
pub mod locator;
pub mod process;
mod runner;
mod tasks;

pub use build::{build_invocation, build_script_input, run_build, run_locate};
pub use command::{ExitCode, TaskContext};
pub use config::TaskConfig;
pub use env::{EnvLookup, Environment, Platform};
pub use error::{TaskError, TaskResult};
pub use fs::{DirGuard, FileSystem, HostFileSystem};
pub use process::{Invocation, Launcher, ProcessLauncher};

/// Just a convenient re-export of the task dispatcher.
///
/// See [`TaskRunner`] for the high-level API.
pub use runner::TaskRunner;
