use anyhow::Context;
use argh::FromArgs;
use luajit_tasks::{
    Environment, ExitCode, HostFileSystem, Platform, ProcessLauncher, TaskConfig, TaskContext,
    TaskRunner,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(FromArgs)]
/// Build the bundled LuaJIT with the MSVC toolchain.
struct Cli {
    #[argh(option, short = 'c')]
    /// path to a luajit-tasks.toml file (default: ./luajit-tasks.toml if present)
    config: Option<PathBuf>,

    #[argh(switch, short = 'l')]
    /// list available tasks and exit
    list: bool,

    #[argh(positional, greedy)]
    /// task name followed by its arguments
    task: Vec<String>,
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let runner = TaskRunner::default();
    let mut stdout = std::io::stdout();

    if cli.list {
        runner.list(&mut stdout)?;
        return Ok(0);
    }
    let Some((name, args)) = cli.task.split_first() else {
        anyhow::bail!("no task given (try --list)");
    };

    let env = Environment::new();
    let cwd = std::env::current_dir().context("can't read current directory")?;
    let config = TaskConfig::load(cli.config.as_deref(), &cwd, &env)?;

    let fs = HostFileSystem;
    let mut launcher = ProcessLauncher;
    let mut ctx = TaskContext {
        platform: Platform::current(),
        env,
        config,
        fs: &fs,
        launcher: &mut launcher,
    };

    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    Ok(runner.run(name, &args, &mut stdout, &mut ctx)?)
}

fn main() {
    init_tracing();
    let cli: Cli = argh::from_env();
    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("error: {:#}", e);
            std::process::exit(1);
        }
    }
}
