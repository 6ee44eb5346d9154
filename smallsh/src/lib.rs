use crate::config::Config;
use crate::errors::display_user_error;
use crate::input::is_skippable;
use crate::repl::Repl;
use crate::shell::{Shell, eval};
use anyhow::{Result, anyhow};
use clap::Parser;
use smallsh_types::Context;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

pub mod config;
pub mod errors;
pub mod input;
pub mod parser;
pub mod process;
pub mod proxy;
pub mod repl;
pub mod shell;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run a single command line, then exit
    #[arg(short, long)]
    pub command: Option<String>,

    /// Prompt printed before each command
    #[arg(long, env = "SMALLSH_PROMPT", default_value = config::DEFAULT_PROMPT)]
    pub prompt: String,

    /// Write diagnostics to this file instead of stderr
    #[arg(long, env = "SMALLSH_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

pub fn lib_main() -> ExitCode {
    let config = Config::from(Cli::parse());

    if let Err(err) = init_tracing(config.log_file.as_deref()) {
        eprintln!("Failed to initialize tracing: {err}");
        return ExitCode::FAILURE;
    }

    // Set up panic handler
    setup_panic_handler();

    match run_shell(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            display_user_error(&err);
            ExitCode::FAILURE
        }
    }
}

pub fn run_shell(config: Config) -> Result<()> {
    let mut shell = Shell::new();
    shell.set_signals();

    if let Some(command) = config.command.as_deref() {
        execute_command(&mut shell, command)
    } else {
        Repl::new(&mut shell, config.prompt).run()
    }
}

fn execute_command(shell: &mut Shell, command: &str) -> Result<()> {
    debug!("run command mode {:?}", command);
    let ctx = Context::new(shell.pid);
    if !is_skippable(command) {
        eval::eval_str(shell, &ctx, command.trim())?;
    }
    shell.shutdown();
    Ok(())
}

/// RUST_LOG picks the level (default `warn`). With a log file the output has
/// no ANSI colors and carries file/line locations.
fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let res = match log_file {
        Some(path) => {
            let log_file = std::sync::Arc::new(std::fs::File::create(path)?);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_file(true)
                .with_line_number(true)
                .with_writer(log_file)
                .try_init()
        }
        None => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init(),
    };
    res.map_err(|err| anyhow!("{err}"))
}

fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        let payload = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic payload".to_string()
        };

        let location = if let Some(location) = panic_info.location() {
            format!(
                "{}:{}:{}",
                location.file(),
                location.line(),
                location.column()
            )
        } else {
            "Unknown location".to_string()
        };

        let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S%.3f UTC");
        tracing::error!("PANIC OCCURRED: {} at {} ({})", payload, location, timestamp);

        eprintln!("\n=== smallsh PANIC ===");
        eprintln!("Message: {}", payload);
        eprintln!("Location: {}", location);
        eprintln!("Timestamp: {}", timestamp);
        eprintln!("=====================\n");
    }));
}
