//! Pingwrap CLI
//!
//! The host program: wires config and logging, wraps an arbitrary
//! command as the unit of work, and hands it to the check runner.
//! Exits non-zero when the terminal ping was not delivered.

use std::process::Command;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::Level;

use pingwrap::config::{
    default_config, get_config_path, load_config, load_config_from, resolve_path, save_config,
    RunnerConfig,
};
use pingwrap::runner::create_runner_with_timeout;
use pingwrap::types::{LogLevel, ScriptStatus};

const VERSION: &str = "0.1.0";

/// Pingwrap -- run a command and report its outcome to healthchecks.io
#[derive(Parser, Debug)]
#[command(
    name = "pingwrap",
    version = VERSION,
    about = "Run a command and report its outcome to a healthchecks.io check"
)]
struct Cli {
    /// Base URL of the check to ping (overrides the config file)
    #[arg(long)]
    base_url: Option<String>,

    /// Path to a config file (default: ~/.pingwrap/pingwrap.json)
    #[arg(long)]
    config: Option<String>,

    /// Verify the base URL addresses a genuine instance before pinging
    #[arg(long)]
    verify: bool,

    /// Ping timeout in seconds (overrides the config file)
    #[arg(long)]
    timeout: Option<u64>,

    /// Write a default config file to ~/.pingwrap/pingwrap.json and exit
    #[arg(long)]
    init: bool,

    /// The command to run, with its arguments
    #[arg(trailing_var_arg = true)]
    command: Vec<String>,
}

/// Write a default config file, seeded with the CLI base URL when given.
/// Will not overwrite an existing file.
fn init_config(base_url: Option<&str>) -> Result<()> {
    let path = get_config_path();
    if path.exists() {
        println!("Config already exists at {}, not overwriting.", path.display());
        return Ok(());
    }

    let mut config = default_config();
    if let Some(url) = base_url {
        config.base_url = url.to_string();
    }
    save_config(&config)?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}

/// Run the wrapped command and turn its exit status into a ScriptStatus.
///
/// A zero exit becomes a success carrying trimmed stdout; a non-zero
/// exit becomes a failure carrying trimmed stderr (or the exit status
/// when stderr is empty). A command that cannot be spawned is an error,
/// which the runner folds into a fail ping.
fn run_command(argv: &[String]) -> Result<ScriptStatus> {
    let (program, args) = argv
        .split_first()
        .context("No command given to run")?;

    let output = Command::new(program)
        .args(args)
        .output()
        .with_context(|| format!("Failed to run command {:?}", program))?;

    if output.status.success() {
        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(ScriptStatus::success(stdout.trim()))
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let message = if stderr.trim().is_empty() {
            format!("{:?} exited with {}", program, output.status)
        } else {
            stderr.trim().to_string()
        };
        Ok(ScriptStatus::failure(message))
    }
}

/// Resolve the effective config from the config file and CLI overrides.
fn effective_config(cli: &Cli) -> Result<RunnerConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let resolved = resolve_path(path);
            load_config_from(std::path::Path::new(&resolved))
                .with_context(|| format!("Failed to load config from {}", resolved))?
        }
        None => load_config().unwrap_or_else(default_config),
    };

    if let Some(url) = &cli.base_url {
        config.base_url = url.clone();
    }
    if let Some(timeout) = cli.timeout {
        config.timeout_secs = timeout;
    }
    if cli.verify {
        config.verify_instance = true;
    }

    if config.base_url.is_empty() {
        bail!("No base URL configured. Pass --base-url or set baseUrl in the config file.");
    }

    Ok(config)
}

fn init_logging(level: LogLevel) {
    let max_level = match level {
        LogLevel::Debug => Level::DEBUG,
        LogLevel::Info => Level::INFO,
        LogLevel::Warn => Level::WARN,
        LogLevel::Error => Level::ERROR,
    };
    tracing_subscriber::fmt().with_max_level(max_level).init();
}

fn main() {
    let cli = Cli::parse();

    if cli.init {
        if let Err(e) = init_config(cli.base_url.as_deref()) {
            eprintln!("Init failed: {:#}", e);
            std::process::exit(1);
        }
        return;
    }

    if cli.command.is_empty() {
        eprintln!("No command given. Run \"pingwrap --help\" for usage information.");
        std::process::exit(2);
    }

    let config = match effective_config(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Fatal: {:#}", e);
            std::process::exit(2);
        }
    };

    init_logging(config.log_level);

    let runner = match create_runner_with_timeout(
        config.base_url.clone(),
        std::time::Duration::from_secs(config.timeout_secs),
    ) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Fatal: {:#}", e);
            std::process::exit(2);
        }
    };

    let runner = if config.verify_instance {
        runner.verify_instance(config.markers.clone())
    } else {
        runner
    };

    let reported = runner.run(|| run_command(&cli.command));
    std::process::exit(if reported { 0 } else { 1 });
}
