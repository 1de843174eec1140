//! Console entry point for the user registry.
//!
//! # Responsibility
//! - Resolve configuration from flags and environment.
//! - Start file logging, open the store and hand control to the menu loop.

mod app;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::io;
use std::path::PathBuf;
use userreg_core::{
    default_log_level, init_logging, JsonUserStore, LinePrompt, RegistryService, StoreConfig,
    DATA_FILE_ENV, DEFAULT_MAX_ATTEMPTS,
};

#[derive(Parser)]
#[command(name = "userreg")]
#[command(about = "Register, list, search and delete users stored in a JSON file.")]
#[command(version)]
struct Cli {
    #[arg(
        long,
        env = DATA_FILE_ENV,
        help = "JSON file holding user records [default: data/users.json]"
    )]
    data_file: Option<PathBuf>,

    #[arg(
        long,
        env = "USERREG_LOG_LEVEL",
        help = "Log level: trace|debug|info|warn|error"
    )]
    log_level: Option<String>,

    #[arg(
        long,
        env = "USERREG_LOG_DIR",
        help = "Directory for rolling log files [default: <data dir>/logs]"
    )]
    log_dir: Option<PathBuf>,

    #[arg(
        long,
        default_value_t = DEFAULT_MAX_ATTEMPTS,
        value_parser = clap::value_parser!(u32).range(1..),
        help = "Attempts allowed for each guarded input"
    )]
    max_attempts: u32,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = StoreConfig::new(cli.data_file);
    let cwd = std::env::current_dir().context("failed to resolve working directory")?;

    let log_dir = match cli.log_dir {
        Some(dir) if dir.is_absolute() => dir,
        Some(dir) => cwd.join(dir),
        None => config.default_log_dir(&cwd),
    };
    let level = cli.log_level.as_deref().unwrap_or(default_log_level());
    if let Err(err) = init_logging(level, &log_dir) {
        eprintln!("warning: file logging disabled: {err}");
    }

    let store = JsonUserStore::from_config(&config).with_context(|| {
        format!(
            "failed to open user store `{}`",
            config.data_file.display()
        )
    })?;
    let service = RegistryService::new(store).with_max_attempts(cli.max_attempts);

    let stdin = io::stdin();
    let mut prompt = LinePrompt::new(stdin.lock(), io::stdout());
    app::run(&service, &mut prompt).context("console I/O failed")?;

    info!("event=app_exit module=cli status=ok");
    Ok(())
}
