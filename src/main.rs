use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use twodo::cli::commands::Cli;
use twodo::cli::handlers;
use twodo::io::config_io;

fn main() {
    let cli = Cli::parse();
    let data_dir = config_io::data_dir(cli.data_dir.as_deref());

    let result = match cli.command {
        None => {
            // No subcommand → launch TUI
            init_tracing(Some(&data_dir));
            twodo::tui::run(&data_dir)
        }
        Some(command) => {
            init_tracing(None);
            handlers::dispatch(command, cli.json, &data_dir)
        }
    };
    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

/// Logs go to stderr for CLI commands and to `<data_dir>/twodo.log` for the TUI.
fn init_tracing(log_dir: Option<&Path>) {
    let filter = EnvFilter::try_from_env("TWODO_LOG").unwrap_or_else(|_| EnvFilter::new("twodo=warn"));
    let json = std::env::var("TWODO_LOG_FORMAT").is_ok_and(|f| f == "json");

    let registry = tracing_subscriber::registry().with(filter);

    let log_file = log_dir.and_then(|dir| {
        fs::create_dir_all(dir).ok()?;
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join("twodo.log"))
            .ok()
    });

    match (log_file, json) {
        (Some(file), true) => registry
            .with(fmt::layer().json().with_ansi(false).with_writer(Mutex::new(file)))
            .init(),
        (Some(file), false) => registry
            .with(fmt::layer().compact().with_ansi(false).with_writer(Mutex::new(file)))
            .init(),
        (None, true) => registry
            .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
            .init(),
        (None, false) => registry
            .with(fmt::layer().compact().with_writer(std::io::stderr))
            .init(),
    }
}
