mod app;
mod cli;
mod config;
mod consts;
mod core;
mod error;
mod output;
mod storage;
mod utils;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::app::{CommandContext, handle_command};
use crate::cli::Cli;
use crate::config::Config;
use crate::consts::APP_DIR;
use crate::core::Tracker;
use crate::output::NumberFormat;
use crate::storage::FileStorage;
use crate::utils::Timezone;

fn init_logging(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn exit_with(e: impl std::fmt::Display) -> ! {
    eprintln!("Error: {e}");
    std::process::exit(1);
}

fn main() {
    let mut cli = Cli::parse();
    init_logging(cli.log_filter());

    let config = Config::load();
    cli = cli.with_config(&config);

    let timezone = Timezone::parse(cli.timezone.as_deref()).unwrap_or_else(|e| exit_with(e));
    let number_format =
        NumberFormat::from_locale(cli.locale.as_deref()).unwrap_or_else(|e| exit_with(e));

    let data_dir = cli
        .data_dir
        .clone()
        .or_else(FileStorage::default_dir)
        .unwrap_or_else(|| PathBuf::from(".").join(format!(".{APP_DIR}")));
    let storage = FileStorage::in_dir(&data_dir);
    tracing::debug!(path = %storage.path().display(), "using session store");

    let mut tracker = Tracker::open(storage);
    let command = cli.command.take();
    let ctx = CommandContext {
        cli: &cli,
        timezone,
        number_format,
    };

    if let Err(e) = handle_command(&mut tracker, command, &ctx) {
        exit_with(e);
    }
}
