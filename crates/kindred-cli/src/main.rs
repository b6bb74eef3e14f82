//! Kindred CLI entry point.

use std::process;

use clap::Parser;
use log::{LevelFilter, debug, error, warn};

use kindred_cli::{Args, error_adapter::render_report};

fn main() {
    miette::set_panic_hook();

    let args = Args::parse();
    let log_level = args.log_level_filter().unwrap_or(LevelFilter::Warn);

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    if args.log_level_filter().is_none() {
        warn!(log_level = args.log_level; "Unknown log level, falling back to warn");
    }
    debug!(args:?; "Parsed arguments");

    if let Err(err) = kindred_cli::run(&args) {
        error!(input_path = args.input; "{}", render_report(&err));
        process::exit(1);
    }
}
