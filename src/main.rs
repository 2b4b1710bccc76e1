//! Casc - a small SCSS build tool: compile, minify, watch.

mod cli;
mod config;
mod core;
mod logger;
mod pipeline;
mod watch;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::BuildConfig;

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    logger::set_verbose(cli.verbose);

    let config = BuildConfig::load(&cli)?;

    match cli.command.unwrap_or(Commands::Build) {
        Commands::Build => cli::build::build_once(&config),
        Commands::Watch => cli::watch::watch(&config),
    }
}
