//! Terminal host for the todo/user client.
//!
//! Supplies the real HTTP transport, reads commands from stdin, and renders
//! the current page after each one. All list/form/notice state lives in
//! `todoapp-core`; this crate only wires it to a terminal.

mod args;
mod render;
mod shell;
mod transport;

use std::io::{self, IsTerminal};

use anyhow::{Context, Result};
use clap::Parser;
use todoapp_core::{App, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use args::Cli;
use shell::Shell;
use transport::UreqTransport;

fn init_tracing(default_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .context("invalid log filter")?;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .with(filter)
        .try_init()?;
    Ok(())
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;

    if !io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let mut config = Config::from_env().context("reading configuration from the environment")?;
    if let Some(api_base) = cli.api_base {
        config.api_base = api_base.trim_end_matches('/').to_string();
    }
    if let Some(user_id) = cli.user_id {
        config.user_id = user_id;
    }
    tracing::debug!(api_base = %config.api_base, user_id = config.user_id, "starting");

    let app = App::new(&config, UreqTransport::new());
    let stdin = io::stdin().lock();
    let stdout = io::stdout().lock();
    let mut shell = Shell::new(app, stdin, stdout);
    shell.run(&cli.page)
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
