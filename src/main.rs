mod api;
mod app;
mod cli;
mod config;
mod db;
mod domain;
mod draft;
mod export;
mod history;
mod infrastructure;
mod ingest;
mod samples;
mod state;
mod tasks;
mod view;

use std::{io::IsTerminal, process::ExitCode};

use anyhow::Result;
use clap::Parser;
use infrastructure::{directories, logging, shutdown};

use crate::{
    app::{Outcome, SpamScanApp},
    cli::{Cli, Command},
};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = config::load_config()?;
    let paths = directories::ensure_directories(&config.directories)?;
    logging::init_tracing(&config, &paths)?;

    let shutdown = shutdown::Shutdown::new();
    shutdown::install_signal_handlers(shutdown.clone());

    let color = !cli.no_color && std::io::stdout().is_terminal();
    let mut app = SpamScanApp::initialize(config, paths, shutdown, color).await?;

    let code = match cli.command {
        None | Some(Command::Shell) => {
            app.run_shell().await?;
            ExitCode::SUCCESS
        }
        Some(command) => match app.execute(command).await? {
            Outcome::Failed => ExitCode::FAILURE,
            Outcome::Done | Outcome::Quit => ExitCode::SUCCESS,
        },
    };

    app.close().await;
    Ok(code)
}
