// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow unwrap in test code
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! qj - dispatch a test job to PBS, or run it locally without one

mod commands;
mod logging;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{probe, render, submit};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "qj",
    version,
    about = "qj - Submit a test job to the batch scheduler or run it locally"
)]
struct Cli {
    /// Also append logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a job entry (or run it locally when no scheduler is found)
    Submit(submit::SubmitArgs),
    /// Print the scheduler command for a job entry without running it
    Render(render::RenderArgs),
    /// Report whether a batch scheduler is reachable
    Probe,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let _log_guard = logging::setup(cli.log_file.as_deref())?;

    match cli.command {
        Commands::Submit(args) => submit::handle(args).await,
        Commands::Render(args) => render::handle(args).await,
        Commands::Probe => probe::handle().await,
    }
}
