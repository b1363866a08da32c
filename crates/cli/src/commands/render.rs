// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `qj render <entry>` - Print the scheduler submission without running it

use super::JobArgs;
use anyhow::Result;
use clap::Args;
use qj_core::{build_scheduler_command, RunEnvironment};
use std::process::ExitCode;

#[derive(Args)]
pub struct RenderArgs {
    #[command(flatten)]
    pub job: JobArgs,
}

pub async fn handle(args: RenderArgs) -> Result<ExitCode> {
    let job = args.job.load()?;
    let config = args.job.controller_config()?;

    let env = RunEnvironment::publish(&job, &config.site)?;
    for warning in job.warnings() {
        eprintln!("warning: {}", warning);
    }

    let cmd = build_scheduler_command(&job, &env, &config.handler_path());
    println!("{}", cmd);
    Ok(ExitCode::SUCCESS)
}
