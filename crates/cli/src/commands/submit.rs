// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `qj submit <entry>` - Submit a job, or run it locally without a scheduler

use super::JobArgs;
use anyhow::Result;
use clap::Args;
use qj_adapters::{PbsAdapter, ProcessRunner, TracedLocalRunner, TracedScheduler};
use qj_core::{ExecutionOutcome, RunEnvironment, SystemClock};
use qj_engine::{ControllerDeps, JobController, MissingJobId};
use std::process::ExitCode;
use std::time::Duration;

#[derive(Args)]
pub struct SubmitArgs {
    #[command(flatten)]
    pub job: JobArgs,

    /// Job log file name inside the results directory (local runs)
    #[arg(long, default_value = qj_core::command::DEFAULT_JOB_LOG)]
    pub job_log: String,

    /// Give up on qsub or the local handler after this long (e.g. "90s", "2h")
    #[arg(long, value_parser = humantime::parse_duration)]
    pub timeout: Option<Duration>,

    /// Report job id 0 instead of failing when qsub prints no job id
    #[arg(long)]
    pub placeholder_job_id: bool,
}

pub async fn handle(args: SubmitArgs) -> Result<ExitCode> {
    let job = args.job.load()?;
    tracing::debug!(
        entry = %args.job.entry.display(),
        job = job.job_name(),
        warnings = job.warnings().len(),
        "loaded job entry"
    );
    let mut config = args.job.controller_config()?;
    config.job_log = args.job_log;
    if args.placeholder_job_id {
        config.missing_job_id = MissingJobId::Placeholder;
    }

    // Legacy markers consumed by result parsers
    let env = RunEnvironment::publish(&job, &config.site)?;
    println!("<nnodes> {}", env.num_nodes());
    println!("<npes> {}", env.num_pes());

    let controller = JobController::new(
        ControllerDeps {
            scheduler: TracedScheduler::new(PbsAdapter::new().with_timeout(args.timeout)),
            runner: TracedLocalRunner::new(ProcessRunner::new().with_timeout(args.timeout)),
            clock: SystemClock,
        },
        config,
    );

    let result = controller.start(&job).await?;
    match result.outcome {
        ExecutionOutcome::Submitted { job_id } => {
            println!("<JobID> {}", job_id);
            Ok(ExitCode::SUCCESS)
        }
        ExecutionOutcome::Executed { exit_code } => {
            println!("<exit> {}", exit_code);
            if exit_code != 0 {
                tracing::info!(exit_code, "exiting with local handler status");
            }
            Ok(exit_status(exit_code))
        }
    }
}

/// Process exit status mirroring a local handler's exit code
fn exit_status(code: i32) -> ExitCode {
    match u8::try_from(code) {
        Ok(code) => ExitCode::from(code),
        Err(_) => ExitCode::FAILURE,
    }
}
