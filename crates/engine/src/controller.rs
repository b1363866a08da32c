// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job controller: publish, render, then submit or run locally

use crate::error::ControllerError;
use qj_adapters::{LocalRunner, SchedulerAdapter};
use qj_core::command::DEFAULT_JOB_LOG;
use qj_core::{
    build, parse_job_id, Clock, ExecutionOutcome, Invocation, JobConfig, JobId, RunEnvironment,
    SitePaths, SubmissionResult,
};
use std::path::PathBuf;
use tracing::Instrument;

/// Job handler entry point, relative to the install root
pub const DEFAULT_HANDLER: &str = "PAV/modules/pbs_job_handler.py";

/// Identifier reported when [`MissingJobId::Placeholder`] is in effect
pub const PLACEHOLDER_JOB_ID: &str = "0";

/// What to do when the scheduler client prints no job identifier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingJobId {
    /// Fail the call with a `JobIdParse` error
    #[default]
    Fail,
    /// Report [`PLACEHOLDER_JOB_ID`] and log a warning
    Placeholder,
}

/// Controller path and policy configuration
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    pub site: SitePaths,
    /// Job handler, relative to `site.install_root` unless absolute
    pub handler: PathBuf,
    /// Job log file name inside the results directory
    pub job_log: String,
    pub missing_job_id: MissingJobId,
}

impl ControllerConfig {
    pub fn new(site: SitePaths) -> Self {
        Self {
            site,
            handler: PathBuf::from(DEFAULT_HANDLER),
            job_log: DEFAULT_JOB_LOG.to_string(),
            missing_job_id: MissingJobId::default(),
        }
    }

    /// Absolute path of the job handler entry point
    pub fn handler_path(&self) -> PathBuf {
        self.site.install_root.join(&self.handler)
    }
}

/// Controller adapter dependencies
pub struct ControllerDeps<S, L, C> {
    pub scheduler: S,
    pub runner: L,
    pub clock: C,
}

/// States traversed by one `start()` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    EnvironmentPublished,
    CommandBuilt,
    Submitted,
    LocallyExecuted,
    Completed,
}

/// Dispatches jobs to the batch scheduler, or runs them locally without one
pub struct JobController<S, L, C> {
    scheduler: S,
    runner: L,
    clock: C,
    config: ControllerConfig,
}

impl<S, L, C> JobController<S, L, C>
where
    S: SchedulerAdapter,
    L: LocalRunner,
    C: Clock,
{
    pub fn new(deps: ControllerDeps<S, L, C>, config: ControllerConfig) -> Self {
        Self {
            scheduler: deps.scheduler,
            runner: deps.runner,
            clock: deps.clock,
            config,
        }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Dispatch one job.
    ///
    /// Scheduler availability is probed on every call. Each child receives
    /// its own environment snapshot, so concurrent calls never observe each
    /// other's run parameters.
    pub async fn start(&self, job: &JobConfig) -> Result<SubmissionResult, ControllerError> {
        let span = tracing::info_span!("job.start", job = job.job_name());
        self.start_inner(job).instrument(span).await
    }

    async fn start_inner(&self, job: &JobConfig) -> Result<SubmissionResult, ControllerError> {
        let mut phase = Phase::Idle;

        let env = RunEnvironment::publish(job, &self.config.site)?;
        tracing::info!(
            nnodes = env.num_nodes(),
            ppn = env.pes_per_node(),
            npes = env.num_pes(),
            args = job.test_args(),
            "run parameters"
        );
        phase = advance(phase, Phase::EnvironmentPublished);

        let available = self.scheduler.is_available().await;
        let invocation = build(job, &env, &self.config.handler_path(), available);
        phase = advance(phase, Phase::CommandBuilt);

        let vars = env.vars();
        let submitted_at = self.clock.now();

        let result = match invocation {
            Invocation::Scheduler(cmd) => {
                let output = self.scheduler.submit(&cmd, &vars).await?;
                let job_id = self.extract_job_id(&output.combined())?;
                tracing::info!(job_id = %job_id, "job submitted");
                phase = advance(phase, Phase::Submitted);

                SubmissionResult {
                    outcome: ExecutionOutcome::Submitted { job_id },
                    stdout: output.stdout,
                    stderr: output.stderr,
                    submitted_at,
                }
            }
            Invocation::Local(local) => {
                let local = local.with_log_file(&self.config.job_log);
                tracing::info!(invocation = %local, "no scheduler found, running locally");

                let output = self.runner.run(&local, &vars).await?;
                phase = advance(phase, Phase::LocallyExecuted);

                SubmissionResult {
                    outcome: ExecutionOutcome::Executed {
                        exit_code: output.exit_code,
                    },
                    stdout: output.stdout,
                    stderr: output.stderr,
                    submitted_at,
                }
            }
        };

        advance(phase, Phase::Completed);
        Ok(result)
    }

    fn extract_job_id(&self, output: &str) -> Result<JobId, ControllerError> {
        match parse_job_id(output) {
            Ok(job_id) => Ok(job_id),
            Err(e) if self.config.missing_job_id == MissingJobId::Placeholder => {
                tracing::warn!(
                    error = %e,
                    placeholder = PLACEHOLDER_JOB_ID,
                    "no job id in scheduler output, using placeholder"
                );
                Ok(JobId(PLACEHOLDER_JOB_ID.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

fn advance(from: Phase, to: Phase) -> Phase {
    tracing::debug!(from = ?from, to = ?to, "phase");
    to
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
