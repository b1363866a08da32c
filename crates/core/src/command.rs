// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Rendering a job into a scheduler submission or a local invocation
//!
//! Rendering is pure: the same config and environment always produce the
//! same argument list. Arguments are kept discrete and are handed straight
//! to the process spawner, so queue names, accounts and paths never pass
//! through a shell.

use crate::config::JobConfig;
use crate::env::RunEnvironment;
use std::fmt;
use std::path::{Path, PathBuf};

/// Scheduler submission client
pub const QSUB: &str = "qsub";
/// Scheduler stdout file, relative to the results directory
pub const DRM_STDOUT: &str = "drm.stdout";
/// Scheduler stderr file, relative to the results directory
pub const DRM_STDERR: &str = "drm.stderr";
/// Default job log for local execution, relative to the results directory
pub const DEFAULT_JOB_LOG: &str = "job.log";

/// A rendered scheduler submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulerCommand {
    program: String,
    args: Vec<String>,
}

impl SchedulerCommand {
    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Value of the first occurrence of a flag, e.g. `flag_value("-l")`
    pub fn flag_value(&self, flag: &str) -> Option<&str> {
        self.args
            .iter()
            .position(|a| a == flag)
            .and_then(|i| self.args.get(i + 1))
            .map(String::as_str)
    }
}

impl fmt::Display for SchedulerCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", quote_for_display(arg))?;
        }
        Ok(())
    }
}

/// Direct execution of the job handler on the local host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalInvocation {
    handler: PathBuf,
    work_dir: PathBuf,
    log_path: PathBuf,
}

impl LocalInvocation {
    pub fn handler(&self) -> &Path {
        &self.handler
    }

    /// Directory the handler runs in: the job's results directory
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// File receiving the handler's stdout and stderr
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Redirect the job log to another file, relative to the results directory
    pub fn with_log_file(mut self, name: &str) -> Self {
        self.log_path = self.work_dir.join(name);
        self
    }
}

impl fmt::Display for LocalInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} > {} 2>&1",
            quote_for_display(&self.handler.display().to_string()),
            quote_for_display(&self.log_path.display().to_string())
        )
    }
}

/// One of the two execution paths for a job
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Scheduler(SchedulerCommand),
    Local(LocalInvocation),
}

/// Render a job for whichever execution path is available.
///
/// Dropped optional fields are logged here, where they are omitted.
pub fn build(
    config: &JobConfig,
    env: &RunEnvironment,
    handler: &Path,
    scheduler_available: bool,
) -> Invocation {
    for warning in config.warnings() {
        tracing::warn!(
            job = config.job_name(),
            field = warning.field,
            reason = %warning.reason,
            "optional field omitted"
        );
    }

    if scheduler_available {
        Invocation::Scheduler(build_scheduler_command(config, env, handler))
    } else {
        Invocation::Local(LocalInvocation {
            handler: handler.to_path_buf(),
            work_dir: env.results_dir().to_path_buf(),
            log_path: env.results_dir().join(DEFAULT_JOB_LOG),
        })
    }
}

/// Render the `qsub` submission for a job
pub fn build_scheduler_command(
    config: &JobConfig,
    env: &RunEnvironment,
    handler: &Path,
) -> SchedulerCommand {
    let mut args: Vec<String> = vec!["-V".to_string()];

    if let Some(queue) = config.queue() {
        args.push("-q".to_string());
        args.push(queue.to_string());
    }

    args.push("-N".to_string());
    args.push(config.job_name().to_string());

    if let Some(account) = config.account() {
        args.push("-A".to_string());
        args.push(account.to_string());
    }

    args.push("-o".to_string());
    args.push(env.results_dir().join(DRM_STDOUT).display().to_string());
    args.push("-e".to_string());
    args.push(env.results_dir().join(DRM_STDERR).display().to_string());

    // node_list wins over the numeric count whenever it survived validation
    let mut resources = match config.node_list() {
        Some(list) => format!("nodes={}", list),
        None => format!("nodes={}", env.num_nodes()),
    };
    if let Some(limit) = config.time_limit() {
        resources.push_str(",walltime=");
        resources.push_str(limit);
    }
    args.push("-l".to_string());
    args.push(resources);

    args.push(handler.display().to_string());

    SchedulerCommand {
        program: QSUB.to_string(),
        args,
    }
}

fn quote_for_display(arg: &str) -> String {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./=,+:@%".contains(c));
    if plain {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
