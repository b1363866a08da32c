// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run parameters published to spawned jobs
//!
//! The job handler reads its allocation from environment variables. Older
//! harness generations use the `GZ_` prefix and newer ones `PV_`, so every
//! count is exported under both names.
//!
//! The values are handed to each child as an explicit snapshot layered over
//! the inherited environment. The parent's own environment is never written.

use crate::config::{ConfigError, JobConfig};
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};

pub const PV_PESPERNODE: &str = "PV_PESPERNODE";
pub const GZ_PESPERNODE: &str = "GZ_PESPERNODE";
pub const PV_NNODES: &str = "PV_NNODES";
pub const GZ_NNODES: &str = "GZ_NNODES";
pub const PV_NPES: &str = "PV_NPES";
pub const GZ_NPES: &str = "GZ_NPES";
pub const USER_CMD: &str = "USER_CMD";
pub const PV_USER_CMD: &str = "PV_USER_CMD";
pub const PV_JOB_RESULTS_LOG_DIR: &str = "PV_JOB_RESULTS_LOG_DIR";
pub const PV_RUNHOME: &str = "PV_RUNHOME";
pub const PVINSTALL: &str = "PVINSTALL";
pub const PV_TEST_ARGS: &str = "PV_TEST_ARGS";
pub const PV_JOB_NAME: &str = "PV_JOB_NAME";

/// Host-level locations the controller resolves paths against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitePaths {
    /// Prefix for resolving the configured run command
    pub run_home: PathBuf,
    /// Root of the harness installation, where the job handler lives
    pub install_root: PathBuf,
}

impl SitePaths {
    pub fn new(run_home: impl Into<PathBuf>, install_root: impl Into<PathBuf>) -> Self {
        Self {
            run_home: run_home.into(),
            install_root: install_root.into(),
        }
    }
}

/// Derived parameters for one `start()` invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunEnvironment {
    pes_per_node: NonZeroU32,
    num_nodes: NonZeroU32,
    num_pes: NonZeroU32,
    run_command: PathBuf,
    results_dir: PathBuf,
    run_home: PathBuf,
    install_root: PathBuf,
    test_args: String,
    job_name: String,
}

impl RunEnvironment {
    /// Compute the run parameters for a job.
    ///
    /// Fails only if the processing element count does not fit in a `u32`.
    pub fn publish(config: &JobConfig, site: &SitePaths) -> Result<Self, ConfigError> {
        let num_nodes = config.num_nodes();
        let pes_per_node = config.procs_per_node();
        let num_pes =
            num_nodes
                .checked_mul(pes_per_node)
                .ok_or(ConfigError::PeOverflow {
                    num_nodes,
                    procs_per_node: pes_per_node,
                })?;

        let run_command = site.run_home.join(config.run_command());

        tracing::debug!(
            job = config.job_name(),
            nnodes = num_nodes.get(),
            ppn = pes_per_node.get(),
            npes = num_pes.get(),
            run_command = %run_command.display(),
            "run environment published"
        );

        Ok(Self {
            pes_per_node,
            num_nodes,
            num_pes,
            run_command,
            results_dir: config.results_dir().to_path_buf(),
            run_home: site.run_home.clone(),
            install_root: site.install_root.clone(),
            test_args: config.test_args().to_string(),
            job_name: config.job_name().to_string(),
        })
    }

    pub fn pes_per_node(&self) -> u32 {
        self.pes_per_node.get()
    }

    pub fn num_nodes(&self) -> u32 {
        self.num_nodes.get()
    }

    /// Total processing elements, `num_nodes * pes_per_node`
    pub fn num_pes(&self) -> u32 {
        self.num_pes.get()
    }

    pub fn run_command(&self) -> &Path {
        &self.run_command
    }

    pub fn results_dir(&self) -> &Path {
        &self.results_dir
    }

    /// Environment snapshot for a spawned child
    pub fn vars(&self) -> Vec<(String, String)> {
        let ppn = self.pes_per_node.to_string();
        let nnodes = self.num_nodes.to_string();
        let npes = self.num_pes.to_string();
        let run_command = self.run_command.display().to_string();

        vec![
            (PV_PESPERNODE.to_string(), ppn.clone()),
            (GZ_PESPERNODE.to_string(), ppn),
            (PV_NNODES.to_string(), nnodes.clone()),
            (GZ_NNODES.to_string(), nnodes),
            (PV_NPES.to_string(), npes.clone()),
            (GZ_NPES.to_string(), npes),
            (USER_CMD.to_string(), run_command.clone()),
            (PV_USER_CMD.to_string(), run_command),
            (
                PV_JOB_RESULTS_LOG_DIR.to_string(),
                self.results_dir.display().to_string(),
            ),
            (PV_RUNHOME.to_string(), self.run_home.display().to_string()),
            (PVINSTALL.to_string(), self.install_root.display().to_string()),
            (PV_TEST_ARGS.to_string(), self.test_args.clone()),
            (PV_JOB_NAME.to_string(), self.job_name.clone()),
        ]
    }

    /// Look up a single published value
    pub fn get(&self, key: &str) -> Option<String> {
        self.vars()
            .into_iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
