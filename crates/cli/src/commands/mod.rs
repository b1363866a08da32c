// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod probe;
pub mod render;
pub mod submit;

use anyhow::{Context, Result};
use clap::Args;
use qj_core::{JobConfig, SitePaths};
use qj_engine::{ControllerConfig, DEFAULT_HANDLER};
use std::path::{Path, PathBuf};

/// Arguments shared by commands that load a job entry
#[derive(Args)]
pub struct JobArgs {
    /// Job entry file (TOML with [run] and [pbs] tables)
    pub entry: PathBuf,

    /// Job name passed to the scheduler
    #[arg(long)]
    pub name: String,

    /// Directory receiving scheduler output and the job log
    #[arg(long)]
    pub results_dir: PathBuf,

    /// Directory the run command is resolved against
    #[arg(long, env = "PV_RUNHOME")]
    pub run_home: Option<PathBuf>,

    /// Harness installation root
    #[arg(long, env = "PVINSTALL")]
    pub install_root: PathBuf,

    /// Job handler, relative to the install root
    #[arg(long, default_value = DEFAULT_HANDLER)]
    pub handler: PathBuf,
}

impl JobArgs {
    /// Read and validate the job entry
    pub fn load(&self) -> Result<JobConfig> {
        let content = std::fs::read_to_string(&self.entry)
            .with_context(|| format!("reading job entry {}", self.entry.display()))?;
        let results_dir = absolutize(&self.results_dir)?;
        let config = JobConfig::from_toml_str(&self.name, &results_dir, &content)
            .with_context(|| format!("loading job entry {}", self.entry.display()))?;
        Ok(config)
    }

    /// Controller configuration from the path flags
    pub fn controller_config(&self) -> Result<ControllerConfig> {
        let run_home = match &self.run_home {
            Some(dir) => absolutize(dir)?,
            None => std::env::current_dir().context("resolving current directory")?,
        };
        let site = SitePaths::new(run_home, absolutize(&self.install_root)?);

        let mut config = ControllerConfig::new(site);
        config.handler = self.handler.clone();
        Ok(config)
    }
}

fn absolutize(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().context("resolving current directory")?;
    Ok(cwd.join(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_paths_are_unchanged() {
        assert_eq!(
            absolutize(Path::new("/scratch/results")).unwrap(),
            PathBuf::from("/scratch/results")
        );
    }

    #[test]
    fn relative_paths_join_cwd() {
        let resolved = absolutize(Path::new("results")).unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("results"));
    }
}
