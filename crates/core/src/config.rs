// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job entry loading and validation
//!
//! A job entry is a small TOML document with a `[run]` table (what to run)
//! and a `[pbs]` table (how to allocate it):
//!
//! ```toml
//! [run]
//! cmd = "bin/hello"
//! test_args = "-n 4"
//!
//! [pbs]
//! queue = "regular"
//! account = "proj123"
//! time_limit = "01:00:00"
//! num_nodes = 2
//! procs_per_node = 16
//! ```
//!
//! Validation happens exactly once, when a [`JobConfig`] is constructed.
//! Required counts must be positive integers or the entry is rejected.
//! Malformed optional fields are dropped and reported as
//! [`OptionalFieldWarning`]s instead.

use serde::Deserialize;
use std::fmt;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use thiserror::Error;
use toml::Value;

/// Errors that make a job entry unusable
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("{field} must be a positive integer, got {value}")]
    InvalidCount { field: &'static str, value: String },
    #[error("job name must not be empty")]
    EmptyJobName,
    #[error("results directory must be absolute: {}", .0.display())]
    RelativeResultsDir(PathBuf),
    #[error("processing element count overflows: {num_nodes} nodes x {procs_per_node} per node")]
    PeOverflow {
        num_nodes: NonZeroU32,
        procs_per_node: NonZeroU32,
    },
}

/// A malformed optional field that was dropped from the configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionalFieldWarning {
    pub field: &'static str,
    pub reason: String,
}

impl fmt::Display for OptionalFieldWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ignoring {}: {}", self.field, self.reason)
    }
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    run: Option<RawRun>,
    #[serde(default)]
    pbs: RawPbs,
}

#[derive(Debug, Deserialize)]
struct RawRun {
    cmd: Option<String>,
    test_args: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
struct RawPbs {
    queue: Option<String>,
    account: Option<String>,
    time_limit: Option<Value>,
    node_list: Option<Value>,
    num_nodes: Option<Value>,
    procs_per_node: Option<Value>,
}

/// Validated, immutable description of one job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobConfig {
    job_name: String,
    queue: Option<String>,
    account: Option<String>,
    time_limit: Option<String>,
    node_list: Option<String>,
    num_nodes: NonZeroU32,
    procs_per_node: NonZeroU32,
    run_command: String,
    test_args: String,
    results_dir: PathBuf,
    warnings: Vec<OptionalFieldWarning>,
}

impl JobConfig {
    /// Create a config with only the required fields set
    pub fn new(
        job_name: impl Into<String>,
        run_command: impl Into<String>,
        results_dir: impl Into<PathBuf>,
        num_nodes: impl Into<Value>,
        procs_per_node: impl Into<Value>,
    ) -> Result<Self, ConfigError> {
        let job_name = job_name.into();
        if job_name.trim().is_empty() {
            return Err(ConfigError::EmptyJobName);
        }

        let results_dir = results_dir.into();
        if !results_dir.is_absolute() {
            return Err(ConfigError::RelativeResultsDir(results_dir));
        }

        Ok(Self {
            job_name,
            queue: None,
            account: None,
            time_limit: None,
            node_list: None,
            num_nodes: parse_count("num_nodes", Some(&num_nodes.into()))?,
            procs_per_node: parse_count("procs_per_node", Some(&procs_per_node.into()))?,
            run_command: run_command.into(),
            test_args: String::new(),
            results_dir,
            warnings: Vec::new(),
        })
    }

    /// Parse a job entry from TOML content
    pub fn from_toml_str(
        job_name: &str,
        results_dir: &Path,
        content: &str,
    ) -> Result<Self, ConfigError> {
        let raw: RawEntry = toml::from_str(content)?;

        let run = raw.run.ok_or(ConfigError::MissingField("run"))?;
        let cmd = run.cmd.ok_or(ConfigError::MissingField("run.cmd"))?;
        let num_nodes = raw
            .pbs
            .num_nodes
            .ok_or(ConfigError::MissingField("pbs.num_nodes"))?;
        let procs_per_node = raw
            .pbs
            .procs_per_node
            .ok_or(ConfigError::MissingField("pbs.procs_per_node"))?;

        let mut config = Self::new(job_name, cmd, results_dir, num_nodes, procs_per_node)?;

        if let Some(args) = run.test_args {
            config.test_args = match args {
                Value::String(s) => s,
                other => other.to_string(),
            };
        }
        if let Some(queue) = raw.pbs.queue {
            config = config.with_queue(queue);
        }
        if let Some(account) = raw.pbs.account {
            config = config.with_account(account);
        }
        if let Some(time_limit) = raw.pbs.time_limit {
            config = config.with_time_limit(time_limit);
        }
        if let Some(node_list) = raw.pbs.node_list {
            config = config.with_node_list(node_list);
        }

        Ok(config)
    }

    /// Set the destination queue; an empty name clears it
    pub fn with_queue(mut self, queue: impl Into<String>) -> Self {
        self.queue = non_empty(queue.into());
        self
    }

    /// Set the account charged for the job; an empty name clears it
    pub fn with_account(mut self, account: impl Into<String>) -> Self {
        self.account = non_empty(account.into());
        self
    }

    /// Set the wall-clock limit.
    ///
    /// Accepts `[[[DD:]HH:]MM:]SS` strings or a bare number of seconds.
    /// Anything else is recorded as a warning and leaves the limit unset.
    pub fn with_time_limit(mut self, value: impl Into<Value>) -> Self {
        match validate_time_limit(value.into()) {
            Ok(limit) => self.time_limit = limit,
            Err(warning) => {
                self.time_limit = None;
                self.warnings.push(warning);
            }
        }
        self
    }

    /// Set an explicit node list in scheduler node-set syntax.
    ///
    /// A non-string or whitespace-bearing value is recorded as a warning,
    /// and allocation falls back to the numeric node count.
    pub fn with_node_list(mut self, value: impl Into<Value>) -> Self {
        match validate_node_list(value.into()) {
            Ok(list) => self.node_list = list,
            Err(warning) => {
                self.node_list = None;
                self.warnings.push(warning);
            }
        }
        self
    }

    /// Set the argument string passed through to the run command
    pub fn with_test_args(mut self, args: impl Into<String>) -> Self {
        self.test_args = args.into();
        self
    }

    pub fn job_name(&self) -> &str {
        &self.job_name
    }

    pub fn queue(&self) -> Option<&str> {
        self.queue.as_deref()
    }

    pub fn account(&self) -> Option<&str> {
        self.account.as_deref()
    }

    pub fn time_limit(&self) -> Option<&str> {
        self.time_limit.as_deref()
    }

    pub fn node_list(&self) -> Option<&str> {
        self.node_list.as_deref()
    }

    pub fn num_nodes(&self) -> NonZeroU32 {
        self.num_nodes
    }

    pub fn procs_per_node(&self) -> NonZeroU32 {
        self.procs_per_node
    }

    pub fn run_command(&self) -> &str {
        &self.run_command
    }

    pub fn test_args(&self) -> &str {
        &self.test_args
    }

    pub fn results_dir(&self) -> &Path {
        &self.results_dir
    }

    /// Optional fields that were dropped during validation
    pub fn warnings(&self) -> &[OptionalFieldWarning] {
        &self.warnings
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

fn parse_count(field: &'static str, value: Option<&Value>) -> Result<NonZeroU32, ConfigError> {
    let value = value.ok_or(ConfigError::MissingField(field))?;
    let parsed = match value {
        Value::Integer(i) => u32::try_from(*i).ok().and_then(NonZeroU32::new),
        Value::String(s) => s.trim().parse::<NonZeroU32>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| ConfigError::InvalidCount {
        field,
        value: value.to_string(),
    })
}

fn validate_time_limit(value: Value) -> Result<Option<String>, OptionalFieldWarning> {
    let warning = |reason: String| OptionalFieldWarning {
        field: "time_limit",
        reason,
    };

    match value {
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                Ok(None)
            } else if is_walltime(s) {
                Ok(Some(s.to_string()))
            } else {
                Err(warning(format!(
                    "expected [[[DD:]HH:]MM:]SS, got {:?} (the entry may need quotes)",
                    s
                )))
            }
        }
        Value::Integer(secs) if secs >= 0 => Ok(Some(secs.to_string())),
        other => Err(warning(format!(
            "expected a string or non-negative integer, found {} (the entry may need quotes)",
            other.type_str()
        ))),
    }
}

fn is_walltime(s: &str) -> bool {
    let groups: Vec<&str> = s.split(':').collect();
    (1..=4).contains(&groups.len())
        && groups
            .iter()
            .all(|g| !g.is_empty() && g.bytes().all(|b| b.is_ascii_digit()))
}

fn validate_node_list(value: Value) -> Result<Option<String>, OptionalFieldWarning> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                Ok(None)
            } else if s.chars().any(|c| c.is_whitespace() || c.is_control()) {
                Err(OptionalFieldWarning {
                    field: "node_list",
                    reason: format!("node list must not contain whitespace, got {:?}", s),
                })
            } else {
                Ok(Some(s.to_string()))
            }
        }
        other => Err(OptionalFieldWarning {
            field: "node_list",
            reason: format!("expected a string, found {}", other.type_str()),
        }),
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
