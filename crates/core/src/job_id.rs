// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job identifier extraction from scheduler client output

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

// A line holding nothing but ASCII digits, tolerating a trailing carriage return
#[allow(clippy::expect_used)]
static JOB_ID_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^([0-9]+)\r?$").expect("constant regex pattern is valid"));

/// Scheduler-assigned identifier of a submitted job
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JobId(pub String);

impl JobId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The scheduler client ran but printed no recognizable job identifier
#[derive(Debug, Error)]
#[error("no job identifier in scheduler output: {output:?}")]
pub struct JobIdParseError {
    pub output: String,
}

/// Find the first line of `output` that consists solely of an integer
pub fn parse_job_id(output: &str) -> Result<JobId, JobIdParseError> {
    JOB_ID_LINE
        .captures(output)
        .and_then(|caps| caps.get(1))
        .map(|m| JobId(m.as_str().to_string()))
        .ok_or_else(|| JobIdParseError {
            output: output.to_string(),
        })
}

#[cfg(test)]
#[path = "job_id_tests.rs"]
mod tests;
