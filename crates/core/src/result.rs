// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Outcome of one `start()` call

use crate::job_id::JobId;
use chrono::{DateTime, Utc};

/// Which execution path ran, with its path-specific result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionOutcome {
    /// Handed to the batch scheduler, which assigned an identifier
    Submitted { job_id: JobId },
    /// Run directly on this host to completion
    Executed { exit_code: i32 },
}

/// Result returned to the caller of `JobController::start`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionResult {
    pub outcome: ExecutionOutcome,
    pub stdout: String,
    pub stderr: String,
    pub submitted_at: DateTime<Utc>,
}

impl SubmissionResult {
    /// Identifier of a scheduler-dispatched job
    pub fn job_id(&self) -> Option<&JobId> {
        match &self.outcome {
            ExecutionOutcome::Submitted { job_id } => Some(job_id),
            ExecutionOutcome::Executed { .. } => None,
        }
    }

    /// Exit status of a directly executed job
    pub fn exit_code(&self) -> Option<i32> {
        match self.outcome {
            ExecutionOutcome::Executed { exit_code } => Some(exit_code),
            ExecutionOutcome::Submitted { .. } => None,
        }
    }

    /// A local run that exited non-zero or wrote to its error stream
    pub fn is_degraded(&self) -> bool {
        match self.outcome {
            ExecutionOutcome::Executed { exit_code } => exit_code != 0 || !self.stderr.is_empty(),
            ExecutionOutcome::Submitted { .. } => false,
        }
    }
}

#[cfg(test)]
#[path = "result_tests.rs"]
mod tests;
