// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Direct execution of job handlers when no scheduler is present

mod process;

pub use process::ProcessRunner;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeLocalRunner, LocalCall};

use async_trait::async_trait;
use qj_core::LocalInvocation;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors that prevent a local run from completing at all.
///
/// A handler that runs and exits non-zero is not an error; see
/// [`LocalOutput::is_failure`].
#[derive(Debug, Error)]
pub enum LocalRunError {
    #[error("job handler does not exist: {}", .0.display())]
    HandlerMissing(PathBuf),
    #[error("failed to spawn {}: {source}", .handler.display())]
    Spawn {
        handler: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{} did not exit within {timeout:?}", .handler.display())]
    TimedOut { handler: PathBuf, timeout: Duration },
    #[error("failed to write job log {}: {source}", .path.display())]
    Log {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// What a locally executed handler left behind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl LocalOutput {
    /// Exited non-zero or wrote to its error stream
    pub fn is_failure(&self) -> bool {
        self.exit_code != 0 || !self.stderr.is_empty()
    }
}

/// Adapter for running a job handler on this host
#[async_trait]
pub trait LocalRunner: Clone + Send + Sync + 'static {
    /// Run the handler to completion, appending its output to the job log.
    ///
    /// `env` is layered over the inherited environment of the handler only.
    async fn run(
        &self,
        invocation: &LocalInvocation,
        env: &[(String, String)],
    ) -> Result<LocalOutput, LocalRunError>;
}
