// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake scheduler adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{ClientOutput, SchedulerAdapter, SubmissionError};
use async_trait::async_trait;
use qj_core::SchedulerCommand;
use std::sync::{Arc, Mutex};

/// Recorded scheduler call
#[derive(Debug, Clone)]
pub enum SchedulerCall {
    Probe,
    Submit {
        program: String,
        args: Vec<String>,
        env: Vec<(String, String)>,
    },
}

/// Fake scheduler adapter for testing
#[derive(Clone, Default)]
pub struct FakeSchedulerAdapter {
    available: Arc<Mutex<bool>>,
    output: Arc<Mutex<ClientOutput>>,
    spawn_failure: Arc<Mutex<Option<String>>>,
    calls: Arc<Mutex<Vec<SchedulerCall>>>,
}

impl FakeSchedulerAdapter {
    /// A fake whose scheduler is reachable and answers with `stdout`
    pub fn available(stdout: &str) -> Self {
        let fake = Self::default();
        fake.set_available(true);
        fake.set_output(stdout, "");
        fake
    }

    /// A fake with no scheduler on the host
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<SchedulerCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Toggle scheduler reachability
    pub fn set_available(&self, available: bool) {
        *self.available.lock().unwrap_or_else(|e| e.into_inner()) = available;
    }

    /// Set what the submission client prints
    pub fn set_output(&self, stdout: &str, stderr: &str) {
        *self.output.lock().unwrap_or_else(|e| e.into_inner()) = ClientOutput {
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
        };
    }

    /// Make the next submissions fail to spawn with the given message
    pub fn fail_spawn(&self, message: &str) {
        *self.spawn_failure.lock().unwrap_or_else(|e| e.into_inner()) =
            Some(message.to_string());
    }
}

#[async_trait]
impl SchedulerAdapter for FakeSchedulerAdapter {
    async fn is_available(&self) -> bool {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(SchedulerCall::Probe);

        *self.available.lock().unwrap_or_else(|e| e.into_inner())
    }

    async fn submit(
        &self,
        cmd: &SchedulerCommand,
        env: &[(String, String)],
    ) -> Result<ClientOutput, SubmissionError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(SchedulerCall::Submit {
                program: cmd.program().to_string(),
                args: cmd.args().to_vec(),
                env: env.to_vec(),
            });

        let failure = self
            .spawn_failure
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone();
        if let Some(message) = failure {
            return Err(SubmissionError::Spawn {
                program: cmd.program().to_string(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, message),
            });
        }

        Ok(self.output.lock().unwrap_or_else(|e| e.into_inner()).clone())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
