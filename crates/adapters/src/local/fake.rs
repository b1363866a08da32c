// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake local runner for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{LocalOutput, LocalRunError, LocalRunner};
use async_trait::async_trait;
use qj_core::LocalInvocation;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Recorded local run
#[derive(Debug, Clone)]
pub struct LocalCall {
    pub handler: PathBuf,
    pub log_path: PathBuf,
    pub env: Vec<(String, String)>,
}

/// Fake local runner for testing
#[derive(Clone, Default)]
pub struct FakeLocalRunner {
    output: Arc<Mutex<LocalOutput>>,
    calls: Arc<Mutex<Vec<LocalCall>>>,
}

impl FakeLocalRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// A runner whose handler exits with `exit_code`
    pub fn exiting(exit_code: i32) -> Self {
        let fake = Self::default();
        fake.set_output(LocalOutput {
            exit_code,
            ..LocalOutput::default()
        });
        fake
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<LocalCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Set what the next runs produce
    pub fn set_output(&self, output: LocalOutput) {
        *self.output.lock().unwrap_or_else(|e| e.into_inner()) = output;
    }
}

#[async_trait]
impl LocalRunner for FakeLocalRunner {
    async fn run(
        &self,
        invocation: &LocalInvocation,
        env: &[(String, String)],
    ) -> Result<LocalOutput, LocalRunError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(LocalCall {
                handler: invocation.handler().to_path_buf(),
                log_path: invocation.log_path().to_path_buf(),
                env: env.to_vec(),
            });

        Ok(self.output.lock().unwrap_or_else(|e| e.into_inner()).clone())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
