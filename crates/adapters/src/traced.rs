// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::local::{LocalOutput, LocalRunError, LocalRunner};
use crate::scheduler::{ClientOutput, SchedulerAdapter, SubmissionError};
use async_trait::async_trait;
use qj_core::{LocalInvocation, SchedulerCommand};
use tracing::Instrument;

/// Wrapper that adds tracing to any SchedulerAdapter
#[derive(Clone)]
pub struct TracedScheduler<S> {
    inner: S,
}

impl<S> TracedScheduler<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<S: SchedulerAdapter> SchedulerAdapter for TracedScheduler<S> {
    async fn is_available(&self) -> bool {
        let available = self
            .inner
            .is_available()
            .instrument(tracing::debug_span!("scheduler.probe"))
            .await;
        tracing::debug!(available, "probed scheduler");
        available
    }

    async fn submit(
        &self,
        cmd: &SchedulerCommand,
        env: &[(String, String)],
    ) -> Result<ClientOutput, SubmissionError> {
        let span = tracing::info_span!("scheduler.submit", program = cmd.program());

        async {
            tracing::info!(command = %cmd, env_count = env.len(), "submitting");

            let start = std::time::Instant::now();
            let result = self.inner.submit(cmd, env).await;
            let elapsed = start.elapsed();

            match &result {
                Ok(output) => tracing::info!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    output = %output.combined(),
                    "submission accepted"
                ),
                Err(e) => tracing::error!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    error = %e,
                    "submission failed"
                ),
            }

            result
        }
        .instrument(span)
        .await
    }
}

/// Wrapper that adds tracing to any LocalRunner
#[derive(Clone)]
pub struct TracedLocalRunner<R> {
    inner: R,
}

impl<R> TracedLocalRunner<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<R: LocalRunner> LocalRunner for TracedLocalRunner<R> {
    async fn run(
        &self,
        invocation: &LocalInvocation,
        env: &[(String, String)],
    ) -> Result<LocalOutput, LocalRunError> {
        let span = tracing::info_span!(
            "local.run",
            handler = %invocation.handler().display(),
            log = %invocation.log_path().display()
        );

        async {
            tracing::info!(env_count = env.len(), "starting");

            // Precondition: the handler must exist
            if !invocation.handler().exists() {
                tracing::error!("job handler does not exist");
                return Err(LocalRunError::HandlerMissing(
                    invocation.handler().to_path_buf(),
                ));
            }

            let start = std::time::Instant::now();
            let result = self.inner.run(invocation, env).await;
            let elapsed = start.elapsed();

            match &result {
                Ok(output) if output.is_failure() => tracing::warn!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    exit_code = output.exit_code,
                    stdout = %output.stdout,
                    stderr = %output.stderr,
                    "local run reported errors"
                ),
                Ok(output) => tracing::info!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    exit_code = output.exit_code,
                    "local run finished"
                ),
                Err(e) => tracing::error!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    error = %e,
                    "local run failed"
                ),
            }

            result
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
