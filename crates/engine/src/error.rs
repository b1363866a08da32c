// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the job controller

use qj_adapters::{LocalRunError, SubmissionError};
use qj_core::{ConfigError, JobIdParseError};
use thiserror::Error;

/// Failures that abort a `start()` call
#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("submission error: {0}")]
    Submission(#[from] SubmissionError),
    #[error("job id error: {0}")]
    JobIdParse(#[from] JobIdParseError),
    #[error("local run error: {0}")]
    LocalRun(#[from] LocalRunError),
}
