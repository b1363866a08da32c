// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! qj job-submission controller

mod controller;
mod error;

pub use controller::{
    ControllerConfig, ControllerDeps, JobController, MissingJobId, Phase, DEFAULT_HANDLER,
    PLACEHOLDER_JOB_ID,
};
pub use error::ControllerError;
