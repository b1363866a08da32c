// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! qj-core: pure data for the qj job-submission controller
//!
//! This crate provides:
//! - `JobConfig` loading and single-pass validation
//! - The `RunEnvironment` snapshot handed to spawned jobs
//! - Rendering of scheduler submissions and local invocations
//! - Job identifier extraction from scheduler client output
//!
//! Nothing in here spawns a process; see `qj-adapters` for that.

pub mod clock;
pub mod command;
pub mod config;
pub mod env;
pub mod job_id;
pub mod result;

pub use clock::{Clock, FakeClock, SystemClock};
pub use command::{build, build_scheduler_command, Invocation, LocalInvocation, SchedulerCommand};
pub use config::{ConfigError, JobConfig, OptionalFieldWarning};
pub use env::{RunEnvironment, SitePaths};
pub use job_id::{parse_job_id, JobId, JobIdParseError};
pub use result::{ExecutionOutcome, SubmissionResult};
