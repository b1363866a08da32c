// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for external processes: the batch scheduler and local handlers

pub mod local;
pub mod path;
pub mod scheduler;
pub mod traced;

#[cfg(test)]
mod testing;

pub use local::{LocalOutput, LocalRunError, LocalRunner, ProcessRunner};
pub use path::find_in_path;
pub use scheduler::{ClientOutput, PbsAdapter, SchedulerAdapter, SubmissionError};
pub use traced::{TracedLocalRunner, TracedScheduler};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use local::{FakeLocalRunner, LocalCall};
#[cfg(any(test, feature = "test-support"))]
pub use scheduler::{FakeSchedulerAdapter, SchedulerCall};
