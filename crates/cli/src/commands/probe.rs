// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `qj probe` - Report whether a batch scheduler is reachable

use anyhow::Result;
use qj_adapters::{PbsAdapter, SchedulerAdapter, TracedScheduler};
use std::process::ExitCode;

pub async fn handle() -> Result<ExitCode> {
    let scheduler = TracedScheduler::new(PbsAdapter::new());
    if scheduler.is_available().await {
        println!("available");
    } else {
        println!("unavailable");
    }
    Ok(ExitCode::SUCCESS)
}
