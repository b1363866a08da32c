// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Subprocess-based local runner

use super::{LocalOutput, LocalRunError, LocalRunner};
use async_trait::async_trait;
use qj_core::LocalInvocation;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::process::Command;
use tokio::sync::mpsc;

/// Runs job handlers as direct child processes.
///
/// Output is streamed into the job log as it arrives, so the log keeps
/// whatever a handler wrote even if it is killed on timeout. Chunks from
/// stdout and stderr are written in arrival order, which approximates what
/// a `> log 2>&1` redirect would leave behind.
#[derive(Clone, Default)]
pub struct ProcessRunner {
    timeout: Option<Duration>,
}

impl ProcessRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Kill the handler if it runs longer than `timeout`
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Clone, Copy)]
enum Stream {
    Stdout,
    Stderr,
}

#[async_trait]
impl LocalRunner for ProcessRunner {
    async fn run(
        &self,
        invocation: &LocalInvocation,
        env: &[(String, String)],
    ) -> Result<LocalOutput, LocalRunError> {
        let handler = invocation.handler();
        let log_path = invocation.log_path();

        tokio::fs::create_dir_all(invocation.work_dir())
            .await
            .map_err(|source| log_error(log_path, source))?;
        if let Some(dir) = log_path.parent() {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|source| log_error(log_path, source))?;
        }
        let mut log = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)
            .await
            .map_err(|source| log_error(log_path, source))?;

        let mut child = Command::new(handler)
            .envs(env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .current_dir(invocation.work_dir())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| LocalRunError::Spawn {
                handler: handler.to_path_buf(),
                source,
            })?;

        let (tx, mut rx) = mpsc::channel(64);
        if let Some(stdout) = child.stdout.take() {
            tokio::spawn(pump(stdout, Stream::Stdout, tx.clone()));
        }
        if let Some(stderr) = child.stderr.take() {
            tokio::spawn(pump(stderr, Stream::Stderr, tx));
        }

        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let running = async {
            while let Some((stream, chunk)) = rx.recv().await {
                log.write_all(&chunk)
                    .await
                    .map_err(|source| log_error(log_path, source))?;
                match stream {
                    Stream::Stdout => stdout.extend_from_slice(&chunk),
                    Stream::Stderr => stderr.extend_from_slice(&chunk),
                }
            }
            child.wait().await.map_err(|source| LocalRunError::Spawn {
                handler: handler.to_path_buf(),
                source,
            })
        };

        let status = match self.timeout {
            Some(timeout) => match tokio::time::timeout(timeout, running).await {
                Ok(status) => status,
                Err(_) => Err(LocalRunError::TimedOut {
                    handler: handler.to_path_buf(),
                    timeout,
                }),
            },
            None => running.await,
        };
        // Partial output is already in the log; flush it even on failure
        let flushed = log.flush().await;
        let status = status?;
        flushed.map_err(|source| log_error(log_path, source))?;

        Ok(LocalOutput {
            exit_code: status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&stdout).to_string(),
            stderr: String::from_utf8_lossy(&stderr).to_string(),
        })
    }
}

/// Forward everything read from a pipe until EOF or until the reader hangs up
async fn pump<R>(mut pipe: R, stream: Stream, tx: mpsc::Sender<(Stream, Vec<u8>)>)
where
    R: AsyncRead + Unpin,
{
    let mut buf = vec![0u8; 8192];
    loop {
        match pipe.read(&mut buf).await {
            Ok(0) | Err(_) => break,
            Ok(n) => {
                if tx.send((stream, buf[..n].to_vec())).await.is_err() {
                    break;
                }
            }
        }
    }
}

fn log_error(path: &Path, source: std::io::Error) -> LocalRunError {
    LocalRunError::Log {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
#[path = "process_tests.rs"]
mod tests;
