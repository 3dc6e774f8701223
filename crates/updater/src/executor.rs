//! Command executors.
//!
//! Everything the updater runs on the host goes through [`Executor`], so the
//! package-manager adapters and system probes can be exercised against canned
//! output in tests.

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

/// Captured result of one process invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when the process was killed by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Trait for command execution.
#[async_trait]
pub trait Executor: Send + Sync {
    /// Run `program` with `args` to completion and capture its output.
    ///
    /// A non-zero exit is not an error; `Err` means the process could not be
    /// started or waited on.
    async fn execute(&self, program: &str, args: &[&str]) -> Result<CommandOutput>;
}

/// Runs commands directly on the local host, without a shell.
pub struct LocalExecutor;

impl LocalExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Executor for LocalExecutor {
    async fn execute(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        debug!("Local exec: {} {}", program, args.join(" "));

        let output = Command::new(program)
            .args(args)
            .output()
            .await
            .with_context(|| format!("Failed to execute {}", program))?;

        Ok(CommandOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// Render a program and its arguments as a single command line.
pub fn command_line(program: &str, args: &[&str]) -> String {
    if args.is_empty() {
        program.to_string()
    } else {
        format!("{} {}", program, args.join(" "))
    }
}

#[cfg(test)]
pub(crate) mod fake {
    //! Scripted executor for tests.

    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Returns canned output keyed by full command line and records every
    /// invocation. Unscripted commands fail to spawn.
    #[derive(Default)]
    pub struct FakeExecutor {
        responses: HashMap<String, CommandOutput>,
        calls: Mutex<Vec<String>>,
    }

    impl FakeExecutor {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn respond(mut self, cmdline: &str, exit_code: i32, stdout: &str) -> Self {
            self.responses.insert(
                cmdline.to_string(),
                CommandOutput {
                    exit_code: Some(exit_code),
                    stdout: stdout.to_string(),
                    stderr: String::new(),
                },
            );
            self
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Executor for FakeExecutor {
        async fn execute(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
            let cmdline = command_line(program, args);
            self.calls.lock().unwrap().push(cmdline.clone());
            self.responses
                .get(&cmdline)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("No such file or directory: {}", program))
        }
    }
}
