//! External command-line tools (`gamdl`, `ffmpeg`).
//!
//! Tools are opaque: only the exit status and standard error are observed.
//! Workers talk to them through [`ExternalTool`] so tests can substitute
//! [`mocks::MockTool`] instead of spawning processes.
//!
//! Install:
//! - gamdl: `pip install gamdl`
//! - ffmpeg: `winget install ffmpeg` / `brew install ffmpeg` / `apt install ffmpeg`

use std::ffi::OsString;
use std::io;
use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

/// Exit status and diagnostics of one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    pub success: bool,
    /// Exit code, if the process exited normally
    pub code: Option<i32>,
    pub stderr: String,
}

impl ToolOutput {
    /// Successful run with no diagnostics
    pub fn ok() -> Self {
        Self {
            success: true,
            code: Some(0),
            stderr: String::new(),
        }
    }

    /// Failed run with the given exit code and stderr
    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            code: Some(code),
            stderr: stderr.into(),
        }
    }
}

/// Errors that prevent a tool from running at all
#[derive(Debug, Clone, thiserror::Error)]
pub enum ToolError {
    /// Binary not found on PATH or at the configured location
    #[error("{0} command not found. Please ensure it is installed.")]
    NotFound(String),

    /// Any other spawn failure
    #[error("Failed to run {program}: {message}")]
    Spawn { program: String, message: String },
}

/// A command-line tool that can be invoked with arguments.
#[async_trait]
pub trait ExternalTool: Send + Sync {
    /// Short name used in status messages
    fn name(&self) -> &str;

    /// Run the tool to completion.
    async fn invoke(&self, args: &[OsString]) -> Result<ToolOutput, ToolError>;
}

/// A tool spawned as a child process
#[derive(Debug, Clone)]
pub struct SystemTool {
    program: String,
    name: String,
}

impl SystemTool {
    /// `program` is either a bare name looked up on PATH or a path.
    pub fn new(program: impl Into<String>) -> Self {
        let program = program.into();
        let name = Path::new(&program)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| program.clone());
        Self { program, name }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// First line of the tool's version output, if it runs at all.
    pub async fn version(&self, flag: &str) -> Option<String> {
        let output = Command::new(&self.program)
            .arg(flag)
            .stdin(Stdio::null())
            .output()
            .await
            .ok()?;
        if !output.status.success() {
            return None;
        }
        let stdout = String::from_utf8_lossy(&output.stdout);
        stdout.lines().next().map(|l| l.trim().to_string())
    }
}

#[async_trait]
impl ExternalTool for SystemTool {
    fn name(&self) -> &str {
        &self.name
    }

    async fn invoke(&self, args: &[OsString]) -> Result<ToolOutput, ToolError> {
        tracing::debug!(target: "tools", program = %self.program, ?args, "Invoking");

        let output = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| self.spawn_error(e))?;

        Ok(ToolOutput {
            success: output.status.success(),
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}

impl SystemTool {
    fn spawn_error(&self, e: io::Error) -> ToolError {
        match e.kind() {
            io::ErrorKind::NotFound => ToolError::NotFound(self.name.clone()),
            _ => ToolError::Spawn {
                program: self.program.clone(),
                message: e.to_string(),
            },
        }
    }
}
