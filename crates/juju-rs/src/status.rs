//! `juju status` execution
//!
//! Builds the status command for a model, runs it through a
//! [`CommandExecutor`] and decodes the JSON it prints into a
//! [`StatusDocument`].

use crate::error::JujuError;
use crate::normalize::normalize_output;
use indexmap::IndexMap;
use serde::Deserialize;
use std::process::Command;

/// Name of the juju CLI binary
pub const DEFAULT_JUJU_BIN: &str = "juju";

/// Label used for the current model in logs and errors
pub const CURRENT_MODEL_LABEL: &str = "<current>";

/// Output format requested from `juju status`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
        }
    }
}

/// A single `juju status` invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusRequest {
    /// CLI binary to run (usually `juju`)
    pub binary: String,
    /// Model to scope the query to; `None` queries the current model
    pub grouping: Option<String>,
    /// Requested output format
    pub format: OutputFormat,
}

impl StatusRequest {
    /// Request status for `grouping`; an empty name means the current model
    pub fn new(binary: impl Into<String>, grouping: &str) -> Self {
        let grouping = if grouping.is_empty() {
            None
        } else {
            Some(grouping.to_string())
        };
        Self {
            binary: binary.into(),
            grouping,
            format: OutputFormat::Json,
        }
    }

    /// Arguments passed to the binary
    ///
    /// Produces: status [-m <model>] --format json
    pub fn args(&self) -> Vec<String> {
        let mut args = vec!["status".to_string()];
        if let Some(model) = &self.grouping {
            args.push("-m".to_string());
            args.push(model.clone());
        }
        args.push("--format".to_string());
        args.push(self.format.as_str().to_string());
        args
    }

    /// The full command line, for logs and error messages
    pub fn command_line(&self) -> String {
        let mut parts = vec![self.binary.clone()];
        parts.extend(self.args());
        parts.join(" ")
    }

    /// Model name for display
    pub fn grouping_label(&self) -> &str {
        self.grouping.as_deref().unwrap_or(CURRENT_MODEL_LABEL)
    }
}

/// Captured result of running a command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Runs status requests and captures their output
///
/// Implementations only report what happened; interpreting a non-zero exit
/// code is left to [`fetch_status`].
pub trait CommandExecutor {
    fn execute(&self, request: &StatusRequest) -> Result<CommandOutput, JujuError>;
}

/// Executor that spawns the CLI as a local process (blocking)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemExecutor;

impl CommandExecutor for SystemExecutor {
    fn execute(&self, request: &StatusRequest) -> Result<CommandOutput, JujuError> {
        tracing::debug!("Running: {}", request.command_line());

        let output = Command::new(&request.binary)
            .args(request.args())
            .output()
            .map_err(JujuError::Io)?;

        // Killed by a signal: no exit code, treat as failure
        let exit_code = output.status.code().unwrap_or(-1);

        Ok(CommandOutput {
            exit_code,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// Run `juju status` for a request and parse its output
///
/// A non-zero exit code is an error; an empty index is never returned in
/// its place.
pub fn fetch_status<E: CommandExecutor + ?Sized>(
    executor: &E,
    request: &StatusRequest,
) -> Result<StatusDocument, JujuError> {
    let output = executor.execute(request)?;

    if !output.success() {
        return Err(JujuError::CommandFailed {
            command: request.command_line(),
            grouping: request.grouping_label().to_string(),
            exit_code: output.exit_code,
            stderr: output.stderr,
        });
    }

    parse_status_json(&output.stdout).map_err(|e| match e {
        JujuError::EmptyOutput { .. } => JujuError::EmptyOutput {
            command: request.command_line(),
        },
        other => other,
    })
}

/// Parse raw `juju status --format json` output
///
/// Any preamble before the JSON body is stripped first.
pub fn parse_status_json(raw: &str) -> Result<StatusDocument, JujuError> {
    let payload = normalize_output(raw);
    if payload.trim().is_empty() {
        return Err(JujuError::EmptyOutput {
            command: String::new(),
        });
    }
    Ok(serde_json::from_str(payload)?)
}

/// Parsed `juju status` document
///
/// Only the parts needed to locate machines are decoded; everything else
/// in the payload is ignored. Maps keep the order juju printed them in.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusDocument {
    #[serde(default)]
    pub applications: IndexMap<String, ApplicationStatus>,
    #[serde(default)]
    pub machines: IndexMap<String, MachineStatus>,
}

/// One entry of the `applications` section
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApplicationStatus {
    /// Units placed directly on machines (principal applications)
    #[serde(default)]
    pub units: IndexMap<String, UnitStatus>,
    /// Parent applications (subordinate applications)
    #[serde(default, rename = "subordinate-to")]
    pub subordinate_to: Vec<String>,
}

impl ApplicationStatus {
    pub fn is_principal(&self) -> bool {
        !self.units.is_empty()
    }

    pub fn is_subordinate(&self) -> bool {
        !self.subordinate_to.is_empty()
    }
}

/// A principal unit
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UnitStatus {
    /// Machine id hosting the unit; missing while the unit is still pending
    #[serde(default)]
    pub machine: Option<String>,
    /// Subordinate units running alongside this one, keyed by unit name
    #[serde(default)]
    pub subordinates: IndexMap<String, serde_json::Value>,
}

/// One entry of the `machines` section (only its key is used)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MachineStatus {}
