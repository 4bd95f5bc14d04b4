//! Error types and user-facing formatting
//!
//! [`DiscoveryError`] is what every node-discovery operation returns;
//! [`format_discovery_error`] turns it into an actionable message.

use juju_rs::JujuError;
use thiserror::Error;

/// Errors raised while discovering nodes
#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error(transparent)]
    Juju(#[from] JujuError),

    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Unknown cluster option: {0}")]
    UnknownOption(String),

    #[error("Invalid config: {0}")]
    ConfigInvalid(String),

    #[error("Config not found: {0}")]
    ConfigNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Format a DiscoveryError into a user-friendly message
///
/// # Examples
///
/// ```
/// use juju_nodes_core::errors::{DiscoveryError, format_discovery_error};
///
/// let error = DiscoveryError::UnknownOption("juju.hosts".to_string());
/// assert!(format_discovery_error(&error).contains("juju-nodes options"));
/// ```
pub fn format_discovery_error(error: &DiscoveryError) -> String {
    match error {
        DiscoveryError::Juju(JujuError::CommandFailed {
            command, stderr, ..
        }) => format_command_failure(command, stderr),
        DiscoveryError::Juju(JujuError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            "juju CLI not found - is juju installed and on PATH?".to_string()
        }
        DiscoveryError::Juju(JujuError::EmptyOutput { command }) => {
            format!("`{}` printed no JSON - check the juju client version", command)
        }
        DiscoveryError::Juju(JujuError::Parse(e)) => {
            format!("Could not parse juju status output: {}", e)
        }
        DiscoveryError::InvalidPattern { pattern, .. } => {
            format!(
                "Invalid application pattern '{}' - apps filters are regular expressions",
                pattern
            )
        }
        DiscoveryError::UnknownOption(name) => {
            format!("Unknown option '{}' - run `juju-nodes options` to list them", name)
        }
        _ => error.to_string(),
    }
}

/// Format a failed status command based on what juju printed to stderr
fn format_command_failure(command: &str, stderr: &str) -> String {
    let lower = stderr.to_lowercase();
    if lower.contains("not found") && lower.contains("model") {
        format!("`{}` failed: model not found", command)
    } else if lower.contains("no controller") || lower.contains("no current controller") {
        format!("`{}` failed: no controller selected - run `juju switch`", command)
    } else if lower.contains("permission denied") || lower.contains("unauthorized") {
        format!("`{}` failed: permission denied - check juju credentials", command)
    } else if lower.contains("connection refused") || lower.contains("timeout") {
        format!("`{}` failed: controller unreachable", command)
    } else {
        format!("`{}` did not return usable output", command)
    }
}

/// Render an error as `<category>: <message>` for terminal output
pub fn render_discovery_error(error: &DiscoveryError) -> String {
    format!("{}: {}", categorize_error(error).label(), format_discovery_error(error))
}

/// Categorize an error for display purposes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The status command could not run or exited non-zero
    Command,
    /// The status output could not be decoded
    Payload,
    /// A filter term was rejected
    Filter,
    /// Options or config file issues
    Config,
    /// Other/unknown issues
    Other,
}

impl ErrorCategory {
    /// Get a short label for the category
    pub fn label(&self) -> &'static str {
        match self {
            ErrorCategory::Command => "Command",
            ErrorCategory::Payload => "Payload",
            ErrorCategory::Filter => "Filter",
            ErrorCategory::Config => "Config",
            ErrorCategory::Other => "Error",
        }
    }
}

/// Categorize a DiscoveryError
pub fn categorize_error(error: &DiscoveryError) -> ErrorCategory {
    match error {
        DiscoveryError::Juju(JujuError::CommandFailed { .. } | JujuError::Io(_)) => {
            ErrorCategory::Command
        }
        DiscoveryError::Juju(JujuError::EmptyOutput { .. } | JujuError::Parse(_)) => {
            ErrorCategory::Payload
        }
        DiscoveryError::InvalidPattern { .. } => ErrorCategory::Filter,
        DiscoveryError::UnknownOption(_)
        | DiscoveryError::ConfigInvalid(_)
        | DiscoveryError::ConfigNotFound(_)
        | DiscoveryError::Yaml(_) => ErrorCategory::Config,
        DiscoveryError::Io(_) => ErrorCategory::Other,
    }
}
