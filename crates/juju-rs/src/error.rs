//! Error types for juju CLI access

use thiserror::Error;

/// Errors raised while fetching or decoding `juju status`
#[derive(Error, Debug)]
pub enum JujuError {
    /// The CLI could not be spawned at all
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The status command exited non-zero
    #[error("`{command}` did not return usable output for model {grouping} (exit code {exit_code}){}", stderr_suffix(.stderr))]
    CommandFailed {
        command: String,
        grouping: String,
        exit_code: i32,
        stderr: String,
    },

    /// Normalization left nothing that could be parsed
    #[error("`{command}` produced no JSON payload")]
    EmptyOutput { command: String },

    /// The payload was not valid status JSON
    #[error("Failed to parse status JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

fn stderr_suffix(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {}", trimmed)
    }
}
