//! juju-rs: typed access to the juju CLI
//!
//! This crate wraps `juju status --format json`: it builds the command for
//! a model, runs it through a pluggable executor, strips any non-JSON
//! preamble and decodes the result.
//!
//! # Example
//!
//! ```no_run
//! use juju_rs::{StatusRequest, SystemExecutor, fetch_status};
//!
//! fn main() -> Result<(), juju_rs::JujuError> {
//!     let request = StatusRequest::new("juju", "controller");
//!     let status = fetch_status(&SystemExecutor, &request)?;
//!     for machine in status.machines.keys() {
//!         println!("machine {}", machine);
//!     }
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod normalize;
pub mod status;

pub use error::JujuError;
pub use normalize::normalize_output;
pub use status::{
    ApplicationStatus, CURRENT_MODEL_LABEL, CommandExecutor, CommandOutput, DEFAULT_JUJU_BIN,
    MachineStatus, OutputFormat, StatusDocument, StatusRequest, SystemExecutor, UnitStatus,
    fetch_status, parse_status_json,
};
