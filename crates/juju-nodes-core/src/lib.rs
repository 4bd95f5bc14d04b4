//! juju-nodes-core: node discovery for Juju managed deployments
//!
//! This crate turns `juju status` output into the list of machines a
//! collection run should visit. It is kept free of any CLI concerns so
//! the logic can be exercised with a fake executor.
//!
//! # Modules
//!
//! - [`node`] - The `model:machine` node identifier
//! - [`index`] - Three-pass index of applications, units and machines
//! - [`filter`] - Category match policies, filter criteria and resolution
//! - [`discovery`] - Orchestration across models
//! - [`options`] - Cluster options and config file loading
//! - [`errors`] - Error type and user-friendly formatting
//! - [`constants`] - Cluster profile constants

pub mod constants;
pub mod discovery;
pub mod errors;
pub mod filter;
pub mod index;
pub mod node;
pub mod options;

// Re-export commonly used items at crate root
pub use discovery::NodeDiscovery;
pub use errors::*;
pub use filter::{CATEGORY_POLICIES, Category, FilterCriteria, MatchPolicy, resolve};
pub use index::StatusIndex;
pub use node::Node;
pub use options::{ClusterOptions, OPTION_TABLE, option_help, parse_option_string};
