//! Shared constants describing the juju cluster profile

/// Human-readable name of the managed deployment type
pub const CLUSTER_NAME: &str = "Juju Managed Clouds";

/// Prefix accepted on cluster options (`juju.apps=...`)
pub const OPTION_PREFIX: &str = "juju";

/// Transport used downstream to reach a node (`juju ssh <model>:<machine>`)
pub const TRANSPORT: &str = "juju";

/// Separator between the model and machine parts of a node
pub const NODE_SEPARATOR: char = ':';

/// Config file location relative to the user config directory
pub const CONFIG_DIR: &str = "juju-nodes";
pub const CONFIG_FILE: &str = "config.yaml";
