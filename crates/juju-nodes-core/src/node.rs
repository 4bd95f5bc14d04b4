//! Addressable node identifiers

use crate::constants::NODE_SEPARATOR;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A machine within a model, as `juju ssh` addresses it (`model:machine`)
///
/// The current model is represented by an empty grouping, which renders
/// as `:machine`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Node {
    grouping: String,
    machine: String,
}

impl Node {
    pub fn new(grouping: impl Into<String>, machine: impl Into<String>) -> Self {
        Self {
            grouping: grouping.into(),
            machine: machine.into(),
        }
    }

    /// Model name (empty for the current model)
    pub fn grouping(&self) -> &str {
        &self.grouping
    }

    /// Machine id within the model
    pub fn machine(&self) -> &str {
        &self.machine
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.grouping, NODE_SEPARATOR, self.machine)
    }
}

impl FromStr for Node {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split_once(NODE_SEPARATOR)
            .map(|(grouping, machine)| Node::new(grouping, machine))
            .ok_or_else(|| format!("Invalid node '{}': expected <model>:<machine>", s))
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
