//! Node discovery across models
//!
//! For every requested model: fetch `juju status`, index it, run the active
//! filters and add the matches to a single result set.

use crate::errors::DiscoveryError;
use crate::filter::{FilterCriteria, resolve};
use crate::index::StatusIndex;
use crate::node::Node;
use juju_rs::{CommandExecutor, DEFAULT_JUJU_BIN, StatusRequest, fetch_status};
use std::collections::BTreeSet;

/// Discovers nodes using a [`CommandExecutor`] to query juju
pub struct NodeDiscovery<E: CommandExecutor> {
    executor: E,
    binary: String,
}

impl<E: CommandExecutor> NodeDiscovery<E> {
    pub fn new(executor: E) -> Self {
        Self {
            executor,
            binary: DEFAULT_JUJU_BIN.to_string(),
        }
    }

    /// Use a different juju binary (path or name on PATH)
    pub fn with_binary(mut self, binary: impl Into<String>) -> Self {
        self.binary = binary.into();
        self
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Fetch and index the status of one model
    ///
    /// An empty name selects the current model.
    pub fn index_model(&self, grouping: &str) -> Result<StatusIndex, DiscoveryError> {
        let request = StatusRequest::new(self.binary.as_str(), grouping);
        let document = fetch_status(&self.executor, &request)?;
        Ok(StatusIndex::build(&document, grouping))
    }

    /// Nodes in `groupings` matching any of the criteria
    ///
    /// With no groupings the current model is queried. A model for which
    /// no filter is set contributes no nodes. The first model whose status
    /// cannot be fetched or parsed aborts discovery.
    pub fn discover(
        &self,
        groupings: &[String],
        criteria: &FilterCriteria,
    ) -> Result<Vec<Node>, DiscoveryError> {
        let current = [String::new()];
        let groupings = if groupings.is_empty() {
            &current[..]
        } else {
            groupings
        };

        let mut nodes = BTreeSet::new();

        for grouping in groupings {
            let index = self.index_model(grouping)?;

            if criteria.is_empty() {
                tracing::info!("No filters set, model '{}' adds no nodes", grouping);
                continue;
            }

            let before = nodes.len();
            for (category, terms) in criteria.active() {
                nodes.extend(resolve(category, terms, &index)?);
            }
            tracing::info!("Model '{}' added {} node(s)", grouping, nodes.len() - before);
        }

        Ok(nodes.into_iter().collect())
    }
}
