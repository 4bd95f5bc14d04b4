//! Status index: applications, units and machines mapped to nodes
//!
//! The index is built from a [`StatusDocument`] in three passes, each of
//! which may read what the previous one wrote:
//!
//! 1. principal units are placed on their machines
//! 2. subordinate applications and units inherit the nodes of the
//!    principal units they run alongside
//! 3. every listed machine is added, so machines without units (an empty
//!    model, a freshly added machine) can still be selected

use crate::filter::Category;
use crate::node::Node;
use juju_rs::StatusDocument;
use std::collections::HashMap;

type Entries = HashMap<String, Vec<Node>>;

/// Entity name to node lookup for one model
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusIndex {
    apps: Entries,
    units: Entries,
    machines: Entries,
}

impl StatusIndex {
    /// Build the index for `grouping` from its status document
    pub fn build(document: &StatusDocument, grouping: &str) -> Self {
        let mut index = Self::default();
        index.add_principals(document, grouping);
        index.add_subordinates(document);
        index.add_machines(document, grouping);

        tracing::debug!(
            "Indexed model '{}': {} apps, {} units, {} machines",
            grouping,
            index.apps.len(),
            index.units.len(),
            index.machines.len()
        );
        index
    }

    /// Nodes recorded for an entity, if it was indexed
    pub fn nodes(&self, category: Category, name: &str) -> Option<&[Node]> {
        self.category(category).get(name).map(Vec::as_slice)
    }

    /// All entities of a category with their nodes
    pub fn entries(&self, category: Category) -> impl Iterator<Item = (&str, &[Node])> {
        self.category(category)
            .iter()
            .map(|(name, nodes)| (name.as_str(), nodes.as_slice()))
    }

    /// Number of entities recorded in a category
    pub fn len(&self, category: Category) -> usize {
        self.category(category).len()
    }

    pub fn is_empty(&self) -> bool {
        Category::ALL.iter().all(|c| self.len(*c) == 0)
    }

    fn category(&self, category: Category) -> &Entries {
        match category {
            Category::Apps => &self.apps,
            Category::Units => &self.units,
            Category::Machines => &self.machines,
        }
    }

    fn add_principals(&mut self, document: &StatusDocument, grouping: &str) {
        for (app, app_status) in &document.applications {
            if !app_status.is_principal() {
                continue;
            }

            let mut nodes = Vec::with_capacity(app_status.units.len());
            for (unit, unit_status) in &app_status.units {
                let Some(machine) = unit_status.machine.as_deref() else {
                    tracing::warn!("Unit {} has no machine assigned, skipping", unit);
                    continue;
                };
                let node = Node::new(grouping, machine);
                self.units.insert(unit.clone(), vec![node.clone()]);
                self.machines.insert(machine.to_string(), vec![node.clone()]);
                nodes.push(node);
            }

            self.apps.insert(app.clone(), nodes);
        }
    }

    fn add_subordinates(&mut self, document: &StatusDocument) {
        for (app, app_status) in &document.applications {
            if app_status.is_principal() || !app_status.is_subordinate() {
                continue;
            }

            let unit_prefix = format!("{}/", app);
            for parent in &app_status.subordinate_to {
                let parent_nodes = self.apps.get(parent).cloned().unwrap_or_default();
                self.apps.entry(app.clone()).or_default().extend(parent_nodes);

                let Some(parent_status) = document.applications.get(parent) else {
                    tracing::debug!("Subordinate {} names unknown parent {}", app, parent);
                    continue;
                };

                for (parent_unit, parent_unit_status) in &parent_status.units {
                    // The subordinate lives wherever its principal unit was placed
                    let Some(unit_nodes) = self.units.get(parent_unit).cloned() else {
                        continue;
                    };
                    for sub_unit in parent_unit_status.subordinates.keys() {
                        if sub_unit.starts_with(&unit_prefix) {
                            self.units.insert(sub_unit.clone(), unit_nodes.clone());
                        }
                    }
                }
            }
        }
    }

    fn add_machines(&mut self, document: &StatusDocument, grouping: &str) {
        for machine in document.machines.keys() {
            let node = Node::new(grouping, machine.as_str());
            self.machines.insert(machine.clone(), vec![node]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use juju_rs::parse_status_json;

    fn build(json: &str, grouping: &str) -> StatusIndex {
        StatusIndex::build(&parse_status_json(json).unwrap(), grouping)
    }

    fn node_names(nodes: Option<&[Node]>) -> Vec<String> {
        nodes
            .unwrap_or_default()
            .iter()
            .map(|n| n.to_string())
            .collect()
    }

    const PRINCIPALS_ONLY: &str = r#"{
      "applications": {
        "mysql": {"units": {"mysql/0": {"machine": "0"}, "mysql/1": {"machine": "1"}}},
        "keystone": {"units": {"keystone/0": {"machine": "2"}}}
      },
      "machines": {"0": {}, "1": {}, "2": {}}
    }"#;

    const WITH_SUBORDINATE: &str = r#"{
      "applications": {
        "p": {
          "units": {
            "p/0": {"machine": "3", "subordinates": {"s/0": {}, "other/0": {}}}
          }
        },
        "s": {"subordinate-to": ["p"]}
      },
      "machines": {"3": {}}
    }"#;

    #[test]
    fn test_principals_match_document() {
        let index = build(PRINCIPALS_ONLY, "prod");

        assert_eq!(index.len(Category::Apps), 2);
        assert_eq!(index.len(Category::Units), 3);
        assert_eq!(index.len(Category::Machines), 3);

        assert_eq!(
            node_names(index.nodes(Category::Apps, "mysql")),
            vec!["prod:0", "prod:1"]
        );
        assert_eq!(
            node_names(index.nodes(Category::Units, "keystone/0")),
            vec!["prod:2"]
        );
        assert_eq!(
            node_names(index.nodes(Category::Machines, "1")),
            vec!["prod:1"]
        );
    }

    #[test]
    fn test_subordinate_resolves_through_parent() {
        let index = build(WITH_SUBORDINATE, "m");

        let parent = index.nodes(Category::Units, "p/0").unwrap();
        let sub = index.nodes(Category::Units, "s/0").unwrap();
        assert_eq!(sub, parent);
        assert_eq!(node_names(Some(sub)), vec!["m:3"]);

        assert!(
            index
                .nodes(Category::Apps, "s")
                .unwrap()
                .contains(&Node::new("m", "3"))
        );
    }

    #[test]
    fn test_subordinate_ignores_other_apps_units() {
        let index = build(WITH_SUBORDINATE, "m");
        // other/0 belongs to an application not declared in the document
        assert!(index.nodes(Category::Units, "other/0").is_none());
    }

    #[test]
    fn test_subordinate_prefix_requires_slash() {
        let index = build(
            r#"{
              "applications": {
                "p": {"units": {"p/0": {"machine": "0", "subordinates": {"nrpe-host/0": {}}}}},
                "nrpe": {"subordinate-to": ["p"]}
              }
            }"#,
            "m",
        );
        assert!(index.nodes(Category::Units, "nrpe-host/0").is_none());
    }

    #[test]
    fn test_subordinate_of_multiple_parents() {
        let index = build(
            r#"{
              "applications": {
                "a": {"units": {"a/0": {"machine": "0", "subordinates": {"agent/0": {}}}}},
                "b": {"units": {"b/0": {"machine": "1", "subordinates": {"agent/1": {}}}}},
                "agent": {"subordinate-to": ["a", "b"]}
              }
            }"#,
            "m",
        );
        assert_eq!(
            node_names(index.nodes(Category::Apps, "agent")),
            vec!["m:0", "m:1"]
        );
        assert_eq!(
            node_names(index.nodes(Category::Units, "agent/1")),
            vec!["m:1"]
        );
    }

    #[test]
    fn test_subordinate_with_unknown_parent() {
        let index = build(
            r#"{"applications": {"s": {"subordinate-to": ["gone"]}}}"#,
            "m",
        );
        assert_eq!(index.nodes(Category::Apps, "s"), Some(&[][..]));
        assert_eq!(index.len(Category::Units), 0);
    }

    #[test]
    fn test_application_without_presence_omitted() {
        let index = build(
            r#"{"applications": {"idle": {"charm": "idle"}}, "machines": {}}"#,
            "m",
        );
        assert!(index.nodes(Category::Apps, "idle").is_none());
        assert!(index.is_empty());
    }

    #[test]
    fn test_machine_pass_adds_empty_machines() {
        let index = build(r#"{"applications": {}, "machines": {"5": {}}}"#, "empty");
        assert_eq!(
            node_names(index.nodes(Category::Machines, "5")),
            vec!["empty:5"]
        );
        assert_eq!(index.len(Category::Apps), 0);
    }

    #[test]
    fn test_pending_unit_skipped() {
        let index = build(
            r#"{"applications": {"app": {"units": {"app/0": {"machine": "0"}, "app/1": {}}}}}"#,
            "m",
        );
        assert_eq!(node_names(index.nodes(Category::Apps, "app")), vec!["m:0"]);
        assert!(index.nodes(Category::Units, "app/1").is_none());
    }

    #[test]
    fn test_build_is_repeatable() {
        let doc = parse_status_json(WITH_SUBORDINATE).unwrap();
        assert_eq!(StatusIndex::build(&doc, "m"), StatusIndex::build(&doc, "m"));
    }
}
