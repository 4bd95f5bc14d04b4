//! Node filtering by application, unit and machine
//!
//! Each [`Category`] is matched with the [`MatchPolicy`] listed for it in
//! [`CATEGORY_POLICIES`]. Applications are matched by regular expression,
//! units and machines by exact name.

use crate::errors::DiscoveryError;
use crate::index::StatusIndex;
use crate::node::Node;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// Kind of entity a filter term is matched against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Apps,
    Units,
    Machines,
}

impl Category {
    /// All filterable categories, in evaluation order
    pub const ALL: [Category; 3] = [Category::Apps, Category::Units, Category::Machines];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Apps => "apps",
            Category::Units => "units",
            Category::Machines => "machines",
        }
    }

    /// How names in this category are compared with filter terms
    pub fn policy(&self) -> MatchPolicy {
        CATEGORY_POLICIES
            .iter()
            .find(|(category, _)| category == self)
            .map(|(_, policy)| *policy)
            .unwrap_or(MatchPolicy::Exact)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("Unknown category: {}", s))
    }
}

/// How a filter term is compared with an entity name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPolicy {
    /// Term is a regular expression matched from the start of the name
    Pattern,
    /// Term must equal the name
    Exact,
}

/// Match policy for every filterable category
pub const CATEGORY_POLICIES: &[(Category, MatchPolicy)] = &[
    (Category::Apps, MatchPolicy::Pattern),
    (Category::Units, MatchPolicy::Exact),
    (Category::Machines, MatchPolicy::Exact),
];

/// Filter terms per category
///
/// A category without terms places no constraint on the result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    terms: BTreeMap<Category, Vec<String>>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter for one category
    pub fn with(mut self, category: Category, terms: Vec<String>) -> Self {
        self.set(category, terms);
        self
    }

    pub fn set(&mut self, category: Category, terms: Vec<String>) {
        self.terms.insert(category, terms);
    }

    /// Terms for a category (empty when unset)
    pub fn terms(&self, category: Category) -> &[String] {
        self.terms.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// True when no category has any term
    pub fn is_empty(&self) -> bool {
        self.terms.values().all(Vec::is_empty)
    }

    /// Categories with at least one term, in evaluation order
    pub fn active(&self) -> impl Iterator<Item = (Category, &[String])> {
        Category::ALL
            .into_iter()
            .map(|c| (c, self.terms(c)))
            .filter(|(_, terms)| !terms.is_empty())
    }
}

/// A compiled filter term
enum Matcher<'a> {
    Pattern(Regex),
    Exact(&'a str),
}

impl<'a> Matcher<'a> {
    fn compile(policy: MatchPolicy, term: &'a str) -> Result<Self, DiscoveryError> {
        match policy {
            MatchPolicy::Exact => Ok(Matcher::Exact(term)),
            MatchPolicy::Pattern => {
                let regex = Regex::new(term).map_err(|source| {
                    DiscoveryError::InvalidPattern {
                        pattern: term.to_string(),
                        source,
                    }
                })?;
                Ok(Matcher::Pattern(regex))
            }
        }
    }

    fn matches(&self, name: &str) -> bool {
        match self {
            // Leftmost match starts at 0 whenever any match does; trailing text is allowed
            Matcher::Pattern(regex) => regex.find(name).is_some_and(|m| m.start() == 0),
            Matcher::Exact(term) => *term == name,
        }
    }
}

/// Collect the nodes of every entity in `category` matching any term
///
/// # Examples
///
/// ```
/// use juju_nodes_core::filter::{Category, resolve};
/// use juju_nodes_core::index::StatusIndex;
/// use juju_rs::parse_status_json;
///
/// let doc = parse_status_json(r#"{"machines": {"0": {}, "1": {}}}"#).unwrap();
/// let index = StatusIndex::build(&doc, "prod");
/// let nodes = resolve(Category::Machines, &["1".to_string()], &index).unwrap();
/// assert_eq!(nodes.len(), 1);
/// ```
pub fn resolve(
    category: Category,
    terms: &[String],
    index: &StatusIndex,
) -> Result<BTreeSet<Node>, DiscoveryError> {
    let policy = category.policy();
    let matchers = terms
        .iter()
        .map(|term| Matcher::compile(policy, term))
        .collect::<Result<Vec<_>, _>>()?;

    let mut nodes = BTreeSet::new();
    for (name, entity_nodes) in index.entries(category) {
        if matchers.iter().any(|m| m.matches(name)) {
            nodes.extend(entity_nodes.iter().cloned());
        }
    }

    tracing::debug!("Filter {}={:?} matched {} node(s)", category, terms, nodes.len());
    Ok(nodes)
}
