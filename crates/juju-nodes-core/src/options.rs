//! Cluster options and config file loading
//!
//! Filters are supplied as comma separated strings, either from the config
//! file, as `juju.<option>=<value>` pairs, or as dedicated CLI flags.

use crate::constants::{CONFIG_DIR, CONFIG_FILE, OPTION_PREFIX};
use crate::errors::DiscoveryError;
use crate::filter::{Category, FilterCriteria};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Option names with their descriptions
pub const OPTION_TABLE: &[(&str, &str)] = &[
    ("apps", "Filter node list by apps (comma separated regex)."),
    ("units", "Filter node list by units (comma separated string)."),
    ("models", "Filter node list by models (comma separated string)."),
    ("machines", "Filter node list by machines (comma separated string)."),
];

/// One help line per option, as `<prefix>.<option>  <description>`
pub fn option_help() -> Vec<String> {
    OPTION_TABLE
        .iter()
        .map(|(name, description)| format!("{}.{:<10} {}", OPTION_PREFIX, name, description))
        .collect()
}

/// Split a comma separated option value into trimmed, non-empty terms
///
/// # Examples
///
/// ```
/// use juju_nodes_core::options::parse_option_string;
///
/// assert_eq!(parse_option_string(" a, b ,,c"), vec!["a", "b", "c"]);
/// assert!(parse_option_string("").is_empty());
/// ```
pub fn parse_option_string(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Raw filter options, as comma separated strings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClusterOptions {
    pub apps: String,
    pub units: String,
    pub models: String,
    pub machines: String,
}

impl ClusterOptions {
    /// Load options from the default location (~/.config/juju-nodes/config.yaml)
    ///
    /// A missing file yields default (empty) options.
    pub fn load_default() -> Result<Self, DiscoveryError> {
        let path = Self::default_path()?;
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load options from a specific path
    pub fn load_from(path: &Path) -> Result<Self, DiscoveryError> {
        if !path.exists() {
            return Err(DiscoveryError::ConfigNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse options from YAML
    ///
    /// Each option may be a comma separated string or a list of strings.
    pub fn from_yaml(content: &str) -> Result<Self, DiscoveryError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let raw: RawOptions = serde_yaml::from_str(content)?;
        Ok(Self {
            apps: raw.apps.into_joined(),
            units: raw.units.into_joined(),
            models: raw.models.into_joined(),
            machines: raw.machines.into_joined(),
        })
    }

    /// Get the default config path
    pub fn default_path() -> Result<PathBuf, DiscoveryError> {
        let dir = dirs_next::config_dir().ok_or_else(|| {
            DiscoveryError::ConfigInvalid("Could not determine config directory".to_string())
        })?;
        Ok(dir.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Set an option by name, replacing its previous value
    pub fn set(&mut self, name: &str, value: &str) -> Result<(), DiscoveryError> {
        let slot = match name {
            "apps" => &mut self.apps,
            "units" => &mut self.units,
            "models" => &mut self.models,
            "machines" => &mut self.machines,
            _ => return Err(DiscoveryError::UnknownOption(name.to_string())),
        };
        *slot = value.to_string();
        Ok(())
    }

    /// Apply a `juju.<option>=<value>` assignment (the prefix is optional)
    pub fn apply(&mut self, assignment: &str) -> Result<(), DiscoveryError> {
        let (key, value) = assignment.split_once('=').ok_or_else(|| {
            DiscoveryError::ConfigInvalid(format!(
                "Expected <option>=<value>, got '{}'",
                assignment
            ))
        })?;
        let key = key.trim();
        let name = match key.split_once('.') {
            Some((prefix, name)) if prefix == OPTION_PREFIX => name,
            Some(_) => return Err(DiscoveryError::UnknownOption(key.to_string())),
            None => key,
        };
        self.set(name, value)
    }

    /// Layer `-c` assignments, then dedicated flags, over the current values
    ///
    /// Later layers win: a flag overrides an assignment for the same option,
    /// which in turn overrides what was loaded from the config file.
    pub fn merge(
        &mut self,
        assignments: &[String],
        flags: &[(&str, Option<&str>)],
    ) -> Result<(), DiscoveryError> {
        for assignment in assignments {
            self.apply(assignment)?;
        }
        for (name, value) in flags {
            if let Some(value) = value {
                self.set(name, value)?;
            }
        }
        Ok(())
    }

    /// Models to query; empty means the current model
    pub fn models(&self) -> Vec<String> {
        parse_option_string(&self.models)
    }

    /// Filter criteria built from the apps, units and machines options
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria::new()
            .with(Category::Apps, parse_option_string(&self.apps))
            .with(Category::Units, parse_option_string(&self.units))
            .with(Category::Machines, parse_option_string(&self.machines))
    }
}

/// Config file shape: every option accepts a string or a list
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawOptions {
    apps: OptionValue,
    units: OptionValue,
    models: OptionValue,
    machines: OptionValue,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OptionValue {
    Single(String),
    List(Vec<String>),
}

impl Default for OptionValue {
    fn default() -> Self {
        OptionValue::Single(String::new())
    }
}

impl OptionValue {
    fn into_joined(self) -> String {
        match self {
            OptionValue::Single(s) => s,
            OptionValue::List(items) => items.join(","),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_option_string() {
        assert_eq!(parse_option_string("a,b,c"), vec!["a", "b", "c"]);
        assert_eq!(parse_option_string("  web , db  "), vec!["web", "db"]);
        assert_eq!(parse_option_string("a,,b,"), vec!["a", "b"]);
        assert!(parse_option_string("").is_empty());
        assert!(parse_option_string(" , ").is_empty());
    }

    #[test]
    fn test_apply_prefixed() {
        let mut options = ClusterOptions::default();
        options.apply("juju.models=sos").unwrap();
        options.apply("juju.apps=a,b,c").unwrap();
        options.apply("machines=0").unwrap();

        assert_eq!(options.models(), vec!["sos"]);
        assert_eq!(options.criteria().terms(Category::Apps), &["a", "b", "c"]);
        assert_eq!(options.criteria().terms(Category::Machines), &["0"]);
    }

    #[test]
    fn test_apply_rejects_unknown() {
        let mut options = ClusterOptions::default();
        assert!(matches!(
            options.apply("juju.hosts=a"),
            Err(DiscoveryError::UnknownOption(_))
        ));
        assert!(matches!(
            options.apply("ovn.apps=a"),
            Err(DiscoveryError::UnknownOption(_))
        ));
        assert!(matches!(
            options.apply("apps"),
            Err(DiscoveryError::ConfigInvalid(_))
        ));
    }

    #[test]
    fn test_apply_keeps_equals_in_value() {
        let mut options = ClusterOptions::default();
        options.apply("juju.apps=a{1,2}=x").unwrap();
        assert_eq!(options.apps, "a{1,2}=x");
    }

    #[test]
    fn test_merge_precedence() {
        let mut options = ClusterOptions::from_yaml(
            "apps: from-file\nunits: file/0\nmachines: \"1\"\nmodels: file-model\n",
        )
        .unwrap();
        let assignments = vec![
            "juju.apps=from-option".to_string(),
            "juju.units=option/0".to_string(),
        ];
        let flags = [
            ("apps", Some("from-flag")),
            ("units", None),
            ("models", None),
            ("machines", None),
        ];
        options.merge(&assignments, &flags).unwrap();

        // flag beats -c, -c beats the file, untouched options keep file values
        assert_eq!(options.apps, "from-flag");
        assert_eq!(options.units, "option/0");
        assert_eq!(options.machines, "1");
        assert_eq!(options.models(), vec!["file-model"]);
    }

    #[test]
    fn test_merge_rejects_bad_assignment() {
        let mut options = ClusterOptions::default();
        let result = options.merge(&["juju.hosts=a".to_string()], &[]);
        assert!(matches!(result, Err(DiscoveryError::UnknownOption(_))));
    }

    #[test]
    fn test_empty_options_give_empty_criteria() {
        let options = ClusterOptions::default();
        assert!(options.criteria().is_empty());
        assert!(options.models().is_empty());
    }

    #[test]
    fn test_from_yaml_strings_and_lists() {
        let yaml = r#"
apps: "nova-compute, ceph-osd"
units:
  - keystone/0
  - mysql/1
models: openstack
"#;
        let options = ClusterOptions::from_yaml(yaml).unwrap();
        assert_eq!(options.apps, "nova-compute, ceph-osd");
        assert_eq!(options.units, "keystone/0,mysql/1");
        assert_eq!(options.models(), vec!["openstack"]);
        assert_eq!(options.machines, "");
    }

    #[test]
    fn test_from_yaml_rejects_unknown_fields() {
        assert!(matches!(
            ClusterOptions::from_yaml("hosts: a"),
            Err(DiscoveryError::Yaml(_))
        ));
    }

    #[test]
    fn test_from_yaml_empty_file() {
        assert_eq!(
            ClusterOptions::from_yaml("").unwrap(),
            ClusterOptions::default()
        );
    }

    #[test]
    fn test_load_missing_file() {
        let result = ClusterOptions::load_from(Path::new("/nonexistent/juju-nodes.yaml"));
        assert!(matches!(result, Err(DiscoveryError::ConfigNotFound(_))));
    }

    #[test]
    fn test_option_help_uses_prefix() {
        let help = option_help();
        assert_eq!(help.len(), OPTION_TABLE.len());
        assert!(help.iter().all(|line| line.starts_with("juju.")));
        assert!(help[0].starts_with("juju.apps "));
        assert!(help[0].ends_with("(comma separated regex)."));
    }

    #[test]
    fn test_option_table_covers_options() {
        let mut options = ClusterOptions::default();
        for (name, _) in OPTION_TABLE {
            options.set(name, "x").unwrap();
        }
        assert_eq!(options.apps, "x");
        assert_eq!(options.machines, "x");
    }
}
