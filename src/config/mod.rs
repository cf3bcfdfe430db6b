// Configuration loading and management.

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::time::Duration;
use tracing::warn;

use crate::model::Probe;

pub mod error;

pub use error::ConfigError;

pub const PROD: &str = "prod";
pub const DEV: &str = "dev";
#[allow(dead_code)]
pub const TEST: &str = "test";

pub const DEFAULT_LISTEN_ADDRESS: &str = ":9001";
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Logs {
    pub level: Option<String>,
}

/// Validated in-memory model: listen address plus named probe groups.
/// Read-only after [`Config::load`] returns.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub env: Option<String>,
    #[serde(rename = "listen_address", default, deserialize_with = "deserialize_nullable_string")]
    pub listen_address: String,
    #[serde(rename = "shutdown_timeout", default, with = "humantime_serde")]
    pub shutdown_timeout: Option<Duration>,
    #[serde(default)]
    pub logs: Option<Logs>,
    #[serde(default, deserialize_with = "deserialize_groups")]
    pub checks: HashMap<String, Vec<Probe>>,
}

// Config trait
pub trait ConfigTrait {
    fn listen_address(&self) -> &str;
    fn socket_address(&self) -> String;
    fn shutdown_timeout(&self) -> Duration;
    fn logs(&self) -> Option<&Logs>;
    fn is_prod(&self) -> bool;
    fn checks(&self) -> &HashMap<String, Vec<Probe>>;
    fn group(&self, name: &str) -> Option<&[Probe]>;
    fn total_probes(&self) -> usize;
}

impl ConfigTrait for Config {
    fn listen_address(&self) -> &str {
        &self.listen_address
    }

    /// Expands the ":port" shorthand into an all-interfaces bind address.
    fn socket_address(&self) -> String {
        if self.listen_address.starts_with(':') {
            format!("0.0.0.0{}", self.listen_address)
        } else {
            self.listen_address.clone()
        }
    }

    fn shutdown_timeout(&self) -> Duration {
        self.shutdown_timeout.unwrap_or(DEFAULT_SHUTDOWN_TIMEOUT)
    }

    fn logs(&self) -> Option<&Logs> {
        self.logs.as_ref()
    }

    fn is_prod(&self) -> bool {
        self.env.as_deref() == Some(PROD)
    }

    fn checks(&self) -> &HashMap<String, Vec<Probe>> {
        &self.checks
    }

    fn group(&self, name: &str) -> Option<&[Probe]> {
        self.checks.get(name).map(Vec::as_slice)
    }

    fn total_probes(&self) -> usize {
        self.checks.values().map(Vec::len).sum()
    }
}

impl Config {
    /// Loads configuration from a YAML file and applies defaults.
    ///
    /// Probe contents are not validated here: a malformed URL only shows up
    /// as a transport failure when the probe is evaluated.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parses a YAML document and applies defaults.
    pub fn parse(data: &str) -> Result<Self, serde_yaml::Error> {
        let mut cfg: Config = if data.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(data)?
        };
        cfg.apply_defaults();
        Ok(cfg)
    }

    fn apply_defaults(&mut self) {
        if self.listen_address.is_empty() {
            self.listen_address = DEFAULT_LISTEN_ADDRESS.to_string();
        }
        if self.env.is_none() {
            self.env = Some(DEV.to_string());
        }
    }

    /// Logs probes that load fine but are likely mistakes. Called once the
    /// logger is installed.
    pub fn warn_questionable_probes(&self) {
        for (group, probes) in &self.checks {
            let mut seen = std::collections::HashSet::new();
            for probe in probes {
                if !seen.insert(probe.name.as_str()) {
                    warn!(
                        component = "config",
                        event = "duplicate_probe_name",
                        group = %group,
                        probe = %probe.name,
                        "probe name is not unique within its group"
                    );
                }
                if probe.expected_status.is_none() {
                    warn!(
                        component = "config",
                        event = "unconstrained_probe",
                        group = %group,
                        probe = %probe.name,
                        "probe has no expected_status, any response status passes"
                    );
                }
            }
        }
    }
}

/// A YAML `null` (`~` or an empty value) reads as an empty string so the
/// usual default applies.
fn deserialize_nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserializes the group mapping, treating `null` as empty and rejecting
/// duplicate group names instead of silently keeping one of them.
fn deserialize_groups<'de, D>(deserializer: D) -> Result<HashMap<String, Vec<Probe>>, D::Error>
where
    D: Deserializer<'de>,
{
    struct GroupsVisitor;

    impl<'de> Visitor<'de> for GroupsVisitor {
        type Value = HashMap<String, Vec<Probe>>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a mapping of group name to a list of checks")
        }

        fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
            Ok(HashMap::new())
        }

        fn visit_none<E: serde::de::Error>(self) -> Result<Self::Value, E> {
            Ok(HashMap::new())
        }

        fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
            d.deserialize_map(self)
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut groups = HashMap::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((name, probes)) = map.next_entry::<String, Option<Vec<Probe>>>()? {
                if groups.contains_key(&name) {
                    return Err(serde::de::Error::custom(format_args!(
                        "duplicate check group {:?}",
                        name
                    )));
                }
                groups.insert(name, probes.unwrap_or_default());
            }
            Ok(groups)
        }
    }

    deserializer.deserialize_option(GroupsVisitor)
}

// Test config is always available for integration tests
mod test_config;
#[allow(dead_code)]
pub use test_config::new_test_config;
