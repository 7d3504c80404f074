//! Simulation config.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::routing::PathAlgorithm;

fn default_buffer_size() -> usize {
    1000
}
fn default_weight() -> f64 {
    1.
}
fn default_capacity() -> f64 {
    100.
}

/// Defaults used when building the network and routing packets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationConfig {
    /// Buffer size of nodes added without an explicit one (default: 1000).
    #[serde(default = "default_buffer_size")]
    pub default_buffer_size: usize,
    /// Weight of links added without an explicit one (default: 1).
    #[serde(default = "default_weight")]
    pub default_weight: f64,
    /// Capacity of links added without an explicit one (default: 100).
    #[serde(default = "default_capacity")]
    pub default_capacity: f64,
    /// Algorithm used to compute packet routes (default: dijkstra).
    #[serde(default)]
    pub routing: PathAlgorithm,
}

impl SimulationConfig {
    /// Parses config from a YAML string.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Reads config from a YAML file.
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_yaml_str(&yaml)
    }

    /// Returns a copy of the config with the given routing algorithm.
    pub fn with_routing(mut self, routing: PathAlgorithm) -> Self {
        self.routing = routing;
        self
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            default_buffer_size: default_buffer_size(),
            default_weight: default_weight(),
            default_capacity: default_capacity(),
            routing: PathAlgorithm::default(),
        }
    }
}
