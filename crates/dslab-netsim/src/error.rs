//! Error types.

use thiserror::Error;

/// Failure to load a topology from its textual description.
#[derive(Debug, Error)]
pub enum TopologyError {
    /// Topology file can't be read.
    #[error("can't read topology file {path}: {source}")]
    Io {
        /// Path to the file.
        path: String,
        /// Underlying error.
        source: std::io::Error,
    },
    /// The input has no header line.
    #[error("missing header line with node and edge counts")]
    MissingHeader,
    /// The header line is not a pair of non-negative integers.
    #[error("invalid header '{0}': expected two non-negative integers")]
    InvalidHeader(String),
    /// The input has fewer edge lines than declared in the header.
    #[error("expected {expected} edges, found {found}")]
    MissingEdges {
        /// Edge count from the header.
        expected: usize,
        /// Number of edge lines actually present.
        found: usize,
    },
    /// An edge line is not a triple of integers.
    #[error("line {line}: {reason}")]
    InvalidEdge {
        /// 1-based line number.
        line: usize,
        /// What is wrong with the line.
        reason: String,
    },
    /// An edge references a node outside of `0..N`.
    #[error("line {line}: unknown node {node}")]
    UnknownNode {
        /// 1-based line number.
        line: usize,
        /// Offending node id.
        node: i64,
    },
    /// An edge connects a node to itself.
    #[error("line {line}: self-loop at node {node}")]
    SelfLoop {
        /// 1-based line number.
        line: usize,
        /// Offending node id.
        node: i64,
    },
}

/// Failure to load a simulation config.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file can't be read.
    #[error("can't read config file {path}: {source}")]
    Io {
        /// Path to the file.
        path: String,
        /// Underlying error.
        source: std::io::Error,
    },
    /// Config is not valid YAML or has unexpected fields.
    #[error("can't parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Routing invocation error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RoutingError {
    /// Algorithm name is not recognized.
    #[error("unknown algorithm '{0}'")]
    UnknownAlgorithm(String),
}
