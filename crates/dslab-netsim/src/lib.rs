#![warn(missing_docs)]
//! Packet network simulator with traced routing algorithms.
//!
//! The crate provides:
//! - an undirected weighted [`Topology`] and a loader for the text edge-list format ([`loader`]);
//! - [`routing`] algorithms (Dijkstra, Bellman-Ford, Floyd-Warshall, Prim, Kruskal) returning their step traces;
//! - a discrete-time [`NetworkSimulator`] moving packets along precomputed routes through buffer-limited nodes.

pub mod config;
pub mod error;
pub mod events;
pub mod link;
pub mod loader;
pub mod log;
pub mod metrics;
pub mod node;
pub mod packet;
pub mod routing;
pub mod simulator;
pub mod snapshot;
pub mod topology;

pub use colored;

pub use config::SimulationConfig;
pub use error::{ConfigError, RoutingError, TopologyError};
pub use events::SimEvent;
pub use link::{Link, LinkId};
pub use metrics::{Metrics, MetricsReport};
pub use node::{Node, NodeId};
pub use packet::{Packet, PacketId, PacketStatus};
pub use routing::{PathAlgorithm, PathResult, SpanningTree, StepRecord, TreeAlgorithm};
pub use simulator::NetworkSimulator;
pub use snapshot::{LinkUtilization, NetworkSnapshot, NodeSnapshot};
pub use topology::Topology;
