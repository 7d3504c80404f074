//! Routing algorithms.
//!
//! All algorithms are pure functions of the topology. Whenever several candidates are equally good,
//! the one coming first in the topology insertion order wins, so results and traces are reproducible.

mod bellman_ford;
mod dijkstra;
mod floyd_warshall;
mod kruskal;
mod prim;
mod shortest_path;
mod trace;
pub mod union_find;

use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::RoutingError;
use crate::node::NodeId;
use crate::topology::Topology;

pub use bellman_ford::BellmanFord;
pub use dijkstra::Dijkstra;
pub use floyd_warshall::{AllPairsResult, FloydWarshall};
pub use kruskal::Kruskal;
pub use prim::Prim;
pub use shortest_path::ShortestPath;
pub use trace::StepRecord;

/// Calculates a path between a pair of nodes.
pub trait RoutingAlgorithm {
    /// Returns a path from node `src` to node `dst` along with the distances from `src` and the step trace.
    fn find_path(&self, topology: &Topology, src: &str, dst: &str) -> PathResult;
}

/// Calculates a minimum spanning tree (forest) of the whole topology.
pub trait SpanningTreeAlgorithm {
    /// Returns the spanning tree along with the step trace.
    fn spanning_tree(&self, topology: &Topology) -> SpanningTree;
}

// Results -------------------------------------------------------------------------------------------------------------

/// Result of a point-to-point path query.
#[derive(Clone, Debug, Serialize)]
pub struct PathResult {
    /// Path from source to target (both included), or `None` if there is no usable path.
    pub path: Option<Vec<String>>,
    /// Distances from the source to every node (infinite for unreached nodes).
    pub distances: IndexMap<String, f64>,
    /// Step trace.
    pub steps: Vec<StepRecord>,
}

impl PathResult {
    pub(crate) fn not_found(topology: &Topology) -> Self {
        Self {
            path: None,
            distances: topology.node_names().map(|name| (name.to_string(), f64::INFINITY)).collect(),
            steps: Vec::new(),
        }
    }

    /// Returns the distance from the source to the node.
    pub fn distance(&self, node: &str) -> Option<f64> {
        self.distances.get(node).copied()
    }

    /// Returns the distance to the last node of the path.
    pub fn path_distance(&self) -> Option<f64> {
        self.path.as_ref()?.last().and_then(|target| self.distance(target))
    }
}

/// Link of a spanning tree.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TreeEdge {
    /// First endpoint.
    pub node1: String,
    /// Second endpoint.
    pub node2: String,
    /// Link weight.
    pub weight: f64,
}

/// Result of a spanning tree computation.
///
/// Contains every topology node, so for a disconnected topology this is a spanning forest.
#[derive(Clone, Debug, Serialize)]
pub struct SpanningTree {
    /// Tree nodes.
    pub nodes: Vec<String>,
    /// Tree edges in the order they were added.
    pub edges: Vec<TreeEdge>,
    /// Step trace.
    pub steps: Vec<StepRecord>,
}

impl SpanningTree {
    pub(crate) fn empty(topology: &Topology) -> Self {
        Self {
            nodes: topology.node_names().map(|name| name.to_string()).collect(),
            edges: Vec::new(),
            steps: Vec::new(),
        }
    }

    pub(crate) fn add_edge(&mut self, topology: &Topology, node1: NodeId, node2: NodeId, weight: f64) {
        let node1 = topology.node_name(node1).to_string();
        let node2 = topology.node_name(node2).to_string();
        self.steps.push(StepRecord::AddEdge {
            node1: node1.clone(),
            node2: node2.clone(),
            weight,
        });
        self.edges.push(TreeEdge { node1, node2, weight });
    }

    /// Sum of edge weights.
    pub fn total_weight(&self) -> f64 {
        self.edges.iter().map(|edge| edge.weight).sum()
    }
}

// Helpers -------------------------------------------------------------------------------------------------------------

pub(crate) fn resolve_endpoints(topology: &Topology, src: &str, dst: &str) -> Option<(NodeId, NodeId)> {
    Some((topology.node_id(src)?, topology.node_id(dst)?))
}

pub(crate) fn distance_map(topology: &Topology, distances: &[f64]) -> IndexMap<String, f64> {
    topology
        .node_names()
        .zip(distances.iter())
        .map(|(name, distance)| (name.to_string(), *distance))
        .collect()
}

/// Walks predecessor pointers from `dst` back to `src`.
///
/// Returns `None` if the chain does not end at `src` or loops.
pub(crate) fn reconstruct_path(
    topology: &Topology,
    predecessors: &[Option<NodeId>],
    src: NodeId,
    dst: NodeId,
) -> Option<Vec<String>> {
    let mut path = vec![dst];
    let mut current = dst;
    while let Some(prev) = predecessors[current] {
        if path.len() > predecessors.len() {
            return None;
        }
        path.push(prev);
        current = prev;
    }
    if current != src {
        return None;
    }
    Some(path.iter().rev().map(|node| topology.node_name(*node).to_string()).collect())
}

// Algorithm selection -------------------------------------------------------------------------------------------------

/// Point-to-point routing algorithm, selectable by name.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PathAlgorithm {
    /// Dijkstra's algorithm (`dijkstra`).
    #[default]
    Dijkstra,
    /// Bellman-Ford algorithm (`bellman_ford`).
    BellmanFord,
    /// Floyd-Warshall algorithm (`floyd_warshall`).
    FloydWarshall,
    /// Generic weighted shortest path, used for any other name.
    ShortestPath,
}

impl PathAlgorithm {
    /// Resolves the algorithm by name, falling back to [`PathAlgorithm::ShortestPath`] for unknown names.
    pub fn from_name(name: &str) -> Self {
        match name {
            "dijkstra" => PathAlgorithm::Dijkstra,
            "bellman_ford" => PathAlgorithm::BellmanFord,
            "floyd_warshall" => PathAlgorithm::FloydWarshall,
            _ => PathAlgorithm::ShortestPath,
        }
    }

    /// Algorithm name.
    pub fn name(&self) -> &'static str {
        match self {
            PathAlgorithm::Dijkstra => "dijkstra",
            PathAlgorithm::BellmanFord => "bellman_ford",
            PathAlgorithm::FloydWarshall => "floyd_warshall",
            PathAlgorithm::ShortestPath => "shortest_path",
        }
    }

    /// Creates the algorithm implementation.
    pub fn build(&self) -> Box<dyn RoutingAlgorithm> {
        match self {
            PathAlgorithm::Dijkstra => Box::new(Dijkstra),
            PathAlgorithm::BellmanFord => Box::new(BellmanFord),
            PathAlgorithm::FloydWarshall => Box::new(FloydWarshall),
            PathAlgorithm::ShortestPath => Box::new(ShortestPath),
        }
    }
}

impl FromStr for PathAlgorithm {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

impl From<String> for PathAlgorithm {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<PathAlgorithm> for String {
    fn from(algorithm: PathAlgorithm) -> Self {
        algorithm.name().to_string()
    }
}

impl Display for PathAlgorithm {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Spanning tree algorithm, selectable by name.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TreeAlgorithm {
    /// Prim's algorithm (`prim_mst`).
    Prim,
    /// Kruskal's algorithm (`kruskal_mst`).
    Kruskal,
}

impl TreeAlgorithm {
    /// Resolves the algorithm by name.
    pub fn from_name(name: &str) -> Result<Self, RoutingError> {
        match name {
            "prim_mst" => Ok(TreeAlgorithm::Prim),
            "kruskal_mst" => Ok(TreeAlgorithm::Kruskal),
            _ => Err(RoutingError::UnknownAlgorithm(name.to_string())),
        }
    }

    /// Algorithm name.
    pub fn name(&self) -> &'static str {
        match self {
            TreeAlgorithm::Prim => "prim_mst",
            TreeAlgorithm::Kruskal => "kruskal_mst",
        }
    }

    /// Creates the algorithm implementation.
    pub fn build(&self) -> Box<dyn SpanningTreeAlgorithm> {
        match self {
            TreeAlgorithm::Prim => Box::new(Prim),
            TreeAlgorithm::Kruskal => Box::new(Kruskal),
        }
    }
}

impl FromStr for TreeAlgorithm {
    type Err = RoutingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

/// Computes a path between two nodes with the given algorithm.
pub fn find_path(topology: &Topology, src: &str, dst: &str, algorithm: PathAlgorithm) -> PathResult {
    algorithm.build().find_path(topology, src, dst)
}

/// Computes a spanning tree with the given algorithm.
pub fn spanning_tree(topology: &Topology, algorithm: TreeAlgorithm) -> SpanningTree {
    algorithm.build().spanning_tree(topology)
}
